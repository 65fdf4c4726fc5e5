use smallvec::SmallVec;

/// Enumerate the current poll state of a participant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum PollState {
    /// Still being polled.
    #[default]
    Pending,
    /// Produced the value that resolved the whole operation.
    Ready,
    /// The underlying source closed and must not be polled again.
    Consumed,
}

impl PollState {
    /// Returns `true` if the poll state is [`Pending`][Self::Pending].
    #[must_use]
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if the poll state is [`Ready`][Self::Ready].
    #[must_use]
    #[inline]
    #[allow(unused)]
    pub(crate) fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if the poll state is [`Consumed`][Self::Consumed].
    #[must_use]
    #[inline]
    pub(crate) fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// Sets the poll state to [`Ready`][Self::Ready].
    #[inline]
    pub(crate) fn set_ready(&mut self) {
        *self = PollState::Ready;
    }

    /// Sets the poll state to [`Consumed`][Self::Consumed].
    #[inline]
    pub(crate) fn set_consumed(&mut self) {
        *self = PollState::Consumed;
    }
}

/// Poll states for a runtime-sized set of participants. Small sets are stored
/// inline.
pub(crate) type PollStates = SmallVec<[PollState; 16]>;
