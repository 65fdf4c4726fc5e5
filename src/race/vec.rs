use super::RaceAny as RaceAnyTrait;
use crate::error::RaceError;
use crate::receive::{Attempt, Completion};
use crate::utils::{self, trace_event, PollState, PollStates, RandomGenerator, WakerVec};

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project::pin_project;

/// Wait for the first of a runtime-sized set of adapters to deliver a value.
///
/// Every adapter gets its own waker, and only adapters which were woken since
/// the last poll are polled again.
///
/// This `struct` is created by the [`race_any`] method on the [`RaceAny`]
/// trait. See its documentation for more.
///
/// [`race_any`]: crate::race::RaceAny::race_any
/// [`RaceAny`]: crate::race::RaceAny
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct RaceAny<A>
where
    A: Attempt,
{
    #[pin]
    attempts: Vec<A>,
    states: PollStates,
    wakers: WakerVec,
    rng: RandomGenerator,
    closed: usize,
    done: bool,
}

impl<A> RaceAny<A>
where
    A: Attempt,
{
    pub(crate) fn new(attempts: Vec<A>) -> Self {
        Self {
            states: PollStates::from_elem(PollState::Pending, attempts.len()),
            wakers: WakerVec::new(attempts.len()),
            rng: RandomGenerator::new(),
            closed: 0,
            done: false,
            attempts,
        }
    }
}

impl<A> fmt::Debug for RaceAny<A>
where
    A: Attempt + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceAny")
            .field("attempts", &self.attempts)
            .field("states", &&self.states[..])
            .finish()
    }
}

impl<A> Future for RaceAny<A>
where
    A: Attempt,
{
    type Output = Result<usize, RaceError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        assert!(!*this.done, "Futures must not be polled after completing");

        let len = this.attempts.len();
        if len == 0 {
            *this.done = true;
            trace_event!("race started without participants");
            return Poll::Ready(Err(RaceError::Empty));
        }

        let mut readiness = this.wakers.readiness();
        readiness.set_waker(cx.waker());

        // Start each sweep at a random position so that no adapter is
        // favoured when several are ready at once.
        let start = this.rng.generate(len as u32) as usize;
        for index in (0..len).map(|pos| (start + pos).wrapping_rem(len)) {
            if !readiness.any_ready() {
                // Nothing else was woken.
                break;
            }
            if !this.states[index].is_pending() || !readiness.clear_ready(index) {
                continue;
            }

            // Unlock readiness so we don't deadlock when the adapter wakes
            // itself while being polled.
            drop(readiness);

            let Some(waker) = this.wakers.get(index) else {
                unreachable!("one waker is allocated per adapter");
            };
            let mut cx = Context::from_waker(waker);
            let Some(attempt) = utils::get_pin_mut_from_vec(this.attempts.as_mut(), index) else {
                unreachable!("the index is in bounds");
            };

            match attempt.poll_attempt(&mut cx) {
                Poll::Ready(Completion::Delivered) => {
                    this.states[index].set_ready();
                    *this.done = true;
                    trace_event!(winner = index, participants = len, "race resolved");
                    return Poll::Ready(Ok(index));
                }
                Poll::Ready(Completion::Closed) => {
                    this.states[index].set_consumed();
                    *this.closed += 1;
                    if *this.closed == len {
                        *this.done = true;
                        trace_event!(participants = len, "every racing channel closed");
                        return Poll::Ready(Err(RaceError::Closed));
                    }
                }
                Poll::Pending => {}
            }

            readiness = this.wakers.readiness();
        }

        Poll::Pending
    }
}

impl<A> RaceAnyTrait for Vec<A>
where
    A: Attempt,
{
    type Future = RaceAny<A>;

    fn race_any(self) -> Self::Future {
        RaceAny::new(self)
    }
}
