//! Receive adapters: a channel paired with an optional destination for the
//! next value it produces.
//!
//! Any [`Stream`] can serve as a channel. A `Poll::Ready(Some(value))` is a
//! received value, and a `Poll::Ready(None)` means the channel was closed.

use core::fmt;
use core::future::Future;
use core::ops::DerefMut;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::Stream;
use futures_lite::ready;
use pin_project::pin_project;

use crate::utils::trace_event;

/// How a single receive attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    /// A value was received. It was written to the adapter's slot if it has
    /// one, and dropped otherwise.
    Delivered,
    /// The channel was closed before it produced a value.
    Closed,
}

impl Completion {
    /// Returns `true` if a value was received.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Completion::Delivered)
    }

    /// Returns `true` if the channel closed first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Completion::Closed)
    }
}

/// Something that can attempt to receive a single value.
///
/// This is the participant type of [`RaceAny`][crate::race::RaceAny]. The
/// trait is object safe, so participants of different types can be raced
/// together as a `Vec<BoxAttempt<'_>>`.
pub trait Attempt {
    /// Attempt to complete, registering the current task for wakeup if the
    /// underlying channel has nothing yet.
    ///
    /// Once this has returned `Poll::Ready`, further calls must not receive
    /// another value.
    fn poll_attempt(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion>;
}

/// A type-erased, heap-allocated [`Attempt`].
pub type BoxAttempt<'a> = Pin<Box<dyn Attempt + 'a>>;

impl<A> Attempt for &mut A
where
    A: Attempt + Unpin + ?Sized,
{
    fn poll_attempt(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion> {
        A::poll_attempt(Pin::new(&mut **self), cx)
    }
}

impl<A> Attempt for Box<A>
where
    A: Attempt + Unpin + ?Sized,
{
    fn poll_attempt(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion> {
        A::poll_attempt(Pin::new(&mut **self), cx)
    }
}

impl<P> Attempt for Pin<P>
where
    P: DerefMut + Unpin,
    P::Target: Attempt,
{
    fn poll_attempt(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion> {
        self.get_mut().as_mut().poll_attempt(cx)
    }
}

/// A receive adapter: waits for the next value of a channel and writes it
/// into a caller-owned slot.
///
/// The adapter is single-shot. After it has completed it never polls the
/// channel again and never writes the slot again, so at most one value is
/// ever taken from the channel.
///
/// The adapter doesn't need to own the channel: a `&mut S` of an `Unpin`
/// stream is a stream too.
///
/// # Examples
///
/// ```
/// use channel_race::receive::{Completion, Target};
/// use futures_lite::future::block_on;
/// use futures_lite::stream;
///
/// block_on(async {
///     let mut channel = stream::iter(vec![1, 2, 3]);
///     let mut out = None;
///
///     let completion = Target::new(&mut channel, &mut out).await;
///     assert_eq!(completion, Completion::Delivered);
///     assert_eq!(out, Some(1));
/// })
/// ```
#[must_use = "adapters do nothing unless raced, polled or `.await`ed"]
#[pin_project]
pub struct Target<'a, S>
where
    S: Stream,
{
    #[pin]
    stream: S,
    slot: Option<&'a mut Option<S::Item>>,
    completion: Option<Completion>,
}

impl<'a, S> Target<'a, S>
where
    S: Stream,
{
    /// Pair `stream` with `slot`. The received value, if any, is written to
    /// `slot`.
    pub fn new(stream: S, slot: &'a mut Option<S::Item>) -> Self {
        Self {
            stream,
            slot: Some(slot),
            completion: None,
        }
    }

    /// An adapter without a slot. Winning a race with it tells the caller
    /// which channel fired first, but the value itself is dropped.
    pub fn discard(stream: S) -> Self {
        Self {
            stream,
            slot: None,
            completion: None,
        }
    }

    /// Returns `true` if this adapter writes into a slot.
    pub fn has_slot(&self) -> bool {
        self.slot.is_some()
    }

    /// How this adapter completed, or `None` if it hasn't yet.
    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    /// Box and pin the adapter so it can be raced alongside adapters of
    /// other types.
    pub fn boxed(self) -> BoxAttempt<'a>
    where
        S: 'a,
    {
        Box::pin(self)
    }

    /// Give back the underlying channel.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> fmt::Debug for Target<'_, S>
where
    S: Stream + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("stream", &self.stream)
            .field("has_slot", &self.slot.is_some())
            .field("completion", &self.completion)
            .finish()
    }
}

impl<S> Attempt for Target<'_, S>
where
    S: Stream,
{
    fn poll_attempt(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion> {
        let this = self.project();
        if let Some(completion) = *this.completion {
            return Poll::Ready(completion);
        }

        let completion = match ready!(this.stream.poll_next(cx)) {
            Some(value) => {
                if let Some(slot) = this.slot.as_deref_mut() {
                    *slot = Some(value);
                }
                Completion::Delivered
            }
            None => Completion::Closed,
        };
        trace_event!(?completion, "receive attempt completed");
        *this.completion = Some(completion);
        Poll::Ready(completion)
    }
}

impl<S> Future for Target<'_, S>
where
    S: Stream,
{
    type Output = Completion;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.poll_attempt(cx)
    }
}

/// Pair `stream` with `slot`. Shorthand for [`Target::new`].
pub fn receive_into<S>(stream: S, slot: &mut Option<S::Item>) -> Target<'_, S>
where
    S: Stream,
{
    Target::new(stream, slot)
}
