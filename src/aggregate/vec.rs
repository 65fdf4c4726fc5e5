use super::Aggregate as AggregateTrait;
use crate::utils::{self, trace_event, PollState, PollStates, RandomGenerator, WakerVec};

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures_core::Stream;

/// A stream that aggregates multiple channels into a single channel.
///
/// This `struct` is created by the [`aggregate`] method on the [`Aggregate`]
/// trait. See its documentation for more.
///
/// [`aggregate`]: crate::aggregate::Aggregate::aggregate
/// [`Aggregate`]: crate::aggregate::Aggregate
#[must_use = "streams do nothing unless polled"]
#[pin_project::pin_project]
pub struct Aggregate<S>
where
    S: Stream,
{
    #[pin]
    streams: Vec<S>,
    states: PollStates,
    wakers: WakerVec,
    rng: RandomGenerator,
    closed: usize,
    done: bool,
}

impl<S> Aggregate<S>
where
    S: Stream,
{
    pub(crate) fn new(streams: Vec<S>) -> Self {
        Self {
            states: PollStates::from_elem(PollState::Pending, streams.len()),
            wakers: WakerVec::new(streams.len()),
            rng: RandomGenerator::new(),
            closed: 0,
            done: false,
            streams,
        }
    }
}

impl<S> fmt::Debug for Aggregate<S>
where
    S: Stream + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.streams.iter()).finish()
    }
}

impl<S> Stream for Aggregate<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let len = this.streams.len();
        if *this.closed == len {
            *this.done = true;
            trace_event!(sources = len, "aggregate closed");
            return Poll::Ready(None);
        }

        let mut readiness = this.wakers.readiness();
        readiness.set_waker(cx.waker());

        // Iterate over the sources starting from a random position, so an
        // always-ready source can't starve the ones after it.
        let start = this.rng.generate(len as u32) as usize;
        for index in (0..len).map(|pos| (start + pos).wrapping_rem(len)) {
            if !readiness.any_ready() {
                // Nothing else was woken.
                break;
            }
            if this.states[index].is_consumed() || !readiness.clear_ready(index) {
                continue;
            }

            // Unlock readiness so we don't deadlock when polling.
            drop(readiness);

            let Some(waker) = this.wakers.get(index) else {
                unreachable!("one waker is allocated per source");
            };
            let mut cx = Context::from_waker(waker);
            let Some(stream) = utils::get_pin_mut_from_vec(this.streams.as_mut(), index) else {
                unreachable!("the index is in bounds");
            };

            match stream.poll_next(&mut cx) {
                Poll::Ready(Some(item)) => {
                    // Mark ourselves as ready again because we need to poll
                    // for the next item.
                    this.wakers.readiness().set_ready(index);
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => {
                    this.states[index].set_consumed();
                    *this.closed += 1;
                    trace_event!(source = index, "aggregate source closed");
                    if *this.closed == len {
                        *this.done = true;
                        trace_event!(sources = len, "aggregate closed");
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => {}
            }

            readiness = this.wakers.readiness();
        }

        Poll::Pending
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let mut low = 0usize;
        let mut high = Some(0usize);
        for (stream, state) in self.streams.iter().zip(self.states.iter()) {
            if state.is_consumed() {
                continue;
            }
            let (l, h) = stream.size_hint();
            low = low.saturating_add(l);
            high = match (high, h) {
                (Some(a), Some(b)) => a.checked_add(b),
                _ => None,
            };
        }
        (low, high)
    }
}

impl<S> AggregateTrait for Vec<S>
where
    S: Stream,
{
    type Item = S::Item;
    type Stream = Aggregate<S>;

    fn aggregate(self) -> Self::Stream {
        Aggregate::new(self)
    }
}
