use crate::either::Either;
use crate::utils::{self, trace_event, PollState};

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures_core::Stream;

use pin_project::pin_project;

/// A stream that aggregates two channels of different types.
///
/// This `struct` is created by the [`aggregate_either`] function. See its
/// documentation for more.
#[must_use = "streams do nothing unless polled"]
#[pin_project]
pub struct AggregateEither<A, B>
where
    A: Stream,
    B: Stream,
{
    #[pin]
    left: A,
    #[pin]
    right: B,
    indexer: utils::Indexer,
    states: [PollState; 2],
}

impl<A, B> fmt::Debug for AggregateEither<A, B>
where
    A: Stream + fmt::Debug,
    B: Stream + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateEither")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<A, B> Stream for AggregateEither<A, B>
where
    A: Stream,
    B: Stream,
{
    type Item = Either<A::Item, B::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        for index in this.indexer.iter() {
            if this.states[index].is_consumed() {
                continue;
            }

            let poll = match index {
                0 => this.left.as_mut().poll_next(cx).map(|o| o.map(Either::Left)),
                _ => this.right.as_mut().poll_next(cx).map(|o| o.map(Either::Right)),
            };

            match poll {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => {
                    this.states[index].set_consumed();
                    trace_event!(source = index, "aggregate source closed");
                }
                Poll::Pending => {}
            }
        }

        if this.states.iter().all(PollState::is_consumed) {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}

/// Combine two channels carrying different types into a single channel of
/// [`Either`] values.
///
/// Like [`Aggregate`][super::Aggregate], no value is dropped, and the stream
/// closes once both channels have closed.
///
/// # Examples
///
/// ```
/// use channel_race::aggregate::aggregate_either;
/// use channel_race::either::Either;
/// use futures_lite::future::block_on;
/// use futures_lite::stream::{self, StreamExt};
///
/// block_on(async {
///     let words = stream::once("1");
///     let numbers = stream::once(2);
///
///     let mut all: Vec<_> = aggregate_either(words, numbers).collect().await;
///     all.sort();
///     assert_eq!(all, vec![Either::Left("1"), Either::Right(2)]);
/// })
/// ```
pub fn aggregate_either<A, B>(left: A, right: B) -> AggregateEither<A, B>
where
    A: Stream,
    B: Stream,
{
    AggregateEither {
        left,
        right,
        indexer: utils::Indexer::new(2),
        states: [PollState::Pending; 2],
    }
}
