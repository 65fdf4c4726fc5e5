//! Combine several channels into one.

use futures_core::Stream;

pub(crate) mod array;
pub(crate) mod either;
pub(crate) mod tuple;
pub(crate) mod vec;

pub use either::{aggregate_either, AggregateEither};

/// Combines multiple channels into a single channel of all their values.
///
/// Values are yielded as soon as they're received, and the aggregate keeps
/// going until every source has closed. No value is ever dropped, but the
/// ordering between sources is not guaranteed. Sources are only polled again
/// once they have woken the task, so an idle aggregate costs nothing.
///
/// Aggregating zero sources yields nothing and closes right away.
///
/// # Examples
///
/// ```
/// use channel_race::prelude::*;
/// use futures_lite::stream::{self, StreamExt};
/// use futures_lite::future::block_on;
///
/// block_on(async {
///     let a = stream::once(1);
///     let b = stream::once(2);
///     let c = stream::once(3);
///     let mut s = [a, b, c].aggregate();
///
///     let mut buf = vec![];
///     s.for_each(|n| buf.push(n)).await;
///     buf.sort_unstable();
///     assert_eq!(&buf, &[1, 2, 3]);
/// })
/// ```
pub trait Aggregate {
    /// The resulting output type.
    type Item;

    /// The stream type.
    type Stream: Stream<Item = Self::Item>;

    /// Combine multiple channels into a single channel.
    fn aggregate(self) -> Self::Stream;
}
