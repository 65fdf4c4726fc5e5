use super::Aggregate as AggregateTrait;
use crate::utils::{self, trace_event, PollState};

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures_core::Stream;

use pin_project::pin_project;

macro_rules! impl_aggregate_tuple {
    ($StructName:ident $($F:ident)+) => {
        /// A stream that aggregates a tuple of channels into a single channel.
        ///
        /// This `struct` is created by the [`aggregate`] method on the
        /// [`Aggregate`] trait. See its documentation for more.
        ///
        /// [`aggregate`]: crate::aggregate::Aggregate::aggregate
        /// [`Aggregate`]: crate::aggregate::Aggregate
        #[pin_project]
        #[must_use = "streams do nothing unless polled"]
        #[allow(non_snake_case)]
        pub struct $StructName<T, $($F),*>
        where $(
            $F: Stream<Item = T>,
        )* {
            done: bool,
            closed: usize,
            indexer: utils::Indexer,
            states: [PollState; utils::tuple_len!($($F,)*)],
            $(#[pin] $F: $F,)*
        }

        impl<T, $($F),*> fmt::Debug for $StructName<T, $($F),*>
        where $(
            $F: Stream<Item = T> + fmt::Debug,
        )* {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple("Aggregate")
                    $(.field(&self.$F))*
                    .finish()
            }
        }

        impl<T, $($F),*> AggregateTrait for ($($F,)*)
        where $(
            $F: Stream<Item = T>,
        )* {
            type Item = T;
            type Stream = $StructName<T, $($F),*>;

            fn aggregate(self) -> Self::Stream {
                let ($($F,)*): ($($F,)*) = self;
                $StructName {
                    done: false,
                    closed: 0,
                    indexer: utils::Indexer::new(utils::tuple_len!($($F,)*)),
                    states: [PollState::Pending; utils::tuple_len!($($F,)*)],
                    $($F),*
                }
            }
        }

        impl<T, $($F),*> Stream for $StructName<T, $($F),*>
        where $(
            $F: Stream<Item = T>,
        )* {
            type Item = T;

            fn poll_next(
                self: Pin<&mut Self>, cx: &mut Context<'_>
            ) -> Poll<Option<Self::Item>> {
                let mut this = self.project();
                if *this.done {
                    return Poll::Ready(None);
                }

                const LEN: usize = utils::tuple_len!($($F,)*);

                #[repr(usize)]
                enum Indexes {
                    $($F),*
                }

                for index in this.indexer.iter() {
                    if this.states[index].is_consumed() {
                        continue;
                    }

                    let poll = $(
                        if index == Indexes::$F as usize {
                            this.$F.as_mut().poll_next(cx)
                        } else
                    )* {
                        unreachable!("the index is in bounds")
                    };

                    match poll {
                        Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                        Poll::Ready(None) => {
                            this.states[index].set_consumed();
                            *this.closed += 1;
                            trace_event!(source = index, "aggregate source closed");
                        }
                        Poll::Pending => {}
                    }
                }

                if *this.closed == LEN {
                    *this.done = true;
                    trace_event!(sources = LEN, "aggregate closed");
                    return Poll::Ready(None);
                }

                Poll::Pending
            }
        }
    };
}

impl_aggregate_tuple! { Aggregate1 A }
impl_aggregate_tuple! { Aggregate2 A B }
impl_aggregate_tuple! { Aggregate3 A B C }
impl_aggregate_tuple! { Aggregate4 A B C D }
impl_aggregate_tuple! { Aggregate5 A B C D E }
impl_aggregate_tuple! { Aggregate6 A B C D E F }
impl_aggregate_tuple! { Aggregate7 A B C D E F G }
impl_aggregate_tuple! { Aggregate8 A B C D E F G H }
impl_aggregate_tuple! { Aggregate9 A B C D E F G H I }
impl_aggregate_tuple! { Aggregate10 A B C D E F G H I J }
impl_aggregate_tuple! { Aggregate11 A B C D E F G H I J K }
impl_aggregate_tuple! { Aggregate12 A B C D E F G H I J K L }
