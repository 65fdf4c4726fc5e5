use super::RaceAny as RaceAnyTrait;
use crate::error::RaceError;
use crate::receive::{Attempt, Completion};
use crate::utils::{self, trace_event, PollState};

use core::fmt::{self, Debug};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project::pin_project;

macro_rules! impl_race_any_tuple {
    ($StructName:ident $($F:ident)+) => {
        /// A future which waits for the first of a tuple of adapters to
        /// deliver a value.
        ///
        /// This `struct` is created by the [`race_any`] method on the
        /// [`RaceAny`] trait. See its documentation for more.
        ///
        /// [`race_any`]: crate::race::RaceAny::race_any
        /// [`RaceAny`]: crate::race::RaceAny
        #[pin_project]
        #[must_use = "futures do nothing unless you `.await` or poll them"]
        #[allow(non_snake_case)]
        pub struct $StructName<$($F),*>
        where $(
            $F: Attempt,
        )* {
            done: bool,
            closed: usize,
            indexer: utils::Indexer,
            states: [PollState; utils::tuple_len!($($F,)*)],
            $(#[pin] $F: $F,)*
        }

        impl<$($F),*> Debug for $StructName<$($F),*>
        where $(
            $F: Attempt + Debug,
        )* {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple("RaceAny")
                    $(.field(&self.$F))*
                    .finish()
            }
        }

        impl<$($F),*> RaceAnyTrait for ($($F,)*)
        where $(
            $F: Attempt,
        )* {
            type Future = $StructName<$($F),*>;

            fn race_any(self) -> Self::Future {
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

        impl<$($F),*> Future for $StructName<$($F),*>
        where
            $($F: Attempt),*
        {
            type Output = Result<usize, RaceError>;

            fn poll(
                self: Pin<&mut Self>, cx: &mut Context<'_>
            ) -> Poll<Self::Output> {
                let mut this = self.project();
                assert!(!*this.done, "Futures must not be polled after completing");

                const LEN: usize = utils::tuple_len!($($F,)*);

                #[repr(usize)]
                enum Indexes {
                    $($F),*
                }

                for index in this.indexer.iter() {
                    if !this.states[index].is_pending() {
                        continue;
                    }

                    let completion = $(
                        if index == Indexes::$F as usize {
                            this.$F.as_mut().poll_attempt(cx)
                        } else
                    )* {
                        unreachable!("the index is in bounds")
                    };

                    match completion {
                        Poll::Ready(Completion::Delivered) => {
                            this.states[index].set_ready();
                            *this.done = true;
                            trace_event!(winner = index, participants = LEN, "race resolved");
                            return Poll::Ready(Ok(index));
                        }
                        Poll::Ready(Completion::Closed) => {
                            this.states[index].set_consumed();
                            *this.closed += 1;
                        }
                        Poll::Pending => {}
                    }
                }

                if *this.closed == LEN {
                    *this.done = true;
                    trace_event!(participants = LEN, "every racing channel closed");
                    return Poll::Ready(Err(RaceError::Closed));
                }

                Poll::Pending
            }
        }
    };
}

impl_race_any_tuple! { RaceAny1 A }
impl_race_any_tuple! { RaceAny2 A B }
impl_race_any_tuple! { RaceAny3 A B C }
impl_race_any_tuple! { RaceAny4 A B C D }
impl_race_any_tuple! { RaceAny5 A B C D E }
impl_race_any_tuple! { RaceAny6 A B C D E F }
impl_race_any_tuple! { RaceAny7 A B C D E F G }
impl_race_any_tuple! { RaceAny8 A B C D E F G H }
impl_race_any_tuple! { RaceAny9 A B C D E F G H I }
impl_race_any_tuple! { RaceAny10 A B C D E F G H I J }
impl_race_any_tuple! { RaceAny11 A B C D E F G H I J K }
impl_race_any_tuple! { RaceAny12 A B C D E F G H I J K L }
