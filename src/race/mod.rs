//! Race receive adapters against each other.
//!
//! [`RaceAny`] resolves with the position of the first adapter to receive a
//! value. [`await_first`][fn@await_first] does the same and then cancels the
//! producers through a [`CancelToken`].

use core::future::Future;

use crate::cancel::CancelToken;
use crate::error::RaceError;

pub(crate) mod array;
pub(crate) mod await_first;
pub(crate) mod tuple;
pub(crate) mod vec;

pub use await_first::{await_first, AwaitFirst};

/// Wait for the first receive adapter to deliver a value.
///
/// Polls every adapter concurrently and resolves as soon as one of them has
/// received a value, with the position of that adapter. The adapters that
/// lost are never polled again: whatever their channels produce afterwards is
/// left in the channel. Their producers are not told about it; see
/// [`await_first`][RaceAny::await_first] for a variant which signals them.
///
/// Adapters whose channel closes drop out of the race. The race fails with
/// [`RaceError::Closed`] if every adapter closes, and with
/// [`RaceError::Empty`] if there are no adapters at all.
///
/// When several channels are ready at the same time it is unspecified which
/// one wins, but exactly one output slot is ever written.
pub trait RaceAny {
    /// The [`Future`] implementation returned by this method.
    type Future: Future<Output = Result<usize, RaceError>>;

    /// Wait for the first adapter to deliver a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use channel_race::prelude::*;
    /// use channel_race::receive::Target;
    /// use futures_lite::future::block_on;
    /// use futures_lite::stream;
    ///
    /// block_on(async {
    ///     let mut word = None;
    ///     let mut number = None;
    ///
    ///     let winner = (
    ///         Target::new(stream::pending::<&str>(), &mut word),
    ///         Target::new(stream::once(12), &mut number),
    ///     )
    ///         .race_any()
    ///         .await;
    ///
    ///     assert_eq!(winner, Ok(1));
    ///     assert_eq!(word, None);
    ///     assert_eq!(number, Some(12));
    /// })
    /// ```
    fn race_any(self) -> Self::Future;

    /// Wait for the first adapter to deliver a value, then cancel `token`.
    ///
    /// The token is cancelled as soon as the race resolves, whatever the
    /// outcome. Producers listening on [`CancelToken::cancelled`] can use it to
    /// stop sending. Dropping the returned future before it resolves leaves
    /// the token untouched.
    fn await_first(self, token: CancelToken) -> AwaitFirst<Self::Future>
    where
        Self: Sized,
    {
        AwaitFirst::new(self.race_any(), token)
    }
}
