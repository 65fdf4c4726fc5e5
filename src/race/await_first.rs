use super::RaceAny;
use crate::cancel::CancelToken;
use crate::error::RaceError;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_lite::ready;
use pin_project::pin_project;

/// Wait for the first adapter to deliver a value, then cancel the producers.
///
/// This `struct` is created by the [`await_first`] method on the [`RaceAny`]
/// trait, or by the free [`await_first`][fn@await_first] function. See their
/// documentation for more.
///
/// [`await_first`]: crate::race::RaceAny::await_first
/// [`RaceAny`]: crate::race::RaceAny
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct AwaitFirst<Fut> {
    #[pin]
    race: Fut,
    token: CancelToken,
}

impl<Fut> AwaitFirst<Fut> {
    pub(crate) fn new(race: Fut, token: CancelToken) -> Self {
        Self { race, token }
    }
}

impl<Fut> Future for AwaitFirst<Fut>
where
    Fut: Future<Output = Result<usize, RaceError>>,
{
    type Output = Result<usize, RaceError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let outcome = ready!(this.race.poll(cx));
        this.token.cancel();
        Poll::Ready(outcome)
    }
}

/// Race `attempts` and cancel `token` once the race resolves.
///
/// Shorthand for [`RaceAny::await_first`].
///
/// # Examples
///
/// ```rust
/// use channel_race::cancel::CancelToken;
/// use channel_race::race::await_first;
/// use channel_race::receive::Target;
/// use futures_lite::future::block_on;
/// use futures_lite::stream;
/// use futures_lite::StreamExt as _;
///
/// block_on(async {
///     let token = CancelToken::new();
///     let mut out = None;
///
///     let winner = await_first(
///         token.clone(),
///         vec![
///             Target::new(stream::once(3).boxed_local(), &mut out),
///             Target::new(stream::pending().boxed_local(), &mut None),
///         ],
///     )
///     .await;
///
///     assert_eq!(winner, Ok(0));
///     assert_eq!(out, Some(3));
///     assert!(token.is_cancelled());
/// })
/// ```
pub fn await_first<R>(token: CancelToken, attempts: R) -> AwaitFirst<R::Future>
where
    R: RaceAny,
{
    attempts.await_first(token)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::receive::Target;

    use futures_lite::future::block_on;
    use futures_lite::stream;

    #[test]
    fn cancels_on_win() {
        block_on(async {
            let token = CancelToken::new();
            let mut a = None;
            let mut b = None;
            let res = (
                Target::new(stream::pending::<u8>(), &mut a),
                Target::new(stream::once(1u8), &mut b),
            )
                .await_first(token.clone())
                .await;
            assert_eq!(res, Ok(1));
            assert_eq!(b, Some(1));
            assert!(token.is_cancelled());
        });
    }

    #[test]
    fn cancels_on_exhaustion() {
        block_on(async {
            let token = CancelToken::new();
            let res = vec![Target::discard(stream::empty::<u8>())]
                .await_first(token.clone())
                .await;
            assert_eq!(res, Err(RaceError::Closed));
            assert!(token.is_cancelled());
        });
    }

    #[test]
    fn drop_before_resolution_keeps_token() {
        let token = CancelToken::new();
        let fut = vec![Target::discard(stream::pending::<u8>())].await_first(token.clone());
        drop(fut);
        assert!(!token.is_cancelled());
    }
}
