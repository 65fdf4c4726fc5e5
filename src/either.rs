//! A value of one of two types.
//!
//! [`Either`] is a closed sum type: a value is a [`Left`][Either::Left] or a
//! [`Right`][Either::Right] and nothing else, and `match` on it is checked
//! for exhaustiveness. It is the item type of
//! [`aggregate_either`][crate::aggregate::aggregate_either], which merges two
//! channels carrying different types.

use core::fmt;

/// A value of type `L` or of type `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// A value of the left type.
    Left(L),
    /// A value of the right type.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a [`Left`][Either::Left].
    #[must_use]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a [`Right`][Either::Right].
    #[must_use]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// The left value, if there is one.
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// The right value, if there is one.
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Borrow the contained value.
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Apply `f` to a left value, leaving a right value untouched.
    pub fn map_left<M, F>(self, f: F) -> Either<M, R>
    where
        F: FnOnce(L) -> M,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Apply `f` to a right value, leaving a left value untouched.
    pub fn map_right<M, F>(self, f: F) -> Either<L, M>
    where
        F: FnOnce(R) -> M,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Handle both cases, producing a single value.
    ///
    /// ```
    /// use channel_race::either::Either;
    ///
    /// let value: Either<&str, u32> = Either::Right(2);
    /// let text = value.either(|s| s.to_owned(), |n| n.to_string());
    /// assert_eq!(text, "2");
    /// ```
    pub fn either<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Swap the sides.
    pub fn flip(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }
}

impl<T> Either<T, T> {
    /// Extract the value when both sides have the same type.
    pub fn into_inner(self) -> T {
        match self {
            Either::Left(t) | Either::Right(t) => t,
        }
    }
}

impl<L, R> fmt::Display for Either<L, R>
where
    L: fmt::Display,
    R: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Left(l) => l.fmt(f),
            Either::Right(r) => r.fmt(f),
        }
    }
}
