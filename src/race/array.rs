use super::vec::RaceAny;
use super::RaceAny as RaceAnyTrait;
use crate::receive::Attempt;

/// Arrays are raced with the same readiness tracking as vecs, so they share
/// the [`RaceAny`] future.
impl<A, const N: usize> RaceAnyTrait for [A; N]
where
    A: Attempt,
{
    type Future = RaceAny<A>;

    fn race_any(self) -> Self::Future {
        RaceAny::new(Vec::from(self))
    }
}
