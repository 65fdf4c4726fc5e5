use super::vec::Aggregate;
use super::Aggregate as AggregateTrait;

use futures_core::Stream;

/// Arrays are aggregated with the same per-source wakers as vecs, so they
/// share the [`Aggregate`] stream.
impl<S, const N: usize> AggregateTrait for [S; N]
where
    S: Stream,
{
    type Item = S::Item;
    type Stream = Aggregate<S>;

    fn aggregate(self) -> Self::Stream {
        Aggregate::new(Vec::from(self))
    }
}
