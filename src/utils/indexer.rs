use core::ops;

use super::RandomGenerator;

/// Generate an iteration sequence. This provides *fair* iteration when multiple
/// futures or streams need to be polled concurrently.
///
/// Every call to [`Indexer::iter`] starts one position further along than the
/// previous one, and the very first starting position is random.
#[derive(Debug)]
pub(crate) struct Indexer {
    offset: usize,
    max: usize,
}

impl Indexer {
    pub(crate) fn new(max: usize) -> Self {
        let offset = RandomGenerator::new().generate(max as u32) as usize;
        Self { offset, max }
    }

    /// Generate a range between `0..max`, incrementing the starting point
    /// for the next iteration.
    pub(crate) fn iter(&mut self) -> IndexIter {
        let offset = self.offset;
        if self.max > 0 {
            self.offset = (self.offset + 1).wrapping_rem(self.max);
        }

        IndexIter {
            iter: (0..self.max),
            offset,
            max: self.max,
        }
    }
}

pub(crate) struct IndexIter {
    iter: ops::Range<usize>,
    offset: usize,
    max: usize,
}

impl Iterator for IndexIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|pos| (pos + self.offset).wrapping_rem(self.max))
    }
}
