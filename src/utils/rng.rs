use std::cell::Cell;
use std::num::Wrapping;

/// A small pseudo-random number generator used to pick the position a poll
/// sweep starts from.
///
/// This is the 32-bit variant of Xorshift. It is not cryptographically secure
/// and doesn't need to be.
#[derive(Debug)]
pub(crate) struct RandomGenerator(Cell<Wrapping<u32>>);

impl RandomGenerator {
    /// Create a new generator, seeded from a thread-local sequence.
    pub(crate) fn new() -> Self {
        Self(Cell::new(Wrapping(seed())))
    }

    /// Generate a number in `0..n`. Returns `0` when `n` is `0`.
    pub(crate) fn generate(&self, n: u32) -> u32 {
        let mut x = self.0.get();
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0.set(x);

        // Multiply-shift range reduction, a fast alternative to `x % n`.
        // Source: https://lemire.me/blog/2016/06/27/a-fast-alternative-to-the-modulo-reduction/
        ((u64::from(x.0)).wrapping_mul(u64::from(n)) >> 32) as u32
    }
}

/// Hand out a distinct, non-zero seed per generator.
fn seed() -> u32 {
    thread_local! {
        static SEED: Cell<Wrapping<u32>> = {
            // Take the address of a local value as the initial seed.
            let mut x = 0i32;
            let addr = &mut x as *mut i32 as usize;
            Cell::new(Wrapping(addr as u32 | 1))
        }
    }

    SEED.with(|seed| {
        let next = seed.get() * Wrapping(0x9E37_79B9) + Wrapping(1);
        seed.set(next);
        // Xorshift gets stuck on zero.
        next.0 | 1
    })
}
