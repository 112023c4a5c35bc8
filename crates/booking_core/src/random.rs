//! Injectable randomness for seat occupancy and ticket numbers.

use uuid::Uuid;

pub trait RandomSource: Send {
    /// Uniform draw from `0..bound`; a bound of zero or one always yields zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Unseeded source backed by the OS entropy that v4 uuids are minted from.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidEntropy;

impl RandomSource for UuidEntropy {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let bits = Uuid::new_v4().as_u128() >> 64;
        (bits % u128::from(bound)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_entropy_stays_below_bound() {
        let mut rng = UuidEntropy;
        for bound in [1_u32, 2, 6, 8, 1_000_000] {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound.max(1));
            }
        }
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn uuid_entropy_reaches_every_small_value() {
        let mut rng = UuidEntropy;
        let mut seen = [false; 6];
        for _ in 0..2_000 {
            seen[rng.next_below(6) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
