//! Random source seam for dice, spawn pools and intent weighting.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub trait RollSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn roll_die(&mut self) -> u8 {
        1 + (self.next_unit() * 6.0) as u8
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty slice");
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

impl RollSource for ChaCha8Rng {
    fn next_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn chacha_dice_stay_in_range_and_cover_all_faces() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut seen = [0u32; 6];
        for _ in 0..6000 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] += 1;
        }
        assert!(seen.iter().all(|&count| count > 800), "faces skewed: {seen:?}");
    }

    #[test]
    fn pick_index_never_reaches_len() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut left = ChaCha8Rng::seed_from_u64(77);
        let mut right = ChaCha8Rng::seed_from_u64(77);
        let a: Vec<u8> = (0..32).map(|_| left.roll_die()).collect();
        let b: Vec<u8> = (0..32).map(|_| right.roll_die()).collect();
        assert_eq!(a, b);
    }
}
