//! The four dice, their lock flags and lock-respecting re-rolls.

use serde::{Deserialize, Serialize};

use crate::rng::RollSource;

pub const DICE_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    values: [u8; DICE_COUNT],
    locked: [bool; DICE_COUNT],
    has_rolled: bool,
}

impl Default for DiceSet {
    fn default() -> Self {
        Self { values: [1; DICE_COUNT], locked: [false; DICE_COUNT], has_rolled: false }
    }
}

impl DiceSet {
    /// Builds a set that counts as already rolled this turn.
    ///
    /// Panics if any value is outside `1..=6`.
    pub fn rolled(values: [u8; DICE_COUNT]) -> Self {
        assert_valid_dice(&values);
        Self { values, locked: [false; DICE_COUNT], has_rolled: true }
    }

    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.values
    }

    pub fn locked(&self) -> [bool; DICE_COUNT] {
        self.locked
    }

    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    pub fn pip_sum(&self) -> i32 {
        self.values.iter().map(|&v| i32::from(v)).sum()
    }

    pub fn roll(&mut self, rng: &mut impl RollSource) {
        for (value, locked) in self.values.iter_mut().zip(self.locked) {
            if !locked {
                *value = rng.roll_die();
            }
        }
        assert_valid_dice(&self.values);
        self.has_rolled = true;
    }

    /// Flips the lock at `index` and returns the new flag. Callers check the index.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.locked[index] = !self.locked[index];
        self.locked[index]
    }

    pub fn start_turn(&mut self) {
        self.locked = [false; DICE_COUNT];
        self.has_rolled = false;
    }
}

pub fn assert_valid_dice(values: &[u8]) {
    assert_eq!(values.len(), DICE_COUNT, "expected exactly {DICE_COUNT} dice");
    for &value in values {
        assert!((1..=6).contains(&value), "die value {value} is outside 1..=6");
    }
}
