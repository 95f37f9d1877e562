//! Poker-style classification of four dice.

use crate::dice::assert_valid_dice;
use crate::types::{Hand, HandKind};

impl HandKind {
    pub fn rank(self) -> u8 {
        match self {
            HandKind::Quad => 5,
            HandKind::Straight => 4,
            HandKind::ThreeOfAKind => 3,
            HandKind::TwoPair => 2,
            HandKind::Pair => 1,
            HandKind::HighCard => 0,
        }
    }

    pub fn damage_multiplier(self) -> f64 {
        match self {
            HandKind::Quad => 3.0,
            HandKind::Straight => 2.5,
            HandKind::ThreeOfAKind => 2.0,
            HandKind::TwoPair => 1.5,
            HandKind::Pair => 1.0,
            HandKind::HighCard => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandKind::Quad => "QUAD!",
            HandKind::Straight => "STRAIGHT!",
            HandKind::ThreeOfAKind => "TRIPS!",
            HandKind::TwoPair => "TWO PAIR!",
            HandKind::Pair => "PAIR!",
            HandKind::HighCard => "HIGH CARD",
        }
    }
}

/// Classifies four dice. Order of the dice does not matter.
///
/// Panics on a wrong dice count or a face outside `1..=6`.
pub fn classify(dice: &[u8]) -> Hand {
    assert_valid_dice(dice);

    let mut counts = [0u8; 7];
    for &die in dice {
        counts[usize::from(die)] += 1;
    }
    let mut freqs: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
    freqs.sort_unstable_by(|a, b| b.cmp(a));

    let mut sorted = dice.to_vec();
    sorted.sort_unstable();
    let distinct_run = sorted.windows(2).all(|pair| pair[1] == pair[0] + 1);

    let kind = match (freqs[0], freqs.get(1).copied()) {
        (4, _) => HandKind::Quad,
        _ if distinct_run => HandKind::Straight,
        (3, _) => HandKind::ThreeOfAKind,
        (2, Some(2)) => HandKind::TwoPair,
        (2, _) => HandKind::Pair,
        _ => HandKind::HighCard,
    };
    Hand { kind, rank: kind.rank() }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn all_rolls() -> impl Iterator<Item = [u8; 4]> {
        (0..6u32.pow(4)).map(|n| {
            [(n % 6) as u8 + 1, (n / 6 % 6) as u8 + 1, (n / 36 % 6) as u8 + 1, (n / 216) as u8 + 1]
        })
    }

    #[test]
    fn every_roll_lands_in_the_expected_bucket_counts() {
        let mut counts = BTreeMap::new();
        for roll in all_rolls() {
            *counts.entry(classify(&roll).kind).or_insert(0u32) += 1;
        }
        assert_eq!(counts[&HandKind::Quad], 6);
        assert_eq!(counts[&HandKind::Straight], 72);
        assert_eq!(counts[&HandKind::ThreeOfAKind], 120);
        assert_eq!(counts[&HandKind::TwoPair], 90);
        assert_eq!(counts[&HandKind::Pair], 720);
        assert_eq!(counts[&HandKind::HighCard], 288);
        assert_eq!(counts.values().sum::<u32>(), 1296);
    }

    #[test]
    fn classification_ignores_order() {
        for roll in all_rolls() {
            let mut reversed = roll;
            reversed.reverse();
            let mut rotated = roll;
            rotated.rotate_left(1);
            let hand = classify(&roll);
            assert_eq!(hand, classify(&reversed));
            assert_eq!(hand, classify(&rotated));
        }
    }

    #[test]
    fn rank_follows_kind() {
        assert_eq!(classify(&[6, 6, 6, 6]), Hand { kind: HandKind::Quad, rank: 5 });
        assert_eq!(classify(&[5, 3, 2, 4]), Hand { kind: HandKind::Straight, rank: 4 });
        assert_eq!(classify(&[2, 2, 2, 5]), Hand { kind: HandKind::ThreeOfAKind, rank: 3 });
        assert_eq!(classify(&[3, 3, 5, 5]), Hand { kind: HandKind::TwoPair, rank: 2 });
        assert_eq!(classify(&[1, 1, 4, 6]), Hand { kind: HandKind::Pair, rank: 1 });
        assert_eq!(classify(&[1, 2, 4, 6]), Hand { kind: HandKind::HighCard, rank: 0 });
    }

    #[test]
    fn repeated_value_never_makes_a_straight() {
        assert_eq!(classify(&[2, 3, 3, 4]).kind, HandKind::Pair);
        assert_eq!(classify(&[1, 2, 3, 5]).kind, HandKind::HighCard);
    }

    #[test]
    #[should_panic(expected = "outside 1..=6")]
    fn seven_is_a_contract_violation() {
        classify(&[7, 1, 1, 1]);
    }
}
