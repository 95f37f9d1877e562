//! Weighted pick of the enemy's next declared action.

use crate::rng::RollSource;
use crate::state::EnemyAction;
use crate::types::Intent;

/// Weights are relative and need not sum to 100.
///
/// Panics on an empty action list.
pub fn roll_intent(actions: &[EnemyAction], rng: &mut impl RollSource) -> Intent {
    assert!(!actions.is_empty(), "enemy has no actions to choose from");

    let total: u64 = actions.iter().map(|a| u64::from(a.weight)).sum();
    let mut roll = rng.next_unit() * total as f64;
    for action in actions {
        roll -= f64::from(action.weight);
        if roll <= 0.0 {
            return Intent { kind: action.kind, value: action.value };
        }
    }

    // Only reachable through float rounding at the top of the range.
    let first = actions[0];
    Intent { kind: first.kind, value: first.value }
}
