//! Player strike resolution: hand damage, class rules and enemy shield mitigation.
//!
//! The resolver is a pure function of the dice and the two combatants. It mutates only the
//! `Player` and `Enemy` it is handed, which lets the state machine preview a strike on copies
//! and apply it for real with the same code.

use crate::dice::assert_valid_dice;
use crate::hand::classify;
use crate::state::{Enemy, Kit, MAX_STACKS, Player};
use crate::types::{Hand, HandKind};

const MAGE_BUILD_DAMAGE_PCT: i32 = 60;
const ARCANE_BONUS_PER_STACK: f64 = 0.35;
const ARCANE_HEAL_PER_STACK: i32 = 2;

const MARK_BONUS_PER_STACK: f64 = 0.4;
const EXECUTE_THRESHOLD_PCT: i32 = 45;
const EXECUTE_OVERKILL: i32 = 999;

const ROGUE_GRAZE_HEAL: i32 = 3;
const ROGUE_TRIPS_HEAL: i32 = 12;
const ROGUE_TRIPS_WEAKEN: i32 = 2;
const ROGUE_JACKPOT_HEAL: i32 = 30;
const ROGUE_STRAIGHT_POISON: i32 = 5;

/// Shield a knight gains from a hand that does not bash.
pub fn shield_gain(kind: HandKind) -> i32 {
    match kind {
        HandKind::Quad => 10,
        HandKind::Straight => 5,
        HandKind::ThreeOfAKind => 4,
        HandKind::TwoPair => 6,
        HandKind::Pair => 3,
        HandKind::HighCard => 0,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    pub hand: Hand,
    pub label: String,
    /// HP the player lost to poison before acting.
    pub poison_tick: i32,
    /// Outgoing damage before the enemy's shield.
    pub damage: i32,
    pub absorbed: i32,
    pub hp_damage: i32,
    pub healed: i32,
}

struct ClassOutcome {
    damage: i32,
    label: String,
    healed: i32,
}

pub fn resolve_strike(dice: &[u8], player: &mut Player, enemy: &mut Enemy) -> Strike {
    assert_valid_dice(dice);
    let hand = classify(dice);
    let pip_sum: i32 = dice.iter().map(|&d| i32::from(d)).sum();

    let poison_tick = tick_player_poison(player);

    let mut damage = floor_mul(pip_sum + player.damage_bonus, hand.kind.damage_multiplier());
    if player.weaken_turns > 0 {
        damage /= 2;
        player.weaken_turns -= 1;
    }

    let outcome = apply_class_rules(hand, pip_sum, damage, player, enemy);
    let (absorbed, hp_damage) = mitigate(enemy, outcome.damage);

    Strike {
        hand,
        label: outcome.label,
        poison_tick,
        damage: outcome.damage,
        absorbed,
        hp_damage,
        healed: outcome.healed,
    }
}

/// Poison cannot kill on this tick: HP stops at 1.
fn tick_player_poison(player: &mut Player) -> i32 {
    if player.poison <= 0 {
        return 0;
    }
    let before = player.hp;
    player.hp = (player.hp - player.poison).max(1);
    player.poison -= 1;
    before - player.hp
}

/// Enemy shield soaks first; the rest lands on HP. Returns `(absorbed, hp_damage)`.
pub fn mitigate(enemy: &mut Enemy, damage: i32) -> (i32, i32) {
    let damage = damage.max(0);
    let absorbed = damage.min(enemy.shield.max(0));
    enemy.shield -= absorbed;
    let hp_damage = damage - absorbed;
    enemy.hp = (enemy.hp - hp_damage).max(0);
    (absorbed, hp_damage)
}

fn apply_class_rules(
    hand: Hand,
    pip_sum: i32,
    damage: i32,
    player: &mut Player,
    enemy: &mut Enemy,
) -> ClassOutcome {
    match player.kit {
        Kit::Knight { shield } => {
            let (outcome, shield) = knight(hand, damage, shield);
            player.kit = Kit::Knight { shield };
            outcome
        }
        Kit::Mage { arcane } => {
            let (outcome, arcane) = mage(hand, damage, arcane, player);
            player.kit = Kit::Mage { arcane };
            outcome
        }
        Kit::Archer { marks } => {
            let (outcome, marks) = archer(hand, damage, marks, player, enemy);
            player.kit = Kit::Archer { marks };
            outcome
        }
        Kit::Rogue => rogue(hand, pip_sum, player, enemy),
    }
}

fn knight(hand: Hand, damage: i32, shield: i32) -> (ClassOutcome, i32) {
    let plain = |damage, label: String| ClassOutcome { damage, label, healed: 0 };
    match hand.kind {
        HandKind::Pair if shield > 0 => {
            (plain(damage + shield, format!("BASH! (+{shield})")), 0)
        }
        HandKind::TwoPair if shield > 0 => {
            let bash = shield * 3 / 2;
            (plain(damage + bash, format!("BASH! (+{bash})")), shield / 2)
        }
        // Nothing to bash with; pairs never build shield.
        HandKind::Pair | HandKind::TwoPair => {
            (plain(damage, hand.kind.label().to_string()), shield)
        }
        kind => {
            let gain = shield_gain(kind);
            let label = if gain > 0 {
                format!("{} +{gain} SHIELD", kind.label())
            } else {
                kind.label().to_string()
            };
            (plain(damage, label), shield + gain)
        }
    }
}

fn mage(hand: Hand, damage: i32, arcane: u8, player: &mut Player) -> (ClassOutcome, u8) {
    let build = |gain: u8| {
        let outcome = ClassOutcome {
            damage: damage * MAGE_BUILD_DAMAGE_PCT / 100,
            label: format!("+{gain} ARCANE"),
            healed: 0,
        };
        (outcome, (arcane + gain).min(MAX_STACKS))
    };
    match hand.kind {
        HandKind::Pair => build(1),
        HandKind::TwoPair => build(2),
        _ if hand.rank >= 3 && arcane > 0 => {
            let boosted = floor_mul(damage, 1.0 + f64::from(arcane) * ARCANE_BONUS_PER_STACK);
            let heal = i32::from(arcane) * ARCANE_HEAL_PER_STACK;
            let healed = player.heal(heal);
            let outcome = ClassOutcome {
                damage: boosted,
                label: format!("UNLEASH! (+{}) +{heal} HP", boosted - damage),
                healed,
            };
            (outcome, 0)
        }
        kind => (ClassOutcome { damage, label: kind.label().to_string(), healed: 0 }, arcane),
    }
}

fn archer(
    hand: Hand,
    damage: i32,
    marks: u8,
    player: &mut Player,
    enemy: &mut Enemy,
) -> (ClassOutcome, u8) {
    let (gain, poison, heal) = match hand.kind {
        HandKind::Pair => (1, 3, 4),
        HandKind::TwoPair => (2, 4, 6),
        _ if hand.rank >= 3 && marks > 0 => return (execute(damage, marks, enemy), 0),
        kind => {
            let outcome = ClassOutcome { damage, label: kind.label().to_string(), healed: 0 };
            return (outcome, marks);
        }
    };
    enemy.poison += poison;
    let outcome = ClassOutcome {
        damage,
        label: format!("+{gain} MARK +{poison} PSN +{heal} HP"),
        healed: player.heal(heal),
    };
    (outcome, (marks + gain).min(MAX_STACKS))
}

/// Lethal at or under 45% of max HP, otherwise a per-mark multiplier.
fn execute(damage: i32, marks: u8, enemy: &Enemy) -> ClassOutcome {
    if enemy.hp * 100 <= enemy.max_hp * EXECUTE_THRESHOLD_PCT {
        return ClassOutcome {
            damage: enemy.hp + enemy.shield + EXECUTE_OVERKILL,
            label: "EXECUTE! (LETHAL)".to_string(),
            healed: 0,
        };
    }
    let boosted = floor_mul(damage, 1.0 + f64::from(marks) * MARK_BONUS_PER_STACK);
    ClassOutcome { damage: boosted, label: format!("EXECUTE! (+{})", boosted - damage), healed: 0 }
}

/// Sum-based damage; the generic multiplier table does not apply.
fn rogue(hand: Hand, pip_sum: i32, player: &mut Player, enemy: &mut Enemy) -> ClassOutcome {
    match hand.kind {
        HandKind::Pair | HandKind::HighCard => ClassOutcome {
            damage: pip_sum * 3 / 4,
            label: format!("GRAZE +{ROGUE_GRAZE_HEAL} HP"),
            healed: player.heal(ROGUE_GRAZE_HEAL),
        },
        HandKind::TwoPair => {
            ClassOutcome { damage: pip_sum * 2, label: "TWO PAIR".to_string(), healed: 0 }
        }
        HandKind::ThreeOfAKind => {
            enemy.weaken_turns += ROGUE_TRIPS_WEAKEN;
            ClassOutcome {
                damage: pip_sum * 3,
                label: format!("TRIPS! +{ROGUE_TRIPS_HEAL} HP +{ROGUE_TRIPS_WEAKEN} WKN"),
                healed: player.heal(ROGUE_TRIPS_HEAL),
            }
        }
        HandKind::Quad => ClassOutcome {
            damage: pip_sum * 2,
            label: format!("JACKPOT! +{ROGUE_JACKPOT_HEAL} HP"),
            healed: player.heal(ROGUE_JACKPOT_HEAL),
        },
        HandKind::Straight => {
            enemy.poison += ROGUE_STRAIGHT_POISON;
            ClassOutcome {
                damage: pip_sum * 6,
                label: format!("STRAIGHT! +{ROGUE_STRAIGHT_POISON} PSN"),
                healed: 0,
            }
        }
    }
}

fn floor_mul(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).floor() as i32
}
