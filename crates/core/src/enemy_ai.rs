//! The enemy's half of a turn: its poison tick, then the declared intent.

use crate::state::{Enemy, Kit, Player};
use crate::types::{ActionKind, Intent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyTurn {
    /// HP the enemy lost to poison before acting.
    pub poison_tick: i32,
    /// `None` when poison killed the enemy and the intent never resolved.
    pub resolved: Option<Intent>,
    pub message: Option<String>,
    /// HP the player lost to an attack after their shield.
    pub hp_damage: i32,
}

pub fn take_enemy_turn(enemy: &mut Enemy, player: &mut Player, intent: Intent) -> EnemyTurn {
    let poison_tick = tick_enemy_poison(enemy);
    if enemy.is_dead() {
        return EnemyTurn { poison_tick, resolved: None, message: None, hp_damage: 0 };
    }

    let value = intent.value;
    let mut hp_damage = 0;
    let message = match intent.kind {
        ActionKind::Attack => {
            let mut damage = value.max(0);
            if enemy.weaken_turns > 0 {
                damage /= 2;
                enemy.weaken_turns -= 1;
            }
            let (message, through) = absorb_with_shield(player, damage);
            hp_damage = through;
            player.hp = (player.hp - through).max(0);
            message
        }
        ActionKind::Defend => {
            enemy.shield += value;
            format!("Enemy shields +{value}")
        }
        ActionKind::Heal => {
            enemy.hp = (enemy.hp + value).min(enemy.max_hp);
            format!("Enemy heals +{value}")
        }
        ActionKind::Curse => {
            player.max_hp = (player.max_hp - value).max(1);
            player.hp = player.hp.min(player.max_hp);
            format!("Cursed! Max HP -{value}")
        }
        ActionKind::Poison => {
            player.poison += value;
            format!("Poisoned! +{value} poison")
        }
        ActionKind::Weaken => {
            player.weaken_turns += value;
            format!("Weakened! -50% DMG for {value} turns")
        }
        ActionKind::Skip => "Enemy fled!".to_string(),
    };

    EnemyTurn { poison_tick, resolved: Some(intent), message: Some(message), hp_damage }
}

fn tick_enemy_poison(enemy: &mut Enemy) -> i32 {
    if enemy.poison <= 0 {
        return 0;
    }
    let before = enemy.hp;
    enemy.hp = (enemy.hp - enemy.poison).max(0);
    enemy.poison -= 1;
    before - enemy.hp
}

/// Returns the feedback line and the damage left over for HP.
fn absorb_with_shield(player: &mut Player, damage: i32) -> (String, i32) {
    let Kit::Knight { shield } = &mut player.kit else {
        return (format!("-{damage} HP"), damage);
    };
    if *shield <= 0 {
        return (format!("-{damage} HP"), damage);
    }
    if *shield >= damage {
        *shield -= damage;
        return (format!("Shield blocks {damage}!"), 0);
    }
    let through = damage - *shield;
    *shield = 0;
    (format!("Shield breaks! -{through} HP"), through)
}
