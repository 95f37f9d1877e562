//! Floor cadence and floor-clear rewards.

use crate::state::Player;
use crate::types::FloorKind;

pub const STARTING_FLOOR: u32 = 1;
pub const ELITE_EVERY: u32 = 5;
pub const BOSS_EVERY: u32 = 10;

const FLOOR_CLEAR_HEAL: i32 = 10;
const BOSS_CLEAR_HEAL: i32 = 25;
const DAMAGE_BONUS_PER_FLOOR: i32 = 1;

impl FloorKind {
    pub fn of(floor: u32) -> Self {
        if floor > 0 && floor % BOSS_EVERY == 0 {
            FloorKind::Boss
        } else if floor > 0 && floor % ELITE_EVERY == 0 {
            FloorKind::Elite
        } else {
            FloorKind::Normal
        }
    }
}

/// Position in the boss cycle for a boss floor.
pub fn boss_index(floor: u32, boss_count: usize) -> usize {
    ((floor / BOSS_EVERY).saturating_sub(1) as usize) % boss_count
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorReward {
    pub next_floor: u32,
    pub healed: i32,
}

/// Applies the player-side rewards for clearing `cleared_floor`.
pub fn clear_floor(player: &mut Player, cleared_floor: u32) -> FloorReward {
    let heal = match FloorKind::of(cleared_floor) {
        FloorKind::Boss => BOSS_CLEAR_HEAL,
        FloorKind::Elite | FloorKind::Normal => FLOOR_CLEAR_HEAL,
    };
    let healed = player.heal(heal);
    player.poison = 0;
    player.damage_bonus += DAMAGE_BONUS_PER_FLOOR;
    FloorReward { next_floor: cleared_floor + 1, healed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeroClass;

    #[test]
    fn cadence_prefers_boss_over_elite() {
        assert_eq!(FloorKind::of(1), FloorKind::Normal);
        assert_eq!(FloorKind::of(5), FloorKind::Elite);
        assert_eq!(FloorKind::of(10), FloorKind::Boss);
        assert_eq!(FloorKind::of(15), FloorKind::Elite);
        assert_eq!(FloorKind::of(20), FloorKind::Boss);
        assert_eq!(FloorKind::of(0), FloorKind::Normal);
    }

    #[test]
    fn bosses_cycle() {
        let picks: Vec<_> = [10, 20, 30, 40].iter().map(|&f| boss_index(f, 3)).collect();
        assert_eq!(picks, vec![0, 1, 2, 0]);
    }

    #[test]
    fn clearing_a_floor_heals_and_grants_bonus() {
        let mut player = Player::new(HeroClass::Archer, 55);
        player.hp = 30;
        player.poison = 4;
        player.weaken_turns = 2;

        let reward = clear_floor(&mut player, 3);
        assert_eq!(reward, FloorReward { next_floor: 4, healed: 10 });
        assert_eq!(player.hp, 40);
        assert_eq!(player.poison, 0);
        assert_eq!(player.weaken_turns, 2, "weaken carries over between floors");
        assert_eq!(player.damage_bonus, 1);
    }

    #[test]
    fn boss_clear_heals_more_but_caps() {
        let mut player = Player::new(HeroClass::Knight, 70);
        player.hp = 50;
        let reward = clear_floor(&mut player, 10);
        assert_eq!(reward.healed, 20);
        assert_eq!(player.hp, 70);
    }
}
