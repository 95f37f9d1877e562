//! Stable snapshot hashing for deterministic verification.
//! Turn feedback strings are presentation hints and stay out of the hash.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::state::{Enemy, Kit, Player};

impl<R: RollSource> Game<R> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.next_input_seq);
        hasher.write_u8(self.state.phase as u8);

        if let Some(run) = &self.state.run {
            hasher.write_u32(run.floor);
            hasher.write_u32(run.turn);
            hash_player(&mut hasher, &run.player);
            hash_enemy(&mut hasher, &run.enemy);
            hasher.write_u8(run.intent.kind as u8);
            hasher.write_i32(run.intent.value);
            hasher.write(&run.dice.values());
            for locked in run.dice.locked() {
                hasher.write_u8(u8::from(locked));
            }
            hasher.write_u8(u8::from(run.dice.has_rolled()));
            hasher.write_u8(run.rolls_left);
        }
        hasher.finish()
    }
}

fn hash_player(hasher: &mut Xxh3, player: &Player) {
    match player.kit {
        Kit::Knight { shield } => {
            hasher.write_u8(0);
            hasher.write_i32(shield);
        }
        Kit::Mage { arcane } => {
            hasher.write_u8(1);
            hasher.write_u8(arcane);
        }
        Kit::Archer { marks } => {
            hasher.write_u8(2);
            hasher.write_u8(marks);
        }
        Kit::Rogue => hasher.write_u8(3),
    }
    hasher.write_i32(player.hp);
    hasher.write_i32(player.max_hp);
    hasher.write_i32(player.poison);
    hasher.write_i32(player.weaken_turns);
    hasher.write_i32(player.damage_bonus);
}

fn hash_enemy(hasher: &mut Xxh3, enemy: &Enemy) {
    hasher.write(enemy.name.as_bytes());
    hasher.write_u8(0xff);
    hasher.write_i32(enemy.hp);
    hasher.write_i32(enemy.max_hp);
    hasher.write_i32(enemy.shield);
    hasher.write_i32(enemy.poison);
    hasher.write_i32(enemy.weaken_turns);
    for action in &enemy.actions {
        hasher.write_u8(action.kind as u8);
        hasher.write_i32(action.value);
        hasher.write_u32(action.weight);
    }
}
