use serde::{Deserialize, Serialize};

use crate::dice::DiceSet;
use crate::types::*;

pub const MAX_STACKS: u8 = 5;

/// Per-class secondary resource. The variant is the player's class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kit {
    Knight { shield: i32 },
    Mage { arcane: u8 },
    Archer { marks: u8 },
    Rogue,
}

impl Kit {
    pub fn fresh(class: HeroClass) -> Self {
        match class {
            HeroClass::Knight => Kit::Knight { shield: 0 },
            HeroClass::Mage => Kit::Mage { arcane: 0 },
            HeroClass::Archer => Kit::Archer { marks: 0 },
            HeroClass::Rogue => Kit::Rogue,
        }
    }

    pub fn class(&self) -> HeroClass {
        match self {
            Kit::Knight { .. } => HeroClass::Knight,
            Kit::Mage { .. } => HeroClass::Mage,
            Kit::Archer { .. } => HeroClass::Archer,
            Kit::Rogue => HeroClass::Rogue,
        }
    }

    pub fn shield(&self) -> i32 {
        match self {
            Kit::Knight { shield } => *shield,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub kit: Kit,
    pub hp: i32,
    pub max_hp: i32,
    pub poison: i32,
    pub weaken_turns: i32,
    pub damage_bonus: i32,
}

impl Player {
    pub fn new(class: HeroClass, hp: i32) -> Self {
        Self { kit: Kit::fresh(class), hp, max_hp: hp, poison: 0, weaken_turns: 0, damage_bonus: 0 }
    }

    pub fn class(&self) -> HeroClass {
        self.kit.class()
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp).max(before);
        self.hp - before
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyAction {
    pub kind: ActionKind,
    pub value: i32,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub tag: String,
    pub tier: Tier,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub poison: i32,
    pub weaken_turns: i32,
    pub actions: Vec<EnemyAction>,
}

impl Enemy {
    /// Up to `n` actions ordered by weight, heaviest first; ties keep catalog order.
    pub fn top_actions(&self, n: usize) -> Vec<EnemyAction> {
        let mut sorted = self.actions.clone();
        sorted.sort_by(|a, b| b.weight.cmp(&a.weight));
        sorted.truncate(n);
        sorted
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Presentation hints from the last action; not authoritative state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFeedback {
    pub hand_label: Option<String>,
    pub damage: Option<i32>,
    pub enemy_action: Option<Intent>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub floor: u32,
    pub turn: u32,
    pub player: Player,
    pub enemy: Enemy,
    pub intent: Intent,
    pub dice: DiceSet,
    pub rolls_left: u8,
    pub feedback: TurnFeedback,
}

impl Run {
    pub fn turn_step(&self) -> TurnStep {
        if self.dice.has_rolled() { TurnStep::Rolled } else { TurnStep::AwaitingRoll }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: Phase,
    /// Present during combat and kept after death for the game-over screen.
    pub run: Option<Run>,
}

impl Default for RunState {
    fn default() -> Self {
        Self { phase: Phase::Title, run: None }
    }
}
