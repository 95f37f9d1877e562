use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    Knight,
    Mage,
    Archer,
    Rogue,
}

impl HeroClass {
    pub const ALL: [HeroClass; 4] =
        [HeroClass::Knight, HeroClass::Mage, HeroClass::Archer, HeroClass::Rogue];

    pub fn name(self) -> &'static str {
        match self {
            HeroClass::Knight => "Knight",
            HeroClass::Mage => "Mage",
            HeroClass::Archer => "Archer",
            HeroClass::Rogue => "Rogue",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Quad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub kind: HandKind,
    pub rank: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Defend,
    Heal,
    Curse,
    Poison,
    Weaken,
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Common,
    Uncommon,
    Rare,
    Boss,
}

/// The enemy's declared next move, visible to the player before they act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: ActionKind,
    pub value: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Title,
    CharacterSelect,
    Combat,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStep {
    AwaitingRoll,
    Rolled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorKind {
    Normal,
    Elite,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("action not allowed during {0:?}")]
    WrongPhase(Phase),
    #[error("dice have not been rolled this turn")]
    NotRolled,
    #[error("no rolls left this turn")]
    NoRollsLeft,
    #[error("die index {0} is out of range")]
    InvalidDieIndex(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    RunStarted { class: HeroClass },
    EnemySpawned { floor: u32, name: String, hp: i32 },
    IntentRolled { intent: Intent },
    DiceRolled { dice: [u8; 4], rolls_left: u8 },
    HandPlayed { hand: HandKind, damage: i32, absorbed: i32 },
    PlayerPoisonTick { damage: i32 },
    EnemyPoisonTick { damage: i32 },
    EnemyActed { intent: Intent },
    FloorCleared { floor: u32, healed: i32 },
    RunEnded { floor: u32 },
}
