//! Class table, enemy catalog, boss cycle and scaling rules.
//! Everything here is immutable input data; the built-in pack can be replaced by a TOML file.

use std::fs;
use std::hash::Hasher;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de;
use xxhash_rust::xxh3::Xxh3;

use crate::types::{ActionKind, HeroClass, Tier};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("failed to parse content TOML: {0}")]
    Parse(#[from] de::Error),
    #[error("boss cycle is empty")]
    NoBosses,
    #[error("catalog has no common enemy")]
    NoCommonEnemy,
    #[error("enemy {0} has no actions")]
    EmptyActions(String),
    #[error("enemy {0} has a total action weight of zero")]
    ZeroWeight(String),
    #[error("enemy {name} is listed as {tier:?} in the wrong table")]
    MisplacedTier { name: String, tier: Tier },
    #[error("class {0:?} needs positive hp and at least one roll")]
    BadClassStats(HeroClass),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub hp: i32,
    pub rolls: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassTable {
    pub knight: ClassStats,
    pub mage: ClassStats,
    pub archer: ClassStats,
    pub rogue: ClassStats,
}

impl ClassTable {
    pub fn get(&self, class: HeroClass) -> ClassStats {
        match class {
            HeroClass::Knight => self.knight,
            HeroClass::Mage => self.mage,
            HeroClass::Archer => self.archer,
            HeroClass::Rogue => self.rogue,
        }
    }
}

/// How an action's value is derived from the enemy's scaled damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    Fixed(i32),
    ScaledDamage,
    ScaledDamagePercent(u32),
}

impl Magnitude {
    pub fn resolve(self, scaled_damage: i32) -> i32 {
        match self {
            Magnitude::Fixed(value) => value,
            Magnitude::ScaledDamage => scaled_damage,
            Magnitude::ScaledDamagePercent(pct) => scaled_damage * pct as i32 / 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub magnitude: Magnitude,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub tag: String,
    pub tier: Tier,
    pub base_hp: i32,
    pub base_damage: i32,
    pub actions: Vec<ActionSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierScaling {
    pub hp_mult: f64,
    pub hp_slope: f64,
    pub damage_mult: f64,
    pub damage_slope: f64,
}

/// Extra action granted to elites that lack one of this kind: `floor(base + floor * slope)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliteBonus {
    pub base: f64,
    pub slope: f64,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingRules {
    pub normal: TierScaling,
    pub elite: TierScaling,
    pub boss: TierScaling,
    pub elite_defend: EliteBonus,
    pub elite_heal: EliteBonus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    pub classes: ClassTable,
    pub enemies: Vec<EnemyTemplate>,
    pub bosses: Vec<EnemyTemplate>,
    pub scaling: ScalingRules,
}

fn act(kind: ActionKind, magnitude: Magnitude, weight: u32) -> ActionSpec {
    ActionSpec { kind, magnitude, weight }
}

fn template(
    name: &str,
    tier: Tier,
    base_hp: i32,
    base_damage: i32,
    actions: Vec<ActionSpec>,
) -> EnemyTemplate {
    EnemyTemplate {
        name: name.to_string(),
        tag: name.to_lowercase().replace(' ', "-"),
        tier,
        base_hp,
        base_damage,
        actions,
    }
}

impl ContentPack {
    pub fn build_default() -> Self {
        use ActionKind::*;
        use Magnitude::*;

        Self {
            classes: ClassTable {
                knight: ClassStats { hp: 70, rolls: 2 },
                mage: ClassStats { hp: 55, rolls: 2 },
                archer: ClassStats { hp: 55, rolls: 2 },
                rogue: ClassStats { hp: 50, rolls: 3 },
            },
            enemies: vec![
                template(
                    "Skeleton",
                    Tier::Common,
                    15,
                    6,
                    vec![act(Attack, ScaledDamage, 70), act(Defend, Fixed(5), 30)],
                ),
                template(
                    "Slime",
                    Tier::Common,
                    20,
                    4,
                    vec![act(Attack, ScaledDamage, 60), act(Heal, Fixed(6), 40)],
                ),
                template(
                    "Goblin",
                    Tier::Common,
                    12,
                    8,
                    vec![act(Attack, ScaledDamage, 80), act(Skip, Fixed(0), 20)],
                ),
                template(
                    "Spider",
                    Tier::Common,
                    10,
                    5,
                    vec![act(Attack, ScaledDamage, 50), act(Poison, Fixed(2), 50)],
                ),
                template(
                    "Bat",
                    Tier::Uncommon,
                    8,
                    5,
                    vec![act(Attack, ScaledDamage, 90), act(Skip, Fixed(0), 10)],
                ),
                template(
                    "Orc",
                    Tier::Uncommon,
                    25,
                    10,
                    vec![act(Attack, ScaledDamage, 75), act(Defend, Fixed(8), 25)],
                ),
                template(
                    "Wolf",
                    Tier::Uncommon,
                    14,
                    9,
                    vec![act(Attack, ScaledDamage, 85), act(Skip, Fixed(0), 15)],
                ),
                template(
                    "Dark Mage",
                    Tier::Rare,
                    18,
                    10,
                    vec![act(Attack, ScaledDamage, 50), act(Curse, Fixed(2), 50)],
                ),
                template(
                    "Ghost",
                    Tier::Rare,
                    12,
                    8,
                    vec![
                        act(Attack, ScaledDamage, 40),
                        act(Weaken, Fixed(2), 35),
                        act(Skip, Fixed(0), 25),
                    ],
                ),
                template(
                    "Mimic",
                    Tier::Rare,
                    22,
                    12,
                    vec![act(Attack, ScaledDamage, 70), act(Heal, Fixed(10), 30)],
                ),
            ],
            bosses: vec![
                template(
                    "Bone Lord",
                    Tier::Boss,
                    40,
                    12,
                    vec![act(Attack, ScaledDamage, 60), act(Defend, Fixed(15), 40)],
                ),
                // Second attack is the weaker flame breath.
                template(
                    "Fire Dragon",
                    Tier::Boss,
                    55,
                    15,
                    vec![act(Attack, ScaledDamage, 70), act(Attack, ScaledDamagePercent(50), 30)],
                ),
                template(
                    "Demon Lord",
                    Tier::Boss,
                    50,
                    14,
                    vec![
                        act(Attack, ScaledDamage, 50),
                        act(Curse, Fixed(5), 30),
                        act(Heal, Fixed(12), 20),
                    ],
                ),
            ],
            scaling: ScalingRules {
                normal: TierScaling {
                    hp_mult: 1.0,
                    hp_slope: 0.7,
                    damage_mult: 1.0,
                    damage_slope: 0.15,
                },
                elite: TierScaling {
                    hp_mult: 1.3,
                    hp_slope: 0.9,
                    damage_mult: 1.15,
                    damage_slope: 0.3,
                },
                boss: TierScaling {
                    hp_mult: 1.0,
                    hp_slope: 1.0,
                    damage_mult: 1.0,
                    damage_slope: 0.15,
                },
                elite_defend: EliteBonus { base: 5.0, slope: 0.5, weight: 20 },
                elite_heal: EliteBonus { base: 4.0, slope: 0.3, weight: 15 },
            },
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let pack: ContentPack = toml::from_str(text)?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ContentError::Io { path: path.display().to_string(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        for class in HeroClass::ALL {
            let stats = self.classes.get(class);
            if stats.hp <= 0 || stats.rolls == 0 {
                return Err(ContentError::BadClassStats(class));
            }
        }
        if self.bosses.is_empty() {
            return Err(ContentError::NoBosses);
        }
        if !self.enemies.iter().any(|t| t.tier == Tier::Common) {
            return Err(ContentError::NoCommonEnemy);
        }
        for t in &self.enemies {
            if t.tier == Tier::Boss {
                return Err(ContentError::MisplacedTier { name: t.name.clone(), tier: t.tier });
            }
        }
        for t in &self.bosses {
            if t.tier != Tier::Boss {
                return Err(ContentError::MisplacedTier { name: t.name.clone(), tier: t.tier });
            }
        }
        for t in self.enemies.iter().chain(&self.bosses) {
            if t.actions.is_empty() {
                return Err(ContentError::EmptyActions(t.name.clone()));
            }
            if t.actions.iter().map(|a| a.weight).sum::<u32>() == 0 {
                return Err(ContentError::ZeroWeight(t.name.clone()));
            }
        }
        Ok(())
    }

    /// Stable hash of the pack, recorded in journals so replays run against the same data.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        // Serializing plain data structs to JSON cannot fail.
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        hasher.write(&canonical);
        hasher.finish()
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}
