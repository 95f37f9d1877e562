pub mod combat;
pub mod content;
pub mod dice;
pub mod enemy_ai;
pub mod game;
pub mod hand;
pub mod intent;
pub mod journal;
pub mod progression;
pub mod replay;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod types;

pub use combat::Strike;
pub use content::{ContentError, ContentPack};
pub use enemy_ai::EnemyTurn;
pub use game::{Game, TurnOutcome, TurnReport};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use replay::*;
pub use rng::RollSource;
pub use state::{Enemy, Kit, Player, Run, RunState};
pub use types::*;
