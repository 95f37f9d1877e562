use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::combat::Strike;
use crate::content::ContentPack;
use crate::enemy_ai::EnemyTurn;
use crate::rng::RollSource;
use crate::state::{Run, RunState};
use crate::types::*;

mod actions;
mod hash;
mod preview;

#[cfg(test)]
pub(crate) mod test_support;

/// Owns one player's session: the run state, its random source and the event log.
///
/// Every transition either succeeds completely or returns a `GameError` having changed
/// nothing, including the random stream and the input sequence.
pub struct Game<R: RollSource = ChaCha8Rng> {
    seed: u64,
    rng: R,
    content: ContentPack,
    state: RunState,
    log: Vec<LogEvent>,
    next_input_seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub strike: Strike,
    /// Absent when the strike alone won the floor.
    pub enemy_turn: Option<EnemyTurn>,
    pub outcome: TurnOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    EnemyTurnEnded,
    Victory { cleared_floor: u32, healed: i32 },
    Defeat,
}

impl Game<ChaCha8Rng> {
    pub fn new(seed: u64, content: &ContentPack) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), content, seed)
    }
}

impl<R: RollSource> Game<R> {
    /// `seed` is only recorded for hashing and journals; `rng` drives the run.
    pub fn with_rng(rng: R, content: &ContentPack, seed: u64) -> Self {
        Self {
            seed,
            rng,
            content: content.clone(),
            state: RunState::default(),
            log: Vec::new(),
            next_input_seq: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn run(&self) -> Option<&Run> {
        self.state.run.as_ref()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn next_input_seq(&self) -> u64 {
        self.next_input_seq
    }
}
