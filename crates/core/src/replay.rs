use thiserror::Error;
use tracing::debug;

use crate::content::ContentPack;
use crate::game::Game;
use crate::journal::InputJournal;
use crate::types::{GameError, Phase};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("journal was recorded against content {expected:#018x}, replaying with {found:#018x}")]
    ContentMismatch { expected: u64, found: u64 },
    #[error("input sequence gap: expected {expected}, journal has {found}")]
    SequenceGap { expected: u64, found: u64 },
    #[error("input {seq} was rejected: {error}")]
    RejectedInput { seq: u64, error: GameError },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_phase: Phase,
    /// Floor of the run in progress or the one that ended it.
    pub floor: Option<u32>,
    pub final_snapshot_hash: u64,
    pub inputs_applied: usize,
}

/// Rebuilds the game a journal describes.
pub fn replay(content: &ContentPack, journal: &InputJournal) -> Result<Game, ReplayError> {
    if journal.content_hash != 0 {
        let found = content.content_hash();
        if found != journal.content_hash {
            return Err(ReplayError::ContentMismatch { expected: journal.content_hash, found });
        }
    }

    let mut game = Game::new(journal.seed, content);
    for record in &journal.inputs {
        let expected = game.next_input_seq();
        if record.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: record.seq });
        }
        game.apply_input(&record.payload)
            .map_err(|error| ReplayError::RejectedInput { seq: record.seq, error })?;
    }
    debug!(inputs = journal.inputs.len(), phase = ?game.phase(), "journal replayed");
    Ok(game)
}

pub fn replay_to_end(
    content: &ContentPack,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let game = replay(content, journal)?;
    Ok(ReplayResult {
        final_phase: game.phase(),
        floor: game.run().map(|run| run.floor),
        final_snapshot_hash: game.snapshot_hash(),
        inputs_applied: journal.inputs.len(),
    })
}
