use serde::{Deserialize, Serialize};

use crate::content::ContentPack;
use crate::types::HeroClass;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    /// Zero means the journal was not pinned to a content pack.
    pub content_hash: u64,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputPayload {
    OpenCharacterSelect,
    StartRun { class: HeroClass },
    Roll,
    ToggleLock { index: usize },
    Act,
    Restart,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            content_hash: 0,
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn for_content(seed: u64, content: &ContentPack) -> Self {
        Self { content_hash: content.content_hash(), ..Self::new(seed) }
    }

    pub fn append(&mut self, seq: u64, payload: InputPayload) {
        self.inputs.push(InputRecord { seq, payload });
    }
}
