//! Shared test fixtures: a scripted random source and ready-made games.

use std::collections::VecDeque;

use super::*;

/// Replays fixed dice faces and unit draws. Exhausted queues fall back to a 1 and to 0.0,
/// which picks the first pool slot and the first weighted action.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedRolls {
    dice: VecDeque<u8>,
    units: VecDeque<f64>,
}

impl ScriptedRolls {
    pub(crate) fn dice(faces: &[u8]) -> Self {
        Self { dice: faces.iter().copied().collect(), units: VecDeque::new() }
    }

    pub(crate) fn units(units: &[f64]) -> Self {
        Self { dice: VecDeque::new(), units: units.iter().copied().collect() }
    }

    pub(crate) fn push_dice(&mut self, faces: &[u8]) {
        self.dice.extend(faces);
    }
}

impl RollSource for ScriptedRolls {
    fn next_u64(&mut self) -> u64 {
        0
    }

    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().unwrap_or(1)
    }
}

pub(crate) fn scripted_game() -> Game<ScriptedRolls> {
    Game::with_rng(ScriptedRolls::default(), &ContentPack::default(), 0)
}

/// A run already in combat on floor 1 against a Skeleton whose intent is its attack.
pub(crate) fn scripted_run(class: HeroClass) -> Game<ScriptedRolls> {
    let mut game = scripted_game();
    game.start_run(class).expect("start run");
    game
}

impl Game<ScriptedRolls> {
    pub(crate) fn script_dice(&mut self, faces: &[u8]) {
        self.rng.push_dice(faces);
    }

    pub(crate) fn run_mut(&mut self) -> &mut Run {
        self.state.run.as_mut().expect("run in progress")
    }
}
