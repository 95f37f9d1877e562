use super::*;
use crate::combat::resolve_strike;

impl<R: RollSource> Game<R> {
    /// What acting now would do to the enemy, computed on copies.
    ///
    /// `None` outside combat or before the first roll of the turn.
    pub fn preview(&self) -> Option<Strike> {
        if self.state.phase != Phase::Combat {
            return None;
        }
        let run = self.state.run.as_ref()?;
        if !run.dice.has_rolled() {
            return None;
        }
        let mut player = run.player.clone();
        let mut enemy = run.enemy.clone();
        Some(resolve_strike(&run.dice.values(), &mut player, &mut enemy))
    }
}
