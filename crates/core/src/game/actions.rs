//! Player-facing transitions of the combat state machine.
//!
//! Each public method validates first and mutates second, so a rejected call leaves the
//! game untouched. Accepted calls advance the input sequence by one.

use tracing::{debug, info, trace};

use super::*;
use crate::combat::resolve_strike;
use crate::dice::{DICE_COUNT, DiceSet};
use crate::enemy_ai::take_enemy_turn;
use crate::intent::roll_intent;
use crate::journal::InputPayload;
use crate::progression::{STARTING_FLOOR, clear_floor};
use crate::spawn::spawn_enemy;
use crate::state::{Player, TurnFeedback};

impl<R: RollSource> Game<R> {
    pub fn open_character_select(&mut self) -> Result<(), GameError> {
        self.require_phase(&[Phase::Title])?;
        self.state.phase = Phase::CharacterSelect;
        self.next_input_seq += 1;
        Ok(())
    }

    pub fn start_run(&mut self, class: HeroClass) -> Result<(), GameError> {
        self.require_phase(&[Phase::Title, Phase::CharacterSelect])?;

        let stats = self.content.classes.get(class);
        let player = Player::new(class, stats.hp);
        let floor = STARTING_FLOOR;
        let enemy = spawn_enemy(&self.content, floor, &mut self.rng);
        let intent = roll_intent(&enemy.actions, &mut self.rng);

        info!(class = class.name(), hp = stats.hp, rolls = stats.rolls, "run started");
        self.log.push(LogEvent::RunStarted { class });
        self.log.push(LogEvent::EnemySpawned { floor, name: enemy.name.clone(), hp: enemy.hp });
        self.log.push(LogEvent::IntentRolled { intent });

        self.state.run = Some(Run {
            floor,
            turn: 1,
            player,
            enemy,
            intent,
            dice: DiceSet::default(),
            rolls_left: stats.rolls,
            feedback: TurnFeedback::default(),
        });
        self.state.phase = Phase::Combat;
        self.next_input_seq += 1;
        Ok(())
    }

    /// Re-rolls every unlocked die and returns the new faces.
    pub fn roll_dice(&mut self) -> Result<[u8; DICE_COUNT], GameError> {
        let run = self.combat_run()?;
        if run.rolls_left == 0 {
            return Err(GameError::NoRollsLeft);
        }

        let Game { rng, state, log, .. } = self;
        let Some(run) = state.run.as_mut() else {
            return Err(GameError::WrongPhase(state.phase));
        };
        run.dice.roll(rng);
        run.rolls_left -= 1;
        run.feedback = TurnFeedback::default();

        let dice = run.dice.values();
        trace!(?dice, rolls_left = run.rolls_left, "dice rolled");
        log.push(LogEvent::DiceRolled { dice, rolls_left: run.rolls_left });
        self.next_input_seq += 1;
        Ok(dice)
    }

    /// Flips the lock on one die and returns whether it is now locked.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, GameError> {
        let run = self.combat_run()?;
        if index >= DICE_COUNT {
            return Err(GameError::InvalidDieIndex(index));
        }
        if !run.dice.has_rolled() {
            return Err(GameError::NotRolled);
        }

        let locked = self.combat_run_mut()?.dice.toggle(index);
        self.next_input_seq += 1;
        Ok(locked)
    }

    /// Plays the current dice: the player's strike, then the enemy's turn unless the floor
    /// was won.
    pub fn act(&mut self) -> Result<TurnReport, GameError> {
        if !self.combat_run()?.dice.has_rolled() {
            return Err(GameError::NotRolled);
        }

        let Game { rng, content, state, log, .. } = self;
        let Some(run) = state.run.as_mut() else {
            return Err(GameError::WrongPhase(state.phase));
        };

        let strike = resolve_strike(&run.dice.values(), &mut run.player, &mut run.enemy);
        if strike.poison_tick > 0 {
            log.push(LogEvent::PlayerPoisonTick { damage: strike.poison_tick });
        }
        debug!(
            hand = ?strike.hand.kind,
            damage = strike.damage,
            absorbed = strike.absorbed,
            enemy_hp = run.enemy.hp,
            "hand played"
        );
        log.push(LogEvent::HandPlayed {
            hand: strike.hand.kind,
            damage: strike.damage,
            absorbed: strike.absorbed,
        });
        run.feedback = TurnFeedback {
            hand_label: Some(strike.label.clone()),
            damage: Some(strike.damage),
            enemy_action: None,
            message: None,
        };

        if run.enemy.is_dead() {
            let outcome = advance_floor(content, rng, run, log);
            self.next_input_seq += 1;
            return Ok(TurnReport { strike, enemy_turn: None, outcome });
        }

        let enemy_turn = take_enemy_turn(&mut run.enemy, &mut run.player, run.intent);
        if enemy_turn.poison_tick > 0 {
            log.push(LogEvent::EnemyPoisonTick { damage: enemy_turn.poison_tick });
        }
        if let Some(intent) = enemy_turn.resolved {
            log.push(LogEvent::EnemyActed { intent });
        }
        run.feedback.enemy_action = enemy_turn.resolved;
        run.feedback.message = enemy_turn.message.clone();

        let outcome = if run.enemy.is_dead() {
            advance_floor(content, rng, run, log)
        } else if run.player.is_dead() {
            info!(floor = run.floor, "run ended");
            log.push(LogEvent::RunEnded { floor: run.floor });
            state.phase = Phase::GameOver;
            TurnOutcome::Defeat
        } else {
            run.intent = roll_intent(&run.enemy.actions, rng);
            log.push(LogEvent::IntentRolled { intent: run.intent });
            run.dice.start_turn();
            run.rolls_left = content.classes.get(run.player.class()).rolls;
            run.turn += 1;
            TurnOutcome::EnemyTurnEnded
        };

        self.next_input_seq += 1;
        Ok(TurnReport { strike, enemy_turn: Some(enemy_turn), outcome })
    }

    /// Drops the run and returns to the title screen.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.require_phase(&[Phase::CharacterSelect, Phase::Combat, Phase::GameOver])?;
        debug!(from = ?self.state.phase, "restart");
        self.state = RunState::default();
        self.next_input_seq += 1;
        Ok(())
    }

    pub fn apply_input(&mut self, payload: &InputPayload) -> Result<(), GameError> {
        match *payload {
            InputPayload::OpenCharacterSelect => self.open_character_select(),
            InputPayload::StartRun { class } => self.start_run(class),
            InputPayload::Roll => self.roll_dice().map(|_| ()),
            InputPayload::ToggleLock { index } => self.toggle_lock(index).map(|_| ()),
            InputPayload::Act => self.act().map(|_| ()),
            InputPayload::Restart => self.restart(),
        }
    }

    fn require_phase(&self, allowed: &[Phase]) -> Result<(), GameError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.state.phase))
        }
    }

    fn combat_run(&self) -> Result<&Run, GameError> {
        self.require_phase(&[Phase::Combat])?;
        self.state.run.as_ref().ok_or(GameError::WrongPhase(self.state.phase))
    }

    fn combat_run_mut(&mut self) -> Result<&mut Run, GameError> {
        self.require_phase(&[Phase::Combat])?;
        let phase = self.state.phase;
        self.state.run.as_mut().ok_or(GameError::WrongPhase(phase))
    }
}

/// Rewards the cleared floor and installs the next enemy. Shield, stacks and weaken carry
/// over; the dice start fresh.
fn advance_floor<R: RollSource>(
    content: &ContentPack,
    rng: &mut R,
    run: &mut Run,
    log: &mut Vec<LogEvent>,
) -> TurnOutcome {
    let cleared_floor = run.floor;
    let reward = clear_floor(&mut run.player, cleared_floor);
    info!(floor = cleared_floor, healed = reward.healed, "floor cleared");
    log.push(LogEvent::FloorCleared { floor: cleared_floor, healed: reward.healed });

    run.floor = reward.next_floor;
    run.enemy = spawn_enemy(content, run.floor, rng);
    run.intent = roll_intent(&run.enemy.actions, rng);
    log.push(LogEvent::EnemySpawned {
        floor: run.floor,
        name: run.enemy.name.clone(),
        hp: run.enemy.hp,
    });
    log.push(LogEvent::IntentRolled { intent: run.intent });

    run.dice = DiceSet::default();
    run.rolls_left = content.classes.get(run.player.class()).rolls;
    run.turn = 1;
    run.feedback.message = Some(format!("VICTORY! +{} HP", reward.healed));

    TurnOutcome::Victory { cleared_floor, healed: reward.healed }
}
