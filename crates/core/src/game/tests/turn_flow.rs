//! Tests for a full turn: strike, enemy response, floor advance and defeat.

use super::support::*;

#[test]
fn surviving_enemy_attacks_and_turn_resets() {
    let mut game = scripted_run(HeroClass::Knight);
    game.script_dice(&[1, 2, 4, 6]);
    game.roll_dice().expect("roll");
    game.toggle_lock(0).expect("lock");

    let report = game.act().expect("act");
    assert_eq!(report.strike.damage, 6);
    assert_eq!(report.outcome, TurnOutcome::EnemyTurnEnded);
    let enemy_turn = report.enemy_turn.expect("enemy acted");
    assert_eq!(enemy_turn.resolved, Some(Intent { kind: ActionKind::Attack, value: 6 }));

    let run = game.run().expect("run");
    assert_eq!(run.enemy.hp, 9);
    assert_eq!(run.player.hp, 64);
    assert_eq!(run.turn, 2);
    assert_eq!(run.rolls_left, 2);
    assert_eq!(run.dice.locked(), [false; 4]);
    assert_eq!(run.turn_step(), TurnStep::AwaitingRoll);
    assert_eq!(run.feedback.hand_label.as_deref(), Some("HIGH CARD"));
    assert_eq!(run.feedback.message.as_deref(), Some("-6 HP"));
    assert!(game.log().contains(&LogEvent::EnemyActed {
        intent: Intent { kind: ActionKind::Attack, value: 6 }
    }));
}

#[test]
fn rolling_clears_last_turn_feedback() {
    let mut game = scripted_run(HeroClass::Knight);
    game.script_dice(&[1, 2, 4, 6, 1, 2, 4, 6]);
    game.roll_dice().expect("roll");
    game.act().expect("act");
    assert!(game.run().expect("run").feedback.message.is_some());

    game.roll_dice().expect("roll");
    assert_eq!(game.run().expect("run").feedback, TurnFeedback::default());
}

#[test]
fn lethal_enemy_attack_ends_the_run() {
    let mut game = scripted_run(HeroClass::Mage);
    game.run_mut().player.hp = 4;
    game.script_dice(&[1, 2, 4, 6]);
    game.roll_dice().expect("roll");

    let report = game.act().expect("act");
    assert_eq!(report.outcome, TurnOutcome::Defeat);
    assert_eq!(game.phase(), Phase::GameOver);
    let run = game.run().expect("run kept for the game-over screen");
    assert_eq!(run.player.hp, 0);
    assert_eq!(game.log().last(), Some(&LogEvent::RunEnded { floor: 1 }));

    assert_eq!(game.roll_dice(), Err(GameError::WrongPhase(Phase::GameOver)));
    assert_eq!(game.start_run(HeroClass::Mage), Err(GameError::WrongPhase(Phase::GameOver)));
    game.restart().expect("restart");
    assert_eq!(game.phase(), Phase::Title);
}

#[test]
fn enemy_poison_kill_wins_without_the_intent() {
    let mut game = scripted_run(HeroClass::Knight);
    game.run_mut().enemy.poison = 10;
    game.script_dice(&[1, 2, 4, 6]);
    game.roll_dice().expect("roll");

    let report = game.act().expect("act");
    let enemy_turn = report.enemy_turn.expect("enemy turn started");
    assert_eq!(enemy_turn.poison_tick, 9);
    assert_eq!(enemy_turn.resolved, None);
    assert_eq!(report.outcome, TurnOutcome::Victory { cleared_floor: 1, healed: 0 });

    let run = game.run().expect("run");
    assert_eq!(run.floor, 2);
    assert_eq!(run.player.hp, 70);
}

#[test]
fn archer_poison_lands_before_the_enemy_ticks() {
    let mut game = scripted_run(HeroClass::Archer);
    game.script_dice(&[4, 4, 1, 2]);
    game.roll_dice().expect("roll");

    // 11 damage leaves the Skeleton at 4, then the fresh 3 poison ticks.
    let report = game.act().expect("act");
    assert_eq!(report.enemy_turn.expect("enemy turn").poison_tick, 3);
    let run = game.run().expect("run");
    assert_eq!(run.enemy.hp, 1);
    assert_eq!(run.enemy.poison, 2);
}

#[test]
fn floor_clear_keeps_class_resources_and_weaken() {
    let mut game = scripted_run(HeroClass::Knight);
    {
        let run = game.run_mut();
        run.player.kit = Kit::Knight { shield: 7 };
        run.player.hp = 40;
        run.player.poison = 3;
        run.player.weaken_turns = 3;
    }
    game.script_dice(&[6, 6, 6, 6]);
    game.roll_dice().expect("roll");

    let report = game.act().expect("act");
    assert_eq!(report.enemy_turn, None);
    // Poison ticks 3 before the strike, then the clear heals 10.
    assert_eq!(report.outcome, TurnOutcome::Victory { cleared_floor: 1, healed: 10 });

    let run = game.run().expect("run");
    assert_eq!(run.player.kit, Kit::Knight { shield: 17 });
    assert_eq!(run.player.hp, 47);
    assert_eq!(run.player.poison, 0);
    assert_eq!(run.player.weaken_turns, 2);
    assert_eq!(run.player.damage_bonus, 1);
    assert_eq!(run.dice.values(), [1, 1, 1, 1]);
    assert_eq!(run.turn_step(), TurnStep::AwaitingRoll);
    assert_eq!(run.feedback.message.as_deref(), Some("VICTORY! +10 HP"));
}

#[test]
fn boss_floor_clear_heals_more() {
    let mut game = scripted_run(HeroClass::Rogue);
    {
        let run = game.run_mut();
        run.floor = 10;
        run.player.hp = 20;
    }
    game.script_dice(&[3, 4, 5, 6]);
    game.roll_dice().expect("roll");

    let report = game.act().expect("act");
    assert_eq!(report.outcome, TurnOutcome::Victory { cleared_floor: 10, healed: 25 });
    let run = game.run().expect("run");
    assert_eq!(run.floor, 11);
    assert_eq!(run.enemy.name, "Skeleton");
    assert_eq!(run.enemy.hp, 22);
    assert!(game.log().contains(&LogEvent::FloorCleared { floor: 10, healed: 25 }));
}

#[test]
fn preview_matches_the_real_strike_and_changes_nothing() {
    let mut game = scripted_run(HeroClass::Mage);
    game.run_mut().player.kit = Kit::Mage { arcane: 2 };
    assert_eq!(game.preview(), None);

    game.script_dice(&[5, 5, 5, 2]);
    game.roll_dice().expect("roll");
    let hash = game.snapshot_hash();
    let predicted = game.preview().expect("preview after roll");
    assert_eq!(game.snapshot_hash(), hash);
    assert_eq!(game.run().expect("run").player.kit, Kit::Mage { arcane: 2 });

    let report = game.act().expect("act");
    assert_eq!(report.strike, predicted);
}

#[test]
fn accepted_inputs_advance_sequence_and_hash() {
    let mut game = scripted_game();
    let mut hashes = vec![game.snapshot_hash()];
    game.open_character_select().expect("select");
    hashes.push(game.snapshot_hash());
    game.start_run(HeroClass::Knight).expect("start");
    hashes.push(game.snapshot_hash());
    game.roll_dice().expect("roll");
    hashes.push(game.snapshot_hash());

    assert_eq!(game.next_input_seq(), 3);
    hashes.dedup();
    assert_eq!(hashes.len(), 4);
}
