//! Whole-turn scenarios checked against hand-computed numbers.

use super::support::*;

#[test]
fn knight_two_pair_clears_the_first_skeleton() {
    let mut game = scripted_game();
    game.open_character_select().expect("select");
    game.start_run(HeroClass::Knight).expect("start");
    {
        let run = game.run().expect("run");
        assert_eq!(run.enemy.name, "Skeleton");
        assert_eq!(run.enemy.hp, 15);
        assert_eq!(run.player.kit, Kit::Knight { shield: 0 });
    }

    game.script_dice(&[3, 3, 5, 5]);
    assert_eq!(game.roll_dice(), Ok([3, 3, 5, 5]));
    let report = game.act().expect("act");

    assert_eq!(report.strike.hand.kind, HandKind::TwoPair);
    assert_eq!(report.strike.damage, 24);
    assert_eq!(report.outcome, TurnOutcome::Victory { cleared_floor: 1, healed: 0 });

    let run = game.run().expect("run");
    assert_eq!(run.floor, 2);
    assert_eq!(run.player.hp, 70);
    assert_eq!(run.player.kit, Kit::Knight { shield: 0 });
    assert_eq!(run.player.damage_bonus, 1);
    assert_eq!(run.rolls_left, 2);
    assert_eq!(run.enemy.hp, 16);
}

#[test]
fn rogue_locks_toward_a_straight_over_three_rolls() {
    let mut game = scripted_run(HeroClass::Rogue);
    game.script_dice(&[3, 4, 1, 1]);
    game.roll_dice().expect("first roll");
    game.toggle_lock(0).expect("lock 3");
    game.toggle_lock(1).expect("lock 4");

    game.script_dice(&[5, 2]);
    assert_eq!(game.roll_dice(), Ok([3, 4, 5, 2]));
    game.toggle_lock(2).expect("lock 5");

    game.script_dice(&[6]);
    assert_eq!(game.roll_dice(), Ok([3, 4, 5, 6]));
    assert_eq!(game.roll_dice(), Err(GameError::NoRollsLeft));

    let report = game.act().expect("act");
    assert_eq!(report.strike.label, "STRAIGHT! +5 PSN");
    assert_eq!(report.strike.damage, 108);
    assert!(matches!(report.outcome, TurnOutcome::Victory { cleared_floor: 1, .. }));
    // Poison does not follow into the next floor's enemy.
    assert_eq!(game.run().expect("run").enemy.poison, 0);
}

#[test]
fn mage_builds_arcane_across_turns_then_unleashes() {
    let mut game = scripted_run(HeroClass::Mage);
    // Keep the Skeleton alive long enough to see three turns.
    game.run_mut().enemy.hp = 100;
    game.run_mut().enemy.max_hp = 100;

    game.script_dice(&[2, 2, 5, 5]);
    game.roll_dice().expect("roll");
    let report = game.act().expect("two pair");
    assert_eq!(report.strike.label, "+2 ARCANE");
    assert_eq!(report.strike.damage, 12);

    game.script_dice(&[1, 1, 3, 6]);
    game.roll_dice().expect("roll");
    game.act().expect("pair");
    assert_eq!(game.run().expect("run").player.kit, Kit::Mage { arcane: 3 });

    game.script_dice(&[4, 4, 4, 4]);
    game.roll_dice().expect("roll");
    let report = game.act().expect("quad");
    // 16 x3 = 48, x2.05 = 98.4
    assert_eq!(report.strike.damage, 98);
    assert_eq!(report.strike.healed, 6);
    assert_eq!(game.run().expect("run").player.kit, Kit::Mage { arcane: 0 });
}
