use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, ValueEnum};
use delver_core::hand::classify;
use delver_core::state::MAX_STACKS;
use delver_core::{
    ContentPack, Game, HeroClass, InputJournal, InputPayload, Kit, Phase, RunState,
};
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Play runs with a greedy dice policy", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    runs: u32,
    #[arg(long, value_enum, default_value_t = ClassArg::Knight)]
    class: ClassArg,
    /// Stop a run after this many turns even if it is still alive
    #[arg(long, default_value_t = 2000)]
    max_turns: u32,
    /// Write the journal of the last run here
    #[arg(long)]
    record: Option<PathBuf>,
    /// Content pack TOML; the built-in catalog when omitted
    #[arg(long)]
    content: Option<PathBuf>,
    /// Print one JSON summary per run instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    Knight,
    Mage,
    Archer,
    Rogue,
}

impl From<ClassArg> for HeroClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Knight => HeroClass::Knight,
            ClassArg::Mage => HeroClass::Mage,
            ClassArg::Archer => HeroClass::Archer,
            ClassArg::Rogue => HeroClass::Rogue,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    class: HeroClass,
    floor: u32,
    turns: u32,
    died: bool,
    snapshot_hash: u64,
}

/// Drives one game and journals every input it applies.
struct Autoplayer {
    game: Game,
    journal: InputJournal,
}

impl Autoplayer {
    fn new(seed: u64, content: &ContentPack) -> Self {
        Self { game: Game::new(seed, content), journal: InputJournal::for_content(seed, content) }
    }

    fn apply(&mut self, payload: InputPayload) -> Result<()> {
        self.journal.append(self.game.next_input_seq(), payload);
        self.game
            .apply_input(&payload)
            .with_context(|| format!("policy issued an illegal input {payload:?}"))?;
        check_invariants(self.game.state(), self.game.content())
    }

    fn play(&mut self, class: HeroClass, max_turns: u32) -> Result<RunSummary> {
        self.apply(InputPayload::OpenCharacterSelect)?;
        self.apply(InputPayload::StartRun { class })?;

        let mut turns = 0;
        while self.game.phase() == Phase::Combat && turns < max_turns {
            self.play_turn()?;
            turns += 1;
        }

        let floor = self.game.run().map_or(0, |run| run.floor);
        Ok(RunSummary {
            seed: self.game.seed(),
            class,
            floor,
            turns,
            died: self.game.phase() == Phase::GameOver,
            snapshot_hash: self.game.snapshot_hash(),
        })
    }

    fn play_turn(&mut self) -> Result<()> {
        self.apply(InputPayload::Roll)?;
        loop {
            let run = self.game.run().context("combat without a run")?;
            let dice = run.dice.values();
            let lethal = self
                .game
                .preview()
                .is_some_and(|strike| strike.damage >= run.enemy.hp + run.enemy.shield);
            if run.rolls_left == 0 || lethal || classify(&dice).rank >= 3 {
                break;
            }

            let wanted = choose_locks(dice);
            let current = run.dice.locked();
            for index in (0..wanted.len()).filter(|&i| wanted[i] != current[i]) {
                self.apply(InputPayload::ToggleLock { index })?;
            }
            self.apply(InputPayload::Roll)?;
        }
        self.apply(InputPayload::Act)
    }
}

/// Keeps the most common face, preferring higher faces on ties. Singles lock nothing.
fn choose_locks(dice: [u8; 4]) -> [bool; 4] {
    let mut counts = [0usize; 7];
    for die in dice {
        counts[usize::from(die)] += 1;
    }
    let best = (1..=6u8).max_by_key(|&face| (counts[usize::from(face)], face)).unwrap_or(6);
    if counts[usize::from(best)] < 2 {
        return [false; 4];
    }
    dice.map(|die| die == best)
}

fn check_invariants(state: &RunState, content: &ContentPack) -> Result<()> {
    let Some(run) = &state.run else {
        ensure!(
            matches!(state.phase, Phase::Title | Phase::CharacterSelect),
            "{:?} without a run",
            state.phase
        );
        return Ok(());
    };
    let player = &run.player;
    let enemy = &run.enemy;
    ensure!(player.max_hp >= 1, "player max HP {} below 1", player.max_hp);
    ensure!((0..=player.max_hp).contains(&player.hp), "player HP {} out of range", player.hp);
    ensure!((0..=enemy.max_hp).contains(&enemy.hp), "enemy HP {} out of range", enemy.hp);
    ensure!(enemy.shield >= 0 && player.kit.shield() >= 0, "negative shield");
    ensure!(
        run.rolls_left <= content.classes.get(player.class()).rolls,
        "roll budget exceeded: {}",
        run.rolls_left
    );
    if let Kit::Mage { arcane: stacks } | Kit::Archer { marks: stacks } = player.kit {
        ensure!(stacks <= MAX_STACKS, "{stacks} stacks over the cap");
    }
    match state.phase {
        Phase::Combat => {
            ensure!(!player.is_dead() && !enemy.is_dead(), "combat with a dead combatant")
        }
        Phase::GameOver => ensure!(player.is_dead(), "game over with a living player"),
        Phase::Title | Phase::CharacterSelect => bail!("run kept outside combat"),
    }
    Ok(())
}

fn write_journal(path: &Path, journal: &InputJournal) -> Result<()> {
    let data = serde_json::to_vec_pretty(journal).context("Failed to serialize journal")?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write journal: {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let content = match &args.content {
        Some(path) => ContentPack::load(path)
            .with_context(|| format!("Failed to load content pack: {}", path.display()))?,
        None => ContentPack::default(),
    };
    let class = HeroClass::from(args.class);
    info!(seed = args.seed, runs = args.runs, class = class.name(), "autoplay starting");

    let mut last_journal = None;
    let mut deepest = 0;
    for offset in 0..u64::from(args.runs) {
        let mut player = Autoplayer::new(args.seed.wrapping_add(offset), &content);
        let summary = player.play(class, args.max_turns)?;
        debug!(?summary, "run finished");
        deepest = deepest.max(summary.floor);

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!(
                "seed {}: {} reached floor {} in {} turns{}",
                summary.seed,
                class.name(),
                summary.floor,
                summary.turns,
                if summary.died { "" } else { " (still alive)" }
            );
        }
        last_journal = Some(player.journal);
    }

    if !args.json {
        println!("Deepest floor: {deepest}");
    }
    if let (Some(path), Some(journal)) = (&args.record, &last_journal) {
        write_journal(path, journal)?;
        println!("Journal written to {}", path.display());
    }
    Ok(())
}
