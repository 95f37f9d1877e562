use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use delver_core::{ContentPack, InputJournal, ReplayResult, replay::replay_to_end};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Replay a recorded input journal", long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Content pack TOML; the built-in catalog when omitted
    #[arg(short, long)]
    content: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    let content = load_content(args.content.as_ref())?;

    let result: ReplayResult = replay_to_end(&content, &journal)
        .with_context(|| format!("Replay of {} failed", args.journal.display()))?;

    println!("Replay complete.");
    println!("Inputs: {}", result.inputs_applied);
    println!("Phase: {:?}", result.final_phase);
    match result.floor {
        Some(floor) => println!("Floor: {floor}"),
        None => println!("Floor: -"),
    }
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}

fn load_content(path: Option<&PathBuf>) -> Result<ContentPack> {
    match path {
        Some(path) => ContentPack::load(path)
            .with_context(|| format!("Failed to load content pack: {}", path.display())),
        None => Ok(ContentPack::default()),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .init();
}
