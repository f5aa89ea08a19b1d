//! # Moodboard Replay
//!
//! Replays a JSON script of board commands and pointer events against a
//! fresh board, then prints the resulting board snapshot.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod script;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use moodboard_core::{BoardConfig, BoardStore, InteractionEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::script::Script;

/// Command-line arguments for moodboard-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "moodboard-replay")]
#[command(about = "Replay a mood-board interaction script and print the final board")]
#[command(version)]
struct CliArgs {
    /// Path to the replay script (JSON)
    #[arg(long, env = "MOODBOARD_SCRIPT")]
    script: PathBuf,

    /// Path to a board configuration file (JSON)
    #[arg(long, env = "MOODBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the final board
    #[arg(long)]
    pretty: bool,
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: `info,moodboard_core=debug,moodboard_cli=debug`).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,moodboard_core=debug,moodboard_cli=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BoardConfig> {
    let Some(path) = path else {
        return Ok(BoardConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    BoardConfig::from_json(&json)
        .with_context(|| format!("Invalid board config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref())?;
    let script = Script::from_path(&args.script)?;

    tracing::info!(
        script = %args.script.display(),
        steps = script.steps.len(),
        "Replaying script"
    );

    let mut store = BoardStore::with_config(config);
    let mut engine = InteractionEngine::new();
    let report = script.run(&mut store, &mut engine)?;

    tracing::info!(
        steps = report.steps,
        revisions = report.revisions,
        elements = store.board().element_count(),
        "Replay finished"
    );

    let board = store.board();
    let output = if args.pretty {
        serde_json::to_string_pretty(board)
    } else {
        serde_json::to_string(board)
    }
    .context("Failed to serialize board")?;
    println!("{output}");

    Ok(())
}
