//! Sliding Stones - Unified CLI

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use sliding_stones::cli::{Cli, Command, resolve_layout};
use sliding_stones::{PuzzleConfig, Session, render_board, run};
use sliding_stones_core::{GameStore, Layout};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            layout,
            query,
        } => play(config, layout, query),
        Command::Show { layout, json } => show(layout, json),
    }
}

/// Run an interactive session on stdin/stdout
#[instrument(skip_all)]
fn play(config: Option<PathBuf>, layout: Option<Layout>, query: Option<String>) -> Result<()> {
    let config = match config {
        Some(path) => PuzzleConfig::from_file(path)?,
        None => PuzzleConfig::default(),
    };
    let layout = resolve_layout(*config.layout(), layout, query.as_deref());
    let config = config.with_layout(layout);
    info!(%layout, "Starting session");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut session = Session::new(&config);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run(&mut session, stdin, tokio::io::stdout()).await
    })
}

/// Print the starting board
#[instrument]
fn show(layout: Layout, json: bool) -> Result<()> {
    let snapshot = GameStore::new(layout).snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_board(&snapshot));
    }
    Ok(())
}
