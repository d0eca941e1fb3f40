//! Command-line interface for sliding_stones.

use clap::{Parser, Subcommand};
use sliding_stones_core::Layout;
use std::path::PathBuf;

/// Sliding Stones - frame the block with four L pieces
#[derive(Parser, Debug)]
#[command(name = "sliding_stones")]
#[command(about = "Klotski-style sliding block puzzle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, one command per line on stdin
    Play {
        /// Path to a puzzle config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Starting layout (standard or near-win), overrides the config file
        #[arg(short, long)]
        layout: Option<Layout>,

        /// URL-style query string; `mock=true` selects the near-win layout
        #[arg(long)]
        query: Option<String>,
    },

    /// Print the starting board and exit
    Show {
        /// Starting layout (standard or near-win)
        #[arg(short, long, default_value = "standard")]
        layout: Layout,

        /// Print the snapshot as JSON instead of a text grid
        #[arg(long)]
        json: bool,
    },
}

/// Picks the starting layout: an explicit `--layout` beats `--query`,
/// which beats the config file.
pub fn resolve_layout(
    from_config: Layout,
    layout: Option<Layout>,
    query: Option<&str>,
) -> Layout {
    layout
        .or_else(|| query.map(Layout::from_query))
        .unwrap_or(from_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_flags_parse() {
        let cli = Cli::try_parse_from([
            "sliding_stones",
            "play",
            "--layout",
            "near-win",
            "--query",
            "?mock=true",
        ])
        .unwrap();
        match cli.command {
            Command::Play { layout, query, config } => {
                assert_eq!(layout, Some(Layout::NearWin));
                assert_eq!(query.as_deref(), Some("?mock=true"));
                assert_eq!(config, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_layout_precedence() {
        assert_eq!(
            resolve_layout(Layout::Standard, None, Some("?mock=true")),
            Layout::NearWin
        );
        assert_eq!(
            resolve_layout(Layout::NearWin, Some(Layout::Standard), Some("mock=true")),
            Layout::Standard
        );
        assert_eq!(resolve_layout(Layout::NearWin, None, None), Layout::NearWin);
    }
}
