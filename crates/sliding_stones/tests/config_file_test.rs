//! Tests for loading puzzle config files.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use sliding_stones::PuzzleConfig;
use sliding_stones_core::Layout;

/// Writes `content` to `name` inside `dir` and returns the path.
fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_full_config_loads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "puzzle.toml",
        r#"cell_size_px = 80.0
min_drag_distance_px = 12.5
win_settle_ms = 200
layout = "near-win"
"#,
    );

    let config = PuzzleConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.cell_size_px(), 80.0);
    assert_eq!(*config.min_drag_distance_px(), 12.5);
    assert_eq!(config.win_settle_delay(), Duration::from_millis(200));
    assert_eq!(*config.layout(), Layout::NearWin);
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "empty.toml", "");

    let config = PuzzleConfig::from_file(&path).expect("Load failed");
    assert_eq!(config, PuzzleConfig::default());
    assert_eq!(*config.layout(), Layout::Standard);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = PuzzleConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_unknown_layout_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "bad.toml", "layout = \"sideways\"\n");

    let err = PuzzleConfig::from_file(&path).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
    assert!(err.to_string().contains("Config error"));
}

#[test]
fn test_negative_drag_distance_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "neg.toml", "min_drag_distance_px = -1.0\n");

    let err = PuzzleConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("min_drag_distance_px"));
}
