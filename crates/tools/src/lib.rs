//! Shared plumbing for the command-line tools: logging setup, config loading, and export.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use delve_core::{Dungeon, Room, SimConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for map and JSON output.
pub fn init_tracing() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(io::stderr)
        .init();
}

/// `RUST_LOG`-style directives, or `info` when they are absent or unparsable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    SimConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Wire shape handed to external renderers.
#[derive(Serialize)]
pub struct DungeonExport<'a> {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub fingerprint: u64,
    /// Row-major `0 = floor`, `1 = wall`.
    pub tiles: Vec<Vec<u8>>,
    pub rooms: &'a [Room],
}

impl<'a> DungeonExport<'a> {
    pub fn new(dungeon: &'a Dungeon) -> Self {
        Self {
            seed: dungeon.seed,
            width: dungeon.grid.width(),
            height: dungeon.grid.height(),
            fingerprint: dungeon.fingerprint(),
            tiles: dungeon.grid.to_rows(),
            rooms: &dungeon.rooms,
        }
    }
}

pub fn render_text(dungeon: &Dungeon) -> String {
    let mut out = dungeon.grid.to_ascii();
    let _ = writeln!(out);
    for (index, room) in dungeon.rooms.iter().enumerate() {
        let _ = writeln!(
            out,
            "#{index:<2} {:?} at ({}, {}) {}x{} difficulty {} theme {:?} links {:?}",
            room.role,
            room.x,
            room.y,
            room.width,
            room.height,
            room.difficulty,
            room.theme,
            room.connections
        );
    }
    let _ = writeln!(out, "fingerprint {:016x}", dungeon.fingerprint());
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use delve_core::generate_dungeon;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn log_filter_honours_requested_level() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(Some("delve_core=trace")).to_string(), "delve_core=trace");
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn missing_path_falls_back_to_defaults() {
        assert_eq!(load_config(None).expect("defaults"), SimConfig::default());
    }

    #[test]
    fn config_file_overrides_named_fields() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[generator]\nmax_rooms = 3\n\n[combat]\napply_status_modifiers = false")
            .expect("write config");

        let config = load_config(Some(file.path())).expect("valid config");
        assert_eq!(config.generator.max_rooms, 3);
        assert!(!config.combat.apply_status_modifiers);
        assert_eq!(config.generator.room_margin, SimConfig::default().generator.room_margin);
    }

    #[test]
    fn invalid_config_reports_the_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[generator]\nmin_room_width = 9\nmax_room_width = 3")
            .expect("write config");

        let error = load_config(Some(file.path())).expect_err("inverted range must fail");
        assert!(error.to_string().contains("Invalid config file"), "{error:#}");
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn export_carries_grid_rows_and_rooms() {
        let dungeon = generate_dungeon(5, 30, 20).expect("valid size");
        let json = serde_json::to_value(DungeonExport::new(&dungeon)).expect("serializable");
        assert_eq!(json["width"], 30);
        assert_eq!(json["tiles"].as_array().map(Vec::len), Some(20));
        assert_eq!(json["rooms"].as_array().map(Vec::len), Some(dungeon.rooms.len()));
        assert_eq!(json["rooms"][0]["role"], "Start");
    }

    #[test]
    fn text_render_ends_with_fingerprint() {
        let dungeon = generate_dungeon(6, 20, 12).expect("valid size");
        let text = render_text(&dungeon);
        assert!(text.lines().count() > dungeon.grid.height());
        assert!(text.trim_end().ends_with(&format!("{:016x}", dungeon.fingerprint())));
    }
}
