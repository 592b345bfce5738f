//! Game settings
//!
//! Everything the simulation needs to know about the play field and the
//! spawn policy. Passed to the Director at construction; never mutated
//! during a session.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::sim::Color;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Upper end of the per-frame spawn roll (one spawn per this many frames on average)
    pub fn spawn_range(&self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Normal => 15,
            Difficulty::Hard => 8,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window title (shown in the status line)
    pub caption: String,

    // === Play field ===
    /// Grid columns
    pub cols: i32,
    /// Grid rows
    pub rows: i32,
    /// Pixels per grid cell
    pub cell_size: i32,
    /// Font size for every actor
    pub font_size: i32,
    /// Target frames per second
    pub frame_rate: u32,

    // === Spawning ===
    /// Spawn roll is uniform in `[1, spawn_range]`
    pub spawn_range: u32,
    /// Roll value that triggers a spawn
    pub spawn_trigger: u32,
    /// Artifacts at or below this y are removed. Fixed, not the viewport height.
    pub artifact_floor: i32,
    /// Artifacts scattered over the field when a session starts
    pub initial_artifacts: u32,

    // === Looks ===
    pub robot_glyph: String,
    pub robot_color: Color,
    pub banner_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            caption: "Greed".to_string(),

            cols: 60,
            rows: 40,
            cell_size: 15,
            font_size: 15,
            frame_rate: 12,

            spawn_range: Difficulty::Normal.spawn_range(),
            spawn_trigger: 5,
            artifact_floor: 600,
            initial_artifacts: 5,

            robot_glyph: "#".to_string(),
            robot_color: Color::WHITE,
            banner_color: Color::YELLOW,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset (only touches spawn frequency)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.spawn_range = difficulty.spawn_range();
        // Keep the trigger reachable on short rolls
        self.spawn_trigger = self.spawn_trigger.min(self.spawn_range).max(1);
    }

    /// Play field width in pixels
    pub fn play_width(&self) -> i32 {
        self.cols.saturating_mul(self.cell_size)
    }

    /// Play field height in pixels
    pub fn play_height(&self) -> i32 {
        self.rows.saturating_mul(self.cell_size)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size >= 1, "cell_size must be at least 1, got {}", self.cell_size);
        ensure!(self.cols >= 2, "cols must be at least 2, got {}", self.cols);
        ensure!(self.rows >= 1, "rows must be at least 1, got {}", self.rows);
        ensure!(self.frame_rate >= 1, "frame_rate must be at least 1");
        ensure!(
            self.spawn_trigger >= 1 && self.spawn_trigger <= self.spawn_range,
            "spawn_trigger must be in [1, spawn_range], got {} with spawn_range {}",
            self.spawn_trigger,
            self.spawn_range
        );
        ensure!(
            self.artifact_floor > 0,
            "artifact_floor must be positive, got {}",
            self.artifact_floor
        );
        ensure!(
            self.cols.checked_mul(self.cell_size).is_some()
                && self.rows.checked_mul(self.cell_size).is_some(),
            "{}x{} grid with cell_size {} overflows pixel coordinates",
            self.cols,
            self.rows,
            self.cell_size
        );
        // One extra terminal row for the status line
        ensure!(
            self.cols <= i32::from(u16::MAX) && self.rows < i32::from(u16::MAX),
            "{}x{} grid does not fit a terminal",
            self.cols,
            self.rows
        );
        Ok(())
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_classic_game() {
        let settings = Settings::default();
        assert_eq!(settings.play_width(), 900);
        assert_eq!(settings.play_height(), 600);
        assert_eq!(settings.artifact_floor, settings.play_height());
        assert_eq!(settings.spawn_range, 15);
        assert_eq!(settings.spawn_trigger, 5);
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nope"), None);

        let hard = Settings::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.spawn_range, 8);
        assert!(hard.spawn_trigger <= hard.spawn_range);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "cols": 20, "spawn_range": 3 }"#)
            .expect("valid settings json");
        assert_eq!(settings.cols, 20);
        assert_eq!(settings.spawn_range, 3);
        assert_eq!(settings.rows, 40);
        assert_eq!(settings.caption, "Greed");
    }

    #[test]
    fn test_defaults_and_presets_validate() {
        assert!(Settings::default().validate().is_ok());
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert!(Settings::from_difficulty(difficulty).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_unplayable_settings() {
        let tweaks: [fn(&mut Settings); 11] = [
            |s| s.cell_size = -15,
            |s| s.cell_size = 0,
            |s| s.cols = 1,
            |s| s.rows = 0,
            |s| s.frame_rate = 0,
            |s| s.spawn_trigger = 0,
            |s| s.spawn_trigger = s.spawn_range + 1,
            |s| s.artifact_floor = 0,
            |s| s.cols = 200_000_000,
            |s| {
                s.cols = 70_000;
                s.cell_size = 1;
            },
            |s| {
                s.rows = 65_535;
                s.cell_size = 1;
            },
        ];
        let bad = tweaks.map(|tweak| {
            let mut settings = Settings::default();
            tweak(&mut settings);
            settings
        });
        for settings in bad {
            assert!(settings.validate().is_err(), "accepted {settings:?}");
        }
    }

    #[test]
    fn test_play_extent_saturates() {
        let settings = Settings {
            cols: 200_000_000,
            ..Default::default()
        };
        assert_eq!(settings.play_width(), i32::MAX);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "cols": 30, "rows": 20, "spawn_range": 10 }}"#).expect("write");

        let settings = Settings::load(file.path()).expect("valid settings file");
        assert_eq!(settings.cols, 30);
        assert_eq!(settings.rows, 20);
        assert_eq!(settings.spawn_range, 10);
        assert_eq!(settings.play_width(), 450);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "cell_size": -15, "spawn_range": 1, "spawn_trigger": 1 }}"#)
            .expect("write");

        let err = Settings::load(file.path()).expect_err("negative cell size");
        assert!(format!("{err:#}").contains("cell_size"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Settings::load(Path::new("/nonexistent/greed-settings.json"));
        assert!(result.is_err());
    }
}
