//! Persistent player settings.
//!
//! Settings live in a small JSON file next to the game. Loading is forgiving:
//! a missing or unreadable file gives the defaults, and unknown or missing
//! keys fall back to their default values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quiz::deck::{QuestionMode, QuestionOrder};

/// Default settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

/// Question timer values above this are taken to be milliseconds.
const MILLISECOND_THRESHOLD: f32 = 1000.0;

/// Player-facing settings shared by every game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Order questions are asked in.
    pub question_order: QuestionOrder,
    /// Seconds allowed per question, `None` for no limit.
    pub time_between_questions: Option<f32>,
    /// Seconds allowed for the whole session, `None` for no limit.
    pub total_time: Option<f32>,
    /// Starting lives, `None` for unlimited.
    pub lives: Option<u32>,
    /// Sound effects on or off.
    pub sfx: bool,
    /// Background music on or off.
    pub music: bool,
    /// Music file name.
    pub music_choice: String,
    /// Whether questions loop or are each asked once.
    pub question_mode: QuestionMode,
    /// Scales foe movement speed.
    pub enemy_speed_multiplier: f32,
    /// Whether shots show a muzzle flash.
    pub muzzle_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            question_order: QuestionOrder::Random,
            time_between_questions: None,
            total_time: None,
            lives: Some(3),
            sfx: true,
            music: false,
            music_choice: String::new(),
            question_mode: QuestionMode::Loop,
            enemy_speed_multiplier: 1.0,
            muzzle_flash: true,
        }
    }
}

impl Settings {
    /// Loads settings, falling back to the defaults when the file is missing
    /// or malformed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("ignoring settings file: {e}");
            Self::default()
        })
    }

    /// Loads settings, reporting any failure.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }

    /// Seconds allowed per question.
    ///
    /// Values above 1000 are read as milliseconds. Non-positive values mean
    /// no limit.
    pub fn question_time_limit(&self) -> Option<f32> {
        let raw = self.time_between_questions?;
        let seconds = if raw > MILLISECOND_THRESHOLD {
            raw / 1000.0
        } else {
            raw
        };
        (seconds > 0.0).then_some(seconds)
    }

    /// Seconds allowed for the whole session. Non-positive values mean no
    /// limit.
    pub fn session_time_limit(&self) -> Option<f32> {
        self.total_time.filter(|t| *t > 0.0)
    }
}
