//! Game tuning constants
//!
//! Defaults are the built-in balance. A JSON file can override any subset of
//! fields; lengths may be written as numbers or pixel strings (`"1000px"`).

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::entities::{EntityKind, Size};
use crate::utils::px_to_number;

/// Largest accepted length, position or offset in pixels.
pub const MAX_PX: i32 = 100_000;
/// Largest accepted interval in milliseconds.
pub const MAX_INTERVAL_MS: u64 = 3_600_000;
/// Largest accepted kill bonus.
pub const MAX_KILL_SCORE: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base speed in pixels per frame.
    pub speed: i32,
    pub wizard_moving_multiplier: i32,
    pub fireball_moving_multiplier: i32,
    /// Minimum milliseconds between shots.
    pub fire_interval: u64,
    /// Base milliseconds between clouds; `0` turns cloud spawning off.
    pub cloud_spawn_interval: u64,
    /// Extra random delay in `[0, jitter)` added to each cloud interval.
    pub cloud_spawn_jitter: u64,
    pub bug_spawn_interval: u64,
    pub bug_kill_score: u64,

    #[serde(deserialize_with = "de_px")]
    pub area_width: i32,
    #[serde(deserialize_with = "de_px")]
    pub area_height: i32,

    #[serde(deserialize_with = "de_px")]
    pub wizard_width: i32,
    #[serde(deserialize_with = "de_px")]
    pub wizard_height: i32,
    #[serde(deserialize_with = "de_px")]
    pub wizard_start_x: i32,
    #[serde(deserialize_with = "de_px")]
    pub wizard_start_y: i32,
    /// Horizontal distance from the wizard at which fireballs appear.
    #[serde(deserialize_with = "de_px")]
    pub fireball_offset_x: i32,

    #[serde(deserialize_with = "de_px")]
    pub fireball_width: i32,
    #[serde(deserialize_with = "de_px")]
    pub fireball_height: i32,
    #[serde(deserialize_with = "de_px")]
    pub cloud_width: i32,
    #[serde(deserialize_with = "de_px")]
    pub cloud_height: i32,
    #[serde(deserialize_with = "de_px")]
    pub bug_width: i32,
    #[serde(deserialize_with = "de_px")]
    pub bug_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 2,
            wizard_moving_multiplier: 4,
            fireball_moving_multiplier: 5,
            fire_interval: 1000,
            cloud_spawn_interval: 3000,
            cloud_spawn_jitter: 2000,
            bug_spawn_interval: 1000,
            bug_kill_score: 2000,

            area_width: 1000,
            area_height: 600,

            wizard_width: 64,
            wizard_height: 64,
            wizard_start_x: 200,
            wizard_start_y: 200,
            fireball_offset_x: 80,

            fireball_width: 40,
            fireball_height: 40,
            cloud_width: 200,
            cloud_height: 120,
            bug_width: 60,
            bug_height: 60,
        }
    }
}

impl Config {
    /// Load overrides from a JSON file and validate the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("speed", self.speed),
            ("wizard_moving_multiplier", self.wizard_moving_multiplier),
            ("fireball_moving_multiplier", self.fireball_moving_multiplier),
            ("area_width", self.area_width),
            ("area_height", self.area_height),
            ("wizard_width", self.wizard_width),
            ("wizard_height", self.wizard_height),
            ("fireball_width", self.fireball_width),
            ("fireball_height", self.fireball_height),
            ("cloud_width", self.cloud_width),
            ("cloud_height", self.cloud_height),
            ("bug_width", self.bug_width),
            ("bug_height", self.bug_height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::Invalid(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v > MAX_PX) {
            return Err(ConfigError::Invalid(format!(
                "{} must be at most {}, got {}",
                name, MAX_PX, value
            )));
        }
        let offsets = [
            ("wizard_start_x", self.wizard_start_x),
            ("wizard_start_y", self.wizard_start_y),
            ("fireball_offset_x", self.fireball_offset_x),
        ];
        let in_range = -MAX_PX..=MAX_PX;
        if let Some((name, value)) = offsets.iter().find(|(_, v)| !in_range.contains(v)) {
            return Err(ConfigError::Invalid(format!(
                "{} must be within ±{}, got {}",
                name, MAX_PX, value
            )));
        }
        let steps = [
            ("wizard", self.wizard_moving_multiplier),
            ("fireball", self.fireball_moving_multiplier),
        ];
        for (name, multiplier) in steps {
            let step = i64::from(self.speed) * i64::from(multiplier);
            if step > i64::from(self.area_width) {
                return Err(ConfigError::Invalid(format!(
                    "{} step {} px per frame exceeds the play area width {}",
                    name, step, self.area_width
                )));
            }
        }
        let intervals = [
            ("fire_interval", self.fire_interval),
            ("cloud_spawn_interval", self.cloud_spawn_interval),
            ("cloud_spawn_jitter", self.cloud_spawn_jitter),
            ("bug_spawn_interval", self.bug_spawn_interval),
        ];
        if let Some((name, value)) = intervals.iter().find(|(_, v)| *v > MAX_INTERVAL_MS) {
            return Err(ConfigError::Invalid(format!(
                "{} must be at most {} ms, got {}",
                name, MAX_INTERVAL_MS, value
            )));
        }
        if self.bug_kill_score > MAX_KILL_SCORE {
            return Err(ConfigError::Invalid(format!(
                "bug_kill_score must be at most {}, got {}",
                MAX_KILL_SCORE, self.bug_kill_score
            )));
        }
        if self.area_width < self.wizard_width || self.area_height < self.wizard_height {
            return Err(ConfigError::Invalid(format!(
                "play area {}x{} is smaller than the wizard {}x{}",
                self.area_width, self.area_height, self.wizard_width, self.wizard_height
            )));
        }
        Ok(())
    }

    pub fn area(&self) -> Size {
        Size {
            width: self.area_width,
            height: self.area_height,
        }
    }

    pub fn wizard_size(&self) -> Size {
        Size {
            width: self.wizard_width,
            height: self.wizard_height,
        }
    }

    pub fn size_of(&self, kind: &EntityKind) -> Size {
        match kind {
            EntityKind::Fireball => Size {
                width: self.fireball_width,
                height: self.fireball_height,
            },
            EntityKind::Cloud => Size {
                width: self.cloud_width,
                height: self.cloud_height,
            },
            EntityKind::Bug => Size {
                width: self.bug_width,
                height: self.bug_height,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PxValue {
    Number(i32),
    Text(String),
}

fn de_px<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    match PxValue::deserialize(deserializer)? {
        PxValue::Number(n) => Ok(n),
        PxValue::Text(s) => px_to_number(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("not a pixel value: {:?}", s))),
    }
}
