// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editor settings loaded from TOML.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::bgm::Bgm;
use crate::error::{DocumentError, Result};
use crate::timeline::{IdGenerator, RandomIds, SequentialIds, TimeSignature};

/// Root of the settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub ids: IdSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSettings {
    /// Max level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

/// Grid used when reporting lengths in bars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineSettings {
    #[serde(default = "default_ticks_per_beat")]
    pub ticks_per_beat: u32,
    #[serde(default = "default_beats_per_bar")]
    pub beats_per_bar: u32,
}

fn default_ticks_per_beat() -> u32 {
    48
}
fn default_beats_per_bar() -> u32 {
    4
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            ticks_per_beat: default_ticks_per_beat(),
            beats_per_bar: default_beats_per_bar(),
        }
    }
}

/// How new segment ids are generated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// One past the highest id in the document
    #[default]
    Sequential,
    /// Random ids avoiding those in the document
    Random,
}

/// Id generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IdSettings {
    #[serde(default)]
    pub strategy: IdStrategy,
    /// Seed for the random strategy (None = seeded from the OS)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EditorSettings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Configured max log level
    pub fn log_level(&self) -> Result<Level> {
        Level::from_str(&self.log.level).map_err(|_| DocumentError::InvalidLogLevel(self.log.level.clone()))
    }

    /// Configured bar grid
    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::new(self.timeline.ticks_per_beat, self.timeline.beats_per_bar)
    }

    /// Id generator for editing `bgm`
    pub fn id_generator(&self, bgm: &Bgm) -> Box<dyn IdGenerator> {
        match self.ids.strategy {
            IdStrategy::Sequential => Box::new(SequentialIds::for_bgm(bgm)),
            IdStrategy::Random => {
                let ids = match self.ids.seed {
                    Some(seed) => RandomIds::from_seed(seed),
                    None => RandomIds::from_entropy(),
                };
                Box::new(ids.for_bgm(bgm))
            }
        }
    }
}
