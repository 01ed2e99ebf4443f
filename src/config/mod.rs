// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Document files and editor settings.
//!
//! This module provides data structures for loading and saving
//! BGM documents (YAML) and editor settings (TOML).

pub mod settings;

pub use settings::{EditorSettings, IdSettings, IdStrategy, LogSettings, TimelineSettings};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bgm::Bgm;
use crate::error::{DocumentError, Result};

/// Root of a document file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFile {
    /// File format version
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// The song itself
    pub bgm: Bgm,
}

fn default_format_version() -> u32 {
    1
}

impl DocumentFile {
    /// Wrap a BGM in a document
    pub fn new(bgm: Bgm) -> Self {
        Self {
            format_version: default_format_version(),
            bgm,
        }
    }

    /// Load and validate a document from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_yaml(&contents)?;
        debug!(?path, name = %doc.bgm.name, "loaded document");
        Ok(doc)
    }

    /// Parse and validate a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: Self = serde_yaml::from_str(yaml)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save document to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every segment id is unique across all variations
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.bgm.segment_ids() {
            if !seen.insert(id) {
                return Err(DocumentError::DuplicateSegmentId(id));
            }
        }
        Ok(())
    }
}
