// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Errors raised while loading, validating, or saving documents and settings.
//!
//! Timeline edits themselves never fail; only the file layer does.

use std::path::PathBuf;

use thiserror::Error;

use crate::bgm::SegmentId;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("segment id {0} is used more than once")]
    DuplicateSegmentId(SegmentId),

    #[error("variation index {0} out of range (expected 0-3)")]
    VariationOutOfRange(usize),

    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

pub type Result<T, E = DocumentError> = std::result::Result<T, E>;
