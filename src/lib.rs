// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segment timeline model for BGM variations.
//!
//! A variation is an ordered list of segments: references to track lists
//! plus `StartLoop`/`EndLoop` markers. This crate derives loop regions and
//! durations from that list and performs the structural edits (move,
//! wrap/unwrap in a loop, set repeat count) that keep loop markers usable.

pub mod bgm;
pub mod config;
pub mod error;
pub mod timeline;

pub use bgm::{Bgm, Segment, SegmentId, Variation};
pub use error::DocumentError;
pub use timeline::{BgmAction, Loop, VariationAction};
