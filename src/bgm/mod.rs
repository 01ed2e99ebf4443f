// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Document model for a BGM file.
//!
//! This module provides:
//! - Segments: ordered entries of a variation (track references and loop markers)
//! - Variations: the four alternate playback orderings of a song
//! - Track lists: the externally-owned musical content a segment plays

pub mod segment;
pub mod track;

pub use segment::{LabelIndex, Segment, SegmentId, Variation};
pub use track::{Command, Track, TrackList, TrackListId};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of variations every BGM carries
pub const VARIATION_COUNT: usize = 4;

/// A complete BGM document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bgm {
    /// Song name
    #[serde(default)]
    pub name: String,
    /// The four variations, in slot order
    #[serde(default)]
    pub variations: [Variation; VARIATION_COUNT],
    /// Track lists referenced by `Subseg` segments
    #[serde(default)]
    pub track_lists: BTreeMap<TrackListId, TrackList>,
}

impl Bgm {
    /// Create a new empty BGM
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get variation by slot index
    pub fn variation(&self, index: usize) -> Option<&Variation> {
        self.variations.get(index)
    }

    /// Get mutable variation by slot index
    pub fn variation_mut(&mut self, index: usize) -> Option<&mut Variation> {
        self.variations.get_mut(index)
    }

    /// Highest segment id used by any variation
    pub fn max_segment_id(&self) -> Option<SegmentId> {
        self.variations
            .iter()
            .flat_map(|v| v.segments.iter())
            .map(Segment::id)
            .max()
    }

    /// Iterate over every segment id in the document, in variation order
    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.variations
            .iter()
            .flat_map(|v| v.segments.iter())
            .map(Segment::id)
    }

    /// Add a track list under the next free id
    pub fn add_track_list(&mut self, track_list: TrackList) -> TrackListId {
        let id = self
            .track_lists
            .keys()
            .next_back()
            .map(|id| id + 1)
            .unwrap_or(0);
        self.track_lists.insert(id, track_list);
        id
    }

    /// Builder: add a track list under a specific id
    pub fn with_track_list(mut self, id: TrackListId, track_list: TrackList) -> Self {
        self.track_lists.insert(id, track_list);
        self
    }

    /// Builder: replace a variation
    pub fn with_variation(mut self, index: usize, variation: Variation) -> Self {
        if let Some(slot) = self.variations.get_mut(index) {
            *slot = variation;
        }
        self
    }
}
