// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segments and variations.
//!
//! A variation is an ordered list of segments; order is playback order.
//! Segments are identified by their `id`, never by position.

use serde::{Deserialize, Serialize};

use super::TrackListId;

/// Stable identity of a segment within a BGM
pub type SegmentId = u32;

/// Key matching a `StartLoop` to its `EndLoop`
pub type LabelIndex = u8;

/// One entry in a variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    /// Plays the content of a track list
    Subseg {
        id: SegmentId,
        track_list: TrackListId,
    },
    /// Opens a loop region
    StartLoop {
        id: SegmentId,
        label_index: LabelIndex,
    },
    /// Closes the loop region opened by the `StartLoop` with the same label.
    /// `iter_count == 0` repeats forever, otherwise the region plays `iter_count + 1` times.
    EndLoop {
        id: SegmentId,
        label_index: LabelIndex,
        iter_count: u8,
    },
}

impl Segment {
    /// Create a track list reference
    pub fn subseg(id: SegmentId, track_list: TrackListId) -> Self {
        Segment::Subseg { id, track_list }
    }

    /// Create a loop start marker
    pub fn start_loop(id: SegmentId, label_index: LabelIndex) -> Self {
        Segment::StartLoop { id, label_index }
    }

    /// Create a loop end marker
    pub fn end_loop(id: SegmentId, label_index: LabelIndex, iter_count: u8) -> Self {
        Segment::EndLoop {
            id,
            label_index,
            iter_count,
        }
    }

    /// Get segment id
    pub fn id(&self) -> SegmentId {
        match *self {
            Segment::Subseg { id, .. } | Segment::StartLoop { id, .. } | Segment::EndLoop { id, .. } => id,
        }
    }

    /// Label index of a loop marker
    pub fn label_index(&self) -> Option<LabelIndex> {
        match *self {
            Segment::Subseg { .. } => None,
            Segment::StartLoop { label_index, .. } | Segment::EndLoop { label_index, .. } => Some(label_index),
        }
    }

    /// Check if this is a `StartLoop` or `EndLoop`
    pub fn is_loop_marker(&self) -> bool {
        !matches!(self, Segment::Subseg { .. })
    }

    pub(crate) fn is_start_with_label(&self, label: LabelIndex) -> bool {
        matches!(*self, Segment::StartLoop { label_index, .. } if label_index == label)
    }

    pub(crate) fn is_end_with_label(&self, label: LabelIndex) -> bool {
        matches!(*self, Segment::EndLoop { label_index, .. } if label_index == label)
    }
}

/// An ordered sequence of segments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variation {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Variation {
    /// Create a variation from segments
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Index of the segment with `id`
    pub fn position_of(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id() == id)
    }

    /// Get segment by id
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id() == id)
    }

    /// Segment ids in order
    pub fn ids(&self) -> Vec<SegmentId> {
        self.segments.iter().map(Segment::id).collect()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<Segment>> for Variation {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}
