// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Loop regions derived from a segment sequence.
//!
//! Loops are never stored. They are recomputed from the markers every
//! time they are needed so the segment list stays the only source of truth.

use crate::bgm::{LabelIndex, Segment, SegmentId};

/// A matched `StartLoop`/`EndLoop` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loop {
    /// Index of the `StartLoop`
    pub start_index: usize,
    /// Index of the `EndLoop`
    pub end_index: usize,
    /// Shared label of both markers
    pub label_index: LabelIndex,
    /// Repeat count from the `EndLoop` (0 = infinite)
    pub iter_count: u8,
}

impl Loop {
    /// Check if `index` lies strictly between the markers
    pub fn contains(&self, index: usize) -> bool {
        self.start_index < index && index < self.end_index
    }

    /// Total number of times the body plays (None = infinite)
    pub fn play_count(&self) -> Option<u32> {
        match self.iter_count {
            0 => None,
            n => Some(n as u32 + 1),
        }
    }

    /// Number of segments between the markers
    pub fn body_len(&self) -> usize {
        self.end_index - self.start_index - 1
    }
}

/// Pair every `StartLoop` with the first later `EndLoop` carrying the same label.
///
/// Starts without a match are orphaned and produce no loop.
pub fn pair_loops(segments: &[Segment]) -> Vec<Loop> {
    let mut loops = Vec::new();

    for (start_index, start) in segments.iter().enumerate() {
        let Segment::StartLoop { label_index, .. } = *start else {
            continue;
        };

        let end = segments[start_index + 1..]
            .iter()
            .enumerate()
            .find_map(|(offset, s)| match *s {
                Segment::EndLoop {
                    label_index: end_label,
                    iter_count,
                    ..
                } if end_label == label_index => Some((start_index + 1 + offset, iter_count)),
                _ => None,
            });

        if let Some((end_index, iter_count)) = end {
            loops.push(Loop {
                start_index,
                end_index,
                label_index,
                iter_count,
            });
        }
    }

    loops
}

/// Innermost loop strictly enclosing `index`
pub fn loop_containing(segments: &[Segment], index: usize) -> Option<Loop> {
    pair_loops(segments)
        .into_iter()
        .filter(|l| l.contains(index))
        .max_by_key(|l| l.start_index)
}

/// Loop whose `StartLoop` or `EndLoop` sits at `index`
pub fn loop_with_marker_at(segments: &[Segment], index: usize) -> Option<Loop> {
    pair_loops(segments)
        .into_iter()
        .find(|l| l.start_index == index || l.end_index == index)
}

/// Ids of loop markers not bound into any loop, in sequence order
pub fn orphaned_markers(segments: &[Segment]) -> Vec<SegmentId> {
    let loops = pair_loops(segments);
    let paired = |index: usize| loops.iter().any(|l| l.start_index == index || l.end_index == index);

    segments
        .iter()
        .enumerate()
        .filter(|(index, s)| s.is_loop_marker() && !paired(*index))
        .map(|(_, s)| s.id())
        .collect()
}

/// A label not used by any marker in `segments`.
///
/// Prefers one past the highest label in use (first label is 1), falling
/// back to the smallest free label once that would overflow.
pub fn next_label_index(segments: &[Segment]) -> Option<LabelIndex> {
    let highest = segments.iter().filter_map(Segment::label_index).max().unwrap_or(0);

    highest.checked_add(1).or_else(|| {
        (0..=LabelIndex::MAX).find(|label| !segments.iter().any(|s| s.label_index() == Some(*label)))
    })
}
