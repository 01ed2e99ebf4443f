// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segment timeline core.
//!
//! This module provides:
//! - Length: segment durations for laying a variation out in time
//! - Loops: loop regions derived from StartLoop/EndLoop markers
//! - Editor: move, wrap/unwrap and repeat-count edits with loop repair
//! - Actions: serializable edit intents dispatched onto a document

pub mod action;
pub mod editor;
pub mod id;
pub mod length;
pub mod loops;

pub use action::{BgmAction, VariationAction};
pub use editor::{
    add_segment, move_segment, remove_segment, repair_loops, set_loop_iter_count, toggle_segment_loop,
};
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use length::{length_of, segment_lengths, segment_starts, total_length, TimeSignature, TrackListSource};
pub use loops::{loop_containing, loop_with_marker_at, next_label_index, orphaned_markers, pair_loops, Loop};
