// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segment durations for laying a variation out in time.
//!
//! A `Subseg` lasts as long as the sum of the `Delay` commands on its
//! track list's master track. Loop markers last zero ticks. A reference
//! that doesn't resolve is treated as zero-length.

use std::collections::{BTreeMap, HashMap};

use crate::bgm::{Bgm, Command, Segment, TrackList, TrackListId, Variation};

/// Lookup from a track list reference to its content
pub trait TrackListSource {
    fn track_list(&self, id: TrackListId) -> Option<&TrackList>;
}

impl TrackListSource for Bgm {
    fn track_list(&self, id: TrackListId) -> Option<&TrackList> {
        self.track_lists.get(&id)
    }
}

impl TrackListSource for HashMap<TrackListId, TrackList> {
    fn track_list(&self, id: TrackListId) -> Option<&TrackList> {
        self.get(&id)
    }
}

impl TrackListSource for BTreeMap<TrackListId, TrackList> {
    fn track_list(&self, id: TrackListId) -> Option<&TrackList> {
        self.get(&id)
    }
}

/// Musical grid used to express tick lengths as bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Ticks per beat
    pub ticks_per_beat: u32,
    /// Beats per bar (time signature numerator)
    pub beats_per_bar: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            ticks_per_beat: 48,
            beats_per_bar: 4,
        }
    }
}

impl TimeSignature {
    /// Create a new time signature
    pub fn new(ticks_per_beat: u32, beats_per_bar: u32) -> Self {
        Self {
            ticks_per_beat: ticks_per_beat.max(1),
            beats_per_bar: beats_per_bar.max(1),
        }
    }

    /// Get ticks per bar
    pub fn ticks_per_bar(&self) -> u32 {
        self.ticks_per_beat.saturating_mul(self.beats_per_bar).max(1)
    }

    /// Number of bars needed to cover `ticks`, counting a partial bar as a whole one
    pub fn bars(&self, ticks: u32) -> u32 {
        ticks.div_ceil(self.ticks_per_bar())
    }
}

/// Sum of the delays on a track list's master track
pub fn track_list_length(track_list: &TrackList) -> u32 {
    track_list
        .master()
        .map(|master| {
            master.commands.iter().fold(0u32, |total, command| match command {
                Command::Delay(ticks) => total.saturating_add(*ticks),
                _ => total,
            })
        })
        .unwrap_or(0)
}

/// Duration of a single segment in ticks
pub fn length_of<S: TrackListSource + ?Sized>(segment: &Segment, source: &S) -> u32 {
    match segment {
        Segment::Subseg { track_list, .. } => source.track_list(*track_list).map(track_list_length).unwrap_or(0),
        Segment::StartLoop { .. } | Segment::EndLoop { .. } => 0,
    }
}

/// Duration of every segment, in order
pub fn segment_lengths<S: TrackListSource + ?Sized>(variation: &Variation, source: &S) -> Vec<u32> {
    variation.segments.iter().map(|s| length_of(s, source)).collect()
}

/// Start tick of every segment, in order
pub fn segment_starts<S: TrackListSource + ?Sized>(variation: &Variation, source: &S) -> Vec<u32> {
    let mut time = 0u32;
    variation
        .segments
        .iter()
        .map(|s| {
            let start = time;
            time = time.saturating_add(length_of(s, source));
            start
        })
        .collect()
}

/// Duration of the whole variation, played once straight through
pub fn total_length<S: TrackListSource + ?Sized>(variation: &Variation, source: &S) -> u32 {
    variation
        .segments
        .iter()
        .fold(0u32, |total, s| total.saturating_add(length_of(s, source)))
}
