// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track lists and their command streams.

use serde::{Deserialize, Serialize};

/// Identifies a track list within a BGM
pub type TrackListId = u32;

/// A single event on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Waits this many ticks before the next command
    Delay(u32),
    /// Plays a note
    Note { pitch: u8, velocity: u8, length: u16 },
    /// Sets the composition tempo in BPM
    MasterTempo(u16),
    /// Sets the composition volume
    MasterVolume(u8),
    /// Stops playback on this track
    End,
}

/// One track of a track list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Commands in playback order
    pub commands: Vec<Command>,
    pub is_disabled: bool,
    pub is_drum_track: bool,
}

impl Track {
    /// Create a track from commands
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            ..Default::default()
        }
    }
}

/// A set of tracks played together by a `Subseg`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackList {
    /// Tracks; index 0 is the master track
    pub tracks: Vec<Track>,
}

impl TrackList {
    /// Create a track list with only a master track
    pub fn with_master(master: Track) -> Self {
        Self { tracks: vec![master] }
    }

    /// The master track (track 0), which drives segment timing
    pub fn master(&self) -> Option<&Track> {
        self.tracks.first()
    }
}
