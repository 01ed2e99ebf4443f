// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segment id generators.
//!
//! Editing operations that create segments take a generator explicitly
//! so results stay deterministic under test.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bgm::{Bgm, SegmentId};

/// Source of fresh segment ids
pub trait IdGenerator {
    /// Next unused id, or `None` once the id space is exhausted
    fn next_id(&mut self) -> Option<SegmentId>;
}

/// Monotonic ids counting up from a starting value
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: Option<SegmentId>,
}

impl SequentialIds {
    /// Start counting at `next`
    pub fn starting_at(next: SegmentId) -> Self {
        Self { next: Some(next) }
    }

    /// Start counting one past `max`.
    ///
    /// When `max` is `SegmentId::MAX` the generator starts out exhausted.
    pub fn after(max: Option<SegmentId>) -> Self {
        Self {
            next: max.map_or(Some(0), |id| id.checked_add(1)),
        }
    }

    /// Start counting past every id already in the document
    pub fn for_bgm(bgm: &Bgm) -> Self {
        Self::after(bgm.max_segment_id())
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Option<SegmentId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

/// Random ids that never repeat an id already handed out or reserved
pub struct RandomIds {
    rng: StdRng,
    used: HashSet<SegmentId>,
}

impl RandomIds {
    /// Create a generator from a seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            used: HashSet::new(),
        }
    }

    /// Create a generator seeded from the OS
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            used: HashSet::new(),
        }
    }

    /// Mark ids as taken
    pub fn reserve(&mut self, ids: impl IntoIterator<Item = SegmentId>) {
        self.used.extend(ids);
    }

    /// Builder: reserve every id already in the document
    pub fn for_bgm(mut self, bgm: &Bgm) -> Self {
        self.reserve(bgm.segment_ids());
        self
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Option<SegmentId> {
        if self.used.len() as u64 > u64::from(SegmentId::MAX) {
            return None;
        }
        loop {
            let id = self.rng.gen::<SegmentId>();
            if self.used.insert(id) {
                return Some(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bgm::{Segment, Variation};

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), Some(0));
        assert_eq!(ids.next_id(), Some(1));

        let mut ids = SequentialIds::after(Some(41));
        assert_eq!(ids.next_id(), Some(42));

        let mut ids = SequentialIds::after(None);
        assert_eq!(ids.next_id(), Some(0));
    }

    #[test]
    fn test_sequential_ids_exhausted_at_max() {
        let mut ids = SequentialIds::starting_at(SegmentId::MAX - 1);
        assert_eq!(ids.next_id(), Some(SegmentId::MAX - 1));
        assert_eq!(ids.next_id(), Some(SegmentId::MAX));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);

        let bgm = Bgm::new("Test").with_variation(0, Variation::new(vec![Segment::subseg(SegmentId::MAX, 0)]));
        let mut ids = SequentialIds::for_bgm(&bgm);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn test_sequential_ids_for_bgm() {
        let bgm = Bgm::new("Test").with_variation(3, Variation::new(vec![Segment::subseg(17, 0)]));
        let mut ids = SequentialIds::for_bgm(&bgm);
        assert_eq!(ids.next_id(), Some(18));
    }

    #[test]
    fn test_random_ids_are_deterministic_per_seed() {
        let mut a = RandomIds::from_seed(7);
        let mut b = RandomIds::from_seed(7);
        for _ in 0..16 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn test_random_ids_skip_reserved() {
        let first = RandomIds::from_seed(3).next_id().unwrap();

        let mut ids = RandomIds::from_seed(3);
        ids.reserve([first]);
        assert_ne!(ids.next_id(), Some(first));
    }

    #[test]
    fn test_random_ids_unique() {
        let mut ids = RandomIds::from_seed(11);
        let issued: HashSet<SegmentId> = (0..1000).filter_map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 1000);
    }
}
