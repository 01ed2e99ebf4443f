// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editing operations on a variation.
//!
//! Every operation takes a variation by reference and returns a new one.
//! A missing segment id is a silent no-op: the input comes back unchanged.
//! Structural leftovers (orphaned markers, an inversion the single repair
//! pass didn't reach) are kept in the data rather than treated as faults.

use tracing::{debug, trace, warn};

use super::id::IdGenerator;
use super::loops::{loop_containing, loop_with_marker_at, next_label_index, Loop};
use crate::bgm::{Segment, SegmentId, TrackListId, Variation};

/// Put loop markers back into a playable shape after a structural edit.
///
/// Runs two single left-to-right passes, neither repeated to a fixed point:
/// 1. every `EndLoop` is swapped with the first later `StartLoop` sharing its label
/// 2. every adjacent `StartLoop`/`EndLoop` with the same label is dropped
pub fn repair_loops(mut segments: Vec<Segment>) -> Vec<Segment> {
    for i in 0..segments.len() {
        let Segment::EndLoop { label_index, .. } = segments[i] else {
            continue;
        };

        if let Some(j) = (i + 1..segments.len()).find(|&j| segments[j].is_start_with_label(label_index)) {
            trace!(label_index, end = i, start = j, "uncrossing loop markers");
            segments.swap(i, j);
        }
    }

    let mut kept = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();

    while let Some(segment) = iter.next() {
        if let Segment::StartLoop { label_index, .. } = segment {
            if iter.peek().is_some_and(|next| next.is_end_with_label(label_index)) {
                trace!(label_index, "collapsing empty loop");
                iter.next();
                continue;
            }
        }
        kept.push(segment);
    }

    kept
}

/// Move a segment to `to_index`, then repair the loop markers.
///
/// The segment is removed first, so `to_index` addresses the remaining
/// sequence. Indices past the end place the segment last.
pub fn move_segment(variation: &Variation, segment_id: SegmentId, to_index: usize) -> Variation {
    let Some(from_index) = variation.position_of(segment_id) else {
        debug!(segment_id, "move_segment: segment not found");
        return variation.clone();
    };

    let mut segments = variation.segments.clone();
    let segment = segments.remove(from_index);
    let to_index = to_index.min(segments.len());
    segments.insert(to_index, segment);

    debug!(segment_id, from_index, to_index, "moved segment");
    Variation::new(repair_loops(segments))
}

/// Wrap a bare `Subseg` in a new infinite loop, or remove an existing loop.
///
/// - a `Subseg` outside every loop gets a fresh `StartLoop` before and `EndLoop` after it
/// - a `Subseg` inside a loop unwraps the innermost loop around it
/// - a paired `StartLoop` or `EndLoop` unwraps its own loop
///
/// Orphaned markers and unknown ids are left alone.
pub fn toggle_segment_loop<G: IdGenerator + ?Sized>(
    variation: &Variation,
    segment_id: SegmentId,
    ids: &mut G,
) -> Variation {
    let Some(index) = variation.position_of(segment_id) else {
        debug!(segment_id, "toggle_segment_loop: segment not found");
        return variation.clone();
    };

    let target = match variation.segments[index] {
        Segment::Subseg { .. } => loop_containing(&variation.segments, index),
        Segment::StartLoop { .. } | Segment::EndLoop { .. } => loop_with_marker_at(&variation.segments, index),
    };

    match (target, &variation.segments[index]) {
        (Some(l), _) => unwrap_loop(variation, l),
        (None, Segment::Subseg { .. }) => wrap_in_loop(variation, index, ids),
        (None, _) => {
            debug!(segment_id, "toggle_segment_loop: orphaned loop marker");
            variation.clone()
        }
    }
}

fn wrap_in_loop<G: IdGenerator + ?Sized>(variation: &Variation, index: usize, ids: &mut G) -> Variation {
    let Some(label_index) = next_label_index(&variation.segments) else {
        warn!("no free loop label; leaving variation unchanged");
        return variation.clone();
    };

    let (Some(start_id), Some(end_id)) = (ids.next_id(), ids.next_id()) else {
        warn!("no free segment id; leaving variation unchanged");
        return variation.clone();
    };
    let start = Segment::start_loop(start_id, label_index);
    let end = Segment::end_loop(end_id, label_index, 0);

    let mut segments = Vec::with_capacity(variation.segments.len() + 2);
    segments.extend_from_slice(&variation.segments[..index]);
    segments.push(start);
    segments.push(variation.segments[index].clone());
    segments.push(end);
    segments.extend_from_slice(&variation.segments[index + 1..]);

    debug!(label_index, index, "wrapped segment in loop");
    Variation::new(repair_loops(segments))
}

fn unwrap_loop(variation: &Variation, l: Loop) -> Variation {
    let segments = variation
        .segments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != l.start_index && *i != l.end_index)
        .map(|(_, s)| s.clone())
        .collect();

    debug!(label_index = l.label_index, "removed loop");
    Variation::new(repair_loops(segments))
}

/// Set the repeat count of an `EndLoop`. Anything other than an `EndLoop` id is a no-op.
pub fn set_loop_iter_count(variation: &Variation, end_loop_segment_id: SegmentId, iter_count: u8) -> Variation {
    match variation.get(end_loop_segment_id) {
        Some(Segment::EndLoop { .. }) => {}
        Some(_) => {
            warn!(segment_id = end_loop_segment_id, "tried to set loop iter count on non-end loop segment");
            return variation.clone();
        }
        None => {
            debug!(segment_id = end_loop_segment_id, "set_loop_iter_count: segment not found");
            return variation.clone();
        }
    }

    let segments = variation
        .segments
        .iter()
        .map(|segment| match *segment {
            Segment::EndLoop { id, label_index, .. } if id == end_loop_segment_id => {
                Segment::end_loop(id, label_index, iter_count)
            }
            _ => segment.clone(),
        })
        .collect();

    Variation::new(segments)
}

/// Append a `Subseg` playing `track_list`
pub fn add_segment(variation: &Variation, id: SegmentId, track_list: TrackListId) -> Variation {
    let mut segments = variation.segments.clone();
    segments.push(Segment::subseg(id, track_list));
    Variation::new(segments)
}

/// Remove one segment, then repair the loop markers so an emptied loop disappears
pub fn remove_segment(variation: &Variation, segment_id: SegmentId) -> Variation {
    let Some(index) = variation.position_of(segment_id) else {
        debug!(segment_id, "remove_segment: segment not found");
        return variation.clone();
    };

    let mut segments = variation.segments.clone();
    segments.remove(index);
    Variation::new(repair_loops(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bgm::Bgm;
    use crate::timeline::id::SequentialIds;
    use crate::timeline::loops::pair_loops;

    fn scenario_a() -> Variation {
        Variation::new(vec![
            Segment::start_loop(1, 0),
            Segment::subseg(2, 0),
            Segment::end_loop(3, 0, 0),
        ])
    }

    #[test]
    fn test_move_out_of_loop_collapses_it() {
        let moved = move_segment(&scenario_a(), 2, 0);
        assert_eq!(moved.segments, vec![Segment::subseg(2, 0)]);
    }

    #[test]
    fn test_move_after_loop_collapses_it() {
        let moved = move_segment(&scenario_a(), 2, 2);
        assert_eq!(moved.segments, vec![Segment::subseg(2, 0)]);
    }

    #[test]
    fn test_move_missing_id_is_noop() {
        let v = scenario_a();
        assert_eq!(move_segment(&v, 99, 0), v);
    }

    #[test]
    fn test_move_uses_list_move_semantics() {
        let v = Variation::new(vec![Segment::subseg(1, 0), Segment::subseg(2, 0), Segment::subseg(3, 0)]);
        assert_eq!(move_segment(&v, 1, 2).ids(), vec![2, 3, 1]);
        assert_eq!(move_segment(&v, 3, 0).ids(), vec![3, 1, 2]);
        assert_eq!(move_segment(&v, 2, 1).ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_past_end_places_last() {
        let v = Variation::new(vec![Segment::subseg(1, 0), Segment::subseg(2, 0)]);
        assert_eq!(move_segment(&v, 1, 50).ids(), vec![2, 1]);
    }

    #[test]
    fn test_move_end_marker_before_start_uncrosses() {
        let v = Variation::new(vec![
            Segment::subseg(10, 0),
            Segment::start_loop(1, 1),
            Segment::subseg(2, 0),
            Segment::subseg(4, 0),
            Segment::end_loop(3, 1, 2),
        ]);

        // Drag the EndLoop to the front: it gets swapped back behind its start
        let moved = move_segment(&v, 3, 0);
        assert_eq!(moved.ids(), vec![1, 10, 3, 2, 4]);
        assert_eq!(pair_loops(&moved.segments).len(), 1);
    }

    #[test]
    fn test_move_within_loop_keeps_loop() {
        let v = Variation::new(vec![
            Segment::start_loop(1, 1),
            Segment::subseg(2, 0),
            Segment::subseg(3, 0),
            Segment::end_loop(4, 1, 0),
        ]);

        let moved = move_segment(&v, 2, 2);
        assert_eq!(moved.ids(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_repair_is_single_pass() {
        // Collapsing the inner pair makes the outer pair adjacent; it stays
        let segments = vec![
            Segment::start_loop(1, 1),
            Segment::start_loop(2, 2),
            Segment::end_loop(3, 2, 0),
            Segment::end_loop(4, 1, 0),
        ];
        let repaired = repair_loops(segments);
        assert_eq!(repaired, vec![Segment::start_loop(1, 1), Segment::end_loop(4, 1, 0)]);
    }

    #[test]
    fn test_repair_leaves_well_formed_untouched() {
        let segments = scenario_a().segments;
        assert_eq!(repair_loops(segments.clone()), segments);
    }

    #[test]
    fn test_toggle_wraps_bare_subseg() {
        let v = Variation::new(vec![Segment::subseg(5, 0)]);
        let mut ids = SequentialIds::starting_at(100);

        let wrapped = toggle_segment_loop(&v, 5, &mut ids);
        assert_eq!(
            wrapped.segments,
            vec![
                Segment::start_loop(100, 1),
                Segment::subseg(5, 0),
                Segment::end_loop(101, 1, 0),
            ]
        );
    }

    #[test]
    fn test_toggle_uses_unused_label() {
        let v = Variation::new(vec![
            Segment::start_loop(1, 3),
            Segment::subseg(2, 0),
            Segment::end_loop(3, 3, 0),
            Segment::subseg(4, 0),
        ]);
        let mut ids = SequentialIds::starting_at(10);

        let wrapped = toggle_segment_loop(&v, 4, &mut ids);
        assert_eq!(wrapped.segments[3], Segment::start_loop(10, 4));
        assert_eq!(wrapped.segments[5], Segment::end_loop(11, 4, 0));
        assert_eq!(pair_loops(&wrapped.segments).len(), 2);
    }

    #[test]
    fn test_toggle_start_unwraps() {
        let v = Variation::new(vec![
            Segment::start_loop(1, 1),
            Segment::subseg(2, 0),
            Segment::subseg(3, 0),
            Segment::end_loop(4, 1, 2),
        ]);
        let mut ids = SequentialIds::starting_at(10);

        let unwrapped = toggle_segment_loop(&v, 1, &mut ids);
        assert_eq!(unwrapped.ids(), vec![2, 3]);

        let unwrapped = toggle_segment_loop(&v, 4, &mut ids);
        assert_eq!(unwrapped.ids(), vec![2, 3]);
    }

    #[test]
    fn test_toggle_subseg_inside_loop_unwraps_innermost() {
        let v = Variation::new(vec![
            Segment::start_loop(1, 1),
            Segment::start_loop(2, 2),
            Segment::subseg(3, 0),
            Segment::end_loop(4, 2, 0),
            Segment::subseg(5, 0),
            Segment::end_loop(6, 1, 0),
        ]);
        let mut ids = SequentialIds::starting_at(10);

        assert_eq!(toggle_segment_loop(&v, 3, &mut ids).ids(), vec![1, 3, 5, 6]);
        assert_eq!(toggle_segment_loop(&v, 5, &mut ids).ids(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_toggle_orphan_and_missing_are_noops() {
        let v = Variation::new(vec![Segment::subseg(1, 0), Segment::start_loop(2, 1)]);
        let mut ids = SequentialIds::starting_at(10);

        assert_eq!(toggle_segment_loop(&v, 2, &mut ids), v);
        assert_eq!(toggle_segment_loop(&v, 99, &mut ids), v);
    }

    #[test]
    fn test_toggle_with_exhausted_ids_is_noop() {
        let bgm = Bgm::new("Test").with_variation(0, Variation::from(vec![Segment::subseg(SegmentId::MAX, 0)]));
        let v = &bgm.variations[0];

        let mut ids = SequentialIds::for_bgm(&bgm);
        assert_eq!(toggle_segment_loop(v, SegmentId::MAX, &mut ids), *v);

        // One id left is not enough for a start/end pair
        let mut ids = SequentialIds::starting_at(SegmentId::MAX);
        let v = Variation::from(vec![Segment::subseg(1, 0)]);
        assert_eq!(toggle_segment_loop(&v, 1, &mut ids), v);
    }

    #[test]
    fn test_toggle_paired_end_unwraps_its_loop() {
        let v = Variation::new(vec![
            Segment::start_loop(1, 1),
            Segment::start_loop(2, 2),
            Segment::subseg(3, 0),
            Segment::end_loop(4, 2, 0),
            Segment::subseg(5, 0),
            Segment::end_loop(6, 1, 0),
        ]);
        let mut ids = SequentialIds::starting_at(10);

        let toggled = toggle_segment_loop(&v, 4, &mut ids);
        assert_eq!(toggled.ids(), vec![1, 3, 5, 6]);
    }

    #[test]
    fn test_toggle_round_trip_restores_body() {
        let v = Variation::new(vec![Segment::subseg(1, 0), Segment::subseg(2, 0)]);
        let mut ids = SequentialIds::starting_at(10);

        let wrapped = toggle_segment_loop(&v, 2, &mut ids);
        let start_id = wrapped.segments[1].id();
        assert_eq!(toggle_segment_loop(&wrapped, start_id, &mut ids), v);
    }

    #[test]
    fn test_set_loop_iter_count() {
        let v = scenario_a();

        let updated = set_loop_iter_count(&v, 3, 4);
        assert_eq!(updated.segments[2], Segment::end_loop(3, 0, 4));
        assert_eq!(updated.segments[..2], v.segments[..2]);

        assert_eq!(set_loop_iter_count(&v, 2, 4), v);
        assert_eq!(set_loop_iter_count(&v, 1, 4), v);
        assert_eq!(set_loop_iter_count(&v, 99, 4), v);
    }

    #[test]
    fn test_add_and_remove_segment() {
        let v = add_segment(&Variation::default(), 1, 7);
        assert_eq!(v.segments, vec![Segment::subseg(1, 7)]);

        let emptied = remove_segment(&scenario_a(), 2);
        assert!(emptied.is_empty());

        let v = scenario_a();
        assert_eq!(remove_segment(&v, 42), v);
    }
}
