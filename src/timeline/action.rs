// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! User intents and their dispatch onto a document.
//!
//! Actions are plain data so they can be queued, logged, or stored as a
//! script. Applying one never mutates its input.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::editor;
use super::id::IdGenerator;
use crate::bgm::{Bgm, SegmentId, TrackListId, Variation};

/// An edit to a single variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariationAction {
    /// Move a segment to a new position
    MoveSegment { id: SegmentId, to_index: usize },
    /// Wrap a segment in a loop, or remove the loop it belongs to
    ToggleSegmentLoop { id: SegmentId },
    /// Set the repeat count of an `EndLoop`
    SetLoopIterCount { id: SegmentId, iter_count: u8 },
    /// Append a segment playing a track list
    AddSegment { id: SegmentId, track_list: TrackListId },
    /// Remove a segment
    RemoveSegment { id: SegmentId },
}

impl VariationAction {
    /// Apply to a variation, returning the edited copy
    pub fn apply<G: IdGenerator + ?Sized>(&self, variation: &Variation, ids: &mut G) -> Variation {
        match *self {
            VariationAction::MoveSegment { id, to_index } => editor::move_segment(variation, id, to_index),
            VariationAction::ToggleSegmentLoop { id } => editor::toggle_segment_loop(variation, id, ids),
            VariationAction::SetLoopIterCount { id, iter_count } => {
                editor::set_loop_iter_count(variation, id, iter_count)
            }
            VariationAction::AddSegment { id, track_list } => editor::add_segment(variation, id, track_list),
            VariationAction::RemoveSegment { id } => editor::remove_segment(variation, id),
        }
    }
}

/// An edit to a BGM document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BgmAction {
    /// Edit the variation in slot `index`
    Variation { index: usize, action: VariationAction },
}

impl BgmAction {
    /// Apply to a document, returning the edited copy
    pub fn apply<G: IdGenerator + ?Sized>(&self, bgm: &Bgm, ids: &mut G) -> Bgm {
        match self {
            BgmAction::Variation { index, action } => {
                let mut edited = bgm.clone();
                match edited.variation_mut(*index) {
                    Some(variation) => *variation = action.apply(variation, ids),
                    None => warn!(index = *index, "no variation in this slot"),
                }
                edited
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bgm::Segment;
    use crate::timeline::id::SequentialIds;

    fn bgm() -> Bgm {
        Bgm::new("Test").with_variation(
            1,
            Variation::new(vec![
                Segment::start_loop(1, 1),
                Segment::subseg(2, 0),
                Segment::end_loop(3, 1, 0),
            ]),
        )
    }

    #[test]
    fn test_variation_action_dispatch() {
        let v = bgm().variations[1].clone();
        let mut ids = SequentialIds::starting_at(10);

        let moved = VariationAction::MoveSegment { id: 2, to_index: 0 }.apply(&v, &mut ids);
        assert_eq!(moved.ids(), vec![2]);

        let counted = VariationAction::SetLoopIterCount { id: 3, iter_count: 9 }.apply(&v, &mut ids);
        assert_eq!(counted.segments[2], Segment::end_loop(3, 1, 9));

        let added = VariationAction::AddSegment { id: 4, track_list: 2 }.apply(&v, &mut ids);
        assert_eq!(added.ids(), vec![1, 2, 3, 4]);

        let removed = VariationAction::RemoveSegment { id: 2 }.apply(&v, &mut ids);
        assert!(removed.is_empty());

        let toggled = VariationAction::ToggleSegmentLoop { id: 1 }.apply(&v, &mut ids);
        assert_eq!(toggled.ids(), vec![2]);
    }

    #[test]
    fn test_bgm_action_only_touches_its_slot() {
        let original = bgm();
        let mut ids = SequentialIds::for_bgm(&original);

        let action = BgmAction::Variation {
            index: 1,
            action: VariationAction::ToggleSegmentLoop { id: 2 },
        };
        let edited = action.apply(&original, &mut ids);

        assert_eq!(edited.variations[1].ids(), vec![2]);
        assert_eq!(edited.variations[0], original.variations[0]);
        assert_eq!(edited.track_lists, original.track_lists);
    }

    #[test]
    fn test_bgm_action_bad_slot_is_noop() {
        let original = bgm();
        let mut ids = SequentialIds::default();

        let action = BgmAction::Variation {
            index: 4,
            action: VariationAction::RemoveSegment { id: 2 },
        };
        assert_eq!(action.apply(&original, &mut ids), original);
    }

    #[test]
    fn test_actions_from_yaml() {
        let yaml = r#"
- type: variation
  index: 0
  action:
    type: move_segment
    id: 5
    to_index: 2
- type: variation
  index: 3
  action:
    type: set_loop_iter_count
    id: 7
    iter_count: 4
"#;
        let actions: Vec<BgmAction> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            actions[0],
            BgmAction::Variation {
                index: 0,
                action: VariationAction::MoveSegment { id: 5, to_index: 2 }
            }
        );
        assert_eq!(
            actions[1],
            BgmAction::Variation {
                index: 3,
                action: VariationAction::SetLoopIterCount { id: 7, iter_count: 4 }
            }
        );
    }
}
