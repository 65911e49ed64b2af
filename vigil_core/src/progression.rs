//! Progression Tracker: the bounded two-level counter state machine.
//!
//! The outer level walks the items of the active group; the inner level
//! counts repetitions of the current item (for `Counted` groups). The inner
//! counter must fully exhaust before the item pointer moves, and the item
//! pointer never resets on a repetition tick.

use crate::{DevotionGroup, Error, ProgressionState, RepeatRule, Result};

/// What a single `advance` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// One more repetition of the current item was counted.
    Repetition,
    /// The current item finished; moved on to the next item.
    NextItem,
    /// Already at the terminal state; nothing changed.
    Complete,
}

/// Drives a session through one group's item sequence.
///
/// Seeded from the active group (item count and repeat rule are captured at
/// seed time); every transition leaves the state within bounds, and rejected
/// operations leave it untouched.
#[derive(Clone, Debug)]
pub struct ProgressionTracker {
    item_count: usize,
    repeat: RepeatRule,
    state: ProgressionState,
}

impl ProgressionTracker {
    /// Start fresh at the first item of `group`.
    pub fn seed(group: &DevotionGroup) -> Result<Self> {
        Self::resume(group, ProgressionState::default())
    }

    /// Rebuild a tracker from a previously captured state.
    ///
    /// The state is validated against the group before it is trusted: a
    /// snapshot taken against an older catalog may point past the end of the
    /// item list or carry a repetition count above the current target.
    pub fn resume(group: &DevotionGroup, state: ProgressionState) -> Result<Self> {
        if group.items.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "group '{}' has no items",
                group.id
            )));
        }
        if state.item_index >= group.items.len() {
            return Err(Error::IndexOutOfRange {
                index: state.item_index,
                len: group.items.len(),
            });
        }
        match group.repeat {
            RepeatRule::Counted { target } if state.repetitions > target => {
                return Err(Error::State(format!(
                    "repetition count {} exceeds target {}",
                    state.repetitions, target
                )));
            }
            RepeatRule::SinglePass if state.repetitions != 0 => {
                return Err(Error::State(
                    "repetition count on a single-pass group".into(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            item_count: group.items.len(),
            repeat: group.repeat.clone(),
            state,
        })
    }

    /// Apply one advance transition.
    ///
    /// For counted groups: repetitions below the target increment the inner
    /// counter; at the target the item pointer moves and the counter resets.
    /// For single-pass groups the item pointer moves directly. At the last
    /// item's end the call is a no-op and reports [`AdvanceOutcome::Complete`].
    pub fn advance(&mut self) -> AdvanceOutcome {
        let last = self.item_count - 1;

        match self.repeat {
            RepeatRule::Counted { target } => {
                if self.state.repetitions < target {
                    self.state.repetitions += 1;
                    tracing::debug!(
                        "Repetition {}/{} of item {}",
                        self.state.repetitions,
                        target,
                        self.state.item_index
                    );
                    AdvanceOutcome::Repetition
                } else if self.state.item_index < last {
                    self.state.item_index += 1;
                    self.state.repetitions = 0;
                    tracing::debug!("Advanced to item {}", self.state.item_index);
                    AdvanceOutcome::NextItem
                } else {
                    AdvanceOutcome::Complete
                }
            }
            RepeatRule::SinglePass => {
                if self.state.item_index < last {
                    self.state.item_index += 1;
                    tracing::debug!("Advanced to item {}", self.state.item_index);
                    AdvanceOutcome::NextItem
                } else {
                    AdvanceOutcome::Complete
                }
            }
        }
    }

    /// Explicit navigation to an item; resets the repetition counter.
    ///
    /// Out-of-range requests are rejected and leave the state unchanged.
    pub fn jump_to(&mut self, item_index: usize) -> Result<()> {
        if item_index >= self.item_count {
            return Err(Error::IndexOutOfRange {
                index: item_index,
                len: self.item_count,
            });
        }
        self.state.item_index = item_index;
        self.state.repetitions = 0;
        tracing::debug!("Jumped to item {}", item_index);
        Ok(())
    }

    /// Whether the sequence has been fully worked through.
    pub fn is_complete(&self) -> bool {
        let at_last = self.state.item_index == self.item_count - 1;
        match self.repeat {
            RepeatRule::Counted { target } => at_last && self.state.repetitions == target,
            RepeatRule::SinglePass => at_last,
        }
    }

    /// The current position.
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// The inner counter's target, or `None` for single-pass groups.
    pub fn repetition_target(&self) -> Option<u32> {
        match self.repeat {
            RepeatRule::Counted { target } => Some(target),
            RepeatRule::SinglePass => None,
        }
    }

    /// Number of items in the seeded group.
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DevotionItem;

    fn item(title: &str) -> DevotionItem {
        DevotionItem {
            title: title.into(),
            meditation: String::new(),
            media_ref: None,
        }
    }

    fn counted_group(items: usize, target: u32) -> DevotionGroup {
        DevotionGroup {
            id: "test_counted".into(),
            name: "Test".into(),
            weekdays: vec![],
            repeat: RepeatRule::Counted { target },
            items: (0..items).map(|i| item(&format!("item {i}"))).collect(),
        }
    }

    fn single_pass_group(items: usize) -> DevotionGroup {
        DevotionGroup {
            id: "test_walk".into(),
            name: "Test walk".into(),
            weekdays: vec![],
            repeat: RepeatRule::SinglePass,
            items: (0..items).map(|i| item(&format!("item {i}"))).collect(),
        }
    }

    #[test]
    fn test_repetitions_exhaust_before_item_advances() {
        let group = counted_group(5, 10);
        let mut tracker = ProgressionTracker::seed(&group).unwrap();

        // The 10th call reaches the target without moving the item pointer.
        for expected in 1..=10 {
            assert_eq!(tracker.advance(), AdvanceOutcome::Repetition);
            assert_eq!(tracker.state().repetitions, expected);
            assert_eq!(tracker.state().item_index, 0);
        }

        // The 11th call is the one that flips to the next item.
        assert_eq!(tracker.advance(), AdvanceOutcome::NextItem);
        assert_eq!(tracker.state().item_index, 1);
        assert_eq!(tracker.state().repetitions, 0);
    }

    #[test]
    fn test_terminal_advance_is_idempotent() {
        let group = counted_group(2, 3);
        let mut tracker = ProgressionTracker::seed(&group).unwrap();

        // Item 0: 3 reps + flip, item 1: 3 reps.
        for _ in 0..7 {
            tracker.advance();
        }
        assert!(tracker.is_complete());

        let before = tracker.state().clone();
        assert_eq!(tracker.advance(), AdvanceOutcome::Complete);
        assert_eq!(tracker.advance(), AdvanceOutcome::Complete);
        assert_eq!(tracker.state(), &before);
        assert!(tracker.is_complete());
    }

    #[test]
    fn test_single_pass_walk() {
        let group = single_pass_group(14);
        let mut tracker = ProgressionTracker::seed(&group).unwrap();
        assert_eq!(tracker.repetition_target(), None);

        // 13 advances land on the last station.
        for expected in 1..=13 {
            assert_eq!(tracker.advance(), AdvanceOutcome::NextItem);
            assert_eq!(tracker.state().item_index, expected);
        }
        assert!(tracker.is_complete());

        // The 14th is a no-op.
        assert_eq!(tracker.advance(), AdvanceOutcome::Complete);
        assert_eq!(tracker.state().item_index, 13);
    }

    #[test]
    fn test_jump_resets_repetitions() {
        let group = counted_group(5, 10);
        let mut tracker = ProgressionTracker::seed(&group).unwrap();

        tracker.advance();
        tracker.advance();
        assert_eq!(tracker.state().repetitions, 2);

        tracker.jump_to(3).unwrap();
        assert_eq!(tracker.state().item_index, 3);
        assert_eq!(tracker.state().repetitions, 0);
    }

    #[test]
    fn test_jump_out_of_range_leaves_state_unchanged() {
        let group = counted_group(5, 10);
        let mut tracker = ProgressionTracker::seed(&group).unwrap();
        tracker.advance();

        let before = tracker.state().clone();
        let result = tracker.jump_to(5);
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 5, len: 5 })
        ));
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn test_seed_rejects_empty_group() {
        let group = counted_group(0, 10);
        let result = ProgressionTracker::seed(&group);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_resume_validates_bounds() {
        let group = counted_group(3, 10);

        let stale = ProgressionState {
            item_index: 7,
            repetitions: 0,
        };
        assert!(matches!(
            ProgressionTracker::resume(&group, stale),
            Err(Error::IndexOutOfRange { .. })
        ));

        let overshot = ProgressionState {
            item_index: 1,
            repetitions: 11,
        };
        assert!(matches!(
            ProgressionTracker::resume(&group, overshot),
            Err(Error::State(_))
        ));

        let valid = ProgressionState {
            item_index: 1,
            repetitions: 10,
        };
        let tracker = ProgressionTracker::resume(&group, valid.clone()).unwrap();
        assert_eq!(tracker.state(), &valid);
    }

    #[test]
    fn test_resume_rejects_repetitions_on_single_pass() {
        let group = single_pass_group(14);
        let state = ProgressionState {
            item_index: 3,
            repetitions: 2,
        };
        assert!(matches!(
            ProgressionTracker::resume(&group, state),
            Err(Error::State(_))
        ));
    }
}
