//! Devotional session: selection state plus the progression tracker.
//!
//! A session is started once from the Daily Selector's pick and then owns
//! the interactive state. The renderer reads a [`SessionView`] after every
//! transition; it never mutates the session except through the documented
//! operations here.

use crate::progression::{AdvanceOutcome, ProgressionTracker};
use crate::selector::select_active_group;
use crate::{Catalog, DevotionItem, Error, ProgressionState, Result, SelectionState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plain-serde snapshot of a session for the optional persistence
/// collaborator. Restored verbatim, but re-validated against the catalog
/// before it is trusted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub selection: SelectionState,
    pub progression: ProgressionState,
}

/// What the renderer needs after a transition.
#[derive(Clone, Debug)]
pub struct SessionView<'a> {
    pub group_id: &'a str,
    pub group_name: &'a str,
    pub item_index: usize,
    pub item_count: usize,
    pub item: &'a DevotionItem,
    /// `None` for single-pass groups, which have no repetition dimension.
    pub repetitions: Option<u32>,
    pub repetition_target: Option<u32>,
    pub overridden: bool,
    pub complete: bool,
}

/// One user's devotional session over a catalog.
#[derive(Clone, Debug)]
pub struct DevotionSession<'a> {
    catalog: &'a Catalog,
    selection: SelectionState,
    tracker: ProgressionTracker,
}

impl<'a> DevotionSession<'a> {
    /// Start a session: the Daily Selector picks today's group and the
    /// tracker is seeded fresh at its first item.
    pub fn start(catalog: &'a Catalog, date: NaiveDate) -> Result<Self> {
        let key = select_active_group(date, &catalog.groups)?.to_string();
        // select_active_group only returns keys from the catalog
        let group = catalog
            .group(&key)
            .ok_or_else(|| Error::UnknownGroup(key.clone()))?;
        let tracker = ProgressionTracker::seed(group)?;

        tracing::info!("Session started with group '{}'", key);
        Ok(Self {
            catalog,
            selection: SelectionState {
                active_group: key,
                overridden: false,
            },
            tracker,
        })
    }

    /// Restore a session from a snapshot.
    ///
    /// Rejects snapshots that no longer fit the catalog (group removed,
    /// index past the end, repetition count above the current target)
    /// instead of restoring corrupt state.
    pub fn resume(catalog: &'a Catalog, snapshot: SessionSnapshot) -> Result<Self> {
        let group = catalog
            .group(&snapshot.selection.active_group)
            .ok_or_else(|| Error::UnknownGroup(snapshot.selection.active_group.clone()))?;
        let tracker = ProgressionTracker::resume(group, snapshot.progression)?;

        tracing::info!(
            "Session resumed with group '{}' at item {}",
            snapshot.selection.active_group,
            tracker.state().item_index
        );
        Ok(Self {
            catalog,
            selection: snapshot.selection,
            tracker,
        })
    }

    /// User override: switch to another group and start it fresh.
    ///
    /// Marks the selection as overridden so a later automatic re-derivation
    /// does not clobber the explicit choice. An unknown key is rejected and
    /// leaves the session untouched.
    pub fn select_group(&mut self, key: &str) -> Result<()> {
        let group = self
            .catalog
            .group(key)
            .ok_or_else(|| Error::UnknownGroup(key.to_string()))?;

        self.tracker = ProgressionTracker::seed(group)?;
        self.selection.active_group = key.to_string();
        self.selection.overridden = true;
        tracing::info!("User selected group '{}'", key);
        Ok(())
    }

    /// Automatic re-derivation for a (possibly new) calendar day.
    ///
    /// A no-op when the user has overridden the selection, or when the
    /// selector's pick has not changed. Returns whether the session was
    /// re-seeded.
    pub fn refresh_for_date(&mut self, date: NaiveDate) -> Result<bool> {
        if self.selection.overridden {
            tracing::debug!("Selection overridden by user; keeping it");
            return Ok(false);
        }

        let key = select_active_group(date, &self.catalog.groups)?;
        if key == self.selection.active_group {
            return Ok(false);
        }

        let key = key.to_string();
        let group = self
            .catalog
            .group(&key)
            .ok_or_else(|| Error::UnknownGroup(key.clone()))?;
        self.tracker = ProgressionTracker::seed(group)?;
        tracing::info!(
            "Daily selection changed '{}' -> '{}'",
            self.selection.active_group,
            key
        );
        self.selection.active_group = key;
        Ok(true)
    }

    /// Apply one advance transition. See
    /// [`ProgressionTracker::advance`](crate::progression::ProgressionTracker::advance).
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.tracker.advance()
    }

    /// Jump to an item within the active group.
    pub fn jump_to(&mut self, item_index: usize) -> Result<()> {
        self.tracker.jump_to(item_index)
    }

    /// Whether the active group's sequence has been fully worked through.
    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    /// The current selection (group key + override flag).
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Everything the renderer needs for the current position.
    pub fn view(&self) -> SessionView<'_> {
        // The selection invariant guarantees the group exists.
        let group = self
            .catalog
            .group(&self.selection.active_group)
            .expect("active group must exist in catalog");
        let state = self.tracker.state();
        let target = self.tracker.repetition_target();

        SessionView {
            group_id: &group.id,
            group_name: &group.name,
            item_index: state.item_index,
            item_count: group.items.len(),
            item: &group.items[state.item_index],
            repetitions: target.map(|_| state.repetitions),
            repetition_target: target,
            overridden: self.selection.overridden,
            complete: self.tracker.is_complete(),
        }
    }

    /// Capture the session as a plain serializable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selection: self.selection.clone(),
            progression: self.tracker.state().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_seeds_from_daily_selector() {
        let catalog = build_default_catalog();
        // 2024-01-03 is a Wednesday -> Glorious.
        let session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();

        let view = session.view();
        assert_eq!(view.group_id, "glorious");
        assert_eq!(view.item_index, 0);
        assert_eq!(view.repetitions, Some(0));
        assert!(!view.overridden);
    }

    #[test]
    fn test_select_group_sets_override_and_reseeds() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();

        session.advance();
        session.advance();
        session.select_group("stations").unwrap();

        let view = session.view();
        assert_eq!(view.group_id, "stations");
        assert_eq!(view.item_index, 0);
        assert_eq!(view.repetitions, None);
        assert!(view.overridden);
    }

    #[test]
    fn test_select_unknown_group_leaves_session_unchanged() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();
        session.advance();

        let before = session.snapshot();
        let result = session.select_group("painful");
        assert!(matches!(result, Err(Error::UnknownGroup(_))));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_refresh_respects_override() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();
        session.select_group("luminous").unwrap();
        session.advance();

        // A new calendar day arrives mid-session; the explicit choice stays.
        let reseeded = session.refresh_for_date(date(2024, 1, 4)).unwrap();
        assert!(!reseeded);
        assert_eq!(session.view().group_id, "luminous");
        assert_eq!(session.view().repetitions, Some(1));
    }

    #[test]
    fn test_refresh_reseeds_when_not_overridden() {
        let catalog = build_default_catalog();
        // Wednesday -> Glorious.
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();
        session.advance();

        // Thursday -> Luminous.
        let reseeded = session.refresh_for_date(date(2024, 1, 4)).unwrap();
        assert!(reseeded);

        let view = session.view();
        assert_eq!(view.group_id, "luminous");
        assert_eq!(view.item_index, 0);
        assert_eq!(view.repetitions, Some(0));
    }

    #[test]
    fn test_refresh_same_day_is_a_noop() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();
        session.advance();

        let reseeded = session.refresh_for_date(date(2024, 1, 3)).unwrap();
        assert!(!reseeded);
        assert_eq!(session.view().repetitions, Some(1));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 3)).unwrap();
        session.select_group("stations").unwrap();
        session.advance();
        session.advance();

        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

        let resumed = DevotionSession::resume(&catalog, restored).unwrap();
        assert_eq!(resumed.view().group_id, "stations");
        assert_eq!(resumed.view().item_index, 2);
        assert!(resumed.selection().overridden);
    }

    #[test]
    fn test_resume_rejects_stale_snapshot() {
        let catalog = build_default_catalog();

        let unknown_group = SessionSnapshot {
            selection: SelectionState {
                active_group: "retired".into(),
                overridden: false,
            },
            progression: ProgressionState::default(),
        };
        assert!(matches!(
            DevotionSession::resume(&catalog, unknown_group),
            Err(Error::UnknownGroup(_))
        ));

        let out_of_range = SessionSnapshot {
            selection: SelectionState {
                active_group: "joyful".into(),
                overridden: false,
            },
            progression: ProgressionState {
                item_index: 9,
                repetitions: 0,
            },
        };
        assert!(matches!(
            DevotionSession::resume(&catalog, out_of_range),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_full_counted_session_to_completion() {
        let catalog = build_default_catalog();
        let mut session = DevotionSession::start(&catalog, date(2024, 1, 1)).unwrap();
        assert_eq!(session.view().group_id, "joyful");

        // Five mysteries at ten repetitions: 10 reps per item plus an item
        // flip between consecutive items.
        let total = 5 * 10 + 4;
        for _ in 0..total {
            assert!(!session.is_complete());
            session.advance();
        }
        assert!(session.is_complete());
        assert_eq!(session.advance(), AdvanceOutcome::Complete);
    }
}
