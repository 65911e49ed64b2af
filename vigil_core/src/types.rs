//! Core domain types for the Vigil devotional engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Devotion groups (mystery sets, the stations walk) and their items
//! - Repeat rules (counted repetitions vs. single-pass sequences)
//! - Selection and progression state
//! - The content catalog and the saints list

use chrono::Weekday;
use serde::{Deserialize, Serialize};

// ============================================================================
// Content Types
// ============================================================================

/// One addressable unit of devotional content within a group
/// (a single mystery or a single station).
///
/// Items are opaque to the engine: it only ever counts and addresses them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DevotionItem {
    pub title: String,
    pub meditation: String,
    pub media_ref: Option<String>,
}

/// How a group's inner progression behaves.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepeatRule {
    /// Each item must be repeated `target` times before the item pointer
    /// moves on (e.g., ten Hail Marys per mystery).
    Counted { target: u32 },
    /// A pure station-by-station walk: one advance per item, no inner
    /// repetition counter.
    SinglePass,
}

/// A named bucket of devotional items, with the weekdays on which the
/// Daily Selector considers it active.
///
/// `weekdays` is the applicability predicate: the group matches a date when
/// the date's weekday appears in the set. Declaration order in the catalog
/// is the tie-break when several groups match the same weekday.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DevotionGroup {
    pub id: String,
    pub name: String,
    pub weekdays: Vec<Weekday>,
    pub repeat: RepeatRule,
    pub items: Vec<DevotionItem>,
}

impl DevotionGroup {
    /// Whether this group applies on the given weekday.
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(&weekday)
    }
}

/// An entry in the flat, date-indexed saints catalogue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Saint {
    pub name: String,
    pub feast: String,
    pub biography: String,
}

// ============================================================================
// State Types
// ============================================================================

/// Which group a session is working through and whether the user picked it
/// explicitly.
///
/// `active_group` always names an existing group in the catalog; the session
/// layer enforces this at every seed and re-seed. Once `overridden` is true,
/// automatic daily re-derivation must not replace the user's choice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    pub active_group: String,
    pub overridden: bool,
}

/// Position within the active group: which item, and how many repetitions
/// of it are complete.
///
/// Invariants (maintained by the tracker, re-checked on snapshot resume):
/// `item_index` is in range for the active group's items, and `repetitions`
/// never exceeds the group's counted target (it stays 0 for single-pass
/// groups).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressionState {
    pub item_index: usize,
    pub repetitions: u32,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog: ordered devotion groups plus the flat saints list.
///
/// Group order matters: the Daily Selector's first-match tie-break and the
/// no-match fallback both follow declaration order.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub groups: Vec<DevotionGroup>,
    pub saints: Vec<Saint>,
}

impl Catalog {
    /// Look up a group by id.
    pub fn group(&self, id: &str) -> Option<&DevotionGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}
