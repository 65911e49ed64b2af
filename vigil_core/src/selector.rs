//! Daily Selector: pure date-to-selection mapping.
//!
//! This module implements the two deterministic reads the engine performs
//! at session start:
//! - Pick which devotion group is active today (weekday table lookup)
//! - Derive the "of the day" index into a flat catalogue (saints, verses)
//!
//! Both are pure functions of their inputs; neither reads a clock.

use crate::{Catalog, DevotionGroup, Error, Result, Saint};
use chrono::{Datelike, NaiveDate};

/// Select the group active on `date`.
///
/// Evaluates each group's weekday predicate in declaration order and returns
/// the id of the first match. If no predicate matches (the built-in table is
/// exhaustive, but caller-supplied catalogs may not be), falls back to the
/// first group in the catalog; that path is logged, never surfaced as an
/// error. An empty group list is rejected.
pub fn select_active_group<'a>(date: NaiveDate, groups: &'a [DevotionGroup]) -> Result<&'a str> {
    let first = groups
        .first()
        .ok_or_else(|| Error::InvalidCatalog("no devotion groups".into()))?;

    let weekday = date.weekday();
    match groups.iter().find(|g| g.applies_on(weekday)) {
        Some(group) => {
            tracing::debug!("Selected group '{}' for {:?}", group.id, weekday);
            Ok(&group.id)
        }
        None => {
            tracing::warn!(
                "No group applies on {:?}, falling back to '{}'",
                weekday,
                first.id
            );
            Ok(&first.id)
        }
    }
}

/// Derive the "of the day" index into a flat catalogue of `len` entries.
///
/// The formula is `(day_of_month + zero_based_month) mod len`: stable within
/// a calendar day, different from day to day. It is a hardcoded business
/// rule, not a liturgical calendar computation.
pub fn date_derived_index(date: NaiveDate, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(Error::InvalidCatalog(
            "date-derived index into empty catalogue".into(),
        ));
    }

    let day = date.day() as usize;
    let month0 = date.month0() as usize;
    Ok((day + month0) % len)
}

/// Convenience: the saint addressed by today's date-derived index.
pub fn saint_of_the_day(date: NaiveDate, catalog: &Catalog) -> Result<&Saint> {
    let index = date_derived_index(date, catalog.saints.len())?;
    // date_derived_index guarantees index < saints.len()
    Ok(&catalog.saints[index])
}
