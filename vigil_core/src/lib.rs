#![forbid(unsafe_code)]

//! Core domain model and business logic for the Vigil devotional system.
//!
//! This crate provides:
//! - Domain types (devotion groups, items, saints, selection and progression state)
//! - Catalog management
//! - The Daily Selector (date -> active group, date-derived indices)
//! - The Progression Tracker (bounded two-level counter state machine)
//! - Session glue (override, daily refresh, snapshots)
//! - Persistence (session snapshots, completed-devotion journal)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod selector;
pub mod progression;
pub mod session;
pub mod state;
pub mod journal;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_catalog, build_default_catalog, get_default_catalog};
pub use config::Config;
pub use selector::{date_derived_index, saint_of_the_day, select_active_group};
pub use progression::{AdvanceOutcome, ProgressionTracker};
pub use session::{DevotionSession, SessionSnapshot, SessionView};
pub use journal::{CompletedDevotion, JournalSink, JsonlJournal};
