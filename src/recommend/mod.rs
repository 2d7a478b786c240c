// File: ./src/recommend/mod.rs
//! Pipeline turning free-form scheduling advice back into structured task
//! data: line grammar -> date/time resolution -> reconciliation against the
//! existing collection.
pub mod grammar;
pub mod reconcile;
pub mod schedule;

pub use grammar::{LineMatch, parse_line, parse_recommendations};
pub use reconcile::{ReconcileOutcome, SkipReason, SkippedLine, reconcile};
pub use schedule::{ScheduleError, ScheduleResolver, Zone};
