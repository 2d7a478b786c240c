// File: ./src/recommend/reconcile.rs
//! Applies parsed schedule advice back onto the task collection.
//!
//! The advice text is inherently unreliable, so every failure mode here is
//! absorbed per line: one bad id or date drops that line, never the rest.
//! Reconciliation itself is a pure function over a snapshot; the caller owns
//! persistence of the returned collection.
use crate::model::Task;
use crate::recommend::grammar::LineMatch;
use crate::recommend::schedule::{ScheduleError, ScheduleResolver};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Why one advice line was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("malformed task id '{0}'")]
    MalformedId(String),
    #[error("no task with id {0}")]
    UnknownId(Uuid),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// A dropped line plus its reason, reported back for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: LineMatch,
    pub reason: SkipReason,
}

/// Result of a reconciliation pass. `tasks` always carries the same ids as
/// the input collection, only order and work dates differ.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub tasks: Vec<Task>,
    pub applied: usize,
    pub skipped: Vec<SkippedLine>,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied == 0
    }
}

/// Merges the advisor's ordered matches into the collection: surviving
/// matches place their task in recommendation order with the resolved work
/// date, every other task follows in its original relative order. A task
/// referenced twice lands once, at the rank of its last reference, with the
/// last resolved date (last write wins).
pub fn reconcile(
    tasks: &[Task],
    matches: &[LineMatch],
    resolver: &ScheduleResolver,
) -> ReconcileOutcome {
    let mut scheduled: Vec<(Uuid, DateTime<Utc>)> = Vec::new();
    let mut skipped: Vec<SkippedLine> = Vec::new();
    let mut skip = |line: &LineMatch, reason: SkipReason| {
        log::warn!("skipping advice line for '{}': {}", line.title, reason);
        skipped.push(SkippedLine {
            line: line.clone(),
            reason,
        });
    };

    for line in matches {
        let id = match Uuid::parse_str(&line.task_id) {
            Ok(id) => id,
            Err(_) => {
                skip(line, SkipReason::MalformedId(line.task_id.clone()));
                continue;
            }
        };
        if !tasks.iter().any(|t| t.id == id) {
            // Advice may reference tasks deleted since the prompt was built.
            skip(line, SkipReason::UnknownId(id));
            continue;
        }
        match resolver.resolve(&line.date, &line.time) {
            Ok(when) => {
                scheduled.retain(|(existing, _)| *existing != id);
                scheduled.push((id, when));
            }
            Err(e) => skip(line, e.into()),
        }
    }

    let applied = scheduled.len();
    let mut reordered: Vec<Task> = Vec::with_capacity(tasks.len());
    for (id, when) in &scheduled {
        if let Some(task) = tasks.iter().find(|t| t.id == *id) {
            let mut task = task.clone();
            task.work_date = Some(*when);
            reordered.push(task);
        }
    }
    reordered.extend(
        tasks
            .iter()
            .filter(|t| !scheduled.iter().any(|(id, _)| *id == t.id))
            .cloned(),
    );

    ReconcileOutcome {
        tasks: reordered,
        applied,
        skipped,
    }
}
