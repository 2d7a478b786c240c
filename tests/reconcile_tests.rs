use aceday::model::{Importance, Task};
use aceday::recommend::{
    ScheduleResolver, SkipReason, Zone, parse_recommendations, reconcile,
};
use chrono::{NaiveDate, Timelike};
use std::collections::HashSet;
use uuid::Uuid;

fn make_task(title: &str) -> Task {
    let mut task = Task::new(title);
    task.importance = Importance::High;
    task.estimated_hours = 2.5;
    task
}

fn advice_line(task: &Task, date: &str, time: &str) -> String {
    format!(
        "Task: {} at {} at {}, task id: {}",
        task.title, date, time, task.id
    )
}

fn resolver() -> ScheduleResolver {
    ScheduleResolver::new(Zone::Utc)
}

fn id_set(tasks: &[Task]) -> HashSet<Uuid> {
    tasks.iter().map(|t| t.id).collect()
}

#[test]
fn test_identifier_set_and_cardinality_are_invariant() {
    let tasks = vec![make_task("A"), make_task("B"), make_task("C")];
    let text = format!(
        "{}\nnot an action line\n{}\nTask: ghost at Mar 1, 2025 at 9:00 AM, task id: zzzz",
        advice_line(&tasks[2], "Mar 12, 2025", "9:00 AM"),
        advice_line(&tasks[0], "Mar 13, 2025", "2:30 PM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());
    assert_eq!(outcome.tasks.len(), tasks.len());
    assert_eq!(id_set(&outcome.tasks), id_set(&tasks));
}

#[test]
fn test_no_actionable_lines_is_a_noop() {
    let tasks = vec![make_task("A"), make_task("B")];
    let outcome = reconcile(
        &tasks,
        &parse_recommendations("Nothing useful here.\nOr here."),
        &resolver(),
    );
    assert!(outcome.is_noop());
    assert_eq!(outcome.tasks, tasks);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_schedule_applied_and_other_attributes_untouched() {
    let tasks = vec![make_task("Write report"), make_task("Other")];
    let text = advice_line(&tasks[0], "Mar 12, 2025", "2:30 PM");
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());

    assert_eq!(outcome.applied, 1);
    let updated = outcome.tasks.iter().find(|t| t.id == tasks[0].id).unwrap();
    let work = updated.work_date.expect("schedule was applied");
    assert_eq!(
        work.naive_utc().date(),
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    );
    assert_eq!((work.hour(), work.minute()), (14, 30));

    assert_eq!(updated.title, tasks[0].title);
    assert_eq!(updated.importance, tasks[0].importance);
    assert_eq!(updated.estimated_hours, tasks[0].estimated_hours);
    assert_eq!(updated.completed, tasks[0].completed);
    assert_eq!(updated.created_at, tasks[0].created_at);
}

#[test]
fn test_matched_tasks_lead_in_recommendation_order() {
    // Collection [A, B, C]; advice orders C then A; B is unreferenced.
    let tasks = vec![make_task("A"), make_task("B"), make_task("C")];
    let text = format!(
        "{}\n{}",
        advice_line(&tasks[2], "Mar 12, 2025", "9:00 AM"),
        advice_line(&tasks[0], "Mar 12, 2025", "11:00 AM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());
    let titles: Vec<&str> = outcome.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
    assert!(outcome.tasks[2].work_date.is_none());
}

#[test]
fn test_duplicate_reference_is_last_write_wins() {
    let tasks = vec![make_task("A"), make_task("B")];
    let text = format!(
        "{}\n{}\n{}",
        advice_line(&tasks[0], "Mar 12, 2025", "9:00 AM"),
        advice_line(&tasks[1], "Mar 12, 2025", "10:00 AM"),
        advice_line(&tasks[0], "Mar 14, 2025", "4:00 PM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());

    // A appears once, at the rank of its second reference, with the later date.
    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.tasks.len(), 2);
    let titles: Vec<&str> = outcome.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
    let a = &outcome.tasks[1];
    assert_eq!(
        a.work_date.unwrap().naive_utc().date(),
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    );
}

#[test]
fn test_malformed_id_is_skipped_not_fatal() {
    let tasks = vec![make_task("A"), make_task("B")];
    let text = format!(
        "Task: ghost at Mar 12, 2025 at 9:00 AM, task id: deadbeef\n{}",
        advice_line(&tasks[1], "Mar 12, 2025", "10:00 AM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::MalformedId("deadbeef".to_string())
    );
    assert_eq!(outcome.tasks[0].title, "B");
}

#[test]
fn test_unknown_id_is_skipped_not_fatal() {
    let tasks = vec![make_task("A")];
    let stale = Uuid::new_v4();
    let text = format!(
        "Task: deleted one at Mar 12, 2025 at 9:00 AM, task id: {}\n{}",
        stale,
        advice_line(&tasks[0], "Mar 12, 2025", "10:00 AM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::UnknownId(stale));
}

#[test]
fn test_unresolvable_date_is_skipped_not_fatal() {
    let tasks = vec![make_task("A"), make_task("B")];
    // "Zzz" passes the line grammar but no date format accepts it.
    let text = format!(
        "{}\n{}",
        advice_line(&tasks[0], "Zzz 99, 2025", "9:00 AM"),
        advice_line(&tasks[1], "Mar 12, 2025", "10:00 AM"),
    );
    let outcome = reconcile(&tasks, &parse_recommendations(&text), &resolver());
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(matches!(outcome.skipped[0].reason, SkipReason::Schedule(_)));
    // The failed task keeps its place among the unmatched remainder.
    let titles: Vec<&str> = outcome.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}
