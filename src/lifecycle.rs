//! Status transition rules.
//!
//! The lifecycle is forward-only: `New -> Started -> Review -> Completed`,
//! with `Started -> Completed` permitted as a shortcut. Backward moves,
//! other skips, and anything out of `Completed` are rejected without
//! touching the task.
//!
//! Side effects on transition:
//! - entering `Started` stamps `started_at` the first time only
//! - entering `Completed` stamps `completed_at` and freezes `elapsed_time`
//!   (the shortcut also stamps `started_at` if it was never set)

use chrono::{DateTime, Utc};

use crate::audit;
use crate::error::{Error, Result};
use crate::task::{Task, TaskStatus};

/// The next status along the forward path, if any.
pub fn next(from: TaskStatus) -> Option<TaskStatus> {
    match from {
        TaskStatus::New => Some(TaskStatus::Started),
        TaskStatus::Started => Some(TaskStatus::Review),
        TaskStatus::Review => Some(TaskStatus::Completed),
        TaskStatus::Completed => None,
    }
}

/// Whether `from -> to` is in the allowed transition table.
pub fn is_allowed(from: TaskStatus, to: TaskStatus) -> bool {
    matches!(
        (from, to),
        (TaskStatus::New, TaskStatus::Started)
            | (TaskStatus::Started, TaskStatus::Review)
            | (TaskStatus::Review, TaskStatus::Completed)
            | (TaskStatus::Started, TaskStatus::Completed)
    )
}

/// Apply a transition to a copy of the task, returning the new value with
/// status, timestamps, and audit log updated. The input task is untouched,
/// so a rejected transition leaves no trace.
pub fn transition(task: &Task, to: TaskStatus, actor: &str, now: DateTime<Utc>) -> Result<Task> {
    if !is_allowed(task.status, to) {
        return Err(Error::InvalidTransition {
            from: task.status.label().to_string(),
            to: to.label().to_string(),
        });
    }

    let mut next = task.clone();
    next.status = to;
    match to {
        TaskStatus::Started => {
            if next.started_at.is_none() {
                next.started_at = Some(now);
            }
        }
        TaskStatus::Completed => {
            // Shortcut from Started: the task was worked on, so make sure
            // the start is recorded too.
            if next.started_at.is_none() {
                next.started_at = Some(now);
            }
            next.completed_at = Some(now);
        }
        TaskStatus::New | TaskStatus::Review => {}
    }
    next.logs.push(audit::status_changed(to, actor, now));
    Ok(next)
}

/// Guard for elapsed-time mutations: never backward, never after
/// completion.
pub fn check_elapsed_update(task: &Task, elapsed: u64) -> Result<()> {
    if task.is_completed() {
        return Err(Error::InvalidInput(format!(
            "elapsed time is frozen for completed task {}",
            task.id
        )));
    }
    if elapsed < task.elapsed_time {
        return Err(Error::InvalidInput(format!(
            "elapsed time cannot decrease ({} -> {})",
            task.elapsed_time, elapsed
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;

    fn task() -> Task {
        Task::create(
            TaskDraft {
                name: "Client meeting preparation".to_string(),
                description: "Prepare slides for the review meeting.".to_string(),
                assigned_to: "david.smith@example.com".to_string(),
                estimated_time: 3600,
                url_link: None,
            },
            "admin@example.com",
            Utc::now(),
        )
        .expect("create")
    }

    #[test]
    fn forward_path_walks_all_statuses() {
        assert_eq!(next(TaskStatus::New), Some(TaskStatus::Started));
        assert_eq!(next(TaskStatus::Started), Some(TaskStatus::Review));
        assert_eq!(next(TaskStatus::Review), Some(TaskStatus::Completed));
        assert_eq!(next(TaskStatus::Completed), None);
    }

    #[test]
    fn starting_stamps_started_at_once() {
        let created = task();
        let first = Utc::now();
        let started = transition(&created, TaskStatus::Started, "admin@example.com", first)
            .expect("start");
        assert_eq!(started.started_at, Some(first));
        assert_eq!(started.status, TaskStatus::Started);
        assert_eq!(started.logs.len(), 2);
        assert_eq!(started.logs[1].change, "Status changed to \"Task Started\".");
    }

    #[test]
    fn completing_from_review_stamps_completed_at() {
        let mut in_review = task();
        let started_at = Utc::now();
        in_review = transition(&in_review, TaskStatus::Started, "a@example.com", started_at)
            .expect("start");
        in_review = transition(&in_review, TaskStatus::Review, "a@example.com", Utc::now())
            .expect("review");

        let done_at = Utc::now();
        let done = transition(&in_review, TaskStatus::Completed, "a@example.com", done_at)
            .expect("complete");
        assert_eq!(done.completed_at, Some(done_at));
        // started_at is preserved, not restamped
        assert_eq!(done.started_at, Some(started_at));
        assert!(done.completed_at.unwrap() >= done.created_at);
    }

    #[test]
    fn started_to_completed_shortcut_is_permitted() {
        let started = transition(&task(), TaskStatus::Started, "a@example.com", Utc::now())
            .expect("start");
        let now = Utc::now();
        let done =
            transition(&started, TaskStatus::Completed, "a@example.com", now).expect("shortcut");
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at, Some(now));
        assert!(done.started_at.is_some());
    }

    #[test]
    fn backward_and_skipping_moves_are_rejected() {
        let created = task();
        // skip
        let err = transition(&created, TaskStatus::Completed, "a@example.com", Utc::now())
            .expect_err("new -> completed");
        assert!(matches!(err, Error::InvalidTransition { .. }));
        // self
        assert!(transition(&created, TaskStatus::New, "a@example.com", Utc::now()).is_err());

        let started = transition(&created, TaskStatus::Started, "a@example.com", Utc::now())
            .expect("start");
        // backward
        assert!(transition(&started, TaskStatus::New, "a@example.com", Utc::now()).is_err());
    }

    #[test]
    fn completed_is_terminal() {
        let mut done = task();
        done = transition(&done, TaskStatus::Started, "a@example.com", Utc::now()).expect("start");
        done =
            transition(&done, TaskStatus::Completed, "a@example.com", Utc::now()).expect("done");
        for to in TaskStatus::ALL {
            let result = transition(&done, to, "a@example.com", Utc::now());
            assert!(matches!(result, Err(Error::InvalidTransition { .. })));
        }
    }

    #[test]
    fn rejected_transition_leaves_task_untouched() {
        let created = task();
        let before = created.clone();
        let _ = transition(&created, TaskStatus::Review, "a@example.com", Utc::now());
        assert_eq!(created, before);
    }

    #[test]
    fn elapsed_guard_rejects_decrease_and_completed() {
        let mut worked = task();
        worked =
            transition(&worked, TaskStatus::Started, "a@example.com", Utc::now()).expect("start");
        worked.elapsed_time = 600;

        assert!(check_elapsed_update(&worked, 600).is_ok());
        assert!(check_elapsed_update(&worked, 601).is_ok());
        assert!(matches!(
            check_elapsed_update(&worked, 599),
            Err(Error::InvalidInput(_))
        ));

        let done = transition(&worked, TaskStatus::Completed, "a@example.com", Utc::now())
            .expect("complete");
        assert!(matches!(
            check_elapsed_update(&done, 700),
            Err(Error::InvalidInput(_))
        ));
    }
}
