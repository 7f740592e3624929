//! Audit log engine.
//!
//! Every mutation path produces its history through this module so the log
//! stays consistent and human-readable: one entry per changed tracked
//! field, attributed to the acting user, in a fixed field order (name,
//! description, URL link). The log is the board's only durable history, so
//! entries describe the change rather than dumping a snapshot diff.

use chrono::{DateTime, Utc};

use crate::task::{Task, TaskLog, TaskStatus};

/// Proposed values for the editable free-text fields of a task.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub name: String,
    pub description: String,
    pub url_link: Option<String>,
}

impl TaskEdit {
    /// Editing from an existing task: start with its current values.
    pub fn from_task(task: &Task) -> Self {
        TaskEdit {
            name: task.name.clone(),
            description: task.description.clone(),
            url_link: task.url_link.clone(),
        }
    }

    /// Empty and whitespace-only links count as "no link".
    pub fn normalized_url(&self) -> Option<String> {
        self.url_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
    }
}

/// Compare an existing task against proposed field values and produce the
/// log entries to append, in deterministic field order.
pub fn diff_logs(old: &Task, edit: &TaskEdit, actor: &str, now: DateTime<Utc>) -> Vec<TaskLog> {
    let mut logs = Vec::new();
    if old.name != edit.name {
        logs.push(entry(
            actor,
            now,
            format!("Task name changed to \"{}\"", edit.name),
        ));
    }
    if old.description != edit.description {
        logs.push(entry(actor, now, "Description updated.".to_string()));
    }
    if old.url_link != edit.normalized_url() {
        logs.push(entry(actor, now, "URL link updated.".to_string()));
    }
    logs
}

/// Log entry for a status transition.
pub fn status_changed(to: TaskStatus, actor: &str, now: DateTime<Utc>) -> TaskLog {
    entry(actor, now, format!("Status changed to \"{}\".", to.label()))
}

/// Log entry for a note addition. The note text itself lives in `notes`;
/// the log only records that one was added.
pub fn note_added(actor: &str, now: DateTime<Utc>) -> TaskLog {
    entry(actor, now, "Note added.".to_string())
}

fn entry(actor: &str, now: DateTime<Utc>, change: String) -> TaskLog {
    TaskLog {
        timestamp: now,
        user: actor.to_string(),
        change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;

    fn task() -> Task {
        Task::create(
            TaskDraft {
                name: "Deploy staging server".to_string(),
                description: "Update the staging environment.".to_string(),
                assigned_to: "alex.kit@example.com".to_string(),
                estimated_time: 1800,
                url_link: None,
            },
            "admin@example.com",
            Utc::now(),
        )
        .expect("create")
    }

    #[test]
    fn unchanged_edit_produces_no_entries() {
        let task = task();
        let edit = TaskEdit::from_task(&task);
        assert!(diff_logs(&task, &edit, "admin@example.com", Utc::now()).is_empty());
    }

    #[test]
    fn each_changed_field_produces_one_entry_in_field_order() {
        let task = task();
        let now = Utc::now();
        let edit = TaskEdit {
            name: "Deploy production server".to_string(),
            description: task.description.clone(),
            url_link: Some("https://ci.example.com".to_string()),
        };
        let logs = diff_logs(&task, &edit, "admin@example.com", now);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].change, "Task name changed to \"Deploy production server\"");
        assert_eq!(logs[1].change, "URL link updated.");
        assert!(logs.iter().all(|log| log.user == "admin@example.com"));
        assert!(logs.iter().all(|log| log.timestamp == now));
    }

    #[test]
    fn description_change_is_logged_between_name_and_url() {
        let task = task();
        let edit = TaskEdit {
            name: "Renamed".to_string(),
            description: "Rewritten.".to_string(),
            url_link: Some("https://example.com".to_string()),
        };
        let logs = diff_logs(&task, &edit, "admin@example.com", Utc::now());
        let changes: Vec<&str> = logs.iter().map(|log| log.change.as_str()).collect();
        assert_eq!(
            changes,
            vec![
                "Task name changed to \"Renamed\"",
                "Description updated.",
                "URL link updated.",
            ]
        );
    }

    #[test]
    fn blank_url_is_treated_as_unset() {
        let task = task();
        let edit = TaskEdit {
            name: task.name.clone(),
            description: task.description.clone(),
            url_link: Some("   ".to_string()),
        };
        assert!(diff_logs(&task, &edit, "admin@example.com", Utc::now()).is_empty());
    }

    #[test]
    fn status_and_note_entries_use_fixed_phrasing() {
        let now = Utc::now();
        assert_eq!(
            status_changed(TaskStatus::Started, "alex.kit@example.com", now).change,
            "Status changed to \"Task Started\"."
        );
        assert_eq!(note_added("alex.kit@example.com", now).change, "Note added.");
    }
}
