//! Task data model.
//!
//! `Task` is the central entity: a unit of trackable work with a lifecycle
//! status, accrued time against an estimate, an append-only audit log, and
//! user-authored notes. The wire shape (camelCase fields, millisecond
//! timestamps, integer-second durations, optional fields absent when unset)
//! is what the storage blob holds verbatim; readers must tolerate missing
//! `startedAt` / `completedAt` / `urlLink` as "not yet set".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// Lifecycle status of a task. Transitions are forward-only; see the
/// `lifecycle` module for the legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    New,
    Started,
    Review,
    Completed,
}

impl TaskStatus {
    /// All statuses in board-column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::New,
        TaskStatus::Started,
        TaskStatus::Review,
        TaskStatus::Completed,
    ];

    /// Human-facing column label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::New => "New Task",
            TaskStatus::Started => "Task Started",
            TaskStatus::Review => "Task Review",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(TaskStatus::New),
            "started" => Ok(TaskStatus::Started),
            "review" => Ok(TaskStatus::Review),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(Error::InvalidInput(format!(
                "unknown task status '{other}' (expected new, started, review, completed)"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// System-generated, attributed record of a field change. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLog {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub change: String,
}

/// Free-text, user-authored annotation. Append-only; not a change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNote {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Seconds, set at creation and immutable thereafter.
    pub estimated_time: u64,
    /// Seconds accumulated while started; never decreases, frozen once
    /// the task completes.
    pub elapsed_time: u64,
    pub status: TaskStatus,
    /// Assignee email.
    pub assigned_to: String,
    /// Creator email.
    pub created_by: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: Vec<TaskLog>,
    #[serde(default)]
    pub notes: Vec<TaskNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_link: Option<String>,
}

impl Task {
    /// Build a new task from a validated draft. Status starts at `New`
    /// with zero elapsed time and a single creation log entry.
    pub fn create(draft: TaskDraft, created_by: &str, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Task {
            id: generate_task_id(),
            name: draft.name,
            description: draft.description,
            estimated_time: draft.estimated_time,
            elapsed_time: 0,
            status: TaskStatus::New,
            assigned_to: draft.assigned_to,
            created_by: created_by.to_string(),
            created_at: now,
            started_at: None,
            completed_at: None,
            logs: vec![TaskLog {
                timestamp: now,
                user: created_by.to_string(),
                change: "Task created.".to_string(),
            }],
            notes: vec![],
            url_link: draft.url_link,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Input for creating a task. Everything else on `Task` is stamped by the
/// engine.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    /// Seconds.
    pub estimated_time: u64,
    pub url_link: Option<String>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("task name cannot be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "task description cannot be empty".to_string(),
            ));
        }
        if self.assigned_to.trim().is_empty() {
            return Err(Error::InvalidInput(
                "task assignee cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate an opaque, unique task id.
pub fn generate_task_id() -> String {
    format!("task-{}", Ulid::new().to_string().to_lowercase())
}
