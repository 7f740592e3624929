//! Board facade: the mutation and query entry points.
//!
//! External callers (the CLI, or any other presentation layer) go through
//! `Board`. Each mutation validates first, then computes the full new task
//! value (consulting the lifecycle rules and audit engine), replaces it in
//! the repository, writes the board blob through, and emits a notification
//! event. A rejected operation returns before any replacement, so the
//! repository is left untouched.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use crate::audit::{self, TaskEdit};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind, EventSink};
use crate::lifecycle;
use crate::report::{self, ReportFilter, ReportSummary};
use crate::repository::TaskRepository;
use crate::storage::BoardStorage;
use crate::task::{Task, TaskDraft, TaskNote, TaskStatus};

pub struct Board {
    repository: TaskRepository,
    storage: BoardStorage,
    actor: String,
    sink: Option<EventSink>,
    event_warning: Option<String>,
}

impl Board {
    /// Open a board: read the persisted blob once and seed the repository.
    pub fn open(storage: BoardStorage, actor: impl Into<String>) -> Result<Self> {
        let tasks = storage.load()?;
        Ok(Board {
            repository: TaskRepository::from_tasks(tasks),
            storage,
            actor: actor.into(),
            sink: None,
            event_warning: None,
        })
    }

    /// Attach a notification sink for mutation events.
    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Warning from the last event emission, if the sink failed. Emission
    /// is fire-and-forget and never fails the mutation itself.
    pub fn take_event_warning(&mut self) -> Option<String> {
        self.event_warning.take()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a task from a draft. The new task starts at `New` with zero
    /// elapsed time and one creation log entry.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = Task::create(draft, &self.actor, Utc::now())?;
        self.repository.insert(task.clone())?;
        self.persist()?;
        info!(id = %task.id, name = %task.name, "task created");
        self.emit(EventKind::TaskCreated, &task);
        Ok(task)
    }

    /// Apply edited field values to a task. One audit log entry is appended
    /// per changed tracked field, after all pre-existing entries.
    pub fn edit(&mut self, id: &str, edit: TaskEdit) -> Result<Task> {
        if edit.name.trim().is_empty() {
            return Err(Error::InvalidInput("task name cannot be empty".to_string()));
        }
        if edit.description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "task description cannot be empty".to_string(),
            ));
        }

        let old = self.repository.get(id)?;
        let now = Utc::now();
        let new_logs = audit::diff_logs(old, &edit, &self.actor, now);

        let mut task = old.clone();
        task.name = edit.name.clone();
        task.description = edit.description.clone();
        task.url_link = edit.normalized_url();
        task.logs.extend(new_logs);

        self.repository.update(task.clone())?;
        self.persist()?;
        info!(id = %task.id, "task edited");
        self.emit(EventKind::TaskUpdated, &task);
        Ok(task)
    }

    /// Append a note and its "Note added." log entry.
    pub fn add_note(&mut self, id: &str, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("note text cannot be empty".to_string()));
        }

        let old = self.repository.get(id)?;
        let now = Utc::now();
        let mut task = old.clone();
        task.notes.push(TaskNote {
            timestamp: now,
            user: self.actor.clone(),
            text: text.to_string(),
        });
        task.logs.push(audit::note_added(&self.actor, now));

        self.repository.update(task.clone())?;
        self.persist()?;
        info!(id = %task.id, "note added");
        self.emit(EventKind::TaskNoteAdded, &task);
        Ok(task)
    }

    /// Advance a task one step along the lifecycle, as a board card does.
    pub fn advance(&mut self, id: &str) -> Result<Task> {
        let current = self.repository.get(id)?.status;
        let to = lifecycle::next(current).ok_or_else(|| Error::InvalidTransition {
            from: current.label().to_string(),
            to: current.label().to_string(),
        })?;
        self.set_status(id, to)
    }

    /// Move a task to an explicit status, honoring the transition table.
    pub fn set_status(&mut self, id: &str, to: TaskStatus) -> Result<Task> {
        let old = self.repository.get(id)?;
        let task = lifecycle::transition(old, to, &self.actor, Utc::now())?;

        self.repository.update(task.clone())?;
        self.persist()?;
        info!(id = %task.id, status = %task.status, "status changed");
        self.emit(EventKind::TaskStatusChanged, &task);
        Ok(task)
    }

    /// Record accumulated elapsed seconds for an in-progress task. The
    /// value never decreases and is frozen once the task completes.
    pub fn record_time(&mut self, id: &str, elapsed: u64) -> Result<Task> {
        let old = self.repository.get(id)?;
        lifecycle::check_elapsed_update(old, elapsed)?;

        let mut task = old.clone();
        task.elapsed_time = elapsed;

        self.repository.update(task.clone())?;
        self.persist()?;
        self.emit(EventKind::TaskUpdated, &task);
        Ok(task)
    }

    /// Delete all tasks whose ids are given; absent ids are ignored.
    /// Returns the number actually removed.
    pub fn remove(&mut self, ids: &[String]) -> Result<usize> {
        let ids: HashSet<String> = ids.iter().cloned().collect();
        let removed = self.repository.remove(&ids);
        self.persist()?;
        info!(removed, "tasks deleted");
        if removed > 0 {
            let event = Event::new(EventKind::TasksDeleted, Some(self.actor.clone()))
                .with_data(serde_json::json!({ "removed": removed }));
            self.send(event);
        }
        Ok(removed)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.repository.get(id)
    }

    /// All tasks in creation order.
    pub fn list(&self) -> &[Task] {
        self.repository.list()
    }

    /// Tasks assigned to one user.
    pub fn list_for(&self, assignee: &str) -> Vec<&Task> {
        self.repository
            .list()
            .iter()
            .filter(|task| task.assigned_to == assignee)
            .collect()
    }

    /// Immutable point-in-time copy of the task collection.
    pub fn snapshot(&self) -> Vec<Task> {
        self.repository.snapshot()
    }

    /// Report KPIs for a filter over the current snapshot.
    pub fn report(&self, filter: &ReportFilter) -> ReportSummary {
        report::aggregate(self.repository.list(), filter, Utc::now())
    }

    /// Completed tasks, optionally narrowed to one assignee.
    pub fn archive(&self, assignee: Option<&str>) -> Vec<Task> {
        report::archive(self.repository.list(), assignee)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Write-through: persist the full snapshot after a mutation.
    fn persist(&self) -> Result<()> {
        self.storage.save(self.repository.list())
    }

    fn emit(&mut self, kind: EventKind, task: &Task) {
        let event = Event::new(kind, Some(self.actor.clone())).with_data(serde_json::json!({
            "id": task.id,
            "name": task.name,
            "status": task.status,
        }));
        self.send(event);
    }

    fn send(&mut self, event: Result<Event>) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let outcome = event.and_then(|event| sink.emit(&event));
        if let Err(err) = outcome {
            warn!(error = %err, "event emission failed");
            self.event_warning = Some(format!("event emission failed: {err}"));
        }
    }
}
