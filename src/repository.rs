//! In-memory task repository.
//!
//! The single source of truth for task state. Mutations replace whole
//! `Task` values by id; readers take snapshots and never see a task
//! mid-mutation. Insertion order is creation order and is preserved by
//! `list` and `snapshot`.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository from persisted tasks, e.g. at process start.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskRepository { tasks }
    }

    /// Insert a freshly created task. Rejects duplicate ids.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.find(&task.id).is_some() {
            return Err(Error::InvalidInput(format!(
                "task already exists: {}",
                task.id
            )));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Replace a task by id with a new value.
    pub fn update(&mut self, task: Task) -> Result<()> {
        match self.tasks.iter_mut().find(|entry| entry.id == task.id) {
            Some(entry) => {
                *entry = task;
                Ok(())
            }
            None => Err(Error::NotFound(task.id)),
        }
    }

    /// Delete every task whose id is in `ids`. Absent ids are silently
    /// ignored; returns the number actually removed.
    pub fn remove(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !ids.contains(&task.id));
        before - self.tasks.len()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.find(id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All tasks in creation order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Point-in-time copy for read-side consumers (reports, archive,
    /// persistence). Mutating the snapshot never touches the repository.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;
    use chrono::Utc;

    fn task(name: &str) -> Task {
        Task::create(
            TaskDraft {
                name: name.to_string(),
                description: "description".to_string(),
                assigned_to: "alex.kit@example.com".to_string(),
                estimated_time: 600,
                url_link: None,
            },
            "admin@example.com",
            Utc::now(),
        )
        .expect("create")
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut repo = TaskRepository::new();
        let first = task("one");
        let mut clone = first.clone();
        clone.name = "impostor".to_string();

        repo.insert(first).expect("insert");
        assert!(matches!(repo.insert(clone), Err(Error::InvalidInput(_))));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_replaces_by_id_and_signals_not_found() {
        let mut repo = TaskRepository::new();
        let original = task("one");
        let id = original.id.clone();
        repo.insert(original).expect("insert");

        let mut edited = repo.get(&id).expect("get").clone();
        edited.name = "renamed".to_string();
        repo.update(edited).expect("update");
        assert_eq!(repo.get(&id).unwrap().name, "renamed");

        let ghost = task("ghost");
        assert!(matches!(repo.update(ghost), Err(Error::NotFound(_))));
    }

    #[test]
    fn remove_counts_only_present_ids() {
        let mut repo = TaskRepository::new();
        let a = task("a");
        let b = task("b");
        let a_id = a.id.clone();
        repo.insert(a).expect("insert a");
        repo.insert(b).expect("insert b");

        let ids: HashSet<String> = [a_id, "task-missing".to_string()].into_iter().collect();
        assert_eq!(repo.remove(&ids), 1);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].name, "b");
    }

    #[test]
    fn list_preserves_creation_order() {
        let mut repo = TaskRepository::new();
        for name in ["first", "second", "third"] {
            repo.insert(task(name)).expect("insert");
        }
        let names: Vec<&str> = repo.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn snapshot_is_detached_from_the_repository() {
        let mut repo = TaskRepository::new();
        repo.insert(task("one")).expect("insert");

        let mut snapshot = repo.snapshot();
        snapshot[0].name = "mutated".to_string();
        snapshot.clear();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].name, "one");
    }
}
