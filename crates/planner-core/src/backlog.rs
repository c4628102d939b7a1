//! Ordered queue of tasks awaiting placement.
//!
//! Insertion order is the round-robin order used by
//! [`Planning::schedule_tasks`](crate::Planning::schedule_tasks).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Backlog {
    pub tasks: Vec<Task>,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and hand it back for chaining.
    pub fn add(&mut self, task: Task) -> Task {
        self.tasks.push(task.clone());
        task
    }

    /// Remove every entry with the given task id. Unknown ids are ignored.
    pub fn remove(&mut self, task_id: Uuid) {
        self.tasks.retain(|t| t.id != task_id);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn get(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}
