//! Task schedulings and their feedback.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;
use crate::timeline::TimeSlot;

/// Outcome recorded on a scheduling after the fact.
///
/// Only used to score past planning decisions, never to drive scheduling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The slot, day and neighbouring tasks suited the task.
    CompletedWithoutProblem,
    /// The task could not be done correctly or at all where it was placed.
    NotDoneCorrectlyOrAtAll,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::CompletedWithoutProblem => "completed_without_problem",
            Feedback::NotDoneCorrectlyOrAtAll => "not_done_correctly_or_at_all",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Feedback::CompletedWithoutProblem)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = String;

    /// Accepts the stored tags plus the `done`/`failed` shorthands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed_without_problem" | "done" => Ok(Feedback::CompletedWithoutProblem),
            "not_done_correctly_or_at_all" | "failed" => Ok(Feedback::NotDoneCorrectlyOrAtAll),
            other => Err(format!("unknown feedback: {other}")),
        }
    }
}

/// A task placed on a time slot.
///
/// Schedulings have their own identity because the same task may be placed
/// several times. Equality compares that identity only, so setting feedback
/// or moving the slot keeps a scheduling equal to its former self.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskScheduling {
    pub id: Uuid,
    pub task: Task,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl TaskScheduling {
    pub fn new(task: Task, time_slot: TimeSlot) -> Self {
        Self {
            id: Uuid::new_v4(),
            task,
            time_slot,
            feedback: None,
        }
    }
}

impl PartialEq for TaskScheduling {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TaskScheduling {}

impl Hash for TaskScheduling {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
