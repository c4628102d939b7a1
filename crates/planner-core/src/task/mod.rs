//! Tasks: the schedulable units of work.
//!
//! A task carries a name and an optional duration policy. The policy is
//! read-only input to the planning algorithms:
//!
//! - `reference_duration`: duration used when the task is auto-scheduled.
//! - `minimum_duration`: shortest duration the task may be squeezed to when
//!   it conflicts with another scheduling. Without it the task is never
//!   compressed, only pushed.

use std::hash::{Hash, Hasher};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An activity that should be performed.
///
/// Tasks get a unique identifier at creation. Equality only compares that
/// identifier: two tasks with the same name and durations are different
/// tasks, and a task keeps its identity however many times it is scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Should read as a verbal group, like "fix bugs".
    pub name: String,
    #[serde(default, with = "crate::duration_secs::option")]
    pub reference_duration: Option<Duration>,
    #[serde(default, with = "crate::duration_secs::option")]
    pub minimum_duration: Option<Duration>,
}

impl Task {
    /// Create a task with no duration policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            reference_duration: None,
            minimum_duration: None,
        }
    }

    /// Create a task with its full duration policy.
    pub fn with_durations(
        name: impl Into<String>,
        reference_duration: Option<Duration>,
        minimum_duration: Option<Duration>,
    ) -> Self {
        Self {
            reference_duration,
            minimum_duration,
            ..Self::new(name)
        }
    }

    pub fn with_reference_duration(mut self, duration: Duration) -> Self {
        self.reference_duration = Some(duration);
        self
    }

    pub fn with_minimum_duration(mut self, duration: Duration) -> Self {
        self.minimum_duration = Some(duration);
        self
    }

    /// Duration to use when auto-scheduling, falling back to `default`.
    pub fn duration_or(&self, default: Duration) -> Duration {
        self.reference_duration.unwrap_or(default)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
