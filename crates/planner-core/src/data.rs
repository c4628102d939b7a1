//! The persisted planner document.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::backlog::Backlog;
use crate::planning::{Planning, TaskScheduling};
use crate::task::Task;
use crate::timeline::TimeSlot;

/// Everything the planner keeps between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerData {
    #[serde(default)]
    pub planning: Planning,
    #[serde(default)]
    pub backlog: Backlog,
}

impl PlannerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_backlog(&mut self, task: Task) -> Task {
        self.backlog.add(task)
    }

    /// Fill `time_slot` with the backlog, cycling through it until the slot is full.
    ///
    /// Returns the schedulings that were created.
    pub fn fill_planning(
        &mut self,
        time_slot: &TimeSlot,
        default_duration: Duration,
    ) -> Vec<TaskScheduling> {
        self.planning
            .schedule_tasks_with_default(time_slot, &self.backlog, default_duration)
    }

    pub fn planning_feedback_score(&self, time_slot: &TimeSlot) -> Option<f64> {
        self.planning.feedback_score(time_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::Feedback;
    use chrono::{TimeZone, Utc};

    fn slot(start_min: i64, minutes: i64) -> TimeSlot {
        let base = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        TimeSlot::new(base + Duration::minutes(start_min), Duration::minutes(minutes)).unwrap()
    }

    #[test]
    fn empty_document_serializes_both_sections() {
        let json = serde_json::to_value(PlannerData::new()).unwrap();
        assert_eq!(json, serde_json::json!({ "planning": [], "backlog": [] }));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let data: PlannerData = serde_json::from_str("{}").unwrap();
        assert!(data.planning.is_empty());
        assert!(data.backlog.is_empty());
    }

    #[test]
    fn fill_uses_backlog() {
        let mut data = PlannerData::new();
        data.add_to_backlog(Task::new("write").with_reference_duration(Duration::minutes(20)));
        data.add_to_backlog(Task::new("review").with_reference_duration(Duration::minutes(40)));

        let created = data.fill_planning(&slot(0, 60), Duration::minutes(30));

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].task.name, "write");
        assert_eq!(created[1].task.name, "review");
        assert_eq!(created[1].time_slot, slot(20, 40));
        assert_eq!(data.planning.len(), 2);
    }

    #[test]
    fn fill_with_empty_backlog_creates_nothing() {
        let mut data = PlannerData::new();
        assert!(data.fill_planning(&slot(0, 60), Duration::minutes(30)).is_empty());
        assert!(data.planning.is_empty());
    }

    #[test]
    fn feedback_score_is_forwarded() {
        let mut data = PlannerData::new();
        let task = data.add_to_backlog(Task::new("write"));
        let scheduling = data.planning.schedule(&task, slot(0, 30));
        assert_eq!(data.planning_feedback_score(&slot(0, 60)), Some(0.0));

        data.planning
            .set_feedback(Feedback::CompletedWithoutProblem, scheduling.id)
            .unwrap();
        assert_eq!(data.planning_feedback_score(&slot(0, 60)), Some(1.0));
        assert_eq!(data.planning_feedback_score(&slot(120, 60)), None);
    }
}
