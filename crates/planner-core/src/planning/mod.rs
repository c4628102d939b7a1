//! The planning: task schedulings plus the algorithms that place them.
//!
//! Three ways to put a task on the planning:
//! - [`Planning::schedule`] places it exactly where asked, conflicts or not.
//! - [`Planning::try_schedule`] resolves conflicts by squeezing the task
//!   before the earliest conflicting scheduling (if its minimum duration
//!   allows) or pushing it after the latest one, and can report that no
//!   placement fits inside a boundary.
//! - [`Planning::schedule_tasks`] fills a time slot from a backlog, cycling
//!   through it with the same squeeze/push resolution. It never fails and
//!   stops silently once the slot is used up.
//!
//! Queries are linear scans over the schedulings; no index by time is kept.

mod scheduling;

pub use scheduling::{Feedback, TaskScheduling};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backlog::Backlog;
use crate::error::PlanningError;
use crate::task::Task;
use crate::timeline::{build_agenda, AgendaEntry, TimeSlot};

/// Duration given to backlog tasks that have no reference duration.
pub const DEFAULT_TASK_MINUTES: i64 = 30;

pub fn default_task_duration() -> Duration {
    Duration::minutes(DEFAULT_TASK_MINUTES)
}

/// The set of task schedulings making up a user's planning.
///
/// Schedulings are kept in insertion order; callers that need them in time
/// order use [`Planning::sorted_by_start`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Planning {
    task_schedulings: Vec<TaskScheduling>,
}

impl Planning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schedulings(task_schedulings: Vec<TaskScheduling>) -> Self {
        Self { task_schedulings }
    }

    pub fn len(&self) -> usize {
        self.task_schedulings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_schedulings.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&TaskScheduling> {
        self.task_schedulings.iter().find(|s| s.id == id)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// All schedulings, or only those whose slot intersects `intersecting`.
    ///
    /// The end of a slot is exclusive: a scheduling starting exactly at the
    /// end of `intersecting` does not match.
    pub fn task_schedulings(&self, intersecting: Option<&TimeSlot>) -> Vec<&TaskScheduling> {
        match intersecting {
            Some(slot) => self
                .task_schedulings
                .iter()
                .filter(|s| s.time_slot.intersects(slot))
                .collect(),
            None => self.task_schedulings.iter().collect(),
        }
    }

    /// Same as [`Planning::task_schedulings`], ordered by start. Schedulings
    /// sharing a start keep their insertion order.
    pub fn sorted_by_start(&self, intersecting: Option<&TimeSlot>) -> Vec<&TaskScheduling> {
        let mut schedulings = self.task_schedulings(intersecting);
        schedulings.sort_by_key(|s| s.time_slot.start());
        schedulings
    }

    /// Scheduling of `task_id` with the latest start, optionally restricted
    /// to schedulings intersecting `within`.
    pub fn latest_scheduling_by_start(
        &self,
        task_id: Uuid,
        within: Option<&TimeSlot>,
    ) -> Option<&TaskScheduling> {
        self.sorted_by_start(within)
            .into_iter()
            .filter(|s| s.task.id == task_id)
            .last()
    }

    /// Greatest end across all schedulings.
    pub fn most_recent_end(&self) -> Option<DateTime<Utc>> {
        self.task_schedulings
            .iter()
            .map(|s| s.time_slot.end())
            .max()
    }

    /// Free gaps and schedulings in time order, see [`build_agenda`].
    pub fn agenda(&self, within: Option<&TimeSlot>) -> Vec<AgendaEntry> {
        build_agenda(self.sorted_by_start(within), within)
    }

    // ---------------------------------------------------------------------
    // Scheduling
    // ---------------------------------------------------------------------

    /// Places `task` on `time_slot` without checking for conflicts.
    pub fn schedule(&mut self, task: &Task, time_slot: TimeSlot) -> TaskScheduling {
        let scheduling = TaskScheduling::new(task.clone(), time_slot);
        debug!(
            scheduling_id = %scheduling.id,
            task = %task.name,
            slot = %time_slot,
            "task scheduled"
        );
        self.task_schedulings.push(scheduling.clone());
        scheduling
    }

    /// Places `task` as close as possible to `suggested`, avoiding conflicts.
    ///
    /// When the suggested slot overlaps existing schedulings, the task is
    /// squeezed into the free time before the earliest of them if that gap
    /// is longer than the task's minimum duration; otherwise it is pushed to
    /// start when the latest of them ends, and the check starts over.
    ///
    /// With a `boundary`, a push that starts at or after the boundary's end
    /// fails, and a placement that spills past it is shortened to fit when
    /// the minimum duration allows.
    ///
    /// # Errors
    /// Returns [`PlanningError::ConstraintsUnsatisfiable`] when the task
    /// cannot start inside `boundary`.
    pub fn try_schedule(
        &mut self,
        task: &Task,
        suggested: TimeSlot,
        boundary: Option<&TimeSlot>,
    ) -> Result<TaskScheduling, PlanningError> {
        let limit = boundary.map(TimeSlot::end);

        let Some(candidate) = self.resolve_conflicts(task, suggested, limit) else {
            debug!(task = %task.name, "no placement inside boundary");
            return Err(PlanningError::ConstraintsUnsatisfiable);
        };

        let candidate = match limit {
            Some(end) => clamp_to_end(task, candidate, end),
            None => candidate,
        };

        Ok(self.schedule(task, candidate))
    }

    /// Fills `time_slot` with tasks from `backlog`, using the default task
    /// duration for tasks without a reference duration.
    pub fn schedule_tasks(&mut self, time_slot: &TimeSlot, backlog: &Backlog) -> Vec<TaskScheduling> {
        self.schedule_tasks_with_default(time_slot, backlog, default_task_duration())
    }

    /// Fills `time_slot` with tasks from `backlog`.
    ///
    /// Backlog tasks are proposed one after the other, wrapping around to
    /// the first task, each starting where the previous placement ended.
    /// Conflicts are resolved as in [`Planning::try_schedule`] without a
    /// boundary. The fill stops as soon as a placement would start at or
    /// after the end of `time_slot`, or reaches that end.
    ///
    /// Returns the schedulings created, in creation order.
    pub fn schedule_tasks_with_default(
        &mut self,
        time_slot: &TimeSlot,
        backlog: &Backlog,
        default_duration: Duration,
    ) -> Vec<TaskScheduling> {
        let mut created = Vec::new();
        if backlog.is_empty() {
            return created;
        }

        let end = time_slot.end();
        let mut cursor = time_slot.start();

        for task in backlog.tasks.iter().cycle() {
            if cursor >= end {
                break;
            }

            let proposal = match TimeSlot::new(cursor, task.duration_or(default_duration)) {
                Ok(proposal) => proposal,
                Err(e) => {
                    warn!(task = %task.name, error = %e, "cannot propose slot, stopping fill");
                    break;
                }
            };

            // Without a limit this only fails when a push runs off the calendar
            let Some(resolved) = self.resolve_conflicts(task, proposal, None) else {
                warn!(task = %task.name, "no representable placement, stopping fill");
                break;
            };
            if resolved.start() >= end {
                break;
            }

            let scheduling = self.schedule(task, clamp_to_end(task, resolved, end));
            let committed_end = scheduling.time_slot.end();
            created.push(scheduling);

            if committed_end >= end {
                break;
            }
            cursor = committed_end;
        }

        info!(
            slot = %time_slot,
            scheduled = created.len(),
            "planning filled from backlog"
        );
        created
    }

    /// Squeeze/push loop shared by the scheduling algorithms.
    ///
    /// Returns `None` when a push moves the candidate's start to or past
    /// `limit`, or would make it end past the representable range.
    fn resolve_conflicts(
        &self,
        task: &Task,
        mut candidate: TimeSlot,
        limit: Option<DateTime<Utc>>,
    ) -> Option<TimeSlot> {
        loop {
            let conflicts = self.task_schedulings(Some(&candidate));
            let (Some(earliest), Some(latest)) = (
                conflicts.iter().min_by_key(|s| s.time_slot.start()),
                conflicts.iter().max_by_key(|s| s.time_slot.end()),
            ) else {
                return Some(candidate);
            };

            if let Some(minimum) = task.minimum_duration {
                let gap = earliest.time_slot.start() - candidate.start();
                if gap > minimum {
                    if let Ok(squeezed) = candidate.with_duration(gap) {
                        debug!(task = %task.name, slot = %squeezed, "squeezed before conflict");
                        return Some(squeezed);
                    }
                }
            }

            candidate = match candidate.starting_at(latest.time_slot.end()) {
                Ok(pushed) => pushed,
                Err(e) => {
                    debug!(task = %task.name, error = %e, "push leaves representable range");
                    return None;
                }
            };
            debug!(task = %task.name, slot = %candidate, "pushed after conflict");

            if let Some(limit) = limit {
                if candidate.start() >= limit {
                    return None;
                }
            }
        }
    }

    /// Moves a scheduling to `new_start`, keeping its duration, task and
    /// feedback. No conflict checking is done.
    ///
    /// # Errors
    /// Returns [`PlanningError::NotFound`] for an unknown id and
    /// [`PlanningError::InvalidSlot`] when the moved slot would end out of
    /// range. The scheduling is left untouched on error.
    pub fn move_scheduling(
        &mut self,
        id: Uuid,
        new_start: DateTime<Utc>,
    ) -> Result<TaskScheduling, PlanningError> {
        let scheduling = self.find_mut(id)?;
        scheduling.time_slot = scheduling.time_slot.starting_at(new_start)?;
        Ok(scheduling.clone())
    }

    // ---------------------------------------------------------------------
    // Feedback
    // ---------------------------------------------------------------------

    /// # Errors
    /// Returns [`PlanningError::NotFound`] for an unknown id.
    pub fn set_feedback(&mut self, feedback: Feedback, id: Uuid) -> Result<(), PlanningError> {
        self.find_mut(id)?.feedback = Some(feedback);
        Ok(())
    }

    /// Share of schedulings intersecting `time_slot` whose feedback is
    /// positive. Schedulings without feedback count as not positive.
    ///
    /// Returns `None` when no scheduling intersects `time_slot`.
    pub fn feedback_score(&self, time_slot: &TimeSlot) -> Option<f64> {
        let in_slot = self.task_schedulings(Some(time_slot));
        if in_slot.is_empty() {
            return None;
        }
        let positive = in_slot
            .iter()
            .filter(|s| s.feedback.is_some_and(|f| f.is_positive()))
            .count();
        Some(positive as f64 / in_slot.len() as f64)
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    /// # Errors
    /// Returns [`PlanningError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: Uuid) -> Result<TaskScheduling, PlanningError> {
        let index = self
            .task_schedulings
            .iter()
            .position(|s| s.id == id)
            .ok_or(PlanningError::NotFound { id })?;
        Ok(self.task_schedulings.remove(index))
    }

    pub fn clear(&mut self) {
        self.task_schedulings.clear();
    }

    fn find_mut(&mut self, id: Uuid) -> Result<&mut TaskScheduling, PlanningError> {
        self.task_schedulings
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(PlanningError::NotFound { id })
    }
}

/// Shortens `candidate` to end at `end` when it reaches past it and the
/// remaining room is longer than the task's minimum duration.
fn clamp_to_end(task: &Task, candidate: TimeSlot, end: DateTime<Utc>) -> TimeSlot {
    if candidate.end() < end {
        return candidate;
    }
    let Some(minimum) = task.minimum_duration else {
        return candidate;
    };
    let room = end - candidate.start();
    if room > minimum {
        if let Ok(clamped) = candidate.with_duration(room) {
            debug!(task = %task.name, slot = %clamped, "clamped to boundary");
            return clamped;
        }
    }
    candidate
}
