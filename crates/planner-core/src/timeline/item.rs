//! Presentation model for agenda lines.

use serde::Serialize;

use super::{AgendaEntry, TimeSlot};
use crate::planning::TaskScheduling;

/// Data shown to the user for one time slot of the agenda.
///
/// - `head` describes the slot as a whole
/// - `title` is the main focus point
/// - `subtitle` and `extra` carry minor data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub time_slot: TimeSlot,
    pub head: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub extra: Option<String>,
}

impl TimelineItem {
    pub fn for_scheduling(scheduling: &TaskScheduling) -> Self {
        let feedback = scheduling
            .feedback
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        Self {
            time_slot: scheduling.time_slot,
            head: scheduling.id.to_string(),
            title: scheduling.task.id.to_string(),
            subtitle: Some(scheduling.task.name.clone()),
            extra: Some(format!("Feedback: {feedback}")),
        }
    }

    pub fn free(time_slot: TimeSlot) -> Self {
        Self {
            time_slot,
            head: "(Empty)".to_string(),
            title: "Empty".to_string(),
            subtitle: None,
            extra: None,
        }
    }
}

impl From<&AgendaEntry> for TimelineItem {
    fn from(entry: &AgendaEntry) -> Self {
        match entry {
            AgendaEntry::Scheduled(s) => Self::for_scheduling(s),
            AgendaEntry::Free(slot) => Self::free(*slot),
        }
    }
}

/// Map a whole agenda to presentation items.
pub fn timeline_items(agenda: &[AgendaEntry]) -> Vec<TimelineItem> {
    agenda.iter().map(TimelineItem::from).collect()
}
