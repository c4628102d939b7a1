//! Free time detection between task schedulings.
//!
//! Turns a time-ordered list of schedulings into an agenda where every free
//! stretch between (and, when restricted to a slot, around) the schedulings
//! is represented by exactly one free entry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TimeSlot;
use crate::planning::TaskScheduling;

/// One line of an agenda: a scheduling or a free gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgendaEntry {
    Scheduled(TaskScheduling),
    Free(TimeSlot),
}

impl AgendaEntry {
    pub fn time_slot(&self) -> TimeSlot {
        match self {
            Self::Scheduled(s) => s.time_slot,
            Self::Free(slot) => *slot,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free(_))
    }
}

/// Build an agenda from schedulings sorted by start.
///
/// # Arguments
/// * `sorted` - Schedulings in start order
/// * `within` - Restricting slot. When given, the agenda starts with a free
///   entry if the first scheduling starts after the slot start, and ends with
///   one if the last scheduling ends before the slot end.
///
/// A free entry is only emitted when the next scheduling starts strictly
/// after the furthest end seen so far.
pub fn build_agenda<'a>(
    sorted: impl IntoIterator<Item = &'a TaskScheduling>,
    within: Option<&TimeSlot>,
) -> Vec<AgendaEntry> {
    let mut entries = Vec::new();
    let mut last_end: Option<DateTime<Utc>> = within.map(TimeSlot::start);

    for scheduling in sorted {
        if let Some(reference) = last_end {
            if let Ok(gap) = TimeSlot::between(reference, scheduling.time_slot.start()) {
                entries.push(AgendaEntry::Free(gap));
            }
        }

        entries.push(AgendaEntry::Scheduled(scheduling.clone()));

        // Overlapping schedulings must not move the reference backwards
        let end = scheduling.time_slot.end();
        last_end = Some(last_end.map_or(end, |reference| reference.max(end)));
    }

    // Check for gap after last scheduling
    if let (Some(slot), Some(reference)) = (within, last_end) {
        if let Ok(gap) = TimeSlot::between(reference, slot.end()) {
            entries.push(AgendaEntry::Free(gap));
        }
    }

    entries
}
