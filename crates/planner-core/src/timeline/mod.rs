//! Time slots and agenda views.
//!
//! This module provides:
//! - The half-open [`TimeSlot`] interval every scheduling is built on
//! - Free gap detection between schedulings (the agenda)
//! - Presentation items for rendering an agenda

mod gap;
mod item;
mod slot;

pub use gap::{build_agenda, AgendaEntry};
pub use item::{timeline_items, TimelineItem};
pub use slot::TimeSlot;
