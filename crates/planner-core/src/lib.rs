//! # Planner Core Library
//!
//! This library provides the core logic of a personal task planner: a backlog
//! of tasks to do, and a planning of task schedulings placed on the timeline.
//! It implements a CLI-first philosophy where all operations are available via
//! the standalone `planner` binary built on top of this crate.
//!
//! ## Architecture
//!
//! - **Timeline**: Half-open time slots, free gap detection and agenda items
//! - **Planning**: Scheduling algorithms (direct placement, conflict-aware
//!   placement and bulk fill from the backlog) plus feedback scoring
//! - **Storage**: JSON planner document and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Planning`]: Task schedulings and the algorithms placing them
//! - [`Backlog`]: Ordered tasks waiting to be scheduled
//! - [`PlannerStore`]: Planner document persistence
//! - [`Config`]: Application configuration management

pub mod backlog;
pub mod data;
mod duration_secs;
pub mod error;
pub mod planning;
pub mod storage;
pub mod task;
pub mod timeline;

pub use backlog::Backlog;
pub use data::PlannerData;
pub use error::{ConfigError, CoreError, PlanningError, StoreError, TimeSlotError};
pub use planning::{Feedback, Planning, TaskScheduling};
pub use storage::{Config, PlannerStore};
pub use task::Task;
pub use timeline::{timeline_items, AgendaEntry, TimeSlot, TimelineItem};
