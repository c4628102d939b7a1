//! Core error types for planner-core.
//!
//! This module defines the error hierarchy using thiserror. Scheduling
//! failures, slot construction failures, storage and configuration errors
//! each get their own enum so callers can match on the layer that failed.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Core error type for planner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Planning operation errors
    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    /// Time slot construction errors
    #[error("Invalid time slot: {0}")]
    TimeSlot(#[from] TimeSlotError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when building a [`TimeSlot`](crate::TimeSlot).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSlotError {
    /// Duration is zero or negative
    #[error("duration must be positive, got {duration_secs}s")]
    NonPositiveDuration { duration_secs: i64 },

    /// End is not strictly after start
    #[error("end ({end}) must be after start ({start})")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The end falls outside the representable date range
    #[error("slot starting at {start} with duration {duration_secs}s ends out of range")]
    EndOutOfRange {
        start: DateTime<Utc>,
        duration_secs: i64,
    },
}

/// Errors raised by [`Planning`](crate::Planning) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// No task scheduling with the given id exists
    #[error("Task scheduling {id} not found")]
    NotFound { id: Uuid },

    /// The task cannot be placed inside the requested boundary
    #[error("Could not satisfy all scheduling constraints")]
    ConstraintsUnsatisfiable,

    /// The requested change would produce an invalid slot
    #[error("Invalid time slot: {0}")]
    InvalidSlot(#[from] TimeSlotError),
}

/// Errors raised by the planner document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read/write planner file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize planner document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration field
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse or convert configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
