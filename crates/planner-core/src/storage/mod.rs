mod config;
pub mod store;

pub use config::{Config, PlanningConfig, StorageConfig};
pub use store::PlannerStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/planner[-dev]/` based on PLANNER_ENV.
///
/// Set PLANNER_ENV=dev to use development data directory. PLANNER_DATA_DIR,
/// when set, replaces the whole path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("PLANNER_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PLANNER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("planner-dev")
            } else {
                base_dir.join("planner")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
