//! Planner document storage and persistence.
//!
//! The whole [`PlannerData`] lives in a single pretty-printed JSON file.
//! Before the file is overwritten the previous version can be copied next to
//! it with a timestamp suffix.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{data_dir, Config};
use crate::data::PlannerData;
use crate::error::StoreError;

/// Storage for the planner document.
#[derive(Debug, Clone)]
pub struct PlannerStore {
    path: PathBuf,
    backup_on_save: bool,
}

impl PlannerStore {
    /// Open the store configured in `config`, inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let path = data_dir()?.join(&config.storage.data_file);
        Ok(Self {
            path,
            backup_on_save: config.storage.backup_on_save,
        })
    }

    /// Create a store for an explicit file, with backups enabled.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_on_save: true,
        }
    }

    pub fn backup_on_save(mut self, enabled: bool) -> Self {
        self.backup_on_save = enabled;
        self
    }

    /// Get the document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// A missing file yields an empty document. So does an unreadable or
    /// malformed one, after logging a warning.
    pub fn load(&self) -> PlannerData {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no planner document yet");
                return PlannerData::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read planner document");
                return PlannerData::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "malformed planner document, starting empty");
            PlannerData::default()
        })
    }

    /// Save the document, backing up the previous version first when enabled.
    ///
    /// # Errors
    /// Returns an error if the backup copy or the write fails.
    pub fn save(&self, data: &PlannerData) -> Result<(), StoreError> {
        if self.backup_on_save && self.path.exists() {
            let backup = self.backup_path(Utc::now());
            std::fs::copy(&self.path, &backup)?;
            debug!(backup = %backup.display(), "previous planner document backed up");
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "planner document saved");
        Ok(())
    }

    /// Backup location for a save happening at `now`:
    /// `<stem>-<YYYY-MM-DD_HH-MM-SS>.json` next to the document.
    pub fn backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "planning".to_string());
        let name = format!("{stem}-{}.json", now.format("%Y-%m-%d_%H-%M-%S"));
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::TimeZone;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::with_path(dir.path().join("planning.json"));
        let data = store.load();
        assert!(data.planning.is_empty());
        assert!(data.backlog.is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planning.json");
        std::fs::write(&path, "{ not json").unwrap();
        let data = PlannerStore::with_path(&path).load();
        assert!(data.backlog.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::with_path(dir.path().join("planning.json"));

        let mut data = PlannerData::new();
        let task = data.add_to_backlog(Task::new("write"));
        store.save(&data).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.backlog.len(), 1);
        assert_eq!(loaded.backlog.get(task.id).map(|t| t.name.as_str()), Some("write"));
    }

    #[test]
    fn save_backs_up_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::with_path(dir.path().join("planning.json"));

        store.save(&PlannerData::new()).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        store.save(&PlannerData::new()).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.starts_with("planning-") && n.ends_with(".json")));
    }

    #[test]
    fn save_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::with_path(dir.path().join("planning.json")).backup_on_save(false);
        store.save(&PlannerData::new()).unwrap();
        store.save(&PlannerData::new()).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn backup_path_format() {
        let store = PlannerStore::with_path("/tmp/plans/planning.json");
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 5, 7).unwrap();
        assert_eq!(
            store.backup_path(now),
            PathBuf::from("/tmp/plans/planning-2024-03-04_09-05-07.json")
        );
    }
}
