// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Floor-plan persistence.
//!
//! Records are always read and written whole: every pin change saves the
//! full image and pin list. The UI only talks to [`FloorPlanRepository`], so
//! the storage backend can be swapped without touching the pin board.

use crate::models::floor_plan::FloorPlanRecord;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt floor plan record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid resource id: {0:?}")]
    InvalidResourceId(String),
    #[error("{0}")]
    Rejected(String),
}

impl RepositoryError {
    /// Message meant for the user, if the backend supplied one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait FloorPlanRepository {
    /// `Ok(None)` when the resource has no floor plan yet.
    fn load(&self, resource_id: &str) -> RepositoryResult<Option<FloorPlanRecord>>;

    /// Replace the whole record and return what was stored.
    fn save(&self, organization_id: u64, resource_id: &str, record: &FloorPlanRecord) -> RepositoryResult<FloorPlanRecord>;

    fn delete(&self, resource_id: &str) -> RepositoryResult<()>;
}

fn validate_resource_id(resource_id: &str) -> RepositoryResult<()> {
    let valid = !resource_id.is_empty()
        && resource_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidResourceId(resource_id.to_string()))
    }
}

/// On-disk envelope around a record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFloorPlan {
    organization_id: u64,
    floor_plan: FloorPlanRecord,
}

/// One JSON file per resource inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, resource_id: &str) -> RepositoryResult<PathBuf> {
        validate_resource_id(resource_id)?;
        Ok(self.dir.join(format!("{resource_id}.json")))
    }
}

impl FloorPlanRepository for JsonFileRepository {
    fn load(&self, resource_id: &str) -> RepositoryResult<Option<FloorPlanRecord>> {
        let path = self.path_for(resource_id)?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredFloorPlan = serde_json::from_str(&json)?;
        log::debug!(
            "Loaded floor plan {} ({} pins) from {}",
            resource_id,
            stored.floor_plan.pins.len(),
            path.display()
        );
        Ok(Some(stored.floor_plan))
    }

    fn save(&self, organization_id: u64, resource_id: &str, record: &FloorPlanRecord) -> RepositoryResult<FloorPlanRecord> {
        let path = self.path_for(resource_id)?;
        std::fs::create_dir_all(&self.dir)?;

        let stored = StoredFloorPlan {
            organization_id,
            floor_plan: record.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        // Write beside the target and rename so a failed write never truncates it
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &path)) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                log::debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }

        log::info!("Saved floor plan {} with {} pins", resource_id, record.pins.len());
        Ok(stored.floor_plan)
    }

    fn delete(&self, resource_id: &str) -> RepositoryResult<()> {
        let path = self.path_for(resource_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted floor plan {}", resource_id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, used when no data directory is available and in tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RefCell<HashMap<String, (u64, FloorPlanRecord)>>,
    /// When set, every save is refused with this message.
    reject_saves: RefCell<Option<String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn reject_saves_with(&self, message: Option<&str>) {
        *self.reject_saves.borrow_mut() = message.map(str::to_string);
    }

    #[cfg(test)]
    pub fn organization_of(&self, resource_id: &str) -> Option<u64> {
        self.records.borrow().get(resource_id).map(|(org, _)| *org)
    }
}

impl FloorPlanRepository for MemoryRepository {
    fn load(&self, resource_id: &str) -> RepositoryResult<Option<FloorPlanRecord>> {
        validate_resource_id(resource_id)?;
        Ok(self.records.borrow().get(resource_id).map(|(_, record)| record.clone()))
    }

    fn save(&self, organization_id: u64, resource_id: &str, record: &FloorPlanRecord) -> RepositoryResult<FloorPlanRecord> {
        validate_resource_id(resource_id)?;
        if let Some(message) = self.reject_saves.borrow().clone() {
            return Err(RepositoryError::Rejected(message));
        }
        self.records
            .borrow_mut()
            .insert(resource_id.to_string(), (organization_id, record.clone()));
        Ok(record.clone())
    }

    fn delete(&self, resource_id: &str) -> RepositoryResult<()> {
        validate_resource_id(resource_id)?;
        self.records.borrow_mut().remove(resource_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Point;
    use crate::models::floor_plan::Pin;

    fn sample() -> FloorPlanRecord {
        FloorPlanRecord {
            image_base64: "data:image/png;base64,AAAA".to_string(),
            pins: vec![
                Pin::new(Point::new(0.2, 0.3), "Server Room"),
                Pin::new(Point::new(0.9, 0.05), "Exit"),
            ],
        }
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());

        // A non-empty directory in place of the record makes the rename fail
        let blocked = dir.path().join("room-1.json");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), b"x").unwrap();

        assert!(matches!(repo.save(7, "room-1", &sample()), Err(RepositoryError::Io(_))));
        assert!(!dir.path().join("room-1.json.tmp").exists());
        assert!(blocked.join("keep").exists());
    }

    #[test]
    fn test_file_round_trip_preserves_pins() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("plans"));

        assert_eq!(repo.load("room-1").unwrap(), None);
        let saved = repo.save(7, "room-1", &sample()).unwrap();
        assert_eq!(saved, sample());
        assert_eq!(repo.load("room-1").unwrap(), Some(sample()));
    }

    #[test]
    fn test_file_stores_organization() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        repo.save(42, "r2", &sample()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("r2.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["organizationId"], 42);
        assert_eq!(value["floorPlan"]["pins"][1]["description"], "Exit");
    }

    #[test]
    fn test_file_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        repo.save(1, "r3", &sample()).unwrap();
        repo.delete("r3").unwrap();
        repo.delete("r3").unwrap();
        assert_eq!(repo.load("r3").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let repo = JsonFileRepository::new(dir.path());
        assert!(matches!(repo.load("bad"), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn test_resource_id_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        assert!(matches!(
            repo.save(1, "../outside", &sample()),
            Err(RepositoryError::InvalidResourceId(_))
        ));
        assert!(matches!(repo.load(""), Err(RepositoryError::InvalidResourceId(_))));
    }

    #[test]
    fn test_memory_rejection_carries_message() {
        let repo = MemoryRepository::new();
        repo.reject_saves_with(Some("quota exceeded"));
        let err = repo.save(1, "r", &sample()).unwrap_err();
        assert_eq!(err.user_message(), Some("quota exceeded"));
        assert_eq!(repo.load("r").unwrap(), None);

        repo.reject_saves_with(None);
        repo.save(3, "r", &sample()).unwrap();
        assert_eq!(repo.organization_of("r"), Some(3));
    }
}
