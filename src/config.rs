// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User settings.
//!
//! Stored as JSON in the platform config directory. `PLANMARK_DATA_DIR` and
//! `PLANMARK_RESOURCE_ID` override the stored values for one run.

use crate::i18n::Language;
use crate::models::editor::PresetSize;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "PLANMARK_DATA_DIR";
const RESOURCE_ENV: &str = "PLANMARK_RESOURCE_ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub organization_id: u64,
    pub resource_id: String,
    /// Where floor plans are stored; defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub default_preset: Option<PresetSize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            organization_id: 1,
            resource_id: "default".to_string(),
            data_dir: None,
            default_preset: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "planmark", "planmark")
}

impl Settings {
    fn file_path() -> Option<PathBuf> {
        Some(project_dirs()?.config_dir().join("settings.json"))
    }

    /// Load stored settings, falling back to defaults, then apply overrides.
    pub fn load_or_default() -> Self {
        let mut settings = match Self::file_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable settings: {:#}", e);
                Self::default()
            }),
            _ => Self::default(),
        };
        settings.apply_overrides(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(RESOURCE_ENV).ok(),
        );
        settings
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("cannot parse {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::file_path().context("cannot resolve settings path")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn apply_overrides(&mut self, data_dir: Option<String>, resource_id: Option<String>) {
        if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(id) = resource_id.filter(|id| !id.is_empty()) {
            self.resource_id = id;
        }
    }

    /// Directory holding floor-plan records, if one can be determined.
    pub fn floor_plan_dir(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(dir.join("floor-plans")),
            None => Some(project_dirs()?.data_dir().join("floor-plans")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            language: Language::Croatian,
            organization_id: 9,
            resource_id: "lab-2".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            default_preset: Some(PresetSize { width: 640, height: 640 }),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"language":"hr"}"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.language, Language::Croatian);
        assert_eq!(settings.resource_id, "default");
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some("/tmp/plans".to_string()), Some(String::new()));
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/plans")));
        assert_eq!(settings.resource_id, "default");
        assert_eq!(settings.floor_plan_dir(), Some(PathBuf::from("/tmp/plans/floor-plans")));
    }
}
