//! Project configuration (`components.json`)
//!
//! A consuming project persists one small JSON record at its root mapping
//! each item kind to a destination directory. It is written once during
//! `init` and never updated automatically afterward.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::schema::ItemKind;

/// Config file name at the project root
pub const PROJECT_CONFIG_FILE: &str = "components.json";

/// Current schema marker; a loaded config must match this exactly
pub const PROJECT_CONFIG_SCHEMA_URL: &str = "https://stitch-ui.dev/schema.json";

pub const DEFAULT_COMPONENTS_DIR: &str = "components/ui";
pub const DEFAULT_HOOKS_DIR: &str = "hooks";
pub const DEFAULT_STYLES_DIR: &str = "styles";
pub const DEFAULT_TYPES_DIR: &str = "types";
pub const DEFAULT_UTILS_DIR: &str = "utils";

/// Destination directory per item kind
///
/// Every kind must have an entry; a config missing one fails to parse and
/// is treated as invalid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDirs {
    pub components: String,
    pub hooks: String,
    pub styles: String,
    pub types: String,
    pub utils: String,
}

impl ItemDirs {
    pub fn for_kind(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Component => &self.components,
            ItemKind::Hook => &self.hooks,
            ItemKind::Style => &self.styles,
            ItemKind::Type => &self.types,
            ItemKind::Utility => &self.utils,
        }
    }
}

impl Default for ItemDirs {
    fn default() -> Self {
        Self {
            components: DEFAULT_COMPONENTS_DIR.to_string(),
            hooks: DEFAULT_HOOKS_DIR.to_string(),
            styles: DEFAULT_STYLES_DIR.to_string(),
            types: DEFAULT_TYPES_DIR.to_string(),
            utils: DEFAULT_UTILS_DIR.to_string(),
        }
    }
}

/// The persisted per-project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Provenance marker, checked against `PROJECT_CONFIG_SCHEMA_URL`
    #[serde(rename = "$schema")]
    pub schema: String,

    pub dirs: ItemDirs,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            schema: PROJECT_CONFIG_SCHEMA_URL.to_string(),
            dirs: ItemDirs::default(),
        }
    }
}

impl ProjectConfig {
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Load the persisted config, `None` if no file exists
    ///
    /// A file that exists but does not parse (including one missing a
    /// directory entry) is an error, not `None`; callers report it as an
    /// invalid config.
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(project_dir);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }

    /// Lightweight validity check: schema marker matches and every
    /// directory entry is non-empty
    pub fn validate(&self) -> bool {
        self.schema == PROJECT_CONFIG_SCHEMA_URL
            && !self.dirs.components.is_empty()
            && !self.dirs.hooks.is_empty()
            && !self.dirs.styles.is_empty()
            && !self.dirs.types.is_empty()
            && !self.dirs.utils.is_empty()
    }

    /// Persist the config at the project root (pretty-printed JSON)
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let path = Self::path_in(project_dir);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize project config")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!("wrote project config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod project_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_absent() {
        let temp = TempDir::new().unwrap();
        assert!(ProjectConfig::load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();

        let mut config = ProjectConfig::default();
        config.dirs.hooks = "src/hooks".to_string();
        config.save(temp.path()).unwrap();

        let loaded = ProjectConfig::load(temp.path()).unwrap().unwrap();
        assert!(loaded.validate());
        assert_eq!(loaded.dirs.hooks, "src/hooks");
        assert_eq!(loaded.schema, PROJECT_CONFIG_SCHEMA_URL);
    }

    #[test]
    fn test_schema_field_name_on_disk() {
        let temp = TempDir::new().unwrap();
        ProjectConfig::default().save(temp.path()).unwrap();

        let raw = std::fs::read_to_string(temp.path().join(PROJECT_CONFIG_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["$schema"], PROJECT_CONFIG_SCHEMA_URL);
        assert_eq!(json["dirs"]["components"], DEFAULT_COMPONENTS_DIR);
    }

    #[test]
    fn test_stale_schema_is_invalid() {
        let config = ProjectConfig {
            schema: "https://stitch-ui.dev/schema-v0.json".to_string(),
            dirs: ItemDirs::default(),
        };
        assert!(!config.validate());
    }

    #[test]
    fn test_empty_dir_entry_is_invalid() {
        let mut config = ProjectConfig::default();
        config.dirs.types = String::new();
        assert!(!config.validate());
    }

    #[test]
    fn test_missing_dir_entry_fails_to_load() {
        let temp = TempDir::new().unwrap();
        let raw = format!(
            r#"{{"$schema":"{PROJECT_CONFIG_SCHEMA_URL}","dirs":{{"components":"components/ui","hooks":"hooks","styles":"styles","types":"types"}}}}"#
        );
        std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), raw).unwrap();

        assert!(ProjectConfig::load(temp.path()).is_err());
    }

    #[test]
    fn test_dirs_cover_every_kind() {
        let dirs = ItemDirs::default();
        for kind in crate::schema::ITEM_KINDS {
            assert!(!dirs.for_kind(*kind).is_empty());
        }
    }
}
