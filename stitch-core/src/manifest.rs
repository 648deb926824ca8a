//! Read-only view of the project's `package.json`
//!
//! The installer reads the manifest only to filter out packages that are
//! already present; mutation is entirely delegated to the invoked package
//! manager.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,

    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn exists(project_dir: &Path) -> bool {
        project_dir.join(PACKAGE_MANIFEST_FILE).exists()
    }

    /// Load the manifest, `None` if the project has no `package.json`
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = project_dir.join(PACKAGE_MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: PackageManifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(manifest))
    }

    /// Requested packages not yet in `dependencies`
    pub fn missing_dependencies(&self, requested: &[String]) -> Vec<String> {
        requested
            .iter()
            .filter(|spec| !self.dependencies.contains_key(package_name(spec)))
            .cloned()
            .collect()
    }

    /// Requested packages not yet in `devDependencies`
    pub fn missing_dev_dependencies(&self, requested: &[String]) -> Vec<String> {
        requested
            .iter()
            .filter(|spec| !self.dev_dependencies.contains_key(package_name(spec)))
            .cloned()
            .collect()
    }
}

/// Strip an `@version` suffix from a package spec
///
/// Scoped packages keep their leading `@`: `@radix-ui/colors@1.0.0`
/// becomes `@radix-ui/colors`.
pub fn package_name(spec: &str) -> &str {
    match spec.rfind('@') {
        Some(0) | None => spec,
        Some(idx) => &spec[..idx],
    }
}

#[cfg(test)]
mod manifest_tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_manifest() -> PackageManifest {
        serde_json::from_str(
            r#"{
                "name": "my-app",
                "dependencies": {
                    "react-native-unistyles": "2.20.0",
                    "@radix-ui/colors": "^1.0.0"
                },
                "devDependencies": {
                    "@types/react": "18.0.0"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_package_name_strips_version() {
        assert_eq!(package_name("react-native-svg"), "react-native-svg");
        assert_eq!(
            package_name("react-native-unistyles@2.20.0"),
            "react-native-unistyles"
        );
        assert_eq!(package_name("@radix-ui/colors"), "@radix-ui/colors");
        assert_eq!(package_name("@radix-ui/colors@1.0.0"), "@radix-ui/colors");
    }

    #[test]
    fn test_missing_dependencies_filters_installed() {
        let manifest = sample_manifest();

        let missing = manifest.missing_dependencies(&[
            "react-native-unistyles@2.20.0".to_string(),
            "@radix-ui/colors".to_string(),
            "react-native-svg".to_string(),
        ]);
        assert_eq!(missing, vec!["react-native-svg".to_string()]);
    }

    #[test]
    fn test_dev_dependencies_filtered_independently() {
        let manifest = sample_manifest();

        // Present only as a runtime dependency, so still missing as dev
        let missing = manifest.missing_dev_dependencies(&[
            "@types/react".to_string(),
            "@radix-ui/colors".to_string(),
        ]);
        assert_eq!(missing, vec!["@radix-ui/colors".to_string()]);
    }

    #[test]
    fn test_load_absent() {
        let temp = TempDir::new().unwrap();
        assert!(!PackageManifest::exists(temp.path()));
        assert!(PackageManifest::load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_with_no_dependency_tables() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(PACKAGE_MANIFEST_FILE), r#"{"name":"x"}"#).unwrap();

        let manifest = PackageManifest::load(temp.path()).unwrap().unwrap();
        let missing = manifest.missing_dependencies(&["anything".to_string()]);
        assert_eq!(missing, vec!["anything".to_string()]);
    }
}
