//! Item installation into a consuming project
//!
//! Walks resolved items (and their nested dependencies) and materializes
//! each into the project's kind-specific directory, installing missing
//! third-party packages along the way. Installation is idempotent and never
//! overwrites: once a user owns a copied file, the tool does not rewrite
//! it, even if the registry's copy has since changed.
//!
//! Items are installed strictly sequentially. The exists-check plus write
//! must be atomic per file, and concurrent package-manager runs against one
//! manifest are unsafe, so nothing here is parallelized.

use anyhow::{bail, Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::manifest::PackageManifest;
use crate::package_manager::PackageManager;
use crate::project::ProjectConfig;
use crate::schema::ResolvedItem;

/// Installs resolved items into one project
pub struct Installer {
    project_dir: PathBuf,
    config: ProjectConfig,
    package_manager: PackageManager,
}

impl Installer {
    /// Installer for a project, detecting its package manager
    pub fn new(project_dir: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        let project_dir = project_dir.into();
        let package_manager = PackageManager::detect(&project_dir);
        Self {
            project_dir,
            config,
            package_manager,
        }
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Install every item, sequentially
    ///
    /// A failed item is logged and skipped; remaining siblings still
    /// install (partial installation is a visible, accepted outcome). The
    /// call fails at the end if any item failed.
    pub async fn install(&self, items: &[ResolvedItem]) -> Result<()> {
        let mut failed: Vec<String> = Vec::new();

        for item in items {
            if let Err(err) = self.install_one(item).await {
                tracing::error!("failed to install '{}': {err:#}", item.name);
                failed.push(item.name.clone());
            }
        }

        if !failed.is_empty() {
            bail!("failed to install: {}", failed.join(", "));
        }

        Ok(())
    }

    /// Install a single item and its nested dependencies
    ///
    /// Boxed because the future recurses through `resolved_dependencies`.
    pub fn install_one<'a>(
        &'a self,
        item: &'a ResolvedItem,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let dir = self.project_dir.join(self.config.dirs.for_kind(item.kind));
            let dest = dir.join(&item.name);

            // Already installed; never diff, merge, or overwrite.
            if dest.exists() {
                tracing::debug!("'{}' already exists, skipping", item.name);
                return Ok(());
            }

            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;

            self.install_packages(item).await;

            for dep in &item.resolved_dependencies {
                self.install_one(dep).await?;
            }

            std::fs::write(&dest, &item.source_code)
                .with_context(|| format!("Failed to write {}", dest.display()))?;

            tracing::info!("added {}", dest.display());
            Ok(())
        })
    }

    /// Install the item's missing third-party packages
    ///
    /// Package-manager failures are surfaced as errors in the log but do
    /// not block the file writes; the copied code simply will not function
    /// until the packages are installed manually.
    async fn install_packages(&self, item: &ResolvedItem) {
        // Reload each time: earlier installs mutate the manifest.
        let manifest = match PackageManifest::load(&self.project_dir) {
            Ok(manifest) => manifest.unwrap_or_default(),
            Err(err) => {
                tracing::warn!("could not read project manifest: {err:#}");
                PackageManifest::default()
            }
        };

        let missing = manifest.missing_dependencies(&item.package_dependencies);
        if let Err(err) = self
            .package_manager
            .install(&self.project_dir, &missing, false)
            .await
        {
            tracing::error!("dependency installation failed for '{}': {err:#}", item.name);
        }

        let missing_dev = manifest.missing_dev_dependencies(&item.dev_package_dependencies);
        if let Err(err) = self
            .package_manager
            .install(&self.project_dir, &missing_dev, true)
            .await
        {
            tracing::error!(
                "dev dependency installation failed for '{}': {err:#}",
                item.name
            );
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
