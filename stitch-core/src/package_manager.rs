//! Package manager detection and invocation
//!
//! The installer never edits the project manifest itself; installing
//! third-party packages is delegated to whichever package manager the
//! project already uses, detected from its lockfile. Invocations block
//! until the subprocess exits and are never run concurrently, since two
//! package-manager runs against one manifest contend on the lockfile.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detect the project's package manager from its lockfile, npm default
    pub fn detect(project_dir: &Path) -> Self {
        let candidates = [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
        ];

        for (lockfile, pm) in candidates {
            if project_dir.join(lockfile).exists() {
                tracing::debug!("detected {} via {lockfile}", pm.name());
                return pm;
            }
        }

        PackageManager::Npm
    }

    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// The subcommand that adds packages (`npm install` vs `<pm> add`)
    fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            _ => "add",
        }
    }

    /// Install packages into the project, blocking until the tool exits
    pub async fn install(
        &self,
        project_dir: &Path,
        packages: &[String],
        dev: bool,
    ) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let mut command = Command::new(self.name());
        command.arg(self.add_subcommand());
        if dev {
            command.arg("-D");
        }
        command.args(packages).current_dir(project_dir);

        tracing::info!(
            "installing {} with {}: {}",
            if dev { "dev dependencies" } else { "dependencies" },
            self.name(),
            packages.join(" ")
        );

        let status = command
            .status()
            .await
            .with_context(|| format!("Failed to run {}", self.name()))?;

        if !status.success() {
            bail!(
                "{} {} exited with {status} while installing: {}",
                self.name(),
                self.add_subcommand(),
                packages.join(" ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod package_manager_tests {
    use super::*;
    use tempfile::TempDir;

    fn lockfile_for(pm: PackageManager) -> &'static str {
        match pm {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Bun => "bun.lockb",
        }
    }

    #[test]
    fn test_detect_defaults_to_npm() {
        let temp = TempDir::new().unwrap();
        assert_eq!(PackageManager::detect(temp.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_from_lockfiles() {
        for pm in [
            PackageManager::Pnpm,
            PackageManager::Yarn,
            PackageManager::Bun,
            PackageManager::Npm,
        ] {
            let temp = TempDir::new().unwrap();
            std::fs::write(temp.path().join(lockfile_for(pm)), "").unwrap();
            assert_eq!(PackageManager::detect(temp.path()), pm);
        }
    }

    #[test]
    fn test_pnpm_takes_precedence_over_npm_lockfile() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package-lock.json"), "").unwrap();
        std::fs::write(temp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(temp.path()), PackageManager::Pnpm);
    }

    #[tokio::test]
    async fn test_install_empty_list_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        // Must not attempt to spawn anything
        PackageManager::Npm
            .install(temp.path(), &[], false)
            .await
            .unwrap();
    }
}
