//! `stitch init` - project setup
//!
//! Collects destination directories (or reuses an existing valid
//! `components.json`), persists the project config, installs the packages
//! every consuming project needs, then installs the foundational registry
//! items (types, styles, utilities, hooks).

use anyhow::Result;
use std::path::Path;

use stitch_core::catalog::{MINIMUM_REQUIRED_ITEMS, MINIMUM_REQUIRED_PACKAGES};
use stitch_core::project::{
    ItemDirs, ProjectConfig, DEFAULT_COMPONENTS_DIR, DEFAULT_HOOKS_DIR, DEFAULT_STYLES_DIR,
    DEFAULT_TYPES_DIR, DEFAULT_UTILS_DIR,
};
use stitch_core::{Installer, PackageManager, PackageManifest, RegistryClient};

use crate::prompt;

pub async fn run(project_dir: &Path, registry: Option<String>, yes: bool) -> Result<()> {
    if !PackageManifest::exists(project_dir) {
        eprintln!(
            "No package.json file found. Please create a project first and then run init."
        );
        std::process::exit(1);
    }

    let config = load_or_create_config(project_dir, yes)?;

    // Install the packages every consuming project needs
    println!("Installing dependencies...");
    let package_manager = PackageManager::detect(project_dir);
    let packages: Vec<String> = MINIMUM_REQUIRED_PACKAGES
        .iter()
        .map(|p| p.to_string())
        .collect();
    package_manager
        .install(project_dir, &packages, false)
        .await?;

    // Install the foundational registry items, one kind group at a time
    let client = match registry {
        Some(base_url) => RegistryClient::with_base_url(base_url)?,
        None => RegistryClient::new()?,
    };
    let installer = Installer::new(project_dir, config);
    tracing::debug!("installing required items from {}", client.base_url());

    for (kind, names) in MINIMUM_REQUIRED_ITEMS {
        println!("Configuring {}...", plural(*kind));
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let items = client.fetch_items(&names, Some(*kind)).await?;
        installer.install(&items).await?;
    }

    println!("Success! Setup completed. You may now add components.");
    Ok(())
}

fn plural(kind: stitch_core::ItemKind) -> &'static str {
    use stitch_core::ItemKind;
    match kind {
        ItemKind::Component => "components",
        ItemKind::Hook => "hooks",
        ItemKind::Type => "types",
        ItemKind::Utility => "utils",
        ItemKind::Style => "styles",
    }
}

/// Reuse an existing valid config, reject an invalid one, or prompt
fn load_or_create_config(project_dir: &Path, yes: bool) -> Result<ProjectConfig> {
    match ProjectConfig::load(project_dir) {
        Ok(Some(config)) if config.validate() => {
            println!("Valid components.json file found.");
            return Ok(config);
        }
        Ok(Some(_)) | Err(_) => {
            eprintln!(
                "Invalid components.json file found. To start over, remove the \
                 components.json file and run init again."
            );
            std::process::exit(1);
        }
        Ok(None) => {}
    }

    let dirs = if yes {
        ItemDirs::default()
    } else {
        ItemDirs {
            components: prompt::input(
                "Where would you like to keep your components?",
                DEFAULT_COMPONENTS_DIR,
            )?,
            hooks: prompt::input("Where would you like to keep your hooks?", DEFAULT_HOOKS_DIR)?,
            utils: prompt::input("Where would you like to keep your utils?", DEFAULT_UTILS_DIR)?,
            styles: prompt::input(
                "Where would you like to keep your themes configuration?",
                DEFAULT_STYLES_DIR,
            )?,
            types: prompt::input("Where would you like to keep your types?", DEFAULT_TYPES_DIR)?,
        }
    };

    let config = ProjectConfig {
        dirs,
        ..ProjectConfig::default()
    };
    config.save(project_dir)?;
    Ok(config)
}
