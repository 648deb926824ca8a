//! `stitch add` - fetch items from the registry and install them
//!
//! Requires a project with a package.json and a valid components.json.
//! Registry fetch failures terminate the invocation with the server's
//! error message; they are not retried.

use anyhow::Result;
use std::path::Path;

use stitch_core::{Installer, ItemKind, PackageManifest, ProjectConfig, RegistryClient};

pub async fn run(
    project_dir: &Path,
    registry: Option<String>,
    items: Vec<String>,
    kind: Option<ItemKind>,
) -> Result<()> {
    if !PackageManifest::exists(project_dir) {
        eprintln!(
            "No package.json file found. Please create a project first and then run init."
        );
        std::process::exit(1);
    }

    let config = validate_project_config(project_dir);

    let client = match registry {
        Some(base_url) => RegistryClient::with_base_url(base_url)?,
        None => RegistryClient::new()?,
    };

    tracing::debug!(
        "fetching {} item(s) from {}",
        items.len(),
        client.base_url()
    );
    let resolved = client.fetch_items(&items, kind).await?;

    let installer = Installer::new(project_dir, config);
    installer.install(&resolved).await?;

    println!("Done.");
    Ok(())
}

fn validate_project_config(project_dir: &Path) -> ProjectConfig {
    match ProjectConfig::load(project_dir) {
        Ok(Some(config)) if config.validate() => config,
        Ok(None) => {
            eprintln!("No components.json file found. Please run init first.");
            std::process::exit(1);
        }
        Ok(Some(_)) | Err(_) => {
            eprintln!(
                "Invalid components.json file found. To start over, remove the \
                 components.json file and run init again."
            );
            std::process::exit(1);
        }
    }
}
