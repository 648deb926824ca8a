//! Remote registry client
//!
//! Used when resolution happens on a server the caller does not control
//! (the normal CLI case). Fetch failures are fail-fast: a non-success
//! response almost always means "item does not exist" or "bad input", so
//! the server's error message is surfaced as-is and never retried.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::schema::{ItemDescriptor, ItemKind, ResolvedItem};

/// The public registry endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://stitch-ui.dev";

/// Environment variable overriding the registry base URL
pub const REGISTRY_URL_ENV: &str = "STITCH_REGISTRY_URL";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the registry's resolution and listing endpoints
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Client against the default registry (or `STITCH_REGISTRY_URL`)
    pub fn new() -> Result<Self> {
        let base_url = std::env::var(REGISTRY_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Client against a specific registry base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stitch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn items_url(&self, names: &[String], kind: Option<ItemKind>) -> String {
        let mut url = format!(
            "{}/api/registry/items?names={}",
            self.base_url,
            names.join(",")
        );
        if let Some(kind) = kind {
            url.push_str("&type=");
            url.push_str(kind.as_str());
        }
        url
    }

    /// Fetch resolved items (code attached, dependencies expanded)
    pub async fn fetch_items(
        &self,
        names: &[String],
        kind: Option<ItemKind>,
    ) -> Result<Vec<ResolvedItem>> {
        let url = self.items_url(names, kind);
        tracing::debug!("fetching registry items from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Error fetching registry items".to_string());
            bail!("{message} (HTTP {status})");
        }

        response
            .json::<Vec<ResolvedItem>>()
            .await
            .context("Failed to decode registry response")
    }

    /// Fetch the bare catalog listing (no code attached)
    pub async fn fetch_catalog(&self) -> Result<Vec<ItemDescriptor>> {
        let url = format!("{}/api/registry", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        if !response.status().is_success() {
            bail!("Failed to fetch catalog: HTTP {}", response.status());
        }

        response
            .json::<Vec<ItemDescriptor>>()
            .await
            .context("Failed to decode catalog response")
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;

    #[test]
    fn test_items_url_shape() {
        let client = RegistryClient::with_base_url("https://registry.example.com/").unwrap();

        let url = client.items_url(
            &["tokens.ts".to_string(), "themes.ts".to_string()],
            Some(ItemKind::Style),
        );
        assert_eq!(
            url,
            "https://registry.example.com/api/registry/items?names=tokens.ts,themes.ts&type=style"
        );

        let url = client.items_url(&["Icon".to_string()], None);
        assert_eq!(
            url,
            "https://registry.example.com/api/registry/items?names=Icon"
        );
    }

    #[test]
    fn test_error_body_decodes() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"the following items could not be found: x"}"#)
                .unwrap();
        assert!(body.error.contains("could not be found"));
    }
}
