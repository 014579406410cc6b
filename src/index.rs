use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;

/// The part of PyPI's JSON API response we care about.
#[derive(Debug, Deserialize)]
struct ProjectMetadata {
    releases: BTreeMap<String, IgnoredAny>,
}

impl ProjectMetadata {
    /// Release keys, ascending
    fn into_versions(self) -> Vec<String> {
        self.releases.into_keys().collect()
    }
}

pub struct PackageIndex {
    base_url: String,
    http_client: reqwest::Client,
}

impl PackageIndex {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(PackageIndex { base_url: base_url.into(), http_client })
    }

    pub fn project_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), package)
    }

    /// Fetches every published version of `package`, sorted ascending.
    pub async fn fetch_versions(&self, package: &str) -> Result<Vec<String>> {
        let url = self.project_url(package);
        info!("Fetching releases of {} from {}", package, url);

        let metadata = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to query {}", url))?
            .error_for_status()?
            .json::<ProjectMetadata>()
            .await
            .context("Unexpected response from package index")?;

        let versions = metadata.into_versions();
        debug!("Found {} published versions", versions.len());
        Ok(versions)
    }
}
