use anyhow::Result;
use log::{debug, warn};
use semver::Version;

use crate::arguments::VersionOrdering;
use crate::error::VersionError;

/// Returns the versions strictly newer than `current`, in ascending order.
pub fn select_targets(
    current: &str,
    available: &[String],
    ordering: VersionOrdering,
) -> Result<Vec<String>> {
    let targets = match ordering {
        VersionOrdering::Lexical => newer_lexical(current, available),
        VersionOrdering::Semver => newer_semver(current, available)?,
    };
    debug!("Versions newer than {}: {:?}", current, targets);
    Ok(targets)
}

fn newer_lexical(current: &str, available: &[String]) -> Vec<String> {
    let mut targets: Vec<String> = available
        .iter()
        .filter(|version| version.as_str() > current)
        .cloned()
        .collect();
    targets.sort();
    targets
}

fn newer_semver(current: &str, available: &[String]) -> Result<Vec<String>> {
    let current = Version::parse(current)
        .map_err(|_| VersionError::InvalidSemver(current.to_string()))?;

    let mut targets: Vec<(Version, &String)> = available
        .iter()
        .filter_map(|raw| match Version::parse(raw) {
            Ok(version) => Some((version, raw)),
            Err(_) => {
                warn!("Skipping version '{}': not a semantic version", raw);
                None
            }
        })
        .filter(|(version, _)| *version > current)
        .collect();
    targets.sort();

    Ok(targets.into_iter().map(|(_, raw)| raw.clone()).collect())
}
