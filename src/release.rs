use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::git::VersionControl;
use crate::pyproject::update_pinned_version;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Versions that were committed and tagged, in order
    pub released: Vec<String>,
    /// Version whose manifest update left the tree clean, ending the run
    pub stopped_at: Option<String>,
}

/// Printed when a version leaves the working tree unchanged
pub fn no_changes_message(version: &str) -> String {
    format!("No changes for v{}", version)
}

pub fn commit_message(version: &str) -> String {
    format!("Bump version {}", version)
}

pub fn tag_name(version: &str) -> String {
    format!("v{}", version)
}

pub struct Releaser<'a, V: VersionControl> {
    vcs: &'a V,
    manifest: PathBuf,
    package: String,
}

impl<'a, V: VersionControl> Releaser<'a, V> {
    pub fn new(vcs: &'a V, manifest: impl AsRef<Path>, package: impl Into<String>) -> Self {
        Releaser { vcs, manifest: manifest.as_ref().to_path_buf(), package: package.into() }
    }

    /// Pins, commits and tags each version in turn.
    ///
    /// The first version that leaves the working tree unchanged ends the
    /// whole run; later versions are not applied.
    pub fn release_all(&self, targets: &[String]) -> Result<ReleaseReport> {
        let mut report = ReleaseReport::default();

        for version in targets {
            update_pinned_version(&self.manifest, &self.package, version)?;

            if !self.vcs.has_changes()? {
                debug!("{}", no_changes_message(version));
                report.stopped_at = Some(version.clone());
                return Ok(report);
            }

            self.vcs.stage_all()?;
            let commit_id = self.vcs.commit(&commit_message(version))?;
            self.vcs.tag(&tag_name(version), commit_id)?;

            debug!("Released {}", version);
            report.released.push(version.clone());
        }

        Ok(report)
    }
}
