use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest has no [project] table")]
    MissingProject,
    #[error("Manifest has no project.dependencies array")]
    MissingDependencies,
    #[error("project.dependencies is empty")]
    NoDependencyEntry,
    #[error("project.dependencies[0] is not a string")]
    DependencyNotString,
    #[error("Dependency '{0}' is not of the form <package>==<version>")]
    MalformedRequirement(String),
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Pinned version '{0}' is not a valid semantic version")]
    InvalidSemver(String),
}
