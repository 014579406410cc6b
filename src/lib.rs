pub mod arguments;
pub mod error;
pub mod git;
pub mod index;
pub mod pyproject;
pub mod release;
pub mod versions;

/// Upstream package whose releases drive the wrapper's releases.
pub const MAIN_PACKAGE: &str = "pyrust-task-id";
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";
pub const DEFAULT_MANIFEST: &str = "pyproject.toml";
