use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use toml_edit::{Array, DocumentMut, Item};

use crate::error::ManifestError;

/// A pinned dependency of the form `<package>==<version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Requirement { name: name.into(), version: version.into() }
    }

    fn match_regex() -> Result<Regex> {
        Ok(Regex::new(r#"^\s*([^=\s]+)\s*==\s*([^=\s;]+)"#)?)
    }

    pub fn parse(requirement: &str) -> Result<Self> {
        let regex = Self::match_regex()?;
        let captures = regex
            .captures(requirement)
            .ok_or_else(|| ManifestError::MalformedRequirement(requirement.to_string()))?;
        Ok(Requirement::new(&captures[1], &captures[2]))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// `pyproject.toml` loaded as an editable document, so rewriting the pin
/// leaves the rest of the file untouched.
pub struct PyProject {
    path: PathBuf,
    document: DocumentMut,
}

impl PyProject {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading manifest {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest at {:?}", path))?;
        Self::parse(path, &contents)
    }

    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let path = path.into();
        let document = contents
            .parse::<DocumentMut>()
            .with_context(|| format!("Failed to parse manifest at {:?}", path))?;
        Ok(PyProject { path, document })
    }

    /// Raw `project.dependencies[0]`
    pub fn first_dependency(&self) -> Result<&str, ManifestError> {
        let project = self.document.get("project").ok_or(ManifestError::MissingProject)?;
        let dependencies = project
            .get("dependencies")
            .and_then(Item::as_array)
            .ok_or(ManifestError::MissingDependencies)?;
        dependencies
            .get(0)
            .ok_or(ManifestError::NoDependencyEntry)?
            .as_str()
            .ok_or(ManifestError::DependencyNotString)
    }

    pub fn current_requirement(&self) -> Result<Requirement> {
        Requirement::parse(self.first_dependency()?)
    }

    /// Version pinned by the first dependency entry
    pub fn current_version(&self) -> Result<String> {
        let version = self.current_requirement()?.version;
        debug!("Found current version: {}", version);
        Ok(version)
    }

    /// Replaces the dependency list with the single pin `<package>==<version>`.
    pub fn set_pinned_version(&mut self, package: &str, version: &str) -> Result<()> {
        let requirement = Requirement::new(package, version).to_string();
        let project = self
            .document
            .get_mut("project")
            .and_then(Item::as_table_like_mut)
            .ok_or(ManifestError::MissingProject)?;

        if let Some(dependencies) = project.get_mut("dependencies").and_then(Item::as_array_mut) {
            if dependencies.is_empty() {
                dependencies.push(requirement);
            } else {
                dependencies.replace(0, requirement);
                while dependencies.len() > 1 {
                    dependencies.remove(dependencies.len() - 1);
                }
            }
            return Ok(());
        }

        project.insert("dependencies", toml_edit::value(Array::from_iter([requirement])));
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, self.document.to_string())
            .with_context(|| format!("Failed to write manifest at {:?}", self.path))?;
        debug!("Wrote manifest {:?}", self.path);
        Ok(())
    }
}

impl fmt::Display for PyProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

/// Rewrites the manifest at `path` so it pins `package` at `version`.
pub fn update_pinned_version(path: impl AsRef<Path>, package: &str, version: &str) -> Result<()> {
    info!("Updating {} to {}", package, version);
    let mut pyproject = PyProject::load(path)?;
    pyproject.set_pinned_version(package, version)?;
    pyproject.save()
}
