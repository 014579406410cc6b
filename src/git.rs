use anyhow::{Context, Result};
use git2::{IndexAddOption, Oid, Repository, Signature, Status, StatusOptions};
use log::{debug, info, warn};
use std::path::Path;

/// Repository operations the release loop relies on.
pub trait VersionControl {
    /// Whether the working tree differs from HEAD (untracked files included)
    fn has_changes(&self) -> Result<bool>;
    fn stage_all(&self) -> Result<()>;
    fn commit(&self, message: &str) -> Result<Oid>;
    fn tag(&self, tag_name: &str, commit_id: Oid) -> Result<()>;
}

pub struct GitTracker {
    pub repository: Repository,
    /// Pathspec covering the project directory, `*` at the repository root
    pathspec: String,
}

impl GitTracker {
    /// Opens the repository containing the given path; staging is limited
    /// to that path, like `git add .` run from it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repository = Repository::discover(path)
            .with_context(|| format!("Failed to find git repository at {:?}", path))?;

        debug!("Opened repository at {:?}", repository.path());

        let pathspec = project_pathspec(&repository, path)?;
        debug!("Staging pathspec: {}", pathspec);

        Ok(GitTracker { repository, pathspec })
    }

    fn get_signature(&self) -> Result<Signature<'_>> {
        self.repository.signature()
            .context("Failed to get git signature. Please configure user.name and user.email in git config")
    }

    /// Short status lines, one per changed path, like `git status -s`
    pub fn short_status(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repository.statuses(Some(&mut options))?;
        let lines = statuses
            .iter()
            .map(|entry| format!("{} {}", short_code(entry.status()), entry.path().unwrap_or_default()))
            .collect();
        Ok(lines)
    }

    /// Gets all tags from the repository
    pub fn get_tags(&self) -> Result<Vec<String>> {
        let mut tags = Vec::new();

        self.repository.tag_foreach(|_oid, name| {
            if let Ok(name_str) = std::str::from_utf8(name) {
                let tag_name = name_str.trim_start_matches("refs/tags/");
                tags.push(tag_name.to_string());
            }
            true
        })?;

        Ok(tags)
    }
}

fn project_pathspec(repository: &Repository, path: &Path) -> Result<String> {
    let workdir = repository
        .workdir()
        .ok_or_else(|| anyhow::anyhow!("Repository at {:?} has no working directory", repository.path()))?;
    let workdir = std::fs::canonicalize(workdir)
        .with_context(|| format!("Failed to resolve {:?}", workdir))?;
    let path = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {:?}", path))?;

    let relative = path.strip_prefix(&workdir).with_context(|| {
        format!("{:?} is outside the repository at {:?}", path, workdir)
    })?;
    let components: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect();

    if components.is_empty() {
        Ok("*".to_string())
    } else {
        Ok(format!("{}/*", components.join("/")))
    }
}

/// Two-letter index/worktree code as printed by `git status -s`
fn short_code(status: Status) -> String {
    if status.is_wt_new() && !status.is_index_new() {
        return "??".to_string();
    }

    let staged = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };
    let unstaged = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else if status.is_conflicted() {
        'U'
    } else {
        ' '
    };
    format!("{staged}{unstaged}")
}

impl VersionControl for GitTracker {
    fn has_changes(&self) -> Result<bool> {
        let status = self.short_status()?;
        debug!("Working tree status: {:?}", status);
        Ok(!status.is_empty())
    }

    /// Stages additions, modifications and deletions under the project
    /// directory, like `git add .`
    fn stage_all(&self) -> Result<()> {
        let mut index = self.repository.index()?;
        let pathspec = [self.pathspec.as_str()];

        index.add_all(pathspec.iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(pathspec.iter(), None)?;
        index.write()?;

        debug!("Staged all changes in {}", self.pathspec);
        Ok(())
    }

    /// Commits the index; the message is cleaned up like `git commit -m`
    /// (trailing newline added). Commit hooks are not run.
    fn commit(&self, message: &str) -> Result<Oid> {
        info!("Creating commit: {}", message);
        let message = git2::message_prettify(message, None)?;

        let mut index = self.repository.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repository.find_tree(tree_id)?;

        let sig = self.get_signature()?;

        let parent_commit = match self.repository.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => {
                warn!("No parent commit found - this will be the initial commit");
                None
            }
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let commit_id = self.repository.commit(
            Some("HEAD"),
            &sig,
            &sig,
            &message,
            &tree,
            &parents,
        )?;

        info!("Created commit: {}", commit_id);
        Ok(commit_id)
    }

    /// Creates a lightweight tag; fails if the tag already exists
    fn tag(&self, tag_name: &str, commit_id: Oid) -> Result<()> {
        info!("Creating tag: {}", tag_name);

        let commit_obj = self.repository
            .find_object(commit_id, Some(git2::ObjectType::Commit))?;

        self.repository
            .tag_lightweight(tag_name, &commit_obj, false)
            .with_context(|| format!("Failed to create tag {}", tag_name))?;

        info!("Created tag: {}", tag_name);
        Ok(())
    }
}
