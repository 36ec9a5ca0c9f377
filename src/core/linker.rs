use std::path::{Path, PathBuf};

use serde::Serialize;

use super::activity::ActivityLog;
use super::fs::{FileSystem, RealFileSystem};
use crate::error::{LinkError, Result};

/// One request to link `target` to `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl LinkRequest {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Validating,
    ConflictCheck,
    Linking,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was created; `replaced` is set when an existing entry was removed first.
    Linked { replaced: bool },
    /// The target already existed and the overwrite was declined.
    Cancelled,
}

/// What currently sits at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinkStatus {
    Missing,
    Symlink { points_to: PathBuf, dangling: bool },
    Directory,
    File,
}

/// Decides whether an existing target may be destroyed.
///
/// The removal hooks let a front end show progress while a large tree is
/// being deleted.
pub trait Confirm {
    fn confirm_overwrite(&mut self, target: &Path) -> bool;

    fn removal_started(&mut self, _target: &Path) {}

    fn removal_finished(&mut self, _target: &Path) {}
}

/// A [`Confirm`] that always gives the same answer (`--yes` / `--no`).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm_overwrite(&mut self, _target: &Path) -> bool {
        self.0
    }
}

/// Validates, clears and links directories through a [`FileSystem`].
pub struct LinkManager<F: FileSystem = RealFileSystem> {
    fs: F,
    state: LinkState,
}

impl LinkManager<RealFileSystem> {
    pub fn real() -> Self {
        Self::new(RealFileSystem)
    }
}

impl<F: FileSystem> LinkManager<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            state: LinkState::Idle,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Check both inputs without touching the filesystem.
    ///
    /// Whether the target exists is deliberately not checked here; that
    /// needs the user's decision and is handled by [`check_conflict`](Self::check_conflict).
    pub fn validate_inputs(&self, source: &Path, target: &Path) -> Result<()> {
        if source.as_os_str().is_empty() {
            return Err(LinkError::EmptyPath { field: "source".to_string() });
        }
        if target.as_os_str().is_empty() {
            return Err(LinkError::EmptyPath { field: "target".to_string() });
        }
        if !self.fs.path_exists(source) {
            return Err(LinkError::SourceNotFound { path: source.to_path_buf() });
        }
        if !self.fs.is_dir(source) {
            return Err(LinkError::SourceNotDirectory { path: source.to_path_buf() });
        }
        // Clearing such a target would delete the shared directory itself.
        // Compared as written and again with links and `..` resolved.
        let physical_source = self.fs.canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        if source.starts_with(target) || physical_source.starts_with(self.physical_location(target)) {
            return Err(LinkError::OverlappingPaths {
                source: source.to_path_buf(),
                target: target.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Where `path` would sit once intermediate links are resolved. The last
    /// component is kept as is, since the link replaces whatever is there.
    fn physical_location(&self, path: &Path) -> PathBuf {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => self
                .fs
                .canonicalize(parent)
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => self.fs.canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
        }
    }

    pub fn check_conflict(&self, target: &Path) -> bool {
        self.fs.path_exists(target)
    }

    /// Recursively delete `target`. Only call this after the user confirmed.
    pub fn remove_existing(&self, target: &Path) -> Result<()> {
        self.fs
            .remove_tree(target)
            .map_err(|source| LinkError::RemovalFailed {
                path: target.to_path_buf(),
                source,
            })?;

        if self.fs.path_exists(target) {
            return Err(LinkError::RemovalFailed {
                path: target.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "path still present after removal",
                ),
            });
        }
        Ok(())
    }

    /// Create a directory link at `target` pointing to `source`.
    pub fn create_link(&self, source: &Path, target: &Path) -> Result<()> {
        self.fs
            .create_dir_symlink(target, source)
            .map_err(|err| LinkError::LinkCreationFailed {
                target: target.to_path_buf(),
                link_to: source.to_path_buf(),
                code: err.raw_os_error(),
                source: err,
            })
    }

    pub fn inspect(&self, path: &Path) -> LinkStatus {
        if !self.fs.path_exists(path) {
            return LinkStatus::Missing;
        }
        if let Ok(points_to) = self.fs.read_link(path) {
            let resolved = if points_to.is_absolute() {
                points_to.clone()
            } else {
                path.parent().unwrap_or_else(|| Path::new(".")).join(&points_to)
            };
            let dangling = !self.fs.path_exists(&resolved);
            return LinkStatus::Symlink { points_to, dangling };
        }
        if self.fs.is_dir(path) {
            LinkStatus::Directory
        } else {
            LinkStatus::File
        }
    }

    /// Run the whole validate / confirm / remove / link sequence once.
    ///
    /// Every attempt starts from scratch; the manager goes back to `Idle`
    /// before validating.
    pub fn run(
        &mut self,
        request: &LinkRequest,
        confirm: &mut dyn Confirm,
        log: &mut ActivityLog,
    ) -> Result<LinkOutcome> {
        self.state = LinkState::Idle;
        let result = self.drive(request, confirm, log);

        match &result {
            Ok(LinkOutcome::Linked { .. }) => {
                self.state = LinkState::Success;
                log.success(format!(
                    "Symbolic link created: {} -> {}",
                    request.target.display(),
                    request.source.display()
                ));
            }
            Ok(LinkOutcome::Cancelled) => {
                self.state = LinkState::Idle;
                log.info(format!(
                    "Cancelled: kept existing {}",
                    request.target.display()
                ));
            }
            Err(err) => {
                self.state = LinkState::Failed;
                log.error(err.to_string());
            }
        }
        result
    }

    fn drive(
        &mut self,
        request: &LinkRequest,
        confirm: &mut dyn Confirm,
        log: &mut ActivityLog,
    ) -> Result<LinkOutcome> {
        let LinkRequest { source, target } = request;

        self.state = LinkState::Validating;
        self.validate_inputs(source, target)?;

        let mut replaced = false;
        if self.check_conflict(target) {
            self.state = LinkState::ConflictCheck;
            log.info(format!("Target already exists: {}", target.display()));

            if !confirm.confirm_overwrite(target) {
                return Ok(LinkOutcome::Cancelled);
            }

            confirm.removal_started(target);
            let removed = self.remove_existing(target);
            confirm.removal_finished(target);
            removed?;

            log.success(format!("Removed existing path: {}", target.display()));
            replaced = true;
        }

        self.state = LinkState::Linking;
        self.create_link(source, target)?;
        Ok(LinkOutcome::Linked { replaced })
    }
}
