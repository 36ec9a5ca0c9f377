use std::path::{Component, Path, PathBuf};

use crate::config::{validate_subdir, LinkerConfig};
use crate::core::{ActivityLog, FileSystem};
use crate::error::{ErrorContext, Result};

/// Everything a command handler needs, passed explicitly.
#[derive(Debug)]
pub struct AppState {
    pub config: LinkerConfig,
    pub config_path: PathBuf,
    pub log: ActivityLog,
    cwd: PathBuf,
}

impl AppState {
    pub fn new(config: LinkerConfig, config_path: PathBuf, cwd: PathBuf) -> Self {
        Self {
            config,
            config_path,
            log: ActivityLog::new(),
            cwd,
        }
    }

    /// Build state rooted at the process working directory.
    pub fn from_env(config: LinkerConfig, config_path: PathBuf) -> Result<Self> {
        let cwd = std::env::current_dir()
            .with_io_context(|| "reading current directory".to_string())?;
        Ok(Self::new(config, config_path, cwd))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Make `raw` absolute against the working directory and fold `.` / `..`.
    /// An empty input stays empty so validation can reject it.
    pub fn resolve_path(&self, raw: &Path) -> PathBuf {
        if raw.as_os_str().is_empty() {
            return PathBuf::new();
        }
        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.cwd.join(raw)
        };
        normalize(&joined)
    }

    /// Target inside a project root: `<root>/<link.subdir>`.
    ///
    /// The subdirectory comes from a config file or the command line, so it
    /// is checked again here before it can point the target elsewhere.
    pub fn target_from_project(&self, project_root: &Path) -> Result<PathBuf> {
        let subdir = &self.config.link.subdir;
        validate_subdir(subdir)?;
        Ok(normalize(&self.resolve_path(project_root).join(subdir)))
    }

    /// Append the advisory privilege note to the log.
    ///
    /// Returns true when the warning level was used, i.e. link creation is
    /// likely to fail without elevation.
    pub fn privilege_advisory(&mut self, fs: &impl FileSystem, unprivileged_ok: bool) -> bool {
        if fs.is_elevated() {
            return false;
        }

        let user = whoami::username();
        if unprivileged_ok {
            self.log.info(format!("Running as '{}' without elevated privileges", user));
            false
        } else {
            self.log.warn(format!(
                "Not running with elevated privileges (user '{}'); creating the symbolic link may fail",
                user
            ));
            self.log.warn("Re-run modlink from an elevated (administrator) shell if it does");
            true
        }
    }
}

/// Lexically clean a path without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
