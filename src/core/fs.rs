use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The OS primitives the link workflow depends on.
///
/// `LinkManager` only talks to the filesystem through this trait so the
/// validate / confirm / remove / link sequence can run against an in-memory
/// fake in unit tests.
pub trait FileSystem {
    /// Whether anything exists at `path`. Links are not followed, so a
    /// dangling link still counts as existing.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether `path` resolves to a directory (links are followed).
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove `path` and everything beneath it. A link is removed itself,
    /// never the directory it points to.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;

    /// Create a directory-type symbolic link at `link` pointing to `target`.
    fn create_dir_symlink(&self, link: &Path, target: &Path) -> io::Result<()>;

    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Absolute path with every link and `.` / `..` resolved. The path must exist.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether the current process runs with administrative rights.
    fn is_elevated(&self) -> bool;
}

/// [`FileSystem`] backed by the real OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn path_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        let meta = fs::symlink_metadata(path)?;

        if meta.file_type().is_symlink() {
            remove_link(path)
        } else if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    fn create_dir_symlink(&self, link: &Path, target: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }

        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_dir(target, link)
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = (link, target);
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "directory symlinks not supported on this platform",
            ))
        }
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn is_elevated(&self) -> bool {
        is_elevated()
    }
}

/// Remove a link entry without touching what it points to.
fn remove_link(path: &Path) -> io::Result<()> {
    // Windows directory links are directory entries and need remove_dir.
    #[cfg(windows)]
    {
        fs::remove_dir(path).or_else(|_| fs::remove_file(path))
    }

    #[cfg(not(windows))]
    {
        fs::remove_file(path)
    }
}

/// Whether the process runs as root (Unix). Elsewhere this is unknown and
/// reported as `false`; the check is advisory only.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::Uid::effective().is_root()
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Whether this platform normally lets unprivileged users create links.
pub fn unprivileged_links_expected() -> bool {
    cfg!(unix)
}
