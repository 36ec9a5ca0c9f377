//! In-memory [`FileSystem`] for exercising the link workflow headless.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::fs::FileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File,
    Link(PathBuf),
}

/// A fake filesystem keyed by absolute path.
///
/// Link resolution only handles absolute link targets, which is all the
/// workflow ever creates. Failures can be injected per operation to model
/// missing privileges or files held open by another process.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    link_error: Cell<Option<i32>>,
    locked: RefCell<Vec<PathBuf>>,
    stuck: RefCell<Vec<PathBuf>>,
    elevated: Cell<bool>,
    mutations: Cell<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    /// Create a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::File);
    }

    pub fn add_link(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        let link = link.as_ref();
        if let Some(parent) = link.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(link.to_path_buf(), Node::Link(target.as_ref().to_path_buf()));
    }

    /// Make every subsequent link creation fail with this raw OS code.
    pub fn fail_links_with(&self, code: i32) {
        self.link_error.set(Some(code));
    }

    /// Make removal of this path (or anything under it) fail.
    pub fn lock(&self, path: impl AsRef<Path>) {
        self.locked.borrow_mut().push(path.as_ref().to_path_buf());
    }

    /// Make removal of this path report success while leaving it in place.
    pub fn leave_behind(&self, path: impl AsRef<Path>) {
        self.stuck.borrow_mut().push(path.as_ref().to_path_buf());
    }

    pub fn set_elevated(&self, elevated: bool) {
        self.elevated.set(elevated);
    }

    pub fn node(&self, path: impl AsRef<Path>) -> Option<Node> {
        self.nodes.borrow().get(path.as_ref()).cloned()
    }

    /// Number of successful mutating calls so far.
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    /// Names of the entries directly under `path`, following links.
    pub fn list(&self, path: impl AsRef<Path>) -> io::Result<Vec<String>> {
        let dir = self.resolve(path.as_ref())?;
        if self.nodes.borrow().get(&dir) != Some(&Node::Dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not a directory"));
        }

        let nodes = self.nodes.borrow();
        let names = nodes
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        Ok(names)
    }

    /// Follow links at `path` until a non-link entry is reached.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let nodes = self.nodes.borrow();
        let mut current = path.to_path_buf();
        // Bounded so a link cycle cannot loop forever.
        for _ in 0..40 {
            match nodes.get(&current) {
                Some(Node::Link(target)) => current = target.clone(),
                Some(_) => return Ok(current),
                None => return Err(io::Error::new(io::ErrorKind::NotFound, "no such path")),
            }
        }
        Err(io::Error::new(io::ErrorKind::Other, "too many levels of links"))
    }

    fn is_locked(&self, path: &Path) -> bool {
        self.locked.borrow().iter().any(|l| l.starts_with(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn path_exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        match self.resolve(path) {
            Ok(resolved) => self.nodes.borrow().get(&resolved) == Some(&Node::Dir),
            Err(_) => false,
        }
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        if !self.path_exists(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such path"));
        }
        if self.is_locked(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "entry is in use by another process",
            ));
        }

        if self.stuck.borrow().iter().any(|p| p == path) {
            return Ok(());
        }

        let is_link = matches!(self.node(path), Some(Node::Link(_)));
        let mut nodes = self.nodes.borrow_mut();
        if is_link {
            nodes.remove(path);
        } else {
            nodes.retain(|p, _| !p.starts_with(path));
        }
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }

    fn create_dir_symlink(&self, link: &Path, target: &Path) -> io::Result<()> {
        if let Some(code) = self.link_error.get() {
            return Err(io::Error::from_raw_os_error(code));
        }
        if self.path_exists(link) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "path exists"));
        }
        if let Some(parent) = link.parent() {
            if !self.is_dir(parent) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "parent missing"));
            }
        }

        self.nodes
            .borrow_mut()
            .insert(link.to_path_buf(), Node::Link(target.to_path_buf()));
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        match self.node(path) {
            Some(Node::Link(target)) => Ok(target),
            Some(_) => Err(io::Error::new(io::ErrorKind::InvalidInput, "not a link")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such path")),
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => {
                    out.push(other);
                    out = self.resolve(&out)?;
                }
            }
        }
        Ok(out)
    }

    fn is_elevated(&self) -> bool {
        self.elevated.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_follows_links() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/shared/modules/pkgA");
        fs.add_link("/proj/node_modules", "/shared/modules");

        assert_eq!(fs.list("/proj/node_modules").unwrap(), vec!["pkgA"]);
    }

    #[test]
    fn removing_link_keeps_target_tree() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/shared/modules/pkgA/index.js");
        fs.add_link("/proj/node_modules", "/shared/modules");

        fs.remove_tree(Path::new("/proj/node_modules")).unwrap();
        assert!(!fs.path_exists(Path::new("/proj/node_modules")));
        assert_eq!(fs.node("/shared/modules/pkgA/index.js"), Some(Node::File));
    }

    #[test]
    fn removing_dir_removes_descendants_only() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/proj/node_modules/a/b.js");
        fs.add_file("/proj/node_modules_extra/keep.js");

        fs.remove_tree(Path::new("/proj/node_modules")).unwrap();
        assert_eq!(fs.node("/proj/node_modules/a/b.js"), None);
        assert_eq!(fs.node("/proj/node_modules_extra/keep.js"), Some(Node::File));
        assert_eq!(fs.mutations(), 1);
    }

    #[test]
    fn canonicalize_follows_intermediate_links() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/proj/node_modules/pkgA");
        fs.add_link("/shared/modules", "/proj/node_modules");

        assert_eq!(
            fs.canonicalize(Path::new("/shared/modules/pkgA")).unwrap(),
            PathBuf::from("/proj/node_modules/pkgA")
        );
        assert_eq!(
            fs.canonicalize(Path::new("/proj/node_modules/pkgA/..")).unwrap(),
            PathBuf::from("/proj/node_modules")
        );
        assert!(fs.canonicalize(Path::new("/nowhere")).is_err());
    }

    #[test]
    fn link_cycles_do_not_hang() {
        let fs = MemoryFileSystem::new();
        fs.add_link("/a", "/b");
        fs.add_link("/b", "/a");
        assert!(!fs.is_dir(Path::new("/a")));
    }
}
