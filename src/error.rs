use std::fmt;
use std::path::PathBuf;

/// Remediation hints shown when the OS refuses to create a link.
pub const LINK_GUIDANCE: [&str; 3] = [
    "Run modlink with elevated privileges (administrator / root)",
    "Make sure the paths contain no illegal characters",
    "Make sure the target volume is writable",
];

/// Main error type for modlink operations
#[derive(Debug)]
pub enum LinkError {
    EmptyPath {
        field: String,
    },
    SourceNotFound {
        path: PathBuf,
    },
    SourceNotDirectory {
        path: PathBuf,
    },
    OverlappingPaths {
        source: PathBuf,
        target: PathBuf,
    },
    RemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    LinkCreationFailed {
        target: PathBuf,
        link_to: PathBuf,
        code: Option<i32>,
        source: std::io::Error,
    },
    Io {
        source: std::io::Error,
        context: String,
    },
    Config {
        message: String,
        path: Option<PathBuf>,
    },
    Generic {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LinkError {
    /// Raw OS error code of a failed link creation, passed through untouched.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            LinkError::LinkCreationFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Actionable hints for the user, if this error has any.
    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            LinkError::LinkCreationFailed { .. } => &LINK_GUIDANCE,
            _ => &[],
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::EmptyPath { field } => {
                write!(f, "Please provide both paths: {} is empty", field)
            }
            LinkError::SourceNotFound { path } => {
                write!(f, "Source path does not exist: {}", path.display())
            }
            LinkError::SourceNotDirectory { path } => {
                write!(f, "Source path is not a directory: {}", path.display())
            }
            LinkError::OverlappingPaths { source, target } => {
                write!(
                    f,
                    "Target {} would contain or replace source {}",
                    target.display(),
                    source.display()
                )
            }
            LinkError::RemovalFailed { path, .. } => {
                write!(f, "Could not remove existing path {}", path.display())
            }
            LinkError::LinkCreationFailed { target, link_to, code, .. } => {
                if let Some(code) = code {
                    write!(
                        f,
                        "Failed to create link {} -> {} (error code {})",
                        target.display(),
                        link_to.display(),
                        code
                    )
                } else {
                    write!(f, "Failed to create link {} -> {}", target.display(), link_to.display())
                }
            }
            LinkError::Io { context, .. } => {
                write!(f, "IO error during {}", context)
            }
            LinkError::Config { message, path } => {
                if let Some(path) = path {
                    write!(f, "Configuration error in {}: {}", path.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            LinkError::Generic { message, .. } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::RemovalFailed { source, .. } => Some(source),
            LinkError::LinkCreationFailed { source, .. } => Some(source),
            LinkError::Io { source, .. } => Some(source),
            LinkError::Generic { source: Some(source), .. } => Some(&**source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;

pub trait ErrorContext<T> {
    fn with_io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::result::Result<T, std::io::Error> {
    fn with_io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LinkError::Io {
            source: e,
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn link_failure_carries_code_and_guidance() {
        let err = LinkError::LinkCreationFailed {
            target: PathBuf::from("/proj/node_modules"),
            link_to: PathBuf::from("/shared/modules"),
            code: Some(1314),
            source: io::Error::from_raw_os_error(1314),
        };
        assert_eq!(err.os_code(), Some(1314));
        assert_eq!(err.guidance().len(), 3);
        assert!(err.to_string().contains("error code 1314"));
        // The OS message is reached through `source()`, not repeated in Display.
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_errors_have_no_guidance() {
        let err = LinkError::EmptyPath { field: "source".to_string() };
        assert!(err.guidance().is_empty());
        assert_eq!(err.os_code(), None);
        assert!(err.to_string().contains("source is empty"));
    }

    #[test]
    fn io_context_wraps_source() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.with_io_context(|| "reading config".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "IO error during reading config");
        assert!(std::error::Error::source(&err).is_some());
    }
}
