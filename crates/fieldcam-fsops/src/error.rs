use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("path is not readable: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("archive extraction failed: {detail}")]
    Extraction { detail: String },

    #[error("checksum verification failed: {detail}")]
    Integrity { detail: String },

    #[error("no {tool} utility is available on this platform")]
    PlatformUnavailable { tool: &'static str },

    #[error("filesystem operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn from_read_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}
