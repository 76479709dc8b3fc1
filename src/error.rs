//! Error taxonomy for resolution, extraction, loading and conversion.
//!
//! Only [`ImportError::InvalidModule`] and [`ImportError::NotFound`] mean
//! "this finder does not know the name". Every other variant is a hard
//! failure that carries its cause.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a host while evaluating module source.
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("module '{name}' does not belong to package '{package}'")]
    InvalidModule { name: String, package: String },

    #[error("module '{name}' does not exist at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("failed to read {}", .path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("notebook {} is not readable", .path.display())]
    CorruptDocument {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("keeping directives requires a shell transformer, but none is available")]
    TransformerUnavailable,

    #[error("file at {} already exists; pass overwrite to replace it", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("package directory {} not found", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("{} is not a notebook", .path.display())]
    NotADocument { path: PathBuf },

    #[error("failed to write {}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error executing {} ({name})\n--- extracted source ---\n{source_text}--- end source ---", .path.display())]
    Execution {
        name: String,
        path: PathBuf,
        source_text: String,
        #[source]
        cause: EvalError,
    },
}

impl ImportError {
    /// True for the two conditions a finder reports as "no match".
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::InvalidModule { .. } | Self::NotFound { .. })
    }
}

/// Failure to parse a notebook container.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported nbformat version {0}")]
    UnsupportedVersion(u64),

    #[error("notebook has no cell list")]
    MissingCells,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_kinds() {
        let invalid = ImportError::InvalidModule {
            name: "other.mod".to_string(),
            package: "nbs".to_string(),
        };
        let missing = ImportError::NotFound {
            name: "nbs.gone".to_string(),
            path: PathBuf::from("nbs/gone/__init__.py"),
        };
        assert!(invalid.is_no_match());
        assert!(missing.is_no_match());
        assert!(!ImportError::TransformerUnavailable.is_no_match());
        assert!(!ImportError::DestinationExists {
            path: PathBuf::from("a.py")
        }
        .is_no_match());
    }

    #[test]
    fn test_corrupt_document_keeps_cause() {
        use std::error::Error as _;

        let err = ImportError::CorruptDocument {
            path: PathBuf::from("broken.ipynb"),
            source: DocumentError::UnsupportedVersion(2),
        };
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(cause.as_deref(), Some("unsupported nbformat version 2"));
    }

    #[test]
    fn test_execution_message_shows_source() {
        let err = ImportError::Execution {
            name: "nbs.module".to_string(),
            path: PathBuf::from("nbs/module.ipynb"),
            source_text: "x = undefined\n".to_string(),
            cause: "name 'undefined' is not defined".into(),
        };
        let message = err.to_string();
        assert!(message.contains("nbs/module.ipynb"));
        assert!(message.contains("x = undefined"));
    }
}
