//! Error types for unigen core
//!
//! Every failure aborts the current invocation and reaches the caller
//! unmodified. Variants carry the structured detail (keys, file, declaration)
//! a front end needs to report the problem without engine internals.

use std::path::PathBuf;
use unigen_ast::AstError;

/// Main generator error type
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Required configuration keys absent or not strings
    #[error("generator '{generator}' is missing configuration keys: {}", .keys.join(", "))]
    MissingConfig { generator: String, keys: Vec<String> },

    /// Required options absent
    #[error("generator '{generator}' is missing options: {}", .keys.join(", "))]
    MissingOption { generator: String, keys: Vec<String> },

    /// No registered generator answers to this name
    #[error("unknown generator: {name}")]
    UnknownGenerator { name: String },

    /// Transform target file or declaration absent
    #[error("target not found: {}{}", .path.display(), .declaration.as_ref().map(|d| format!(" (declaration {d})")).unwrap_or_default())]
    TargetNotFound {
        path: PathBuf,
        declaration: Option<String>,
    },

    /// Module descriptor lacks the array property
    #[error("property '{property}' not found in {}", .path.display())]
    PropertyNotFound { path: PathBuf, property: String },

    /// Aggregation file does not have the expected shape
    #[error("structural mismatch in {}: {message}", .path.display())]
    StructuralMismatch { path: PathBuf, message: String },

    /// Two generators claim the same invocation name
    #[error("duplicate generator name: {name}")]
    DuplicateRegistration { name: String },

    /// No enclosing aggregation file within the project boundary
    #[error("no enclosing {marker} found between {} and {}", .start.display(), .stop.display())]
    AggregationNotFound {
        marker: String,
        start: PathBuf,
        stop: PathBuf,
    },

    /// Option present but unusable
    #[error("invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// Configuration or descriptor is malformed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem capability failed
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text failed to parse or an edit was rejected
    #[error("ast error in {}: {source}", .path.display())]
    Ast {
        path: PathBuf,
        #[source]
        source: AstError,
    },
}

/// Stable classification of [`GeneratorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingConfig,
    MissingOption,
    UnknownGenerator,
    TargetNotFound,
    PropertyNotFound,
    StructuralMismatch,
    DuplicateRegistration,
    AggregationNotFound,
    InvalidOption,
    InvalidConfig,
    Io,
    Ast,
}

impl GeneratorError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Lift an AST error, promoting shape failures to their own variants
    pub fn from_ast(path: impl Into<PathBuf>, source: AstError) -> Self {
        let path = path.into();
        match source {
            AstError::PropertyNotFound(property) => Self::PropertyNotFound { path, property },
            AstError::StructuralMismatch(message) => Self::StructuralMismatch { path, message },
            AstError::DeclarationNotFound(name) => Self::TargetNotFound {
                path,
                declaration: Some(name),
            },
            source => Self::Ast { path, source },
        }
    }

    /// Classification for callers that branch on failure type
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfig { .. } => ErrorKind::MissingConfig,
            Self::MissingOption { .. } => ErrorKind::MissingOption,
            Self::UnknownGenerator { .. } => ErrorKind::UnknownGenerator,
            Self::TargetNotFound { .. } => ErrorKind::TargetNotFound,
            Self::PropertyNotFound { .. } => ErrorKind::PropertyNotFound,
            Self::StructuralMismatch { .. } => ErrorKind::StructuralMismatch,
            Self::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
            Self::AggregationNotFound { .. } => ErrorKind::AggregationNotFound,
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::Io { .. } => ErrorKind::Io,
            Self::Ast { .. } => ErrorKind::Ast,
        }
    }

    /// Keys reported by a validation failure
    #[must_use]
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::MissingConfig { keys, .. } | Self::MissingOption { keys, .. } => keys,
            _ => &[],
        }
    }
}

/// Result alias for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
