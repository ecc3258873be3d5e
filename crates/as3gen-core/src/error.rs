//! Error types for as3gen generation runs

use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Broad classification of a [`GeneratorError`]
///
/// Configuration and validation errors are caused by user input. Internal
/// errors mean a generator invariant was broken and are never the user's
/// fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Internal,
    Io,
}

/// Error type for a generation run
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The parameter string named a key this generator does not recognise
    #[error("Unknown generator option: {0}")]
    UnknownOption(String),

    /// The output namespace cannot be mapped to a relative directory
    #[error("invalid namespace `{namespace}`: {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// A configured output path is not relative to the output root
    #[error("invalid output path `{path}`: {reason}")]
    InvalidOutputPath { path: String, reason: String },

    /// Two generated artifacts would be written to the same path
    #[error("output path collision: `{path}` is produced by both `{first}` and `{second}`")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    /// No field generator exists for a field's classification
    #[error("internal error: no field generator for field `{field}`: {detail}")]
    InternalDispatch { field: String, detail: String },

    /// A code template referenced a variable that was never bound
    #[error("internal error: template {0}")]
    Template(String),

    /// Opening or writing an output stream failed
    #[error("failed to write `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeneratorError::UnknownOption(_) => ErrorKind::Configuration,
            GeneratorError::InvalidNamespace { .. }
            | GeneratorError::InvalidOutputPath { .. }
            | GeneratorError::PathCollision { .. } => ErrorKind::Validation,
            GeneratorError::InternalDispatch { .. } | GeneratorError::Template(_) => {
                ErrorKind::Internal
            }
            GeneratorError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether the error can be fixed by changing the input or environment
    pub fn is_user_facing(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// Returns a stable numeric code, suitable for process exit statuses
    pub fn error_code(&self) -> u32 {
        match self {
            GeneratorError::UnknownOption(_) => 1,
            GeneratorError::InvalidNamespace { .. } => 2,
            GeneratorError::PathCollision { .. } => 3,
            GeneratorError::InternalDispatch { .. } => 4,
            GeneratorError::Template(_) => 5,
            GeneratorError::Io { .. } => 6,
            GeneratorError::InvalidOutputPath { .. } => 7,
        }
    }

    /// Wrap an I/O error with the relative path it concerns
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}
