//! Error types for column and frame operations.

use thiserror::Error;

/// Result type alias using FrameError.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Primary error type for typed column operations.
#[derive(Debug, Error)]
pub enum FrameError {
    // === Argument Errors ===
    #[error("index {index} is out of bounds for column of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("operation not supported: {0}")]
    NotSupported(String),

    #[error("cannot combine column of type '{actual}' with column of type '{expected}'")]
    TypeMismatch { expected: String, actual: String },

    // === Lookup Errors ===
    #[error("asset '{asset}' not found on item '{item_id}'")]
    MissingAsset { item_id: String, asset: String },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column already exists: {0}")]
    DuplicateColumn(String),

    // === Data Errors ===
    #[error("failed to resolve asset '{asset}' for item '{item_id}': {message}")]
    Resolution {
        item_id: String,
        asset: String,
        message: String,
    },

    #[error("invalid time specification: {0}")]
    InvalidTime(String),

    #[error("invalid catalog record: {0}")]
    InvalidRecord(String),

    // === Configuration Errors ===
    #[error("configuration error: {0}")]
    Config(String),
}

impl FrameError {
    /// Create an IndexOutOfBounds error.
    pub fn out_of_bounds(index: impl TryInto<i64>, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index: index.try_into().unwrap_or(i64::MAX),
            len,
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a NotSupported error.
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Create a TypeMismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a Resolution error.
    pub fn resolution(
        item_id: impl Into<String>,
        asset: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            item_id: item_id.into(),
            asset: asset.into(),
            message: message.into(),
        }
    }

    /// Name of the error category, mirroring the usual dataframe exception names.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameError::IndexOutOfBounds { .. } => "IndexError",
            FrameError::InvalidArgument(_) | FrameError::LengthMismatch { .. } => "ValueError",
            FrameError::NotSupported(_) => "NotSupportedError",
            FrameError::TypeMismatch { .. } => "TypeError",
            FrameError::MissingAsset { .. }
            | FrameError::ColumnNotFound(_)
            | FrameError::DuplicateColumn(_) => "KeyError",
            FrameError::Resolution { .. } => "ResolutionError",
            FrameError::InvalidTime(_) | FrameError::InvalidRecord(_) => "ParseError",
            FrameError::Config(_) => "ConfigError",
        }
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::InvalidRecord(err.to_string())
    }
}
