//! Error types for ODMX store operations

use odmx_core::{DataType, FormatError};
use std::fmt;
use std::io;

/// Errors raised by matrix store operations
///
/// Format failures and I/O failures wrap the underlying error unchanged;
/// the remaining variants are contract violations rejected before any
/// file mutation takes place.
#[derive(Debug)]
pub enum MatrixError {
    /// Format-level failure while decoding or sizing a file
    Format(FormatError),
    /// I/O failure from the filesystem or the mapping
    Io(io::Error),
    /// Creation requested a compressed payload, or the file declares one
    CompressionUnsupported,
    /// Zone count of zero at creation
    ZeroZones,
    /// No core names supplied at creation
    NoCores,
    /// More cores than the header field can carry
    TooManyCores(usize),
    /// Core name collides with a reserved identifier
    ReservedCoreName(String),
    /// Core name appears more than once
    DuplicateCoreName(String),
    /// Core name exceeds the fixed 50-byte slot
    CoreNameTooLong(String),
    /// Requested core does not exist in this matrix
    UnknownCore(String),
    /// Requested view cores are not adjacent in the core table
    NonAdjacentCores(String, String),
    /// View selection was an empty list
    EmptyViewSelection,
    /// Operation needs an active computational view
    NoActiveView,
    /// Marginal requested over a multi-core view
    AmbiguousMarginal,
    /// Rename list length differs from the core list length
    RenameLengthMismatch { cores: usize, names: usize },
    /// Cell access outside the zone range
    OutOfBounds { row: usize, column: usize, zones: usize },
    /// Zone-index slice length differs from the zone count
    IndexLengthMismatch { expected: usize, found: usize },
    /// Stored data type differs from the requested element type
    DataTypeMismatch { expected: DataType, found: DataType },
    /// Export target format is not supported
    UnsupportedExportFormat(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Format(err) => write!(f, "{err}"),
            MatrixError::Io(err) => write!(f, "{err}"),
            MatrixError::CompressionUnsupported => {
                write!(f, "matrix compression is not supported")
            }
            MatrixError::ZeroZones => write!(f, "zone count must be greater than zero"),
            MatrixError::NoCores => write!(f, "matrix needs at least one core name"),
            MatrixError::TooManyCores(n) => {
                write!(f, "{n} cores exceed the format's limit of 127")
            }
            MatrixError::ReservedCoreName(name) => {
                write!(f, "'{name}' is a reserved name")
            }
            MatrixError::DuplicateCoreName(name) => {
                write!(f, "core name '{name}' given more than once")
            }
            MatrixError::CoreNameTooLong(name) => {
                write!(f, "core name '{name}' exceeds 50 bytes")
            }
            MatrixError::UnknownCore(name) => {
                write!(f, "matrix core '{name}' not available on this matrix")
            }
            MatrixError::NonAdjacentCores(a, b) => {
                write!(f, "matrix cores '{a}' and '{b}' are not adjacent")
            }
            MatrixError::EmptyViewSelection => {
                write!(f, "view selection needs at least one core")
            }
            MatrixError::NoActiveView => write!(f, "matrix is not set for computation"),
            MatrixError::AmbiguousMarginal => {
                write!(f, "marginal over a multi-core view is ambiguous")
            }
            MatrixError::RenameLengthMismatch { cores, names } => {
                write!(f, "{names} new names given for {cores} cores")
            }
            MatrixError::OutOfBounds { row, column, zones } => {
                write!(f, "cell ({row}, {column}) outside a {zones}-zone matrix")
            }
            MatrixError::IndexLengthMismatch { expected, found } => {
                write!(f, "zone index of {found} entries written to {expected} zones")
            }
            MatrixError::DataTypeMismatch { expected, found } => {
                write!(f, "file stores {found} cells, expected {expected}")
            }
            MatrixError::UnsupportedExportFormat(ext) => {
                write!(f, "export format '{ext}' is not supported")
            }
        }
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for MatrixError {
    fn from(err: FormatError) -> Self {
        MatrixError::Format(err)
    }
}

impl From<io::Error> for MatrixError {
    fn from(err: io::Error) -> Self {
        MatrixError::Io(err)
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, MatrixError>;
