//! Error types for ODMX format decoding

/// Errors raised while decoding or sizing an ODMX file
///
/// All variants are `Copy`; variants that point at a core name carry the
/// slot position rather than the name itself so the type stays allocation
/// free. The `odmx` crate maps these onto its richer error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer shorter than the region being decoded
    InsufficientBuffer,
    /// Stored format version differs from the supported one
    VersionMismatch { found: u8 },
    /// (class, width) pair outside the closed data-type set
    UnsupportedDataType { class: u8, width: u8 },
    /// Zone count field is zero
    ZeroZones,
    /// Core count field is zero
    ZeroCores,
    /// Core count exceeds the signed-byte capacity of the header field
    TooManyCores,
    /// Name slot holds invalid UTF-8 or an empty name
    InvalidCoreName { slot: usize },
    /// Name longer than the fixed 50-byte slot
    CoreNameTooLong { slot: usize },
    /// Same name appears in two slots
    DuplicateCoreName { slot: usize },
    /// Name collides with a reserved identifier
    ReservedCoreName { slot: usize },
    /// Region size arithmetic overflowed
    SizeOverflow,
    /// File shorter than the layout requires
    Truncated,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::InsufficientBuffer => write!(f, "buffer too small for ODMX header"),
            FormatError::VersionMismatch { found } => {
                write!(f, "matrix format version {found} is not supported")
            }
            FormatError::UnsupportedDataType { class, width } => {
                write!(f, "unsupported data type (class {class}, width {width})")
            }
            FormatError::ZeroZones => write!(f, "zone count must be greater than zero"),
            FormatError::ZeroCores => write!(f, "matrix must have at least one core"),
            FormatError::TooManyCores => write!(f, "core count exceeds header capacity"),
            FormatError::InvalidCoreName { slot } => {
                write!(f, "core name slot {slot} is not valid UTF-8 or is empty")
            }
            FormatError::CoreNameTooLong { slot } => {
                write!(f, "core name slot {slot} exceeds 50 bytes")
            }
            FormatError::DuplicateCoreName { slot } => {
                write!(f, "core name slot {slot} duplicates an earlier name")
            }
            FormatError::ReservedCoreName { slot } => {
                write!(f, "core name slot {slot} is a reserved identifier")
            }
            FormatError::SizeOverflow => write!(f, "matrix region size overflows"),
            FormatError::Truncated => write!(f, "file is shorter than its layout requires"),
        }
    }
}

/// Result type for format-level operations
pub type Result<T> = core::result::Result<T, FormatError>;
