//! Binary ODMX header and data-type definitions
//!
//! An ODMX file opens with a fixed 17-byte header followed by the
//! core-name table, the zone index and the dense payload. All scalar
//! fields are little-endian at fixed offsets with no padding.

use crate::error::{FormatError, Result};

/// Marker for an uncompressed payload
pub const NOT_COMPRESSED: u8 = 0;
/// Marker reserved for a future compressed payload
pub const COMPRESSED: u8 = 1;

/// Fixed width of one core-name slot in bytes
pub const CORE_NAME_MAX_LEN: usize = 50;

/// Width of one zone-index entry in bytes (i64)
pub const ZONE_INDEX_ENTRY_LEN: usize = 8;

/// Fixed-size header for ODMX files
///
/// Layout (offset, size): version (0, 1), compression flag (1, 1),
/// compressed cell count (2, 8), zone count (10, 4), core count (14, 1),
/// data-type class (15, 1), data-type width (16, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixHeader {
    /// Format version
    pub version: u8,
    /// Compression flag (`NOT_COMPRESSED` or the reserved `COMPRESSED`)
    pub compressed: u8,
    /// Cell count of the reserved compressed representation; writers store
    /// `zones * zones` here even for plain payloads
    pub compressed_cells: u64,
    /// Number of zones (matrix is zones x zones)
    pub zones: u32,
    /// Number of named cores stacked in the payload
    pub cores: u8,
    /// Data-type class (`DataType::INT_CLASS` or `DataType::FLOAT_CLASS`)
    pub data_class: u8,
    /// Bytes per cell
    pub data_width: u8,
}

impl MatrixHeader {
    /// Current format version
    pub const VERSION: u8 = 1;

    /// Size of the header in bytes
    pub const SIZE: usize = 17;

    /// Build a header describing a plain (uncompressed) matrix
    pub const fn plain(zones: u32, cores: u8, data_type: DataType) -> Self {
        Self {
            version: Self::VERSION,
            compressed: NOT_COMPRESSED,
            compressed_cells: (zones as u64) * (zones as u64),
            zones,
            cores,
            data_class: data_type.class(),
            data_width: data_type.width(),
        }
    }

    /// Parse a header from bytes
    ///
    /// Only the version byte is validated here; zone/core counts and the
    /// data-type pair are checked by the loader so it can report them as
    /// distinct failures.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::InsufficientBuffer);
        }

        let version = bytes[0];
        if version != Self::VERSION {
            return Err(FormatError::VersionMismatch { found: version });
        }

        let compressed = bytes[1];
        let compressed_cells = u64::from_le_bytes([
            bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9],
        ]);
        let zones = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);
        let cores = bytes[14];
        let data_class = bytes[15];
        let data_width = bytes[16];

        Ok(Self {
            version,
            compressed,
            compressed_cells,
            zones,
            cores,
            data_class,
            data_width,
        })
    }

    /// Emit the header as its 17 on-disk bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];

        bytes[0] = self.version;
        bytes[1] = self.compressed;

        let cells = self.compressed_cells.to_le_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[2 + i] = cells[i];
            i += 1;
        }

        let zones = self.zones.to_le_bytes();
        bytes[10] = zones[0];
        bytes[11] = zones[1];
        bytes[12] = zones[2];
        bytes[13] = zones[3];

        bytes[14] = self.cores;
        bytes[15] = self.data_class;
        bytes[16] = self.data_width;

        bytes
    }

    /// Resolve the stored (class, width) pair to a concrete data type
    pub fn data_type(&self) -> Result<DataType> {
        DataType::from_class_width(self.data_class, self.data_width).ok_or(
            FormatError::UnsupportedDataType {
                class: self.data_class,
                width: self.data_width,
            },
        )
    }
}

/// Cell data types supported by the ODMX format
///
/// The on-disk encoding is a (class, width) pair; this enum is the closed
/// set of pairs a loader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl DataType {
    /// Class byte for integer cells
    pub const INT_CLASS: u8 = 0;
    /// Class byte for floating-point cells
    pub const FLOAT_CLASS: u8 = 1;

    /// Stored class byte for this type
    pub const fn class(self) -> u8 {
        match self {
            DataType::I8 | DataType::I16 | DataType::I32 | DataType::I64 => Self::INT_CLASS,
            DataType::F32 | DataType::F64 => Self::FLOAT_CLASS,
        }
    }

    /// Stored width byte (bytes per cell) for this type
    pub const fn width(self) -> u8 {
        match self {
            DataType::I8 => 1,
            DataType::I16 => 2,
            DataType::I32 | DataType::F32 => 4,
            DataType::I64 | DataType::F64 => 8,
        }
    }

    /// Bytes per cell as a usize
    pub const fn size_bytes(self) -> usize {
        self.width() as usize
    }

    /// Reconstruct a data type from its stored (class, width) pair
    pub const fn from_class_width(class: u8, width: u8) -> Option<Self> {
        match (class, width) {
            (Self::INT_CLASS, 1) => Some(DataType::I8),
            (Self::INT_CLASS, 2) => Some(DataType::I16),
            (Self::INT_CLASS, 4) => Some(DataType::I32),
            (Self::INT_CLASS, 8) => Some(DataType::I64),
            (Self::FLOAT_CLASS, 4) => Some(DataType::F32),
            (Self::FLOAT_CLASS, 8) => Some(DataType::F64),
            _ => None,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::I8 => write!(f, "i8"),
            DataType::I16 => write!(f, "i16"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_byte_roundtrip() {
        let header = MatrixHeader::plain(732, 4, DataType::F64);
        let bytes = header.to_bytes();

        assert_eq!(bytes[0], MatrixHeader::VERSION);
        assert_eq!(bytes[1], NOT_COMPRESSED);
        assert_eq!(
            u64::from_le_bytes(bytes[2..10].try_into().unwrap()),
            732 * 732
        );
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 732);
        assert_eq!(bytes[14], 4);
        assert_eq!(bytes[15], DataType::FLOAT_CLASS);
        assert_eq!(bytes[16], 8);

        assert_eq!(MatrixHeader::from_bytes(&bytes), Ok(header));
    }

    #[test]
    fn test_version_gate() {
        let mut bytes = MatrixHeader::plain(10, 1, DataType::F32).to_bytes();
        bytes[0] = 2;
        assert_eq!(
            MatrixHeader::from_bytes(&bytes),
            Err(FormatError::VersionMismatch { found: 2 })
        );
    }

    #[test]
    fn test_short_buffer() {
        assert_eq!(
            MatrixHeader::from_bytes(&[1u8; 16]),
            Err(FormatError::InsufficientBuffer)
        );
    }

    #[test]
    fn test_data_type_pairs_closed() {
        // Every supported type survives the (class, width) round trip
        for dt in [
            DataType::I8,
            DataType::I16,
            DataType::I32,
            DataType::I64,
            DataType::F32,
            DataType::F64,
        ] {
            assert_eq!(DataType::from_class_width(dt.class(), dt.width()), Some(dt));
        }

        // Pairs outside the set are rejected
        assert_eq!(DataType::from_class_width(DataType::FLOAT_CLASS, 1), None);
        assert_eq!(DataType::from_class_width(DataType::FLOAT_CLASS, 2), None);
        assert_eq!(DataType::from_class_width(DataType::INT_CLASS, 16), None);
        assert_eq!(DataType::from_class_width(2, 8), None);
    }
}
