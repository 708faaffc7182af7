//! Core-name table for ODMX files
//!
//! Each core occupies one fixed 50-byte slot in the name table, written
//! NUL-padded and trimmed of trailing NUL/space bytes on read. Names must
//! be unique within a file and, at creation time, disjoint from the
//! reserved attribute identifiers of the original engine.

use crate::error::{FormatError, Result};
use crate::format::CORE_NAME_MAX_LEN;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Identifiers a core may not be named after
///
/// Historical attribute names of the matrix engine; kept as part of the
/// format contract so files remain interchangeable with older tooling.
pub const RESERVED_NAMES: &[&str] = &[
    "reserved_names",
    "file_path",
    "zones",
    "names",
    "cores",
    "data_type",
    "compressed",
    "version",
    "index",
    "matrix",
    "matrix_hash",
    "rows",
    "vector",
    "columns",
    "export",
    "matrices",
];

/// Largest core count the header's signed-byte field can carry
pub const MAX_CORES: usize = i8::MAX as usize;

/// Whether a name collides with a reserved identifier
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Encode a name into one fixed-width slot, NUL padding the remainder
pub fn encode_name(name: &str, slot: &mut [u8]) -> Result<()> {
    debug_assert_eq!(slot.len(), CORE_NAME_MAX_LEN);
    let bytes = name.as_bytes();
    if bytes.len() > CORE_NAME_MAX_LEN {
        return Err(FormatError::CoreNameTooLong { slot: 0 });
    }
    slot[..bytes.len()].copy_from_slice(bytes);
    for byte in slot[bytes.len()..].iter_mut() {
        *byte = 0;
    }
    Ok(())
}

/// Decode a fixed-width slot, trimming trailing NUL and space padding
pub fn decode_name(slot: &[u8]) -> Option<&str> {
    let end = slot
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map(|p| p + 1)
        .unwrap_or(0);
    core::str::from_utf8(&slot[..end]).ok()
}

/// Ordered table of unique core names
///
/// Fixed at file-creation time; a new table only ever comes from a full
/// copy/derivation that writes a new file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreTable {
    names: Vec<String>,
}

impl CoreTable {
    /// Build a table for file creation, enforcing the full naming contract
    ///
    /// Slot indices in the returned errors refer to positions in `names`.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Err(FormatError::ZeroCores);
        }
        if names.len() > MAX_CORES {
            return Err(FormatError::TooManyCores);
        }

        let mut owned: Vec<String> = Vec::with_capacity(names.len());
        for (slot, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(FormatError::InvalidCoreName { slot });
            }
            if name.len() > CORE_NAME_MAX_LEN {
                return Err(FormatError::CoreNameTooLong { slot });
            }
            if is_reserved(name) {
                return Err(FormatError::ReservedCoreName { slot });
            }
            if owned.iter().any(|n| n == name) {
                return Err(FormatError::DuplicateCoreName { slot });
            }
            owned.push(name.to_string());
        }

        Ok(Self { names: owned })
    }

    /// Reconstruct a table from the on-disk name region of `cores` slots
    ///
    /// Checks UTF-8 and uniqueness but not reservedness: the reserved set
    /// is a creation-time rule, not a load-time one.
    pub fn from_table_bytes(bytes: &[u8], cores: usize) -> Result<Self> {
        if cores == 0 {
            return Err(FormatError::ZeroCores);
        }
        if bytes.len() < cores * CORE_NAME_MAX_LEN {
            return Err(FormatError::InsufficientBuffer);
        }

        let mut names: Vec<String> = Vec::with_capacity(cores);
        for slot in 0..cores {
            let raw = &bytes[slot * CORE_NAME_MAX_LEN..(slot + 1) * CORE_NAME_MAX_LEN];
            let name = decode_name(raw).ok_or(FormatError::InvalidCoreName { slot })?;
            if name.is_empty() {
                return Err(FormatError::InvalidCoreName { slot });
            }
            if names.iter().any(|n| n == name) {
                return Err(FormatError::DuplicateCoreName { slot });
            }
            names.push(name.to_string());
        }

        Ok(Self { names })
    }

    /// Number of cores
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty (never true for a valid file)
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in payload order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a core in the payload's last axis
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Whether a core with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_slot_roundtrip() {
        let mut slot = [0xffu8; CORE_NAME_MAX_LEN];
        encode_name("commute_am", &mut slot).unwrap();
        assert_eq!(decode_name(&slot), Some("commute_am"));
        // Remainder of the slot is NUL padded
        assert!(slot[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_trims_space_padding() {
        let mut slot = [b' '; CORE_NAME_MAX_LEN];
        slot[..3].copy_from_slice(b"mat");
        assert_eq!(decode_name(&slot), Some("mat"));
    }

    #[test]
    fn test_reserved_names_rejected() {
        for &reserved in RESERVED_NAMES {
            assert_eq!(
                CoreTable::new(&["trips", reserved]),
                Err(FormatError::ReservedCoreName { slot: 1 })
            );
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert_eq!(
            CoreTable::new(&["a", "b", "a"]),
            Err(FormatError::DuplicateCoreName { slot: 2 })
        );
    }

    #[test]
    fn test_overlong_name_rejected() {
        let long = "x".repeat(CORE_NAME_MAX_LEN + 1);
        assert_eq!(
            CoreTable::new(&[long.as_str()]),
            Err(FormatError::CoreNameTooLong { slot: 0 })
        );
    }

    #[test]
    fn test_positions_follow_input_order() {
        let table = CoreTable::new(&["a", "b", "c"]).unwrap();
        assert_eq!(table.position("a"), Some(0));
        assert_eq!(table.position("c"), Some(2));
        assert_eq!(table.position("d"), None);
    }

    #[test]
    fn test_table_bytes_roundtrip() {
        let table = CoreTable::new(&["work", "school"]).unwrap();
        let mut bytes = [0u8; 2 * CORE_NAME_MAX_LEN];
        for (i, name) in table.names().iter().enumerate() {
            encode_name(name, &mut bytes[i * CORE_NAME_MAX_LEN..(i + 1) * CORE_NAME_MAX_LEN])
                .unwrap();
        }
        assert_eq!(CoreTable::from_table_bytes(&bytes, 2), Ok(table));
    }
}
