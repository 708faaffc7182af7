//! Byte-offset layout math for ODMX files
//!
//! Pure functions mapping (zones, cores, cell width) to the offset and
//! length of every file region, with overflow-checked arithmetic. The
//! format has no alignment padding: regions start exactly where the
//! previous one ends, which is why cell access in the `odmx` crate goes
//! through unaligned reads.

use crate::error::{FormatError, Result};
use crate::format::{MatrixHeader, CORE_NAME_MAX_LEN, ZONE_INDEX_ENTRY_LEN};
use core::ops::Range;

/// Computed region offsets for one ODMX file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLayout {
    zones: usize,
    cores: usize,
    cell_width: usize,
    index_offset: usize,
    payload_offset: usize,
    total_size: usize,
}

impl FileLayout {
    /// Compute the layout for a matrix of the given shape
    pub fn new(zones: usize, cores: usize, cell_width: usize) -> Result<Self> {
        if zones == 0 {
            return Err(FormatError::ZeroZones);
        }
        if cores == 0 {
            return Err(FormatError::ZeroCores);
        }

        let names_len = cores
            .checked_mul(CORE_NAME_MAX_LEN)
            .ok_or(FormatError::SizeOverflow)?;
        let index_offset = MatrixHeader::SIZE
            .checked_add(names_len)
            .ok_or(FormatError::SizeOverflow)?;
        let index_len = zones
            .checked_mul(ZONE_INDEX_ENTRY_LEN)
            .ok_or(FormatError::SizeOverflow)?;
        let payload_offset = index_offset
            .checked_add(index_len)
            .ok_or(FormatError::SizeOverflow)?;
        let payload_len = zones
            .checked_mul(zones)
            .and_then(|cells| cells.checked_mul(cores))
            .and_then(|cells| cells.checked_mul(cell_width))
            .ok_or(FormatError::SizeOverflow)?;
        let total_size = payload_offset
            .checked_add(payload_len)
            .ok_or(FormatError::SizeOverflow)?;

        Ok(Self {
            zones,
            cores,
            cell_width,
            index_offset,
            payload_offset,
            total_size,
        })
    }

    /// Number of zones
    pub const fn zones(&self) -> usize {
        self.zones
    }

    /// Number of cores
    pub const fn cores(&self) -> usize {
        self.cores
    }

    /// Bytes per cell
    pub const fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Offset of the core-name table
    pub const fn names_offset(&self) -> usize {
        MatrixHeader::SIZE
    }

    /// Offset of the zone-index array
    pub const fn index_offset(&self) -> usize {
        self.index_offset
    }

    /// Offset of the payload array
    pub const fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    /// Exact file size in bytes
    pub const fn total_size(&self) -> usize {
        self.total_size
    }

    /// Byte range of one fixed-width name slot
    pub const fn name_slot(&self, core: usize) -> Range<usize> {
        let start = MatrixHeader::SIZE + core * CORE_NAME_MAX_LEN;
        start..start + CORE_NAME_MAX_LEN
    }

    /// Byte range of one zone-index entry
    pub const fn index_slot(&self, position: usize) -> Range<usize> {
        let start = self.index_offset + position * ZONE_INDEX_ENTRY_LEN;
        start..start + ZONE_INDEX_ENTRY_LEN
    }

    /// Byte range of one payload cell
    ///
    /// The payload is row-major with the core axis innermost:
    /// origin, then destination, then core.
    pub const fn cell_slot(&self, origin: usize, dest: usize, core: usize) -> Range<usize> {
        let cell = (origin * self.zones + dest) * self.cores + core;
        let start = self.payload_offset + cell * self.cell_width;
        start..start + self.cell_width
    }

    /// Check that a mapped file is large enough for this layout
    pub const fn check_file_len(&self, file_len: usize) -> Result<()> {
        if file_len < self.total_size {
            return Err(FormatError::Truncated);
        }
        Ok(())
    }
}
