//! Memory-mapped matrix store
//!
//! A [`MatrixStore`] owns a mutable memory mapping over one ODMX file for
//! the lifetime of the handle. Cells are read and written in place through
//! unaligned Pod access: the format packs its regions back to back, so the
//! payload is in general not aligned for its element type and typed slices
//! over the mapping would be unsound.

use crate::error::{MatrixError, Result};
use memmap2::MmapMut;
use odmx_core::{
    encode_name, CoreTable, DataType, FileLayout, FormatError, MatrixElement, MatrixHeader,
    NOT_COMPRESSED,
};
use std::fs::OpenOptions;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Creation-time options
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateOptions {
    /// Compression intent; the only accepted value is `false`
    pub compressed: bool,
}

/// Active computational view: a contiguous range of core positions
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewRange {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

/// Memory-mapped handle over one ODMX matrix file
///
/// The handle is exclusive: no locking discipline exists for concurrent
/// handles on the same file, and callers must prevent them. Writes are
/// visible to the handle immediately and durable after [`flush`].
///
/// [`flush`]: MatrixStore::flush
#[derive(Debug)]
pub struct MatrixStore<T: MatrixElement> {
    mmap: MmapMut,
    path: PathBuf,
    header: MatrixHeader,
    layout: FileLayout,
    cores: CoreTable,
    view: Option<ViewRange>,
    _marker: PhantomData<T>,
}

impl<T: MatrixElement> MatrixStore<T> {
    /// Create a new zero-filled matrix file and return a mapped handle
    ///
    /// Allocates the exact computed file length, writes the header and the
    /// core-name table, and leaves the zone index and payload zeroed. No
    /// computational view is active on the returned handle.
    pub fn create<P: AsRef<Path>, S: AsRef<str>>(
        path: P,
        zones: usize,
        core_names: &[S],
    ) -> Result<Self> {
        Self::create_with(path, zones, core_names, CreateOptions::default())
    }

    /// Create with explicit options
    ///
    /// Requesting a compressed payload is rejected outright; the flag
    /// exists only as a reserved format bit.
    pub fn create_with<P: AsRef<Path>, S: AsRef<str>>(
        path: P,
        zones: usize,
        core_names: &[S],
        options: CreateOptions,
    ) -> Result<Self> {
        if options.compressed {
            return Err(MatrixError::CompressionUnsupported);
        }
        if zones == 0 {
            return Err(MatrixError::ZeroZones);
        }
        let table = CoreTable::new(core_names).map_err(|err| name_error(err, core_names))?;

        let zones_u32 =
            u32::try_from(zones).map_err(|_| MatrixError::Format(FormatError::SizeOverflow))?;
        let layout = FileLayout::new(zones, table.len(), T::size_bytes())?;
        let header = MatrixHeader::plain(zones_u32, table.len() as u8, T::DATA_TYPE);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        file.set_len(layout.total_size() as u64)?;

        // SAFETY: exclusive handle over a freshly truncated regular file,
        // sized to the layout the struct uses for every access.
        let mut mmap = unsafe { MmapMut::map_mut(&file)? };

        mmap[..MatrixHeader::SIZE].copy_from_slice(&header.to_bytes());
        for (slot, name) in table.names().iter().enumerate() {
            encode_name(name, &mut mmap[layout.name_slot(slot)])?;
        }
        // Index and payload bytes are already zero from set_len

        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
            header,
            layout,
            cores: table,
            view: None,
            _marker: PhantomData,
        })
    }

    /// Map an existing matrix file of this element type
    ///
    /// Fails on a version mismatch, an unsupported (class, width) pair,
    /// a set compression flag, a truncated file or a malformed name table.
    /// Use [`crate::DynamicStore::load`] when the stored type is unknown.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;

        // SAFETY: exclusive read/write mapping; every region offset is
        // validated against the mapped length before any access.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        let header = MatrixHeader::from_bytes(&mmap)?;
        if header.compressed != NOT_COMPRESSED {
            return Err(MatrixError::CompressionUnsupported);
        }
        let data_type = header.data_type()?;
        if data_type != T::DATA_TYPE {
            return Err(MatrixError::DataTypeMismatch {
                expected: T::DATA_TYPE,
                found: data_type,
            });
        }
        if header.zones == 0 {
            return Err(FormatError::ZeroZones.into());
        }
        if header.cores == 0 {
            return Err(FormatError::ZeroCores.into());
        }

        let layout = FileLayout::new(
            header.zones as usize,
            header.cores as usize,
            data_type.size_bytes(),
        )?;
        layout.check_file_len(mmap.len())?;

        let cores = CoreTable::from_table_bytes(
            &mmap[layout.names_offset()..layout.index_offset()],
            header.cores as usize,
        )?;

        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
            header,
            layout,
            cores,
            view: None,
            _marker: PhantomData,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of zones
    pub fn zones(&self) -> usize {
        self.header.zones as usize
    }

    /// Number of cores
    pub fn cores(&self) -> usize {
        self.cores.len()
    }

    /// Core names in payload order
    pub fn core_names(&self) -> &[String] {
        self.cores.names()
    }

    /// Position of a core in the payload's last axis
    pub fn core_position(&self, name: &str) -> Option<usize> {
        self.cores.position(name)
    }

    /// Stored cell data type
    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    /// Parsed file header
    pub fn header(&self) -> &MatrixHeader {
        &self.header
    }

    // -- zone index ---------------------------------------------------------

    /// External zone identifier at an internal position
    ///
    /// Panics if `position >= zones`.
    pub fn zone_id(&self, position: usize) -> i64 {
        assert!(position < self.zones(), "zone position out of range");
        bytemuck::pod_read_unaligned(&self.mmap[self.layout.index_slot(position)])
    }

    /// Set the external zone identifier at an internal position
    ///
    /// Panics if `position >= zones`.
    pub fn set_zone_id(&mut self, position: usize, id: i64) {
        assert!(position < self.zones(), "zone position out of range");
        let slot = self.layout.index_slot(position);
        self.mmap[slot].copy_from_slice(bytemuck::bytes_of(&id));
    }

    /// All external zone identifiers in internal position order
    pub fn zone_ids(&self) -> Vec<i64> {
        (0..self.zones()).map(|p| self.zone_id(p)).collect()
    }

    /// Replace the whole zone index
    pub fn set_zone_ids(&mut self, ids: &[i64]) -> Result<()> {
        if ids.len() != self.zones() {
            return Err(MatrixError::IndexLengthMismatch {
                expected: self.zones(),
                found: ids.len(),
            });
        }
        for (position, &id) in ids.iter().enumerate() {
            self.set_zone_id(position, id);
        }
        Ok(())
    }

    /// Reverse zone lookup: external identifier to internal position
    ///
    /// Computed on demand and never persisted; grab it once for bulk
    /// lookups instead of calling [`position_of`] in a loop.
    ///
    /// [`position_of`]: MatrixStore::position_of
    pub fn index_map(&self) -> hashbrown::HashMap<i64, usize> {
        (0..self.zones()).map(|p| (self.zone_id(p), p)).collect()
    }

    /// Internal position of an external zone identifier
    pub fn position_of(&self, zone_id: i64) -> Option<usize> {
        (0..self.zones()).find(|&p| self.zone_id(p) == zone_id)
    }

    // -- cells --------------------------------------------------------------

    pub(crate) fn read_at(&self, origin: usize, dest: usize, core: usize) -> T {
        debug_assert!(origin < self.zones() && dest < self.zones() && core < self.cores());
        bytemuck::pod_read_unaligned(&self.mmap[self.layout.cell_slot(origin, dest, core)])
    }

    pub(crate) fn write_at(&mut self, origin: usize, dest: usize, core: usize, value: T) {
        debug_assert!(origin < self.zones() && dest < self.zones() && core < self.cores());
        let slot = self.layout.cell_slot(origin, dest, core);
        self.mmap[slot].copy_from_slice(bytemuck::bytes_of(&value));
    }

    /// Read one cell of a named core
    pub fn get_cell(&self, core: &str, origin: usize, dest: usize) -> Result<T> {
        let position = self.named_core(core)?;
        self.check_bounds(origin, dest)?;
        Ok(self.read_at(origin, dest, position))
    }

    /// Write one cell of a named core
    pub fn set_cell(&mut self, core: &str, origin: usize, dest: usize, value: T) -> Result<()> {
        let position = self.named_core(core)?;
        self.check_bounds(origin, dest)?;
        self.write_at(origin, dest, position, value);
        Ok(())
    }

    /// Fill every cell of a named core from a function of (origin, dest)
    pub fn fill_core<F: FnMut(usize, usize) -> T>(&mut self, core: &str, mut f: F) -> Result<()> {
        let position = self.named_core(core)?;
        for origin in 0..self.zones() {
            for dest in 0..self.zones() {
                self.write_at(origin, dest, position, f(origin, dest));
            }
        }
        Ok(())
    }

    fn named_core(&self, name: &str) -> Result<usize> {
        self.cores
            .position(name)
            .ok_or_else(|| MatrixError::UnknownCore(name.to_string()))
    }

    fn check_bounds(&self, origin: usize, dest: usize) -> Result<()> {
        let zones = self.zones();
        if origin >= zones || dest >= zones {
            return Err(MatrixError::OutOfBounds {
                row: origin,
                column: dest,
                zones,
            });
        }
        Ok(())
    }

    // -- computational view -------------------------------------------------

    /// Activate a computational view over the named cores
    ///
    /// Every name must exist, and a multi-name selection must occupy
    /// strictly increasing, gap-free positions in the core table: a view
    /// is always one contiguous slice of the payload's last axis, never a
    /// gather. A failed selection leaves no view active.
    pub fn set_view<S: AsRef<str>>(&mut self, cores: &[S]) -> Result<()> {
        self.view = None;
        if cores.is_empty() {
            return Err(MatrixError::EmptyViewSelection);
        }

        let mut positions = Vec::with_capacity(cores.len());
        for name in cores {
            positions.push(self.named_core(name.as_ref())?);
        }
        for k in 1..positions.len() {
            if positions[k] != positions[k - 1] + 1 {
                return Err(MatrixError::NonAdjacentCores(
                    cores[k - 1].as_ref().to_string(),
                    cores[k].as_ref().to_string(),
                ));
            }
        }

        self.view = Some(ViewRange {
            start: positions[0],
            len: positions.len(),
        });
        Ok(())
    }

    /// Activate a view over every core, in stored order
    pub fn set_view_all(&mut self) {
        self.view = Some(ViewRange {
            start: 0,
            len: self.cores.len(),
        });
    }

    /// Drop the active view
    pub fn clear_view(&mut self) {
        self.view = None;
    }

    /// Names of the cores in the active view, if any
    pub fn view_names(&self) -> Option<&[String]> {
        self.view
            .map(|v| &self.cores.names()[v.start..v.start + v.len])
    }

    /// Index-based alias over the active view
    pub fn view(&self) -> Result<MatrixView<'_, T>> {
        let range = self.view.ok_or(MatrixError::NoActiveView)?;
        Ok(MatrixView {
            store: self,
            start: range.start,
            len: range.len,
        })
    }

    // -- marginals ----------------------------------------------------------

    /// Per-origin totals: sum of the active core over destinations
    ///
    /// Accumulates in f64 regardless of the stored type; the result is
    /// ordered by internal position, not by external zone identifier.
    pub fn row_marginal(&self) -> Result<Vec<f64>> {
        let core = self.single_view_core()?;
        let zones = self.zones();
        Ok((0..zones)
            .map(|origin| {
                (0..zones)
                    .map(|dest| self.read_at(origin, dest, core).to_f64())
                    .sum()
            })
            .collect())
    }

    /// Per-destination totals: sum of the active core over origins
    pub fn column_marginal(&self) -> Result<Vec<f64>> {
        let core = self.single_view_core()?;
        let zones = self.zones();
        Ok((0..zones)
            .map(|dest| {
                (0..zones)
                    .map(|origin| self.read_at(origin, dest, core).to_f64())
                    .sum()
            })
            .collect())
    }

    fn single_view_core(&self) -> Result<usize> {
        let range = self.view.ok_or(MatrixError::NoActiveView)?;
        if range.len > 1 {
            return Err(MatrixError::AmbiguousMarginal);
        }
        Ok(range.start)
    }

    // -- lifecycle ----------------------------------------------------------

    /// Flush dirty pages to the backing file
    pub fn flush(&self) -> Result<()> {
        self.mmap.flush()?;
        Ok(())
    }

    /// Close the handle, optionally flushing first
    ///
    /// Dropping the handle also unmaps, but without a flush decision;
    /// `close(false)` is the explicit discard-without-flush path.
    pub fn close(self, flush: bool) -> Result<()> {
        if flush {
            self.mmap.flush()?;
        }
        Ok(())
    }
}

/// Zero-copy alias over the cores of an active view
///
/// Borrowed from the owning store, so it can never outlive the mapping
/// it indexes into.
pub struct MatrixView<'a, T: MatrixElement> {
    store: &'a MatrixStore<T>,
    start: usize,
    len: usize,
}

impl<'a, T: MatrixElement> MatrixView<'a, T> {
    /// Number of zones
    pub fn zones(&self) -> usize {
        self.store.zones()
    }

    /// Number of cores in the view
    pub fn cores(&self) -> usize {
        self.len
    }

    /// Names of the viewed cores, in payload order
    pub fn names(&self) -> &'a [String] {
        &self.store.core_names()[self.start..self.start + self.len]
    }

    /// Read a cell of a single-core view
    ///
    /// Panics on a multi-core view; use [`get_layer`] there.
    ///
    /// [`get_layer`]: MatrixView::get_layer
    pub fn get(&self, origin: usize, dest: usize) -> T {
        assert!(self.len == 1, "2-D access on a multi-core view");
        self.store.read_at(origin, dest, self.start)
    }

    /// Read a cell of layer `layer` of the view
    ///
    /// Panics if `layer >= cores()`.
    pub fn get_layer(&self, layer: usize, origin: usize, dest: usize) -> T {
        assert!(layer < self.len, "view layer out of range");
        self.store.read_at(origin, dest, self.start + layer)
    }
}

fn name_error<S: AsRef<str>>(err: FormatError, names: &[S]) -> MatrixError {
    let name_at = |slot: usize| names[slot].as_ref().to_string();
    match err {
        FormatError::ZeroCores => MatrixError::NoCores,
        FormatError::TooManyCores => MatrixError::TooManyCores(names.len()),
        FormatError::ReservedCoreName { slot } => MatrixError::ReservedCoreName(name_at(slot)),
        FormatError::DuplicateCoreName { slot } => MatrixError::DuplicateCoreName(name_at(slot)),
        FormatError::CoreNameTooLong { slot } => MatrixError::CoreNameTooLong(name_at(slot)),
        other => MatrixError::Format(other),
    }
}
