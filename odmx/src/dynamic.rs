//! Dynamic-type dispatch over the stored cell type
//!
//! [`DynamicStore::load`] reads the header first, reconstructs the cell
//! type from the stored (class, width) pair and opens the matching typed
//! store, so callers can work with files whose type is only known at
//! run time.

use crate::error::Result;
use crate::store::MatrixStore;
use odmx_core::{DataType, MatrixElement, MatrixHeader};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Matrix store holding any supported element type
#[derive(Debug)]
pub enum DynamicStore {
    I8(MatrixStore<i8>),
    I16(MatrixStore<i16>),
    I32(MatrixStore<i32>),
    I64(MatrixStore<i64>),
    F32(MatrixStore<f32>),
    F64(MatrixStore<f64>),
}

impl DynamicStore {
    /// Load an existing matrix file, dispatching on its stored type
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let mut header_bytes = [0u8; MatrixHeader::SIZE];
        file.read_exact(&mut header_bytes)?;
        let header = MatrixHeader::from_bytes(&header_bytes)?;
        drop(file);

        Ok(match header.data_type()? {
            DataType::I8 => DynamicStore::I8(MatrixStore::open(path)?),
            DataType::I16 => DynamicStore::I16(MatrixStore::open(path)?),
            DataType::I32 => DynamicStore::I32(MatrixStore::open(path)?),
            DataType::I64 => DynamicStore::I64(MatrixStore::open(path)?),
            DataType::F32 => DynamicStore::F32(MatrixStore::open(path)?),
            DataType::F64 => DynamicStore::F64(MatrixStore::open(path)?),
        })
    }

    /// Number of zones
    pub fn zones(&self) -> usize {
        match self {
            DynamicStore::I8(m) => m.zones(),
            DynamicStore::I16(m) => m.zones(),
            DynamicStore::I32(m) => m.zones(),
            DynamicStore::I64(m) => m.zones(),
            DynamicStore::F32(m) => m.zones(),
            DynamicStore::F64(m) => m.zones(),
        }
    }

    /// Core names in payload order
    pub fn core_names(&self) -> &[String] {
        match self {
            DynamicStore::I8(m) => m.core_names(),
            DynamicStore::I16(m) => m.core_names(),
            DynamicStore::I32(m) => m.core_names(),
            DynamicStore::I64(m) => m.core_names(),
            DynamicStore::F32(m) => m.core_names(),
            DynamicStore::F64(m) => m.core_names(),
        }
    }

    /// Stored cell data type
    pub fn data_type(&self) -> DataType {
        match self {
            DynamicStore::I8(m) => m.data_type(),
            DynamicStore::I16(m) => m.data_type(),
            DynamicStore::I32(m) => m.data_type(),
            DynamicStore::I64(m) => m.data_type(),
            DynamicStore::F32(m) => m.data_type(),
            DynamicStore::F64(m) => m.data_type(),
        }
    }

    /// All external zone identifiers in internal position order
    pub fn zone_ids(&self) -> Vec<i64> {
        match self {
            DynamicStore::I8(m) => m.zone_ids(),
            DynamicStore::I16(m) => m.zone_ids(),
            DynamicStore::I32(m) => m.zone_ids(),
            DynamicStore::I64(m) => m.zone_ids(),
            DynamicStore::F32(m) => m.zone_ids(),
            DynamicStore::F64(m) => m.zone_ids(),
        }
    }

    /// Read one cell of a named core, widened to f64
    pub fn get_f64(&self, core: &str, origin: usize, dest: usize) -> Result<f64> {
        match self {
            DynamicStore::I8(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
            DynamicStore::I16(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
            DynamicStore::I32(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
            DynamicStore::I64(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
            DynamicStore::F32(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
            DynamicStore::F64(m) => Ok(m.get_cell(core, origin, dest)?.to_f64()),
        }
    }

    /// Write one cell of a named core, narrowed from f64
    pub fn set_f64(&mut self, core: &str, origin: usize, dest: usize, value: f64) -> Result<()> {
        match self {
            DynamicStore::I8(m) => m.set_cell(core, origin, dest, i8::from_f64(value)),
            DynamicStore::I16(m) => m.set_cell(core, origin, dest, i16::from_f64(value)),
            DynamicStore::I32(m) => m.set_cell(core, origin, dest, i32::from_f64(value)),
            DynamicStore::I64(m) => m.set_cell(core, origin, dest, i64::from_f64(value)),
            DynamicStore::F32(m) => m.set_cell(core, origin, dest, f32::from_f64(value)),
            DynamicStore::F64(m) => m.set_cell(core, origin, dest, value),
        }
    }

    /// Activate a computational view over the named cores
    pub fn set_view(&mut self, cores: &[&str]) -> Result<()> {
        match self {
            DynamicStore::I8(m) => m.set_view(cores),
            DynamicStore::I16(m) => m.set_view(cores),
            DynamicStore::I32(m) => m.set_view(cores),
            DynamicStore::I64(m) => m.set_view(cores),
            DynamicStore::F32(m) => m.set_view(cores),
            DynamicStore::F64(m) => m.set_view(cores),
        }
    }

    /// Activate a view over every core
    pub fn set_view_all(&mut self) {
        match self {
            DynamicStore::I8(m) => m.set_view_all(),
            DynamicStore::I16(m) => m.set_view_all(),
            DynamicStore::I32(m) => m.set_view_all(),
            DynamicStore::I64(m) => m.set_view_all(),
            DynamicStore::F32(m) => m.set_view_all(),
            DynamicStore::F64(m) => m.set_view_all(),
        }
    }

    /// Per-origin totals of the active single-core view
    pub fn row_marginal(&self) -> Result<Vec<f64>> {
        match self {
            DynamicStore::I8(m) => m.row_marginal(),
            DynamicStore::I16(m) => m.row_marginal(),
            DynamicStore::I32(m) => m.row_marginal(),
            DynamicStore::I64(m) => m.row_marginal(),
            DynamicStore::F32(m) => m.row_marginal(),
            DynamicStore::F64(m) => m.row_marginal(),
        }
    }

    /// Per-destination totals of the active single-core view
    pub fn column_marginal(&self) -> Result<Vec<f64>> {
        match self {
            DynamicStore::I8(m) => m.column_marginal(),
            DynamicStore::I16(m) => m.column_marginal(),
            DynamicStore::I32(m) => m.column_marginal(),
            DynamicStore::I64(m) => m.column_marginal(),
            DynamicStore::F32(m) => m.column_marginal(),
            DynamicStore::F64(m) => m.column_marginal(),
        }
    }

    /// Export the requested cores as delimited text
    pub fn export<P: AsRef<Path>>(&mut self, output: P, cores: Option<&[&str]>) -> Result<()> {
        match self {
            DynamicStore::I8(m) => m.export(output, cores),
            DynamicStore::I16(m) => m.export(output, cores),
            DynamicStore::I32(m) => m.export(output, cores),
            DynamicStore::I64(m) => m.export(output, cores),
            DynamicStore::F32(m) => m.export(output, cores),
            DynamicStore::F64(m) => m.export(output, cores),
        }
    }

    /// Close the handle, optionally flushing first
    pub fn close(self, flush: bool) -> Result<()> {
        match self {
            DynamicStore::I8(m) => m.close(flush),
            DynamicStore::I16(m) => m.close(flush),
            DynamicStore::I32(m) => m.close(flush),
            DynamicStore::I64(m) => m.close(flush),
            DynamicStore::F32(m) => m.close(flush),
            DynamicStore::F64(m) => m.close(flush),
        }
    }
}
