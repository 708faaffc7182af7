//! ODMX - Memory-Mapped Multi-Core Origin-Destination Matrices
//!
//! This library stores dense zone-by-zone demand matrices (one or more
//! named cores stacked together) in a single binary file, accessed
//! through memory mapping rather than bulk load/save, so matrices far
//! larger than comfortable in-process copies can be manipulated with
//! near-zero I/O overhead.
//!
//! ## Architecture
//!
//! The workspace separates specification from implementation:
//!
//! - **odmx-core**: pure format definitions, layout math and validation
//!   (no I/O)
//! - **odmx**: the memory-mapped store, dynamic-type dispatch, copies
//!   and tabular export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use odmx::{MatrixStore, Result};
//!
//! fn example() -> Result<()> {
//!     let mut matrix = MatrixStore::<f64>::create("demand.odm", 500, &["work", "school"])?;
//!     matrix.set_cell("work", 10, 20, 105.5)?;
//!
//!     matrix.set_view(&["work"])?;
//!     let produced = matrix.row_marginal()?;
//!     println!("zone 10 produces {} trips", produced[10]);
//!
//!     matrix.close(true)
//! }
//! ```

// Re-export core format definitions
pub use odmx_core::{
    // Format definitions
    DataType, FileLayout, MatrixHeader,
    // Element trait
    MatrixElement,
    // Core-name rules
    CoreTable, CORE_NAME_MAX_LEN, RESERVED_NAMES,
    // Format-level errors
    FormatError,
};

// Implementation modules
pub mod derive;
pub mod dynamic;
pub mod error;
pub mod export;
pub mod store;

// Public exports
pub use derive::scratch_path;
pub use dynamic::DynamicStore;
pub use error::{MatrixError, Result};
pub use export::ExportFormat;
pub use store::{CreateOptions, MatrixStore, MatrixView};
