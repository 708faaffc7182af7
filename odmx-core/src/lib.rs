#![no_std]

//! ODMX Core - Binary Origin-Destination Matrix Format Definitions
//!
//! This crate provides the pure format layer for ODMX files: the fixed
//! 17-byte header codec, byte-offset layout math, the data-type table,
//! the core-name table and the element trait. No I/O lives here; the
//! `odmx` crate supplies the memory-mapped implementation.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod element;
pub mod error;
pub mod format;
pub mod layout;
#[cfg(feature = "alloc")]
pub mod names;

pub use element::*;
pub use error::*;
pub use format::*;
pub use layout::*;
#[cfg(feature = "alloc")]
pub use names::*;
