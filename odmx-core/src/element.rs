//! Cell element type constraints for the ODMX format

use crate::format::DataType;

/// Trait for types that can be stored as matrix cells
///
/// Implementors are plain-old-data numeric types: `bytemuck::Pod` makes
/// the unaligned byte-level reads and writes in the store sound, and the
/// f64 conversions back marginal reduction and generic fills.
pub trait MatrixElement: bytemuck::Pod + PartialEq + PartialOrd + core::fmt::Display {
    /// On-disk data type of this element
    const DATA_TYPE: DataType;

    /// Bytes per cell
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for reductions and generic reads
    fn to_f64(self) -> f64;
}

impl MatrixElement for i8 {
    const DATA_TYPE: DataType = DataType::I8;

    fn from_f64(value: f64) -> Self {
        value as i8
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i16 {
    const DATA_TYPE: DataType = DataType::I16;

    fn from_f64(value: f64) -> Self {
        value as i16
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i32 {
    const DATA_TYPE: DataType = DataType::I32;

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i64 {
    const DATA_TYPE: DataType = DataType::I64;

    fn from_f64(value: f64) -> Self {
        value as i64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for f32 {
    const DATA_TYPE: DataType = DataType::F32;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for f64 {
    const DATA_TYPE: DataType = DataType::F64;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths_match_data_type() {
        assert_eq!(<i8 as MatrixElement>::size_bytes(), DataType::I8.size_bytes());
        assert_eq!(<i16 as MatrixElement>::size_bytes(), DataType::I16.size_bytes());
        assert_eq!(<i32 as MatrixElement>::size_bytes(), DataType::I32.size_bytes());
        assert_eq!(<i64 as MatrixElement>::size_bytes(), DataType::I64.size_bytes());
        assert_eq!(<f32 as MatrixElement>::size_bytes(), DataType::F32.size_bytes());
        assert_eq!(<f64 as MatrixElement>::size_bytes(), DataType::F64.size_bytes());
    }
}
