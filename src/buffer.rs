//! Dtype-tagged n-dimensional array buffers.
//!
//! `ArrayBuf` models the descriptor surface an embedding host exposes for
//! its native arrays: element type, rank, per-axis extents, element
//! strides, and raw data. The bridge only ever reads this surface; it is
//! also what tests use to fabricate well-formed and ill-formed inputs.
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Layout;

/// Element type of an array buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
    U8,
}

impl DType {
    /// Size of one element in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        match self {
            DType::F32 => std::mem::size_of::<f32>(),
            DType::F64 => std::mem::size_of::<f64>(),
            DType::I32 => std::mem::size_of::<i32>(),
            DType::I64 => std::mem::size_of::<i64>(),
            DType::U8 => std::mem::size_of::<u8>(),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Owned element storage, keyed by dtype so typed access stays safe and
/// properly aligned.
#[derive(Clone, Debug, PartialEq)]
pub enum Elements {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
}

impl Elements {
    pub fn dtype(&self) -> DType {
        match self {
            Elements::F32(_) => DType::F32,
            Elements::F64(_) => DType::F64,
            Elements::I32(_) => DType::I32,
            Elements::I64(_) => DType::I64,
            Elements::U8(_) => DType::U8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Elements::F32(v) => v.len(),
            Elements::F64(v) => v.len(),
            Elements::I32(v) => v.len(),
            Elements::I64(v) => v.len(),
            Elements::U8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::F32 => Elements::F32(vec![0.0; len]),
            DType::F64 => Elements::F64(vec![0.0; len]),
            DType::I32 => Elements::I32(vec![0; len]),
            DType::I64 => Elements::I64(vec![0; len]),
            DType::U8 => Elements::U8(vec![0; len]),
        }
    }
}

/// N-dimensional array buffer with explicit element strides.
///
/// Rank 0 (scalar) and arbitrary ranks are representable so callers can
/// hand the bridge anything the host runtime could; the bridge itself
/// only accepts rank 1 and 2.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayBuf {
    dims: Vec<usize>,
    strides: Vec<usize>,
    elems: Elements,
}

impl ArrayBuf {
    /// Zero-filled buffer of the given extents and dtype, C order.
    pub fn zeros(dims: &[usize], dtype: DType) -> Self {
        let numel = dims.iter().product();
        Self {
            dims: dims.to_vec(),
            strides: contiguous_strides(dims, Layout::RowMajor),
            elems: Elements::zeros(dtype, numel),
        }
    }

    /// Contiguous `f32` buffer; `values` are interpreted in `order`.
    pub fn from_vec_f32(
        dims: &[usize],
        values: Vec<f32>,
        order: Layout,
    ) -> Result<Self, BufferError> {
        Self::contiguous(dims, Elements::F32(values), order)
    }

    /// Contiguous `f64` buffer; `values` are interpreted in `order`.
    pub fn from_vec_f64(
        dims: &[usize],
        values: Vec<f64>,
        order: Layout,
    ) -> Result<Self, BufferError> {
        Self::contiguous(dims, Elements::F64(values), order)
    }

    /// Contiguous `i32` buffer; `values` are interpreted in `order`.
    pub fn from_vec_i32(
        dims: &[usize],
        values: Vec<i32>,
        order: Layout,
    ) -> Result<Self, BufferError> {
        Self::contiguous(dims, Elements::I32(values), order)
    }

    fn contiguous(dims: &[usize], elems: Elements, order: Layout) -> Result<Self, BufferError> {
        let numel: usize = dims.iter().product();
        if elems.len() != numel {
            return Err(BufferError::ExtentMismatch {
                dims: dims.to_vec(),
                len: elems.len(),
            });
        }
        Ok(Self {
            dims: dims.to_vec(),
            strides: contiguous_strides(dims, order),
            elems,
        })
    }

    /// Buffer with caller-chosen strides, e.g. a sliced host array whose
    /// elements are no longer consecutive in memory.
    pub fn with_strides(
        dims: Vec<usize>,
        strides: Vec<usize>,
        elems: Elements,
    ) -> Result<Self, BufferError> {
        if strides.len() != dims.len() {
            return Err(BufferError::StrideRankMismatch {
                dims: dims.len(),
                strides: strides.len(),
            });
        }
        let span = required_span(&dims, &strides);
        if elems.len() < span {
            return Err(BufferError::ExtentMismatch {
                dims,
                len: elems.len(),
            });
        }
        Ok(Self {
            dims,
            strides,
            elems,
        })
    }

    pub fn dtype(&self) -> DType {
        self.elems.dtype()
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Strides in elements, one per axis.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Elements consecutive in memory, last axis fastest. Rank-1 and
    /// degenerate buffers can satisfy both contiguity predicates at once.
    pub fn is_c_contiguous(&self) -> bool {
        self.strides == contiguous_strides(&self.dims, Layout::RowMajor)
    }

    /// Elements consecutive in memory, first axis fastest.
    pub fn is_f_contiguous(&self) -> bool {
        self.strides == contiguous_strides(&self.dims, Layout::ColumnMajor)
    }

    /// Typed read access to the backing storage; `None` unless the
    /// buffer holds `f32` elements.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.elems {
            Elements::F32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32_mut(&mut self) -> Option<&mut [f32]> {
        match &mut self.elems {
            Elements::F32(v) => Some(v),
            _ => None,
        }
    }
}

impl From<ndarray::Array1<f32>> for ArrayBuf {
    fn from(array: ndarray::Array1<f32>) -> Self {
        let dims = vec![array.len()];
        let values: Vec<f32> = array.iter().copied().collect();
        Self {
            strides: contiguous_strides(&dims, Layout::RowMajor),
            dims,
            elems: Elements::F32(values),
        }
    }
}

impl From<ndarray::Array2<f32>> for ArrayBuf {
    fn from(array: ndarray::Array2<f32>) -> Self {
        let dims = vec![array.nrows(), array.ncols()];
        // iteration is in logical order, so the collected vec is C order
        // regardless of how the source array was laid out
        let values: Vec<f32> = array.iter().copied().collect();
        Self {
            strides: contiguous_strides(&dims, Layout::RowMajor),
            dims,
            elems: Elements::F32(values),
        }
    }
}

/// Element strides of a contiguous buffer with the given extents.
fn contiguous_strides(dims: &[usize], order: Layout) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    match order {
        Layout::RowMajor => {
            for i in (0..dims.len().saturating_sub(1)).rev() {
                strides[i] = strides[i + 1] * dims[i + 1];
            }
        }
        Layout::ColumnMajor => {
            for i in 1..dims.len() {
                strides[i] = strides[i - 1] * dims[i - 1];
            }
        }
    }
    strides
}

/// Number of storage elements the strided index space can touch.
fn required_span(dims: &[usize], strides: &[usize]) -> usize {
    if dims.iter().any(|&d| d == 0) {
        return 0;
    }
    1 + dims
        .iter()
        .zip(strides)
        .map(|(&d, &s)| (d - 1) * s)
        .sum::<usize>()
}

#[derive(Debug, Clone)]
pub enum BufferError {
    /// Storage length does not cover the requested extents.
    ExtentMismatch { dims: Vec<usize>, len: usize },
    /// Stride count does not match the number of axes.
    StrideRankMismatch { dims: usize, strides: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::ExtentMismatch { dims, len } => {
                write!(f, "invalid extents {:?} for storage of length {}", dims, len)
            }
            BufferError::StrideRankMismatch { dims, strides } => {
                write!(f, "{} strides given for {} axes", strides, dims)
            }
        }
    }
}

impl Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_strides() {
        assert_eq!(
            contiguous_strides(&[2, 3, 4], Layout::RowMajor),
            vec![12, 4, 1]
        );
    }

    #[test]
    fn f_strides() {
        assert_eq!(
            contiguous_strides(&[2, 3, 4], Layout::ColumnMajor),
            vec![1, 2, 6]
        );
    }

    #[test]
    fn span_of_strided_dims() {
        // 3x2 window over a 3x4 parent, row-major parent strides
        assert_eq!(required_span(&[3, 2], &[4, 1]), 10);
        assert_eq!(required_span(&[3, 0], &[4, 1]), 0);
    }
}
