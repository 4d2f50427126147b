use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Memory order of a dense matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    RowMajor,
    ColumnMajor,
}

impl Layout {
    /// Element strides `(row_stride, col_stride)` of a contiguous
    /// `rows x cols` matrix stored in this order.
    #[inline]
    pub fn contiguous_strides(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Layout::RowMajor => (cols, 1),
            Layout::ColumnMajor => (1, rows),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        if cfg!(feature = "row-major") {
            Layout::RowMajor
        } else {
            Layout::ColumnMajor
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::RowMajor => write!(f, "row-major"),
            Layout::ColumnMajor => write!(f, "column-major"),
        }
    }
}

/// Owned dense `f32` matrix with contiguous storage.
///
/// Storage order is fixed per instance; the crate-wide default is
/// column-major unless the `row-major` feature is enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl Matrix {
    /// Build a matrix from a linear buffer in the default storage order.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f32>) -> Result<Self, ShapeError> {
        Self::from_shape_vec_in(shape, data, Layout::default())
    }

    /// Build a matrix from a linear buffer interpreted in `layout` order.
    pub fn from_shape_vec_in(
        shape: (usize, usize),
        data: Vec<f32>,
        layout: Layout,
    ) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            layout,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
            layout: Layout::default(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        let (row_stride, col_stride) = self.layout.contiguous_strides(self.rows, self.cols);
        row * row_stride + col * col_stride
    }

    pub fn view(&self) -> MatrixView<'_> {
        MatrixView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
        }
    }

    pub fn column(&self, col: usize) -> Vec<f32> {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f32) -> f32,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
        }
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

/// Non-owning alias over externally owned matrix memory.
///
/// The backing buffer must stay alive and unchanged in shape for as long
/// as the view is used; the borrow checker enforces this.
#[derive(Clone, Copy, Debug)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl<'a> MatrixView<'a> {
    /// Map `rows x cols` elements of `data`, interpreted in `layout`
    /// order, as a matrix. No copy is made.
    pub fn from_raw(
        data: &'a [f32],
        rows: usize,
        cols: usize,
        layout: Layout,
    ) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            layout,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        let (row_stride, col_stride) = self.layout.contiguous_strides(self.rows, self.cols);
        row * row_stride + col * col_stride
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[self.offset(row, col)]
    }

    /// Copy the viewed elements out into an owned matrix, preserving
    /// shape and storage order.
    pub fn to_owned(&self) -> Matrix {
        Matrix {
            data: self.data.to_vec(),
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
        }
    }
}

impl Index<(usize, usize)> for MatrixView<'_> {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

/// Mutable counterpart of [`MatrixView`]; writes land in the backing
/// buffer.
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f32],
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl<'a> MatrixViewMut<'a> {
    pub fn from_raw(
        data: &'a mut [f32],
        rows: usize,
        cols: usize,
        layout: Layout,
    ) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            layout,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        let (row_stride, col_stride) = self.layout.contiguous_strides(self.rows, self.cols);
        row * row_stride + col * col_stride
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[self.offset(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let offset = self.offset(row, col);
        self.data[offset] = value;
    }

    pub fn to_owned(&self) -> Matrix {
        Matrix {
            data: self.data.to_vec(),
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
        }
    }
}

impl Index<(usize, usize)> for MatrixViewMut<'_> {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for MatrixViewMut<'_> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
