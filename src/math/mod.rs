//! Dense matrix types used on the native side of the bridge.
//!
//! Provides the owned `Matrix` container plus `MatrixView`/`MatrixViewMut`
//! aliases over externally owned memory. Storage order is explicit per
//! instance so views can match whatever layout a foreign buffer carries.
pub mod matrix;

pub use matrix::{Layout, Matrix, MatrixView, MatrixViewMut, ShapeError};
