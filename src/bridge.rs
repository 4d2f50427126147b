//! Conversions between native matrices and host array buffers.
//!
//! `export` copies a matrix out into a freshly allocated buffer the host
//! side owns outright. `import` goes the other way without copying: it
//! maps the buffer's memory as a matrix view after validating element
//! type, rank, and contiguity. Validation is fail-fast; there is no
//! partial conversion and no fallback layout.
use log::{debug, trace};

use crate::buffer::{ArrayBuf, DType};
use crate::error::BridgeError;
use crate::math::{Layout, Matrix, MatrixView, MatrixViewMut};

/// Copy a matrix into a new rank-2 `f32` buffer.
///
/// The buffer is contiguous in the matrix's own storage order, so a
/// subsequent [`import`] always accepts it. The caller receives sole
/// ownership; no aliasing with the source survives the call.
pub fn export(mat: &Matrix) -> ArrayBuf {
    trace!(
        "exporting {}x{} {} matrix",
        mat.nrows(),
        mat.ncols(),
        mat.layout()
    );
    ArrayBuf::from_vec_f32(
        &[mat.nrows(), mat.ncols()],
        mat.as_slice().to_vec(),
        mat.layout(),
    )
    .expect("matrix storage length always matches its shape")
}

/// Map an array buffer as a read-only matrix view without copying.
///
/// Checks, in order: elements must be `f32`, rank must be 1 or 2, and the
/// data must be contiguous in Fortran or C order. A rank-1 buffer of
/// length n becomes a column vector of shape (n, 1). The view borrows the
/// buffer, so the buffer outlives every use of it by construction.
pub fn import(buf: &ArrayBuf) -> Result<MatrixView<'_>, BridgeError> {
    let data = buf
        .as_f32()
        .ok_or(BridgeError::TypeMismatch { found: buf.dtype() })?;
    let (rows, cols, layout) = resolve_shape(buf)?;
    let view = MatrixView::from_raw(&data[..rows * cols], rows, cols, layout)
        .expect("contiguous buffer holds exactly rows * cols elements");
    Ok(view)
}

/// Mutable variant of [`import`]: writes through the returned view land
/// in the buffer. Taking `&mut ArrayBuf` makes the aliasing exclusive for
/// the lifetime of the view.
pub fn import_mut(buf: &mut ArrayBuf) -> Result<MatrixViewMut<'_>, BridgeError> {
    if buf.dtype() != DType::F32 {
        return Err(BridgeError::TypeMismatch { found: buf.dtype() });
    }
    let (rows, cols, layout) = resolve_shape(buf)?;
    let data = match buf.as_f32_mut() {
        Some(data) => data,
        None => unreachable!("dtype checked above"),
    };
    let view = MatrixViewMut::from_raw(&mut data[..rows * cols], rows, cols, layout)
        .expect("contiguous buffer holds exactly rows * cols elements");
    Ok(view)
}

/// Resolve the matrix shape and storage order of a buffer, rejecting
/// unsupported ranks and non-contiguous layouts.
///
/// Fortran order is preferred when a buffer satisfies both contiguity
/// predicates (rank-1 and degenerate rank-2 buffers); either choice views
/// the same bytes.
fn resolve_shape(buf: &ArrayBuf) -> Result<(usize, usize, Layout), BridgeError> {
    let (rows, cols) = match *buf.dims() {
        [len] => (len, 1),
        [rows, cols] => (rows, cols),
        _ => {
            debug!("rejecting buffer of rank {}", buf.rank());
            return Err(BridgeError::UnsupportedRank { rank: buf.rank() });
        }
    };

    let layout = if buf.is_f_contiguous() {
        Layout::ColumnMajor
    } else if buf.is_c_contiguous() {
        Layout::RowMajor
    } else {
        debug!(
            "rejecting buffer with extents {:?} and strides {:?}",
            buf.dims(),
            buf.strides()
        );
        return Err(BridgeError::NonContiguousLayout);
    };

    Ok((rows, cols, layout))
}
