//! Integration tests for the Matrix container and its views.

use isa_bridge::math::{Layout, Matrix, MatrixView, MatrixViewMut};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn default_layout_matches_build() {
    if cfg!(feature = "row-major") {
        assert_eq!(Layout::default(), Layout::RowMajor);
    } else {
        assert_eq!(Layout::default(), Layout::ColumnMajor);
    }
}

#[test]
fn contiguous_strides_per_layout() {
    assert_eq!(Layout::RowMajor.contiguous_strides(3, 2), (2, 1));
    assert_eq!(Layout::ColumnMajor.contiguous_strides(3, 2), (1, 3));
}

// ---------------------------------------------------------------------------
// Matrix basics
// ---------------------------------------------------------------------------

#[test]
fn matrix_from_shape_vec() {
    let m = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(m.nrows(), 2);
    assert_eq!(m.ncols(), 3);
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.len(), 6);
    assert!(!m.is_empty());
}

#[test]
fn matrix_shape_mismatch_errors() {
    let result = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn matrix_zeros() {
    let m = Matrix::zeros(3, 2);
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.layout(), Layout::default());
    for v in m.as_slice() {
        assert_eq!(*v, 0.0);
    }
}

#[test]
fn matrix_indexing_row_major() {
    let m = Matrix::from_shape_vec_in(
        (2, 3),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        Layout::RowMajor,
    )
    .unwrap();
    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(0, 2)], 3.0);
    assert_eq!(m[(1, 0)], 4.0);
    assert_eq!(m[(1, 2)], 6.0);
}

#[test]
fn matrix_indexing_column_major() {
    // same logical matrix as above, stored column by column
    let m = Matrix::from_shape_vec_in(
        (2, 3),
        vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0],
        Layout::ColumnMajor,
    )
    .unwrap();
    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(0, 2)], 3.0);
    assert_eq!(m[(1, 0)], 4.0);
    assert_eq!(m[(1, 2)], 6.0);
}

#[test]
fn matrix_index_mut_writes_through_layout() {
    let mut m = Matrix::zeros(2, 2);
    m[(1, 0)] = 7.0;
    assert_eq!(m[(1, 0)], 7.0);
    assert_eq!(m.as_slice().iter().filter(|&&v| v == 7.0).count(), 1);
}

#[test]
fn matrix_column() {
    let m = Matrix::from_shape_vec_in(
        (3, 2),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        Layout::RowMajor,
    )
    .unwrap();
    assert_eq!(m.column(0), vec![1.0, 3.0, 5.0]);
    assert_eq!(m.column(1), vec![2.0, 4.0, 6.0]);
}

#[test]
fn matrix_mapv() {
    let m = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let neg = m.mapv(|x| -x);
    assert_eq!(neg.shape(), (2, 2));
    assert_eq!(neg.layout(), m.layout());
    assert_eq!(neg.to_vec(), vec![-1.0, -2.0, -3.0, -4.0]);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[test]
fn view_reads_like_the_matrix() {
    let m = Matrix::from_shape_vec_in(
        (2, 2),
        vec![1.0, 2.0, 3.0, 4.0],
        Layout::ColumnMajor,
    )
    .unwrap();
    let v = m.view();
    assert_eq!(v.shape(), m.shape());
    assert_eq!(v.layout(), m.layout());
    for row in 0..2 {
        for col in 0..2 {
            assert_eq!(v.get(row, col), m[(row, col)]);
        }
    }
}

#[test]
fn view_from_raw_rejects_bad_length() {
    let data = [1.0f32, 2.0, 3.0];
    assert!(MatrixView::from_raw(&data, 2, 2, Layout::RowMajor).is_err());
}

#[test]
fn view_to_owned_copies() {
    let data = [1.0f32, 2.0, 3.0, 4.0];
    let v = MatrixView::from_raw(&data, 2, 2, Layout::RowMajor).unwrap();
    let owned = v.to_owned();
    assert_eq!(owned.shape(), (2, 2));
    assert_eq!(owned.layout(), Layout::RowMajor);
    assert_eq!(owned.as_slice(), &data);
}

#[test]
fn view_mut_writes_into_backing_memory() {
    let mut data = vec![0.0f32; 6];
    {
        let mut v = MatrixViewMut::from_raw(&mut data, 3, 2, Layout::RowMajor).unwrap();
        v.set(2, 1, 9.0);
        v[(0, 0)] = 1.0;
    }
    assert_eq!(data[0], 1.0);
    assert_eq!(data[5], 9.0);
}
