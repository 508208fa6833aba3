//! Tests for row-major matrices over both backings: shape invariants under
//! mutation, multiplication against a faer reference, and compression
//! surviving a reshape.

use approx::assert_abs_diff_eq;
use elide::{DenseMatrix, DenseVector, ElideError, SparseMatrix, SparseVector};
use faer::Mat;
use rand::Rng;

fn random_matrix(rows: usize, columns: usize) -> (Vec<f64>, DenseMatrix<f64>) {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..rows * columns).map(|_| rng.r#gen()).collect();
    let m = DenseMatrix::from_flat(columns, data.clone()).unwrap();
    (data, m)
}

/// The product must match `sum_k A[i][k] * B[k][j]` computed by faer.
#[test]
fn multiply_random_matches_faer() {
    let (p, q, r) = (4, 5, 3);
    let (_, a) = random_matrix(p, q);
    let (_, b) = random_matrix(q, r);
    let c = a.multiply(&b).unwrap();
    assert_eq!(c.shape(), (p, r));
    let reference = &a.to_faer() * &b.to_faer();
    for i in 0..p {
        for j in 0..r {
            assert_abs_diff_eq!(c.get(i, j).unwrap(), reference[(i, j)], epsilon = 1e-12);
        }
    }
    // a sparse-backed left operand gives the same answer
    let c_sparse = a.to_sparse().multiply(&b).unwrap();
    for i in 0..p {
        for j in 0..r {
            assert_abs_diff_eq!(c_sparse.get(i, j).unwrap(), c[(i, j)], epsilon = 1e-12);
        }
    }
}

#[test]
fn from_faer_keeps_layout() {
    let f = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    let m = DenseMatrix::from_faer(&f).unwrap();
    assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let g: Mat<f64> = (&DenseVector::from_vec(vec![1.0, 2.0])).into();
    assert_eq!((g.nrows(), g.ncols()), (2, 1));
}

/// `rows * columns == backing length` after any mix of row operations.
#[test]
fn shape_invariant_under_random_mutation() {
    let mut rng = rand::thread_rng();
    let mut m = SparseMatrix::<i32>::new(2, 3).unwrap();
    for _ in 0..200 {
        let row = SparseVector::from_vec((0..3).map(|_| rng.gen_range(0..3)).collect());
        let result = match rng.gen_range(0..6) {
            0 => m.push_back(&row),
            1 => m.push_front(&row),
            2 => {
                let at = rng.gen_range(0..=m.rows());
                m.insert(&row, at)
            }
            3 if m.rows() > 0 => {
                let at = rng.gen_range(0..m.rows());
                m.erase(at)
            }
            4 => m.resize(rng.gen_range(0..6)),
            _ => {
                m.do_sparse();
                Ok(())
            }
        };
        result.unwrap();
        assert_eq!(m.rows() * m.columns(), m.len());
        assert_eq!(m.backing().len(), m.len());
    }
}

#[test]
fn rows_fold_into_one_compressed_row() {
    let rows = [
        DenseVector::from_vec(vec![1, 2, 2]),
        DenseVector::from_vec(vec![4, 5, 6]),
        DenseVector::from_vec(vec![7, 8, 9]),
    ];
    let mut m = SparseMatrix::from_rows(3, &rows).unwrap();
    m.reshape(9).unwrap();
    assert_eq!(m.shape(), (1, 9));
    assert_eq!(m.frequent(), Some(2));
    assert_eq!(m.amount(), 7);
    assert!(m.sparse());
    let row = m.row(0).unwrap();
    assert_eq!(row[2], 2);
    assert_eq!(row[3], 4);
    assert_eq!(m.backing(), &SparseVector::from_slice(&[1, 2, 2, 4, 5, 6, 7, 8, 9]));
}

#[test]
fn rejected_operations_leave_matrix_unchanged() {
    let mut m = SparseMatrix::from_flat(2, vec![0, 0, 3, 0]).unwrap();
    let before = m.clone();
    assert_eq!(
        m.push_back(&DenseVector::from_vec(vec![1, 2, 3])),
        Err(ElideError::RowShapeMismatch { expected: 2, found: 3 })
    );
    assert_eq!(m.erase(2), Err(ElideError::IndexOutOfRange { index: 2, len: 2 }));
    assert_eq!(m.reshape(3), Err(ElideError::BadShape { len: 4, columns: 3 }));
    assert_eq!(m.reshape(0), Err(ElideError::ZeroColumns));
    assert!(m.row(2).is_err());
    assert_eq!(m, before);
    assert!(m.sparse());
}

#[test]
fn merge_appends_rows() {
    let mut a = SparseMatrix::from_flat(2, vec![1, 1]).unwrap();
    let b = DenseMatrix::from_flat(2, vec![2, 3, 4, 5]).unwrap();
    a.merge(&b).unwrap();
    assert_eq!(a.shape(), (3, 2));
    assert_eq!(a.row(2).unwrap().to_vec(), vec![4, 5]);
    assert_eq!(a, DenseMatrix::from_flat(2, vec![1, 1, 2, 3, 4, 5]).unwrap());
}
