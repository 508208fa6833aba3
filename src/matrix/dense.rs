//! Dense-buffer side of the matrix API.
//!
//! Slice access for `DenseMatrix`, conversion to and from `faer::Mat` for
//! float element types, and (with the `rayon` feature) a row-parallel
//! product that works on densified copies of any backing.

use faer::Mat;
use num_traits::Float;

use crate::core::traits::{Backing, Element};
use crate::error::ElideError;
use crate::matrix::{DenseMatrix, Matrix};
use crate::vector::DenseVector;

impl<T: Element> DenseMatrix<T> {
    /// Row-major cells.
    pub fn as_slice(&self) -> &[T] {
        self.backing().as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.backing_mut().as_mut_slice()
    }
}

impl<T: Element + Float, B: Backing<T>> Matrix<T, B> {
    /// Copy into a column-major `faer::Mat`.
    pub fn to_faer(&self) -> Mat<T> {
        let columns = self.columns();
        let values = self.backing().to_vec();
        Mat::from_fn(self.rows(), columns, |i, j| values[i * columns + j])
    }

    /// Build from a `faer::Mat`; a matrix with no columns is rejected.
    pub fn from_faer(m: &Mat<T>) -> Result<Self, ElideError> {
        let (nrows, ncols) = (m.nrows(), m.ncols());
        let mut values = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                values.push(m[(i, j)]);
            }
        }
        Self::from_flat(ncols, values)
    }
}

impl<T: Element + Float> From<&DenseVector<T>> for Mat<T> {
    /// Column vector.
    fn from(v: &DenseVector<T>) -> Self {
        Mat::from_fn(v.len(), 1, |i, _| v[i])
    }
}

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
impl<T: Element + Send + Sync, B: Backing<T>> Matrix<T, B> {
    /// Parallel matrix product using Rayon, one task per result row.
    pub fn multiply_parallel<B2: Backing<T>>(&self, other: &Matrix<T, B2>) -> Result<Self, ElideError> {
        let (p, q, r) = self.product_shape(other)?;
        let a = self.backing().to_vec();
        let b = other.backing().to_vec();
        let mut out = vec![T::zero(); p * r];
        out.par_chunks_mut(r).enumerate().for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum = T::zero();
                for k in 0..q {
                    sum = sum + a[i * q + k] * b[k * r + j];
                }
                *cell = sum;
            }
        });
        Ok(Matrix::from_parts(r, self.backing().derive(out)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SparseMatrix;

    #[test]
    fn faer_round_trip() {
        let m = DenseMatrix::from_flat(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let f = m.to_faer();
        assert_eq!((f.nrows(), f.ncols()), (2, 3));
        assert_eq!(f[(1, 0)], 4.0);
        let back = SparseMatrix::from_faer(&f).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn slice_access() {
        let mut m = DenseMatrix::from_flat(2, vec![1, 2, 3, 4]).unwrap();
        m.as_mut_slice()[3] = 9;
        assert_eq!(m.as_slice(), &[1, 2, 3, 9]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_product_matches_serial() {
        let a = SparseMatrix::from_flat(3, vec![1, 0, 0, 0, 2, 0, 3, 0, 0, 0, 0, 4]).unwrap();
        let b = DenseMatrix::from_flat(2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(a.multiply_parallel(&b).unwrap(), a.multiply(&b).unwrap());
        assert!(b.multiply_parallel(&b).is_err());
    }
}
