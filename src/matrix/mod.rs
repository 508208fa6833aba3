//! Matrix module: row-major matrices over a flat backing vector.
//!
//! A [`Matrix`] owns one backing vector of length `rows * columns` and a
//! fixed column count. Row access hands out borrowed [`Row`] / [`RowMut`]
//! views into that vector, so a view can never outlive a resize or erase
//! of its matrix. Compression lives entirely in the backing type; the
//! matrix only forwards to it.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Index, Mul, Sub};

use log::debug;

use crate::core::traits::{Backing, CompoundAssign, Element, ElementRead, ElementWrite, Indexing};
use crate::error::ElideError;
use crate::vector::{DenseVector, SparseVector};

pub mod dense;
pub mod row;
pub mod sparse;

pub use row::{Row, RowMut};

/// Matrix backed by a plain dense buffer.
pub type DenseMatrix<T> = Matrix<T, DenseVector<T>>;
/// Matrix backed by a mode-compressed vector.
pub type SparseMatrix<T> = Matrix<T, SparseVector<T>>;

/// Row-major matrix over backing storage `B`.
#[derive(Clone, Debug)]
pub struct Matrix<T: Element, B: Backing<T>> {
    columns: usize,
    backing: B,
    _elem: PhantomData<T>,
}

impl<T: Element, B: Backing<T>> Matrix<T, B> {
    fn from_parts(columns: usize, backing: B) -> Self {
        Self { columns, backing, _elem: PhantomData }
    }

    /// `rows x columns` zeros.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ElideError> {
        Self::filled(rows, columns, T::zero())
    }

    /// `rows x columns` copies of `value`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Result<Self, ElideError> {
        let len = cell_count(rows, columns)?;
        let mut m = Self::from_parts(columns, B::from_values(vec![value; len]));
        m.backing.finish_construction();
        Ok(m)
    }

    /// Build from row-major `values`; the length must be a multiple of `columns`.
    pub fn from_flat(columns: usize, values: Vec<T>) -> Result<Self, ElideError> {
        if columns == 0 {
            return Err(ElideError::ZeroColumns);
        }
        if values.len() % columns != 0 {
            return Err(ElideError::BadShape { len: values.len(), columns });
        }
        let mut m = Self::from_parts(columns, B::from_values(values));
        m.backing.finish_construction();
        Ok(m)
    }

    /// Wrap an existing backing vector as it is, mode and options included.
    pub fn from_backing(columns: usize, backing: B) -> Result<Self, ElideError> {
        if columns == 0 {
            return Err(ElideError::ZeroColumns);
        }
        if backing.len() % columns != 0 {
            return Err(ElideError::BadShape { len: backing.len(), columns });
        }
        Ok(Self::from_parts(columns, backing))
    }

    /// Build from row vectors, each exactly `columns` long.
    pub fn from_rows<R: ElementRead<T>>(columns: usize, rows: &[R]) -> Result<Self, ElideError> {
        if columns == 0 {
            return Err(ElideError::ZeroColumns);
        }
        let mut values = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            if row.len() != columns {
                return Err(ElideError::RowShapeMismatch { expected: columns, found: row.len() });
            }
            values.extend(row.values()?);
        }
        let mut m = Self::from_parts(columns, B::from_values(values));
        m.backing.finish_construction();
        Ok(m)
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Result<Self, ElideError> {
        let len = cell_count(n, n)?;
        let mut values = vec![T::zero(); len];
        for i in 0..n {
            values[i * n + i] = T::one();
        }
        let mut m = Self::from_parts(n, B::from_values(values));
        m.backing.finish_construction();
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.backing.len() / self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backing.len() == 0
    }

    /// The flat row-major backing vector.
    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn into_backing(self) -> B {
        self.backing
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T, ElideError> {
        let at = self.offset(i, j)?;
        self.backing.get(at)
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<(), ElideError> {
        let at = self.offset(i, j)?;
        self.backing.set(at, value)
    }

    /// Read view of row `i`.
    pub fn row(&self, i: usize) -> Result<Row<'_, T, B>, ElideError> {
        self.check_row(i)?;
        Ok(Row::new(self, i))
    }

    /// Write view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> Result<RowMut<'_, T, B>, ElideError> {
        self.check_row(i)?;
        Ok(RowMut::new(self, i))
    }

    /// Read views of every row, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = Row<'_, T, B>> + '_ {
        (0..self.rows()).map(move |i| Row::new(self, i))
    }

    /// Grow or shrink to `rows`, zero-filling new rows. Decompresses.
    pub fn resize(&mut self, rows: usize) -> Result<(), ElideError> {
        let len = cell_count(rows, self.columns)?;
        debug!("resize: {}x{} -> {}x{}", self.rows(), self.columns, rows, self.columns);
        self.backing.resize(len, T::zero());
        Ok(())
    }

    /// Reinterpret the backing vector with `columns` per row.
    ///
    /// The backing vector is untouched, so compression survives.
    pub fn reshape(&mut self, columns: usize) -> Result<(), ElideError> {
        if columns == 0 {
            return Err(ElideError::ZeroColumns);
        }
        if self.backing.len() % columns != 0 {
            return Err(ElideError::BadShape { len: self.backing.len(), columns });
        }
        debug!("reshape: columns {} -> {}", self.columns, columns);
        self.columns = columns;
        Ok(())
    }

    /// Append `row` at the bottom.
    pub fn push_back<R: ElementRead<T> + ?Sized>(&mut self, row: &R) -> Result<(), ElideError> {
        self.insert(row, self.rows())
    }

    /// Prepend `row` at the top.
    pub fn push_front<R: ElementRead<T> + ?Sized>(&mut self, row: &R) -> Result<(), ElideError> {
        self.insert(row, 0)
    }

    /// Append `row` only if `accept` holds for every existing row.
    pub fn push_back_if<R, F>(&mut self, row: &R, accept: F) -> Result<bool, ElideError>
    where
        R: ElementRead<T> + ?Sized,
        F: Fn(&Row<'_, T, B>) -> bool,
    {
        if !self.rows_iter().all(|r| accept(&r)) {
            return Ok(false);
        }
        self.push_back(row)?;
        Ok(true)
    }

    /// Insert `row` before row `at`; `at == rows()` appends.
    pub fn insert<R: ElementRead<T> + ?Sized>(&mut self, row: &R, at: usize) -> Result<(), ElideError> {
        if at > self.rows() {
            return Err(ElideError::IndexOutOfRange { index: at, len: self.rows() });
        }
        let values = self.row_values(row)?;
        self.backing.splice(at * self.columns, &values)
    }

    /// Remove row `at`, shifting later rows up.
    pub fn erase(&mut self, at: usize) -> Result<(), ElideError> {
        self.check_row(at)?;
        let start = at * self.columns;
        self.backing.remove_range(start, start + self.columns)
    }

    /// Append every row of `other`; column counts must match.
    pub fn merge<B2: Backing<T>>(&mut self, other: &Matrix<T, B2>) -> Result<(), ElideError> {
        if other.columns != self.columns {
            return Err(ElideError::RowShapeMismatch { expected: self.columns, found: other.columns });
        }
        debug!("merge: {} rows onto {}x{}", other.rows(), self.rows(), self.columns);
        let values = other.backing.to_vec();
        self.backing.append(&values)
    }

    /// Matrix product `self * other`.
    ///
    /// Both operands are read as dense buffers; the result is left dense
    /// and keeps the receiver's storage policy.
    pub fn multiply<B2: Backing<T>>(&self, other: &Matrix<T, B2>) -> Result<Self, ElideError> {
        let (p, q, r) = self.product_shape(other)?;
        let a = self.backing.to_vec();
        let b = other.backing.to_vec();
        let mut out = vec![T::zero(); p * r];
        for i in 0..p {
            for j in 0..r {
                let mut sum = T::zero();
                for k in 0..q {
                    sum = sum + a[i * q + k] * b[k * r + j];
                }
                out[i * r + j] = sum;
            }
        }
        Ok(Self::from_parts(r, self.backing.derive(out)))
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let (rows, columns) = self.shape();
        let a = self.backing.to_vec();
        let mut out = Vec::with_capacity(a.len());
        for j in 0..columns {
            for i in 0..rows {
                out.push(a[i * columns + j]);
            }
        }
        // no rows means no zero-column transpose exists; stay 0 x columns
        let new_columns = if rows == 0 { columns } else { rows };
        Self::from_parts(new_columns, self.backing.derive(out))
    }

    /// Convert to a matrix over another backing type.
    pub fn convert<B2: Backing<T>>(&self) -> Matrix<T, B2> {
        let mut m = Matrix::from_parts(self.columns, B2::from_values(self.backing.to_vec()));
        m.backing.finish_construction();
        m
    }

    pub fn to_dense(&self) -> DenseMatrix<T> {
        self.convert()
    }

    pub fn to_sparse(&self) -> SparseMatrix<T> {
        self.convert()
    }

    pub(crate) fn product_shape<B2: Backing<T>>(
        &self,
        other: &Matrix<T, B2>,
    ) -> Result<(usize, usize, usize), ElideError> {
        if self.columns != other.rows() {
            return Err(ElideError::DimensionMismatch {
                left_columns: self.columns,
                right_rows: other.rows(),
            });
        }
        debug!(
            "multiply: {}x{} * {}x{}",
            self.rows(),
            self.columns,
            other.rows(),
            other.columns
        );
        Ok((self.rows(), self.columns, other.columns))
    }

    pub(crate) fn backing_mut(&mut self) -> &mut B {
        &mut self.backing
    }

    fn row_values<R: ElementRead<T> + ?Sized>(&self, row: &R) -> Result<Vec<T>, ElideError> {
        if row.len() != self.columns {
            return Err(ElideError::RowShapeMismatch { expected: self.columns, found: row.len() });
        }
        row.values()
    }

    fn check_row(&self, i: usize) -> Result<(), ElideError> {
        if i >= self.rows() {
            return Err(ElideError::IndexOutOfRange { index: i, len: self.rows() });
        }
        Ok(())
    }

    fn check_same_shape<B2: Backing<T>>(&self, other: &Matrix<T, B2>) -> Result<(), ElideError> {
        if self.shape() != other.shape() {
            return Err(ElideError::ShapeMismatch {
                left_rows: self.rows(),
                left_columns: self.columns,
                right_rows: other.rows(),
                right_columns: other.columns,
            });
        }
        Ok(())
    }

    fn offset(&self, i: usize, j: usize) -> Result<usize, ElideError> {
        self.check_row(i)?;
        if j >= self.columns {
            return Err(ElideError::IndexOutOfRange { index: j, len: self.columns });
        }
        Ok(i * self.columns + j)
    }
}

fn cell_count(rows: usize, columns: usize) -> Result<usize, ElideError> {
    if columns == 0 {
        return Err(ElideError::ZeroColumns);
    }
    rows.checked_mul(columns)
        .ok_or(ElideError::ShapeOverflow { rows, columns })
}

impl<T: Element, B: Backing<T>> CompoundAssign<T> for Matrix<T, B> {
    fn add_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        self.check_same_shape(rhs)?;
        self.backing.add_assign_checked(&rhs.backing)
    }

    fn sub_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        self.check_same_shape(rhs)?;
        self.backing.sub_assign_checked(&rhs.backing)
    }

    fn scale(&mut self, k: T) {
        self.backing.scale(k);
    }

    fn divide(&mut self, k: T) -> Result<(), ElideError> {
        self.backing.divide(k)
    }
}

impl<T: Element, B: Backing<T>, B2: Backing<T>> PartialEq<Matrix<T, B2>> for Matrix<T, B> {
    /// Same shape and the same logical value in every cell.
    fn eq(&self, other: &Matrix<T, B2>) -> bool {
        self.shape() == other.shape()
            && (0..self.backing.len()).all(|i| self.backing[i] == other.backing[i])
    }
}

impl<T: Element, B: Backing<T>> Index<(usize, usize)> for Matrix<T, B> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows() && j < self.columns,
            "cell ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.rows(),
            self.columns
        );
        &self.backing[i * self.columns + j]
    }
}

impl<T: Element, B: Backing<T>> fmt::Display for Matrix<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}][{}]", self.rows(), self.columns)?;
        for row in self.rows_iter() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// # Panics
/// Panics on mismatched shapes; use [`crate::core::Arithmetic::try_add`] to get an error instead.
impl<T: Element, B: Backing<T>> Add for &Matrix<T, B> {
    type Output = Matrix<T, B>;
    fn add(self, rhs: Self) -> Matrix<T, B> {
        let mut out = self.clone();
        if let Err(e) = out.add_assign_checked(rhs) {
            panic!("{}", e);
        }
        out
    }
}

/// # Panics
/// Panics on mismatched shapes; use [`crate::core::Arithmetic::try_sub`] to get an error instead.
impl<T: Element, B: Backing<T>> Sub for &Matrix<T, B> {
    type Output = Matrix<T, B>;
    fn sub(self, rhs: Self) -> Matrix<T, B> {
        let mut out = self.clone();
        if let Err(e) = out.sub_assign_checked(rhs) {
            panic!("{}", e);
        }
        out
    }
}

/// # Panics
/// Panics when the inner dimensions differ; use [`Matrix::multiply`] to get an error instead.
impl<T: Element, B: Backing<T>> Mul for &Matrix<T, B> {
    type Output = Matrix<T, B>;
    fn mul(self, rhs: Self) -> Matrix<T, B> {
        match self.multiply(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_fixture() -> Vec<DenseVector<i64>> {
        vec![
            DenseVector::from_vec(vec![1, 2, 2]),
            DenseVector::from_vec(vec![4, 5, 6]),
            DenseVector::from_vec(vec![7, 8, 9]),
        ]
    }

    #[test]
    fn construction_checks_shape() {
        assert_eq!(
            DenseMatrix::from_flat(4, vec![1, 2, 3]).unwrap_err(),
            ElideError::BadShape { len: 3, columns: 4 }
        );
        assert_eq!(DenseMatrix::<i32>::new(2, 0).unwrap_err(), ElideError::ZeroColumns);
        let bad = vec![DenseVector::from_vec(vec![1, 2]), DenseVector::from_vec(vec![1])];
        assert_eq!(
            DenseMatrix::from_rows(2, &bad).unwrap_err(),
            ElideError::RowShapeMismatch { expected: 2, found: 1 }
        );
        assert!(matches!(
            DenseMatrix::<u8>::new(usize::MAX, 2),
            Err(ElideError::ShapeOverflow { .. })
        ));
    }

    #[test]
    fn shape_and_cells() {
        let m = DenseMatrix::from_rows(3, &rows_fixture()).unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.get(1, 2), Ok(6));
        assert_eq!(m[(2, 0)], 7);
        assert_eq!(m.get(3, 0), Err(ElideError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(m.get(0, 3), Err(ElideError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn row_insert_and_erase() {
        let mut m = DenseMatrix::from_rows(3, &rows_fixture()).unwrap();
        m.push_front(&DenseVector::from_vec(vec![0, 0, 0])).unwrap();
        m.push_back(&DenseVector::from_vec(vec![9, 9, 9])).unwrap();
        m.insert(&DenseVector::from_vec(vec![3, 3, 3]), 2).unwrap();
        assert_eq!(m.rows(), 6);
        assert_eq!(
            m.backing().as_slice(),
            &[0, 0, 0, 1, 2, 2, 3, 3, 3, 4, 5, 6, 7, 8, 9, 9, 9, 9]
        );
        m.erase(0).unwrap();
        m.erase(4).unwrap();
        assert_eq!(m, DenseMatrix::from_flat(3, vec![1, 2, 2, 3, 3, 3, 4, 5, 6, 7, 8, 9]).unwrap());
        assert!(m.erase(4).is_err());
        assert!(m.insert(&DenseVector::from_vec(vec![1, 1, 1]), 5).is_err());
        assert_eq!(
            m.push_back(&DenseVector::from_vec(vec![1])),
            Err(ElideError::RowShapeMismatch { expected: 3, found: 1 })
        );
        assert_eq!(m.len() % m.columns(), 0);
    }

    #[test]
    fn resize_and_reshape() {
        let mut m = DenseMatrix::from_rows(3, &rows_fixture()).unwrap();
        m.resize(4).unwrap();
        assert_eq!(m.shape(), (4, 3));
        assert_eq!(m.row(3).unwrap().to_vec(), vec![0, 0, 0]);
        m.resize(1).unwrap();
        assert_eq!(m.backing().as_slice(), &[1, 2, 2]);
        m.reshape(1).unwrap();
        assert_eq!(m.shape(), (3, 1));
        assert_eq!(m.reshape(2), Err(ElideError::BadShape { len: 3, columns: 2 }));
        assert_eq!(m.shape(), (3, 1));
    }

    #[test]
    fn merge_requires_equal_columns() {
        let mut a = DenseMatrix::from_flat(2, vec![1, 2]).unwrap();
        let b = SparseMatrix::from_flat(2, vec![3, 3, 5, 3]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.backing().as_slice(), &[1, 2, 3, 3, 5, 3]);
        let c = DenseMatrix::from_flat(3, vec![0, 0, 0]).unwrap();
        assert_eq!(a.merge(&c), Err(ElideError::RowShapeMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn multiply_small() {
        let a = DenseMatrix::from_flat(3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = DenseMatrix::from_flat(2, vec![7, 8, 9, 10, 11, 12]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.backing().as_slice(), &[58, 64, 139, 154]);
        assert_eq!(&a * &b, c);
        assert_eq!(
            a.multiply(&a).unwrap_err(),
            ElideError::DimensionMismatch { left_columns: 3, right_rows: 2 }
        );
    }

    #[test]
    fn identity_and_transpose() {
        let a = DenseMatrix::from_flat(3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let i3 = DenseMatrix::identity(3).unwrap();
        assert_eq!(a.multiply(&i3).unwrap(), a);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.backing().as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = DenseMatrix::from_flat(2, vec![1, 2, 3, 4]).unwrap();
        let b = DenseMatrix::from_flat(2, vec![1, 1, 1, 1]).unwrap();
        assert_eq!((&a + &b).backing().as_slice(), &[2, 3, 4, 5]);
        assert_eq!((&a - &b).backing().as_slice(), &[0, 1, 2, 3]);
        let wide = DenseMatrix::from_flat(4, vec![1, 1, 1, 1]).unwrap();
        let mut c = a.clone();
        assert!(matches!(c.add_assign_checked(&wide), Err(ElideError::ShapeMismatch { .. })));
        c.scale(2);
        assert_eq!(c.backing().as_slice(), &[2, 4, 6, 8]);
        assert_eq!(c.divide(0), Err(ElideError::DivideByZero));
    }

    #[test]
    fn push_back_if_checks_every_row() {
        let mut m = DenseMatrix::from_flat(2, vec![1, 2, 3, 4]).unwrap();
        let row = DenseVector::from_vec(vec![5, 6]);
        assert_eq!(m.push_back_if(&row, |r| r[0] > 2), Ok(false));
        assert_eq!(m.rows(), 2);
        assert_eq!(m.push_back_if(&row, |r| r[0] > 0), Ok(true));
        assert_eq!(m.rows(), 3);
    }

    #[test]
    fn display_prints_shape_then_rows() {
        let m = DenseMatrix::from_flat(2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.to_string(), "[2][2]\n{ 1 2 }\n{ 3 4 }\n");
    }
}
