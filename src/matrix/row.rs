//! Borrowed row views into a matrix's backing vector.
//!
//! A view is just `(matrix, row)`; cell `j` of the view is backing index
//! `row * columns + j`. The row bound is checked when the view is made and
//! the borrow keeps the matrix from being reshaped while the view lives.

use std::fmt;
use std::ops::Index;

use crate::core::traits::{Backing, Element, ElementRead, ElementWrite, Indexing};
use crate::error::ElideError;
use crate::matrix::Matrix;
use crate::vector::{DenseVector, SparseVector};

/// Read-only view of one matrix row.
#[derive(Debug)]
pub struct Row<'a, T: Element, B: Backing<T>> {
    matrix: &'a Matrix<T, B>,
    index: usize,
}

impl<T: Element, B: Backing<T>> Clone for Row<'_, T, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element, B: Backing<T>> Copy for Row<'_, T, B> {}

impl<'a, T: Element, B: Backing<T>> Row<'a, T, B> {
    pub(crate) fn new(matrix: &'a Matrix<T, B>, index: usize) -> Self {
        Self { matrix, index }
    }

    /// Row number within the matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.matrix.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, j: usize) -> Result<T, ElideError> {
        self.matrix.get(self.index, j)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let backing = self.matrix.backing();
        let start = self.index * self.matrix.columns();
        (start..start + self.matrix.columns()).map(move |k| backing[k])
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Owned dense copy of the row.
    pub fn to_dense(&self) -> DenseVector<T> {
        DenseVector::from_vec(self.to_vec())
    }

    /// Owned compressed copy of the row.
    pub fn to_sparse(&self) -> SparseVector<T> {
        SparseVector::from_vec(self.to_vec())
    }
}

impl<T: Element, B: Backing<T>> Index<usize> for Row<'_, T, B> {
    type Output = T;
    fn index(&self, j: usize) -> &T {
        &self.matrix[(self.index, j)]
    }
}

impl<T: Element, B: Backing<T>> Indexing for Row<'_, T, B> {
    fn len(&self) -> usize {
        self.matrix.columns()
    }
}

impl<T: Element, B: Backing<T>> ElementRead<T> for Row<'_, T, B> {
    fn get(&self, j: usize) -> Result<T, ElideError> {
        Row::get(self, j)
    }
}

impl<T: Element, B: Backing<T>> fmt::Display for Row<'_, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for v in self.iter() {
            write!(f, "{} ", v)?;
        }
        write!(f, "}}")
    }
}

/// Mutable view of one matrix row. Writes go straight to the backing vector.
#[derive(Debug)]
pub struct RowMut<'a, T: Element, B: Backing<T>> {
    matrix: &'a mut Matrix<T, B>,
    index: usize,
}

impl<'a, T: Element, B: Backing<T>> RowMut<'a, T, B> {
    pub(crate) fn new(matrix: &'a mut Matrix<T, B>, index: usize) -> Self {
        Self { matrix, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.matrix.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, j: usize) -> Result<T, ElideError> {
        self.matrix.get(self.index, j)
    }

    pub fn set(&mut self, j: usize, value: T) -> Result<(), ElideError> {
        self.matrix.set(self.index, j, value)
    }

    /// Reborrow as a read-only view.
    pub fn as_row(&self) -> Row<'_, T, B> {
        Row::new(&*self.matrix, self.index)
    }

    pub fn fill(&mut self, value: T) -> Result<(), ElideError> {
        for j in 0..self.len() {
            self.set(j, value)?;
        }
        Ok(())
    }

    /// Overwrite the row with `values`, which must be exactly one row long.
    pub fn assign<R: ElementRead<T> + ?Sized>(&mut self, values: &R) -> Result<(), ElideError> {
        let values = self.checked_values(values)?;
        let start = self.start();
        let backing = self.matrix.backing_mut();
        for (j, v) in values.into_iter().enumerate() {
            backing.set(start + j, v)?;
        }
        Ok(())
    }

    /// Element-wise `row += values`.
    pub fn add_assign<R: ElementRead<T> + ?Sized>(&mut self, values: &R) -> Result<(), ElideError> {
        self.zip_assign(values, |a, b| a + b)
    }

    /// Element-wise `row -= values`.
    pub fn sub_assign<R: ElementRead<T> + ?Sized>(&mut self, values: &R) -> Result<(), ElideError> {
        self.zip_assign(values, |a, b| a - b)
    }

    /// Multiply every cell of the row by `k`.
    pub fn scale(&mut self, k: T) -> Result<(), ElideError> {
        let start = self.start();
        let columns = self.len();
        let backing = self.matrix.backing_mut();
        for at in start..start + columns {
            let v = backing[at];
            backing.set(at, v * k)?;
        }
        Ok(())
    }

    fn zip_assign<R, F>(&mut self, values: &R, op: F) -> Result<(), ElideError>
    where
        R: ElementRead<T> + ?Sized,
        F: Fn(T, T) -> T,
    {
        let values = self.checked_values(values)?;
        let start = self.start();
        let backing = self.matrix.backing_mut();
        for (j, v) in values.into_iter().enumerate() {
            let cur = backing[start + j];
            backing.set(start + j, op(cur, v))?;
        }
        Ok(())
    }

    fn checked_values<R: ElementRead<T> + ?Sized>(&self, values: &R) -> Result<Vec<T>, ElideError> {
        if values.len() != self.len() {
            return Err(ElideError::SizeMismatch { left: self.len(), right: values.len() });
        }
        values.values()
    }

    fn start(&self) -> usize {
        self.index * self.matrix.columns()
    }
}

impl<T: Element, B: Backing<T>> Indexing for RowMut<'_, T, B> {
    fn len(&self) -> usize {
        self.matrix.columns()
    }
}

impl<T: Element, B: Backing<T>> ElementRead<T> for RowMut<'_, T, B> {
    fn get(&self, j: usize) -> Result<T, ElideError> {
        RowMut::get(self, j)
    }
}

impl<T: Element, B: Backing<T>> ElementWrite<T> for RowMut<'_, T, B> {
    fn set(&mut self, j: usize, value: T) -> Result<(), ElideError> {
        RowMut::set(self, j, value)
    }
}
