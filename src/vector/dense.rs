//! Dense vector: one physical slot per logical element.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::core::traits::{Backing, CompoundAssign, Element, ElementRead, ElementWrite, Indexing};
use crate::error::ElideError;
use crate::vector::SparseVector;

/// Fixed-length element buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVector<T> {
    data: Vec<T>,
}

impl<T: Element> DenseVector<T> {
    /// `len` zeros.
    pub fn new(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    pub fn filled(len: usize, value: T) -> Self {
        Self { data: vec![value; len] }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self { data: values.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied()
    }

    pub fn get(&self, i: usize) -> Result<T, ElideError> {
        self.data
            .get(i)
            .copied()
            .ok_or(ElideError::IndexOutOfRange { index: i, len: self.len() })
    }

    pub fn set(&mut self, i: usize, value: T) -> Result<(), ElideError> {
        let len = self.len();
        match self.data.get_mut(i) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ElideError::IndexOutOfRange { index: i, len }),
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Inner product.
    pub fn dot(&self, other: &Self) -> Result<T, ElideError> {
        check_len(self.len(), other.len())?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y))
    }

    /// Copy into a compressed vector.
    pub fn to_sparse(&self) -> SparseVector<T> {
        SparseVector::from_slice(&self.data)
    }
}

fn check_len(left: usize, right: usize) -> Result<(), ElideError> {
    if left != right {
        return Err(ElideError::SizeMismatch { left, right });
    }
    Ok(())
}

impl<T: Element> From<Vec<T>> for DenseVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Element> From<&SparseVector<T>> for DenseVector<T> {
    fn from(v: &SparseVector<T>) -> Self {
        Self::from_vec(v.to_vec())
    }
}

impl<T: Element> FromIterator<T> for DenseVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl<T> AsRef<[T]> for DenseVector<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<usize> for DenseVector<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for DenseVector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Element> PartialEq<SparseVector<T>> for DenseVector<T> {
    fn eq(&self, other: &SparseVector<T>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Element> fmt::Display for DenseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{{ ", self.len())?;
        for x in &self.data {
            write!(f, "{} ", x)?;
        }
        write!(f, "}}")
    }
}

impl<T: Element> Indexing for DenseVector<T> {
    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T: Element> ElementRead<T> for DenseVector<T> {
    fn get(&self, i: usize) -> Result<T, ElideError> {
        DenseVector::get(self, i)
    }

    fn values(&self) -> Result<Vec<T>, ElideError> {
        Ok(self.data.clone())
    }
}

impl<T: Element> ElementWrite<T> for DenseVector<T> {
    fn set(&mut self, i: usize, value: T) -> Result<(), ElideError> {
        DenseVector::set(self, i, value)
    }
}

impl<T: Element> CompoundAssign<T> for DenseVector<T> {
    fn add_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        check_len(self.len(), rhs.len())?;
        for (x, &y) in self.data.iter_mut().zip(&rhs.data) {
            *x = *x + y;
        }
        Ok(())
    }

    fn sub_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        check_len(self.len(), rhs.len())?;
        for (x, &y) in self.data.iter_mut().zip(&rhs.data) {
            *x = *x - y;
        }
        Ok(())
    }

    fn scale(&mut self, k: T) {
        self.data.iter_mut().for_each(|x| *x = *x * k);
    }

    fn divide(&mut self, k: T) -> Result<(), ElideError> {
        if k.is_zero() {
            return Err(ElideError::DivideByZero);
        }
        self.data.iter_mut().for_each(|x| *x = *x / k);
        Ok(())
    }
}

impl<T: Element> Backing<T> for DenseVector<T> {
    fn from_values(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }

    fn splice(&mut self, at: usize, values: &[T]) -> Result<(), ElideError> {
        if at > self.len() {
            return Err(ElideError::IndexOutOfRange { index: at, len: self.len() });
        }
        self.data.splice(at..at, values.iter().copied());
        Ok(())
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), ElideError> {
        if start > end || end > self.len() {
            return Err(ElideError::IndexOutOfRange { index: end, len: self.len() });
        }
        self.data.drain(start..end);
        Ok(())
    }

    fn resize(&mut self, len: usize, fill: T) {
        self.data.resize(len, fill);
    }

    fn densify(&mut self) {}

    fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_access() {
        let mut v = DenseVector::from_vec(vec![1, 2, 3]);
        assert_eq!(v.get(2), Ok(3));
        assert_eq!(v.get(3), Err(ElideError::IndexOutOfRange { index: 3, len: 3 }));
        v.set(0, 9).unwrap();
        assert_eq!(v[0], 9);
        assert!(v.set(5, 1).is_err());
        assert_eq!(v.as_slice(), &[9, 2, 3]);
    }

    #[test]
    fn dot_product() {
        let x = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DenseVector::from_vec(vec![4.0, -5.0, 6.0]);
        assert_eq!(x.dot(&y), Ok(12.0));
        assert!(x.dot(&DenseVector::new(2)).is_err());
    }

    #[test]
    fn compound_assign_validates_before_mutating() {
        let mut a = DenseVector::from_vec(vec![1, 2, 3]);
        let b = DenseVector::from_vec(vec![1, 1]);
        assert_eq!(a.add_assign_checked(&b), Err(ElideError::SizeMismatch { left: 3, right: 2 }));
        assert_eq!(a.divide(0), Err(ElideError::DivideByZero));
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        a.scale(3);
        assert_eq!(a.as_slice(), &[3, 6, 9]);
    }

    #[test]
    fn backing_splice_and_remove() {
        let mut v = DenseVector::from_vec(vec![1, 2, 3]);
        v.splice(1, &[7, 8]).unwrap();
        assert_eq!(v.as_slice(), &[1, 7, 8, 2, 3]);
        v.remove_range(0, 2).unwrap();
        assert_eq!(v.as_slice(), &[8, 2, 3]);
        assert!(v.remove_range(2, 4).is_err());
        Backing::resize(&mut v, 5, 0);
        assert_eq!(v.as_slice(), &[8, 2, 3, 0, 0]);
    }

    #[test]
    fn equals_sparse_with_same_content() {
        let d = DenseVector::from_vec(vec![4, 4, 1, 4]);
        let s = d.to_sparse();
        assert!(s.sparse());
        assert_eq!(d, s);
        assert_eq!(DenseVector::from(&s), d);
    }
}
