//! Mode-compressed vector.
//!
//! A `SparseVector` stores its elements in a hash map from logical index to
//! value. In [`Mode::Dense`] every index `0..len` has an entry. In
//! [`Mode::Sparse`] the most frequent value is remembered once and every
//! entry equal to it is dropped from the map; an index without an entry
//! reads as that value.
//!
//! # Invariants
//! - Dense: the key set is exactly `0..len`.
//! - Sparse(f): keys are a subset of `0..len` and no stored value is
//!   bit-identical to `f`.
//! - `len` only changes through explicit length operations (`push_back`,
//!   `insert`, `erase`, `merge`, `resize`), never through `do_sparse` or
//!   `do_dense`.
//!
//! Every write decompresses first. Compression is never updated
//! incrementally; call [`SparseVector::do_sparse`] again when wanted, or
//! set the matching flag in [`SparseOptions`].

use std::fmt;
use std::ops::Index;

use fnv::FnvHashMap;
use log::trace;

use crate::config::SparseOptions;
use crate::core::traits::{Backing, CompoundAssign, Element, ElementRead, ElementWrite, Indexing};
use crate::error::ElideError;
use crate::utils::frequency::frequent;
use crate::vector::DenseVector;

/// Physical representation of a [`SparseVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<T> {
    /// One entry per logical index.
    Dense,
    /// Entries equal to the carried value are elided.
    Sparse(T),
}

/// Vector that can elide its most frequent value.
#[derive(Debug, Clone)]
pub struct SparseVector<T: Element> {
    len: usize,
    mode: Mode<T>,
    entries: FnvHashMap<usize, T>,
    options: SparseOptions,
}

impl<T: Element> Default for SparseVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> SparseVector<T> {
    /// Empty, dense vector with default options.
    pub fn new() -> Self {
        Self {
            len: 0,
            mode: Mode::Dense,
            entries: FnvHashMap::default(),
            options: SparseOptions::default(),
        }
    }

    /// `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_iter(std::iter::repeat_n(value, len))
    }

    /// `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self::from_iter(values.iter().copied())
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_iter(values)
    }

    /// Same content, with `options` in effect for later operations.
    ///
    /// Applies `compress_on_construct` immediately.
    pub fn with_options(mut self, options: SparseOptions) -> Self {
        self.options = options;
        if options.compress_on_construct {
            self.do_sparse();
        } else {
            self.do_dense();
        }
        self
    }

    pub fn options(&self) -> SparseOptions {
        self.options
    }

    /// Logical element count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical entry count.
    pub fn amount(&self) -> usize {
        self.entries.len()
    }

    pub fn mode(&self) -> Mode<T> {
        self.mode
    }

    /// Whether the vector is currently compressed.
    pub fn sparse(&self) -> bool {
        matches!(self.mode, Mode::Sparse(_))
    }

    /// The elided value, when compressed.
    pub fn frequent(&self) -> Option<T> {
        match self.mode {
            Mode::Sparse(f) => Some(f),
            Mode::Dense => None,
        }
    }

    /// Physical lookup: `None` when `i` has no entry.
    pub fn find(&self, i: usize) -> Option<T> {
        self.entries.get(&i).copied()
    }

    /// Physical `(index, value)` entries in index order.
    pub fn entries(&self) -> Vec<(usize, T)> {
        let mut out: Vec<_> = self.entries.iter().map(|(&i, &v)| (i, v)).collect();
        out.sort_unstable_by_key(|&(i, _)| i);
        out
    }

    /// Logical values in index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.logical(i))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn to_dense(&self) -> DenseVector<T> {
        DenseVector::from_vec(self.to_vec())
    }

    pub fn get(&self, i: usize) -> Result<T, ElideError> {
        self.check_index(i)?;
        Ok(self.logical(i))
    }

    /// Write `value` at `i`, decompressing first.
    pub fn set(&mut self, i: usize, value: T) -> Result<(), ElideError> {
        self.check_index(i)?;
        self.do_dense();
        self.entries.insert(i, value);
        Ok(())
    }

    /// Overwrite every element with `value`. Leaves the vector dense.
    pub fn fill(&mut self, value: T) {
        self.mode = Mode::Dense;
        self.entries.clear();
        self.entries.extend((0..self.len).map(|i| (i, value)));
    }

    /// Compress: drop every entry bit-identical to the most frequent value.
    ///
    /// Returns `false` without changes when already compressed or empty.
    pub fn do_sparse(&mut self) -> bool {
        if self.sparse() || self.len == 0 {
            return false;
        }
        let Ok(value) = frequent(self.iter()) else {
            return false;
        };
        self.entries.retain(|_, v| !v.same(value));
        self.mode = Mode::Sparse(value);
        trace!(
            "do_sparse: len={} amount={} frequent={:?}",
            self.len,
            self.entries.len(),
            value
        );
        true
    }

    /// Decompress: re-materialize every elided index.
    ///
    /// Returns `false` without changes when already dense.
    pub fn do_dense(&mut self) -> bool {
        let Mode::Sparse(value) = self.mode else {
            return false;
        };
        for i in 0..self.len {
            self.entries.entry(i).or_insert(value);
        }
        self.mode = Mode::Dense;
        trace!("do_dense: len={} frequent={:?}", self.len, value);
        true
    }

    /// Append one element. Leaves the vector dense.
    pub fn push_back(&mut self, value: T) {
        self.do_dense();
        self.entries.insert(self.len, value);
        self.len += 1;
    }

    /// Insert `value` at `i`, shifting later elements up. `i == len` appends.
    pub fn insert(&mut self, i: usize, value: T) -> Result<(), ElideError> {
        self.splice(i, &[value])
    }

    /// Insert `values` starting at logical position `at`.
    pub fn splice(&mut self, at: usize, values: &[T]) -> Result<(), ElideError> {
        if at > self.len {
            return Err(ElideError::IndexOutOfRange { index: at, len: self.len });
        }
        self.do_dense();
        let n = values.len();
        for k in (at..self.len).rev() {
            if let Some(v) = self.entries.remove(&k) {
                self.entries.insert(k + n, v);
            }
        }
        for (offset, &v) in values.iter().enumerate() {
            self.entries.insert(at + offset, v);
        }
        self.len += n;
        Ok(())
    }

    /// Remove index `i`, shifting later elements down. Leaves the vector dense.
    pub fn erase(&mut self, i: usize) -> Result<(), ElideError> {
        self.check_index(i)?;
        self.erase_range(i, i + 1)
    }

    /// Remove logical positions `start..end`, shifting later elements down.
    pub fn erase_range(&mut self, start: usize, end: usize) -> Result<(), ElideError> {
        if start > end || end > self.len {
            return Err(ElideError::IndexOutOfRange { index: end, len: self.len });
        }
        self.do_dense();
        let n = end - start;
        for k in start..end {
            self.entries.remove(&k);
        }
        for k in end..self.len {
            if let Some(v) = self.entries.remove(&k) {
                self.entries.insert(k - n, v);
            }
        }
        self.len -= n;
        Ok(())
    }

    /// Grow or shrink to `len`, filling new positions with `fill`.
    pub fn resize(&mut self, len: usize, fill: T) {
        self.do_dense();
        if len < self.len {
            self.entries.retain(|&k, _| k < len);
        } else {
            self.entries.extend((self.len..len).map(|k| (k, fill)));
        }
        self.len = len;
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.resize(len, T::zero());
        }
    }

    /// Append the logical content of `other`.
    pub fn merge<R: ElementRead<T> + ?Sized>(&mut self, other: &R) -> Result<(), ElideError> {
        let values = other.values()?;
        self.append_values(&values)
    }

    fn append_values(&mut self, values: &[T]) -> Result<(), ElideError> {
        self.splice(self.len, values)?;
        if self.options.resparsify_after_merge {
            self.do_sparse();
        }
        Ok(())
    }

    /// Compare logical content; vectors of different length are an error.
    pub fn try_eq<R: ElementRead<T> + ?Sized>(&self, other: &R) -> Result<bool, ElideError> {
        if self.len != other.len() {
            return Err(ElideError::SizeMismatch { left: self.len, right: other.len() });
        }
        for i in 0..self.len {
            if self.logical(i) != other.get(i)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Element-wise `self += other` against any readable container.
    pub fn add_assign_from<R: ElementRead<T> + ?Sized>(&mut self, other: &R) -> Result<(), ElideError> {
        self.zip_assign(other, |a, b| a + b)
    }

    /// Element-wise `self -= other` against any readable container.
    pub fn sub_assign_from<R: ElementRead<T> + ?Sized>(&mut self, other: &R) -> Result<(), ElideError> {
        self.zip_assign(other, |a, b| a - b)
    }

    fn zip_assign<R, F>(&mut self, other: &R, op: F) -> Result<(), ElideError>
    where
        R: ElementRead<T> + ?Sized,
        F: Fn(T, T) -> T,
    {
        if self.len != other.len() {
            return Err(ElideError::SizeMismatch { left: self.len, right: other.len() });
        }
        let rhs = other.values()?;
        self.do_dense();
        for (i, b) in rhs.into_iter().enumerate() {
            if let Some(a) = self.entries.get_mut(&i) {
                *a = op(*a, b);
            }
        }
        if self.options.resparsify_after_arith {
            self.do_sparse();
        }
        Ok(())
    }

    // Applies `op` to stored entries and, when compressed, to the elided
    // value too. Entries that collapse onto the new elided value are dropped.
    fn map_in_place<F: Fn(T) -> T>(&mut self, op: F) {
        self.entries.values_mut().for_each(|v| *v = op(*v));
        if let Mode::Sparse(f) = self.mode {
            let f = op(f);
            self.mode = Mode::Sparse(f);
            self.entries.retain(|_, v| !v.same(f));
        }
    }

    // Dense vector holding `values`, never compressed.
    fn materialized<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut v = Self::new();
        v.entries.extend(values.into_iter().enumerate());
        v.len = v.entries.len();
        v
    }

    fn check_index(&self, i: usize) -> Result<(), ElideError> {
        if i >= self.len {
            return Err(ElideError::IndexOutOfRange { index: i, len: self.len });
        }
        Ok(())
    }

    // Caller guarantees `i < len`.
    fn logical(&self, i: usize) -> T {
        match (self.entries.get(&i), self.mode) {
            (Some(&v), _) => v,
            (None, Mode::Sparse(f)) => f,
            (None, Mode::Dense) => T::zero(),
        }
    }
}

impl<T: Element> FromIterator<T> for SparseVector<T> {
    /// Literal construction: fill densely, then compress per the default options.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::materialized(iter);
        if v.options.compress_on_construct {
            v.do_sparse();
        }
        v
    }
}

impl<T: Element> From<Vec<T>> for SparseVector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Element> From<&DenseVector<T>> for SparseVector<T> {
    fn from(v: &DenseVector<T>) -> Self {
        v.to_sparse()
    }
}

impl<T: Element> PartialEq for SparseVector<T> {
    /// Logical comparison, independent of either side's mode.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.len).all(|i| self.logical(i) == other.logical(i))
    }
}

impl<T: Element> PartialEq<DenseVector<T>> for SparseVector<T> {
    fn eq(&self, other: &DenseVector<T>) -> bool {
        other == self
    }
}

impl<T: Element> Index<usize> for SparseVector<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        if i >= self.len {
            panic!("index {} out of range for length {}", i, self.len);
        }
        match (self.entries.get(&i), &self.mode) {
            (Some(v), _) => v,
            (None, Mode::Sparse(f)) => f,
            (None, Mode::Dense) => unreachable!("dense vector is missing index {}", i),
        }
    }
}

impl<T: Element> fmt::Display for SparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sparse() {
            write!(f, "sparse : [{}]{{ ", self.amount())?;
            for (_, v) in self.entries() {
                write!(f, "{} ", v)?;
            }
            writeln!(f, "}}")?;
        }
        write!(f, "[{}]{{ ", self.len)?;
        for v in self.iter() {
            write!(f, "{} ", v)?;
        }
        write!(f, "}}")
    }
}

impl<T: Element> Indexing for SparseVector<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Element> ElementRead<T> for SparseVector<T> {
    fn get(&self, i: usize) -> Result<T, ElideError> {
        SparseVector::get(self, i)
    }

    fn values(&self) -> Result<Vec<T>, ElideError> {
        Ok(self.to_vec())
    }
}

impl<T: Element> ElementWrite<T> for SparseVector<T> {
    fn set(&mut self, i: usize, value: T) -> Result<(), ElideError> {
        SparseVector::set(self, i, value)
    }
}

impl<T: Element> CompoundAssign<T> for SparseVector<T> {
    fn add_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        self.add_assign_from(rhs)
    }

    fn sub_assign_checked(&mut self, rhs: &Self) -> Result<(), ElideError> {
        self.sub_assign_from(rhs)
    }

    /// Scales stored entries and the elided value without decompressing.
    fn scale(&mut self, k: T) {
        self.map_in_place(|v| v * k);
    }

    fn divide(&mut self, k: T) -> Result<(), ElideError> {
        if k.is_zero() {
            return Err(ElideError::DivideByZero);
        }
        self.map_in_place(|v| v / k);
        Ok(())
    }
}

impl<T: Element> Backing<T> for SparseVector<T> {
    fn from_values(values: Vec<T>) -> Self {
        Self::materialized(values)
    }

    fn derive(&self, values: Vec<T>) -> Self {
        let mut v = Self::materialized(values);
        v.options = self.options;
        v
    }

    fn finish_construction(&mut self) {
        if self.options.compress_on_construct {
            self.do_sparse();
        }
    }

    fn splice(&mut self, at: usize, values: &[T]) -> Result<(), ElideError> {
        SparseVector::splice(self, at, values)
    }

    fn append(&mut self, values: &[T]) -> Result<(), ElideError> {
        self.append_values(values)
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), ElideError> {
        self.erase_range(start, end)
    }

    fn resize(&mut self, len: usize, fill: T) {
        SparseVector::resize(self, len, fill)
    }

    fn densify(&mut self) {
        self.do_dense();
    }

    fn to_vec(&self) -> Vec<T> {
        SparseVector::to_vec(self)
    }
}
