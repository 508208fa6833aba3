//! Core container traits for elide.
//!
//! Containers expose a small set of primitives (length, checked element
//! access, compound assignment). Everything else, including the binary
//! operators in [`crate::core::ops`] and the matrix algorithms, is written
//! against these traits.

use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use num_traits::Num;

use crate::error::ElideError;

/// Scalar stored in a vector or matrix.
///
/// `Key` is a hashable stand-in for the value, used when tallying element
/// frequencies. For integers it is the value itself; floats key on their
/// exact bit pattern, so `-0.0` and `0.0` (and distinct NaN payloads) are
/// tallied apart and survive compression unchanged.
pub trait Element: Copy + PartialEq + fmt::Debug + fmt::Display + Num {
    type Key: Copy + Eq + Hash + fmt::Debug;
    fn key(self) -> Self::Key;

    /// Bit-identical comparison. Compression only elides values that are
    /// `same` as the frequent value.
    #[inline]
    fn same(self, other: Self) -> bool {
        self.key() == other.key()
    }
}

macro_rules! impl_element_int {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                type Key = $t;
                #[inline]
                fn key(self) -> $t {
                    self
                }
            }
        )*
    };
}

macro_rules! impl_element_float {
    ($($t:ty => $bits:ty),*) => {
        $(
            impl Element for $t {
                type Key = $bits;
                #[inline]
                fn key(self) -> $bits {
                    self.to_bits()
                }
            }
        )*
    };
}

impl_element_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_element_float!(f32 => u32, f64 => u64);

/// Logical length of a container.
pub trait Indexing {
    /// Number of logical elements.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checked read access by logical index.
pub trait ElementRead<T: Element>: Indexing {
    /// Value at logical index `i`, or `IndexOutOfRange`.
    fn get(&self, i: usize) -> Result<T, ElideError>;

    /// Copy every logical value out, in index order.
    fn values(&self) -> Result<Vec<T>, ElideError> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

/// Checked write access by logical index.
pub trait ElementWrite<T: Element>: ElementRead<T> {
    fn set(&mut self, i: usize, value: T) -> Result<(), ElideError>;
}

/// Compound-assignment primitives: `+=`, `-=`, `*= k`, `/= k`.
pub trait CompoundAssign<T: Element, Rhs: ?Sized = Self> {
    /// Element-wise `self += rhs`; lengths must match.
    fn add_assign_checked(&mut self, rhs: &Rhs) -> Result<(), ElideError>;
    /// Element-wise `self -= rhs`; lengths must match.
    fn sub_assign_checked(&mut self, rhs: &Rhs) -> Result<(), ElideError>;
    /// Multiply every element by `k`.
    fn scale(&mut self, k: T);
    /// Divide every element by `k`; fails on zero before touching anything.
    fn divide(&mut self, k: T) -> Result<(), ElideError>;
}

/// Flat storage a row-major matrix can be built on.
///
/// Shape-changing operations work in logical positions. Implementations
/// that compress may decompress as part of any of them.
pub trait Backing<T: Element>:
    Clone + fmt::Debug + ElementWrite<T> + CompoundAssign<T> + Index<usize, Output = T>
{
    /// Build uncompressed storage holding `values`.
    fn from_values(values: Vec<T>) -> Self;

    /// Uncompressed storage holding `values` that carries over this
    /// storage's policy. Used for results computed from `self`.
    fn derive(&self, values: Vec<T>) -> Self {
        Self::from_values(values)
    }

    /// Hook run once after a matrix was built from literal data.
    fn finish_construction(&mut self) {}

    /// Insert `values` so that the first lands at logical position `at`.
    fn splice(&mut self, at: usize, values: &[T]) -> Result<(), ElideError>;

    /// Append `values` after the last logical position.
    fn append(&mut self, values: &[T]) -> Result<(), ElideError> {
        let end = self.len();
        self.splice(end, values)
    }

    /// Remove logical positions `start..end`, shifting the tail down.
    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), ElideError>;

    /// Grow or shrink to `len`, filling new positions with `fill`.
    fn resize(&mut self, len: usize, fill: T);

    /// Materialize every position.
    fn densify(&mut self);

    /// Logical content in index order.
    fn to_vec(&self) -> Vec<T>;
}
