//! Binary operators derived from the compound-assignment primitives.
//!
//! Containers only implement [`CompoundAssign`]; the checked binary forms
//! come from the blanket [`Arithmetic`] extension, and the `std::ops`
//! impls at the bottom forward to it for callers who prefer operator
//! syntax and accept a panic on mismatched sizes.

use std::ops::{Add, Div, Mul, Sub};

use crate::core::traits::{CompoundAssign, Element};
use crate::error::ElideError;
use crate::vector::{DenseVector, SparseVector};

/// Checked binary arithmetic for any container with compound assignment.
pub trait Arithmetic<T: Element>: CompoundAssign<T> + Clone {
    /// `self + rhs` as a new container.
    fn try_add(&self, rhs: &Self) -> Result<Self, ElideError> {
        let mut out = self.clone();
        out.add_assign_checked(rhs)?;
        Ok(out)
    }

    /// `self - rhs` as a new container.
    fn try_sub(&self, rhs: &Self) -> Result<Self, ElideError> {
        let mut out = self.clone();
        out.sub_assign_checked(rhs)?;
        Ok(out)
    }

    /// `self * k` as a new container.
    fn scaled(&self, k: T) -> Self {
        let mut out = self.clone();
        out.scale(k);
        out
    }

    /// `self / k` as a new container.
    fn try_div(&self, k: T) -> Result<Self, ElideError> {
        let mut out = self.clone();
        out.divide(k)?;
        Ok(out)
    }
}

impl<T: Element, C: CompoundAssign<T> + Clone> Arithmetic<T> for C {}

macro_rules! impl_vector_ops {
    ($($vec:ident),*) => {
        $(
            /// # Panics
            /// Panics if the lengths differ; use [`Arithmetic::try_add`] to get an error instead.
            impl<T: Element> Add for &$vec<T> {
                type Output = $vec<T>;
                fn add(self, rhs: Self) -> $vec<T> {
                    match self.try_add(rhs) {
                        Ok(v) => v,
                        Err(e) => panic!("{}", e),
                    }
                }
            }

            /// # Panics
            /// Panics if the lengths differ; use [`Arithmetic::try_sub`] to get an error instead.
            impl<T: Element> Sub for &$vec<T> {
                type Output = $vec<T>;
                fn sub(self, rhs: Self) -> $vec<T> {
                    match self.try_sub(rhs) {
                        Ok(v) => v,
                        Err(e) => panic!("{}", e),
                    }
                }
            }

            impl<T: Element> Mul<T> for &$vec<T> {
                type Output = $vec<T>;
                fn mul(self, k: T) -> $vec<T> {
                    self.scaled(k)
                }
            }

            /// # Panics
            /// Panics on a zero divisor; use [`Arithmetic::try_div`] to get an error instead.
            impl<T: Element> Div<T> for &$vec<T> {
                type Output = $vec<T>;
                fn div(self, k: T) -> $vec<T> {
                    match self.try_div(k) {
                        Ok(v) => v,
                        Err(e) => panic!("{}", e),
                    }
                }
            }
        )*
    };
}

impl_vector_ops!(DenseVector, SparseVector);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_ops_match_compound_assign() {
        let a = DenseVector::from_vec(vec![1, 2, 3]);
        let b = DenseVector::from_vec(vec![4, 5, 6]);
        assert_eq!((&a + &b).as_slice(), &[5, 7, 9]);
        assert_eq!((&b - &a).as_slice(), &[3, 3, 3]);
        assert_eq!((&a * 2).as_slice(), &[2, 4, 6]);
        assert_eq!((&b / 2).as_slice(), &[2, 2, 3]);
    }

    #[test]
    fn try_forms_report_errors() {
        let a = SparseVector::from_slice(&[1, 1, 2]);
        let b = SparseVector::from_slice(&[1, 1]);
        assert_eq!(a.try_add(&b), Err(ElideError::SizeMismatch { left: 3, right: 2 }));
        assert_eq!(a.try_div(0), Err(ElideError::DivideByZero));
        // the receiver is untouched by a failed operation
        assert_eq!(a.to_vec(), vec![1, 1, 2]);
        assert!(a.sparse());
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn div_operator_panics_on_zero() {
        let a = SparseVector::from_slice(&[1.0, 2.0]);
        let _ = &a / 0.0;
    }
}
