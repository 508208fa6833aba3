//! Compression controls for matrices backed by a `SparseVector`.
//!
//! These forward to the backing vector; the matrix never compresses on
//! its own.

use crate::core::traits::Element;
use crate::matrix::SparseMatrix;
use crate::vector::Mode;

impl<T: Element> SparseMatrix<T> {
    /// Compress the backing vector.
    pub fn do_sparse(&mut self) -> bool {
        self.backing_mut().do_sparse()
    }

    /// Decompress the backing vector.
    pub fn do_dense(&mut self) -> bool {
        self.backing_mut().do_dense()
    }

    pub fn sparse(&self) -> bool {
        self.backing().sparse()
    }

    pub fn frequent(&self) -> Option<T> {
        self.backing().frequent()
    }

    pub fn mode(&self) -> Mode<T> {
        self.backing().mode()
    }

    /// Physical entry count of the backing vector.
    pub fn amount(&self) -> usize {
        self.backing().amount()
    }
}
