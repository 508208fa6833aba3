//! elide: numeric vectors and row-major matrices with adaptive storage.
//!
//! A container holds its elements either fully materialized or compressed:
//! the most frequent value is remembered once and every element equal to
//! it is elided from storage. Reads, equality and arithmetic see the same
//! logical content in both representations.
//!
//! - [`DenseVector`]: plain buffer.
//! - [`SparseVector`]: the compressing vector (`do_sparse` / `do_dense`).
//! - [`Matrix`]: row-major matrix over either vector type, with borrowed
//!   [`Row`] / [`RowMut`] views.

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use error::*;
pub use matrix::{DenseMatrix, Matrix, Row, RowMut, SparseMatrix};
pub use utils::*;
pub use vector::{DenseVector, Mode, SparseVector};
