//! Vector module: dense and mode-compressed vector types.

pub mod dense;
pub use dense::DenseVector;
pub mod sparse;
pub use sparse::{Mode, SparseVector};
