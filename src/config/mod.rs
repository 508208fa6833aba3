//! Configuration for compressed containers.

pub mod options;
pub use options::SparseOptions;
