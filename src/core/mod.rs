//! Core capability traits and the derived operator layer.

pub mod ops;
pub mod traits;

pub use ops::Arithmetic;
pub use traits::{Backing, CompoundAssign, Element, ElementRead, ElementWrite, Indexing};
