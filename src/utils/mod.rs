//! Utilities shared by the containers.

pub mod frequency;
pub use frequency::{Tally, frequent, frequent_with_count};
