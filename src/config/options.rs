//! Compression policy options for sparse-capable containers.
//!
//! This module provides the `SparseOptions` struct, which controls when a
//! `SparseVector` (and any matrix backed by one) compresses itself on its
//! own. Every mutating operation leaves the container dense; these flags
//! let the owner opt in to re-compression after construction, merge, or
//! element-wise arithmetic.

/// Compression policy carried by a sparse-capable vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseOptions {
    /// Compress eagerly after literal or fill construction.
    pub compress_on_construct: bool,

    /// Call `do_sparse` after `merge` appends another vector.
    pub resparsify_after_merge: bool,

    /// Call `do_sparse` after `+=` / `-=`.
    pub resparsify_after_arith: bool,
}

impl Default for SparseOptions {
    fn default() -> Self {
        Self {
            compress_on_construct: true,
            resparsify_after_merge: false,
            resparsify_after_arith: false,
        }
    }
}

impl SparseOptions {
    /// Options that never compress unless `do_sparse` is called explicitly.
    pub fn manual() -> Self {
        Self {
            compress_on_construct: false,
            ..Self::default()
        }
    }

    /// Options that re-compress after every bulk mutation.
    pub fn eager() -> Self {
        Self {
            compress_on_construct: true,
            resparsify_after_merge: true,
            resparsify_after_arith: true,
        }
    }
}
