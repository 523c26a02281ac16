//! textpatch — Position-Addressed Line Patches
//!
//! This crate re-exports the patch engine from `textpatch-core` and adds the
//! text and file wrappers used by the `textpatch` and `lineview` CLIs.

mod document;
pub mod logging;

#[cfg(feature = "pyo3")]
mod python;

pub use document::{apply_to_file, apply_to_text, patch_file, patch_text, split_lines, LINE_SEPARATOR};
pub use textpatch_core::{
    apply_patch, decode_batch, decode_batch_from_reader, encode_batch, patch_lines, resolve_batch, EditOp, OpKind,
    PatchError, PatchOp,
};

use thiserror::Error;

/// Error from the document and file wrappers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
