//! textpatch — Position-Addressed Line Patch Engine (core library)
//!
//! This crate provides the patch engine and the JSON batch decoding used by the
//! `textpatch` and `lineview` CLIs. It performs no I/O.

mod decode;
mod engine;
mod op;

pub use decode::{decode_batch, decode_batch_from_reader, encode_batch, resolve_batch};
pub use engine::{apply_patch, patch_lines};
pub use op::{EditOp, OpKind, PatchOp};

use thiserror::Error;

/// Library error type.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The batch did not decode into an array of operations.
    #[error("malformed patch: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid patch type: {0:?}")]
    UnknownKind(String),

    /// Operation `index` targets a line before its predecessor.
    #[error(
        "patch operations must be sorted by line: operation {index} targets line {line} after line {previous}"
    )]
    OutOfOrder { index: usize, line: i64, previous: i64 },

    /// `len` is the document length when the operation was reached.
    #[error("{kind} position out of range: {line} (document has {len} lines)")]
    OutOfRange { kind: OpKind, line: i64, len: usize },
}

impl PatchError {
    /// Human-friendly error message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
