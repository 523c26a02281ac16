use crate::decode::{decode_batch, resolve_batch};
use crate::op::{EditOp, OpKind};
use crate::PatchError;

/// Apply `ops` to `lines`, returning the patched document.
///
/// Operations run in order, each against the document as changed by the ones
/// before it, so the batch must be non-decreasing by line. `lines` is copied up
/// front and never modified; on error no partial result is returned.
pub fn apply_patch<S: AsRef<str>>(lines: &[S], ops: &[EditOp]) -> Result<Vec<String>, PatchError> {
    check_order(ops.iter().map(|op| op.line))?;

    let mut work: Vec<String> = lines.iter().map(|l| l.as_ref().to_owned()).collect();
    for op in ops {
        apply_op(&mut work, op)?;
    }

    tracing::debug!(
        ops = ops.len(),
        before = lines.len(),
        after = work.len(),
        "patch applied"
    );
    Ok(work)
}

/// Decode a JSON batch and apply it to `lines`.
pub fn patch_lines<S: AsRef<str>>(lines: &[S], json: &str) -> Result<Vec<String>, PatchError> {
    let ops = resolve_batch(&decode_batch(json)?)?;
    apply_patch(lines, &ops)
}

pub(crate) fn check_order(lines: impl IntoIterator<Item = i64>) -> Result<(), PatchError> {
    let mut previous: Option<i64> = None;
    for (index, line) in lines.into_iter().enumerate() {
        if let Some(prev) = previous {
            if line < prev {
                return Err(PatchError::OutOfOrder {
                    index,
                    line,
                    previous: prev,
                });
            }
        }
        previous = Some(line);
    }
    Ok(())
}

fn apply_op(work: &mut Vec<String>, op: &EditOp) -> Result<(), PatchError> {
    let len = work.len();
    match op.kind {
        OpKind::Insert => {
            // Inserting at `len` appends.
            let at = position(op, len + 1, len)?;
            work.splice(at..at, op.content.iter().cloned());
        }
        OpKind::Delete => {
            let at = position(op, len, len)?;
            work.remove(at);
        }
        OpKind::Replace => {
            let at = position(op, len, len)?;
            work.splice(at..=at, op.content.iter().cloned());
        }
    }
    tracing::trace!(kind = %op.kind, line = op.line, len = work.len(), "applied operation");
    Ok(())
}

/// Check `op.line` against the exclusive bound `limit`.
fn position(op: &EditOp, limit: usize, len: usize) -> Result<usize, PatchError> {
    usize::try_from(op.line)
        .ok()
        .filter(|&at| at < limit)
        .ok_or(PatchError::OutOfRange {
            kind: op.kind,
            line: op.line,
            len,
        })
}
