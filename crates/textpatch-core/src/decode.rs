use std::io::Read;

use crate::engine::check_order;
use crate::op::{EditOp, PatchOp};
use crate::PatchError;

/// Decode a JSON array of operations.
///
/// Only the shape is checked here; kinds, ordering and positions are validated later.
pub fn decode_batch(json: &str) -> Result<Vec<PatchOp>, PatchError> {
    serde_json::from_str(json).map_err(PatchError::Decode)
}

/// Like [`decode_batch`], reading the JSON from `reader`.
pub fn decode_batch_from_reader(reader: impl Read) -> Result<Vec<PatchOp>, PatchError> {
    serde_json::from_reader(reader).map_err(PatchError::Decode)
}

/// Encode operations back into the wire format.
pub fn encode_batch(ops: &[EditOp]) -> Result<String, PatchError> {
    let wire: Vec<PatchOp> = ops.iter().map(PatchOp::from).collect();
    serde_json::to_string(&wire).map_err(PatchError::Decode)
}

/// Turn decoded operations into a validated batch.
///
/// Ordering is checked over the whole batch before any kind is looked at, so a
/// decreasing batch is always an ordering error.
pub fn resolve_batch(ops: &[PatchOp]) -> Result<Vec<EditOp>, PatchError> {
    check_order(ops.iter().map(|op| op.line))?;
    ops.iter().map(PatchOp::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_accepts_missing_and_null_content() {
        let ops = decode_batch(
            r#"[
                {"line": 0, "type": "delete"},
                {"line": 1, "type": "insert", "content": null},
                {"line": 2, "type": "replace", "content": ["x"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].content, None);
        assert_eq!(ops[1].content, None);
        assert_eq!(ops[2].content, Some(vec!["x".to_string()]));
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let ops = decode_batch(r#"[{"line": 3, "type": "delete", "note": "why"}]"#).unwrap();
        assert_eq!(ops[0].line, 3);
    }

    #[test]
    fn decode_keeps_unknown_kind_for_validation() {
        let ops = decode_batch(r#"[{"line": 0, "type": "move"}]"#).unwrap();
        assert_eq!(ops[0].kind, "move");
    }

    #[test]
    fn decode_keeps_negative_positions_for_validation() {
        let ops = decode_batch(r#"[{"line": -1, "type": "insert"}]"#).unwrap();
        assert_eq!(ops[0].line, -1);
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        for bad in [
            r#"{"line": 0, "type": "delete"}"#,
            r#"[{"type": "delete"}]"#,
            r#"[{"line": 0}]"#,
            r#"[{"line": "0", "type": "delete"}]"#,
            r#"[{"line": 1.5, "type": "delete"}]"#,
            r#"[{"line": 0, "type": "insert", "content": [1, 2]}]"#,
            r#"[{"line": 0, "type": "insert", "content": "x"}]"#,
            r#"[] trailing"#,
            "",
        ] {
            let err = decode_batch(bad).unwrap_err();
            assert!(matches!(err, PatchError::Decode(_)), "{bad}: {err}");
            assert!(err.message().starts_with("malformed patch"));
        }
    }

    #[test]
    fn decode_from_reader() {
        let ops = decode_batch_from_reader(&br#"[{"line": 0, "type": "delete"}]"#[..]).unwrap();
        assert_eq!(ops[0].kind, "delete");
    }

    #[test]
    fn resolve_checks_order_before_kinds() {
        let ops = decode_batch(r#"[{"line": 2, "type": "bogus"}, {"line": 1, "type": "delete"}]"#)
            .unwrap();
        let err = resolve_batch(&ops).unwrap_err();
        assert!(matches!(
            err,
            PatchError::OutOfOrder {
                index: 1,
                line: 1,
                previous: 2
            }
        ));
    }

    #[test]
    fn resolve_rejects_unknown_kind() {
        let ops = decode_batch(r#"[{"line": 0, "type": "delete"}, {"line": 1, "type": "append"}]"#)
            .unwrap();
        let err = resolve_batch(&ops).unwrap_err();
        assert!(matches!(err, PatchError::UnknownKind(ref k) if k == "append"));
    }

    #[test]
    fn encode_then_decode_keeps_meaning() {
        let ops = vec![
            EditOp::replace(1, ["a", "b"]),
            EditOp::delete(3),
            EditOp::insert(3, ["c"]),
        ];
        let json = encode_batch(&ops).unwrap();
        assert!(!json.contains(r#""line":3,"type":"delete","content""#));
        let back = resolve_batch(&decode_batch(&json).unwrap()).unwrap();
        assert_eq!(back, ops);
        assert_eq!(back[1].kind, OpKind::Delete);
    }
}
