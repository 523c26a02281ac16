use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PatchError;

/// The three edit kinds the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Insert,
    Delete,
    Replace,
}

impl OpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Insert => "insert",
            OpKind::Delete => "delete",
            OpKind::Replace => "replace",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(OpKind::Insert),
            "delete" => Ok(OpKind::Delete),
            "replace" => Ok(OpKind::Replace),
            other => Err(PatchError::UnknownKind(other.to_string())),
        }
    }
}

/// A single validated edit, addressed by a zero-based line position.
///
/// The position is interpreted against the document as already changed by
/// every earlier operation in the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub line: i64,
    pub kind: OpKind,
    /// Lines to insert or to put in place of the replaced line. Unused for delete.
    pub content: Vec<String>,
}

impl EditOp {
    pub fn insert<I, S>(line: i64, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            kind: OpKind::Insert,
            content: content.into_iter().map(Into::into).collect(),
        }
    }

    pub fn delete(line: i64) -> Self {
        Self {
            line,
            kind: OpKind::Delete,
            content: Vec::new(),
        }
    }

    pub fn replace<I, S>(line: i64, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            kind: OpKind::Replace,
            content: content.into_iter().map(Into::into).collect(),
        }
    }
}

/// One operation as it appears on the wire:
/// `{"line": 3, "type": "replace", "content": ["..."]}`.
///
/// `type` is kept as a string so an unknown kind is reported by validation
/// rather than by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOp {
    pub line: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,
}

impl PatchOp {
    /// Validate the kind and produce an [`EditOp`]. Missing content is empty content.
    pub fn resolve(&self) -> Result<EditOp, PatchError> {
        Ok(EditOp {
            line: self.line,
            kind: self.kind.parse()?,
            content: self.content.clone().unwrap_or_default(),
        })
    }
}

impl From<&EditOp> for PatchOp {
    fn from(op: &EditOp) -> Self {
        let content = match op.kind {
            OpKind::Delete => None,
            OpKind::Insert | OpKind::Replace => Some(op.content.clone()),
        };
        Self {
            line: op.line,
            kind: op.kind.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_is_case_sensitive() {
        assert_eq!("insert".parse::<OpKind>().unwrap(), OpKind::Insert);
        let err = "Insert".parse::<OpKind>().unwrap_err();
        assert!(matches!(err, PatchError::UnknownKind(ref k) if k == "Insert"));
    }

    #[test]
    fn resolve_treats_missing_content_as_empty() {
        let op = PatchOp {
            line: 2,
            kind: "replace".to_string(),
            content: None,
        };
        assert_eq!(op.resolve().unwrap(), EditOp::replace(2, Vec::<String>::new()));
    }

    #[test]
    fn resolve_reports_offending_kind() {
        let op = PatchOp {
            line: 0,
            kind: "move".to_string(),
            content: None,
        };
        let err = op.resolve().unwrap_err();
        assert_eq!(err.message(), "invalid patch type: \"move\"");
    }

    #[test]
    fn delete_drops_content_on_the_wire() {
        let wire = PatchOp::from(&EditOp::delete(4));
        assert_eq!(wire.kind, "delete");
        assert!(wire.content.is_none());
    }
}
