use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use textpatch_core::{apply_patch, decode_batch, resolve_batch, EditOp, PatchError};

use crate::Error;

/// The single separator used to split and rejoin documents.
pub const LINE_SEPARATOR: char = '\n';

/// Split `text` into the line sequence the engine addresses.
///
/// A trailing separator yields a final empty line, so joining the lines back
/// reproduces `text` exactly.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split(LINE_SEPARATOR).collect()
}

/// Apply `ops` to a whole document.
pub fn apply_to_text(text: &str, ops: &[EditOp]) -> Result<String, PatchError> {
    let lines = apply_patch(&split_lines(text), ops)?;
    Ok(lines.join("\n"))
}

/// Decode a JSON batch and apply it to a whole document.
pub fn patch_text(text: &str, json: &str) -> Result<String, PatchError> {
    let ops = resolve_batch(&decode_batch(json)?)?;
    apply_to_text(text, &ops)
}

/// Patch the file at `path`, writing to `output` or back over `path`.
///
/// The patched text is built in memory first; nothing is written if reading or
/// patching fails. No backup of the original is kept.
pub fn apply_to_file(path: &Path, ops: &[EditOp], output: Option<&Path>) -> Result<(), Error> {
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read document");

    let patched = apply_to_text(&text, ops)?;

    let dest = output.unwrap_or(path);
    write_atomic(dest, &patched)?;
    tracing::debug!(path = %dest.display(), bytes = patched.len(), "wrote document");
    Ok(())
}

/// Decode a JSON batch and apply it to the file at `path`.
pub fn patch_file(path: &Path, json: &str, output: Option<&Path>) -> Result<(), Error> {
    let ops = resolve_batch(&decode_batch(json)?)?;
    apply_to_file(path, &ops, output)
}

// Write through a temp file in the destination directory so `path` is either
// fully replaced or left alone.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    match perms {
        Some(p) => fs::set_permissions(tmp.path(), p)?,
        None => set_default_permissions(tmp.path())?,
    }

    tmp.persist(path)?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
