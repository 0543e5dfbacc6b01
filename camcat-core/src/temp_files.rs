//! Scratch file management for concat manifests and in-progress outputs.
//!
//! Manifests are created with the tempfile crate next to the output they
//! describe, so a manifest left behind by a failed group sits in the same
//! directory as the `.old` output it belongs to. The media tool writes into
//! `partial_<output name>` in that directory too; only a finished file is
//! renamed onto the real output path.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Prefix of every manifest file name.
pub const MANIFEST_PREFIX: &str = "concat_";

/// Extension of every manifest file name.
pub const MANIFEST_EXTENSION: &str = "txt";

/// Prefix of the file the media tool writes before it becomes the output.
pub const PARTIAL_PREFIX: &str = "partial_";

/// Creates an empty manifest file in `dir`. Auto-deleted when dropped unless kept.
pub fn create_manifest_file(dir: &Path) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(MANIFEST_PREFIX)
        .suffix(&format!(".{MANIFEST_EXTENSION}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Whether a file name looks like a manifest created by `create_manifest_file`.
pub fn is_manifest_name(name: &str) -> bool {
    name.starts_with(MANIFEST_PREFIX) && name.ends_with(&format!(".{MANIFEST_EXTENSION}"))
}

/// `<dir>/partial_<name>` for an output `<dir>/<name>`. The extension is kept
/// so ffmpeg still picks the container from it.
pub fn partial_output_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{PARTIAL_PREFIX}{name}"))
}

/// Whether a file name is an unfinished output left by `partial_output_path`.
pub fn is_partial_output_name(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX)
}
