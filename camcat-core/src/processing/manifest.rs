//! Concat-demuxer manifest formatting.
//!
//! One line per fragment, `file '<absolute-path>'`, in playback order. Paths
//! are written verbatim; the pipeline refuses target directories whose path
//! contains a single quote before anything is touched.

use crate::error::CoreResult;
use crate::temp_files;

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Renders the manifest text for `paths`.
pub fn render_manifest(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("file '{}'\n", p.display()))
        .collect()
}

/// Reads back the paths of a manifest produced by `render_manifest`.
pub fn parse_manifest(text: &str) -> Vec<PathBuf> {
    text.lines()
        .filter_map(|line| line.strip_prefix("file '")?.strip_suffix('\''))
        .map(PathBuf::from)
        .collect()
}

/// Writes a fresh manifest for `paths` into `dir` and returns its handle.
pub fn write_manifest(dir: &Path, paths: &[PathBuf]) -> CoreResult<NamedTempFile> {
    let mut file = temp_files::create_manifest_file(dir)?;
    file.write_all(render_manifest(paths).as_bytes())?;
    file.flush()?;
    log::debug!(
        "Manifest {}:\n{}",
        file.path().display(),
        render_manifest(paths).trim_end()
    );
    Ok(file)
}
