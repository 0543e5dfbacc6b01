//! Leftover recovery for interrupted runs.
//!
//! A failed mux leaves `<fragment>.old` (the original silent video) next to a
//! possibly partial `<fragment>`. A failed concat leaves
//! `<date>_<HH>.00.00.<ext>.old` (the previous output, if there was one),
//! its manifest and possibly a `partial_<output name>` file. In every case
//! the `.old` file is the last known-good content and every input is still
//! on disk, so recovery moves `.old` back into place and drops the manifest
//! and the unfinished output. The next pass then redoes the interrupted work
//! from scratch.
//!
//! Scanning is read-only; `Leftovers::apply` performs the changes, so a
//! caller can verify its tools before anything on disk moves.

use crate::classify::{classify, is_hourly_output};
use crate::config::{CAMERA_DIR_PREFIX, CoreConfig, OLD_SUFFIX};
use crate::error::CoreResult;
use crate::temp_files::{is_manifest_name, is_partial_output_name};

use std::fs;
use std::path::{Path, PathBuf};

/// What recovery changed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Fragments moved back from `<fragment>.old`
    pub restored_fragments: Vec<PathBuf>,
    /// Hourly outputs moved back from `<output>.old`
    pub restored_outputs: Vec<PathBuf>,
    /// Stale manifests deleted
    pub removed_manifests: Vec<PathBuf>,
    /// Unfinished `partial_*` outputs deleted
    pub removed_partials: Vec<PathBuf>,
}

impl RecoveryReport {
    pub fn is_empty(&self) -> bool {
        self.restored_fragments.is_empty()
            && self.restored_outputs.is_empty()
            && self.removed_manifests.is_empty()
            && self.removed_partials.is_empty()
    }
}

/// Leftovers found by `scan_leftovers`, not yet touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leftovers {
    /// `(<fragment>.old, <fragment>)`
    fragments: Vec<(PathBuf, PathBuf)>,
    /// `(<output>.old, <output>)`
    outputs: Vec<(PathBuf, PathBuf)>,
    manifests: Vec<PathBuf>,
    partials: Vec<PathBuf>,
}

impl Leftovers {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
            && self.outputs.is_empty()
            && self.manifests.is_empty()
            && self.partials.is_empty()
    }

    /// Restores every `.old` file and deletes manifests and partial outputs.
    pub fn apply(self) -> CoreResult<RecoveryReport> {
        let mut report = RecoveryReport::default();

        for (old, original) in self.fragments {
            restore(&old, &original)?;
            report.restored_fragments.push(original);
        }
        for (old, original) in self.outputs {
            restore(&old, &original)?;
            report.restored_outputs.push(original);
        }
        for manifest in self.manifests {
            log::warn!("Removing stale manifest {}", manifest.display());
            fs::remove_file(&manifest)?;
            report.removed_manifests.push(manifest);
        }
        for partial in self.partials {
            log::warn!("Removing unfinished output {}", partial.display());
            fs::remove_file(&partial)?;
            report.removed_partials.push(partial);
        }

        Ok(report)
    }
}

/// Finds the leftovers of an interrupted run under `config.target_dir`
/// without changing anything.
pub fn scan_leftovers(config: &CoreConfig) -> CoreResult<Leftovers> {
    let mut leftovers = Leftovers::default();
    let ext = config.video_extension.as_str();

    for (old, original, name) in old_files(&config.target_dir)? {
        if classify(&name, ext).is_some() {
            leftovers.fragments.push((old, original));
        }
    }

    for camera_dir in subdirs(&config.target_dir)? {
        let is_camera_dir = camera_dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(CAMERA_DIR_PREFIX));
        if !is_camera_dir {
            continue;
        }

        for date_dir in subdirs(&camera_dir)? {
            for (old, original, name) in old_files(&date_dir)? {
                if is_hourly_output(&name, ext) {
                    leftovers.outputs.push((old, original));
                }
            }

            for file in sorted_files(&date_dir)? {
                let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if is_manifest_name(name) {
                    leftovers.manifests.push(file);
                } else if is_partial_output_name(name) {
                    leftovers.partials.push(file);
                }
            }
        }
    }

    Ok(leftovers)
}

/// Restores every leftover of an interrupted run under `config.target_dir`.
pub fn recover_leftovers(config: &CoreConfig) -> CoreResult<RecoveryReport> {
    scan_leftovers(config)?.apply()
}

fn restore(old: &Path, original: &Path) -> CoreResult<()> {
    log::warn!(
        "Restoring {} from leftover {}",
        original.display(),
        old.display()
    );
    fs::rename(old, original)?;
    Ok(())
}

/// `(<name>.old, <name>, name)` for every regular `.old` file in `dir`.
fn old_files(dir: &Path) -> CoreResult<Vec<(PathBuf, PathBuf, String)>> {
    let suffix = format!(".{OLD_SUFFIX}");
    let mut found = Vec::new();
    for path in sorted_files(dir)? {
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(&suffix))
            .map(str::to_string)
        else {
            continue;
        };
        let original = path.with_file_name(&name);
        found.push((path, original, name));
    }
    Ok(found)
}

fn sorted_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn subdirs(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_directory_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2023-05-01_10.00.00_1.mkv"), b"v").unwrap();
        let config = CoreConfig::new(dir.path().to_path_buf());
        assert!(recover_leftovers(&config).unwrap().is_empty());
    }

    #[test]
    fn restores_fragment_and_output_and_drops_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("2023-05-01_10.00.00_1.mkv.old"), b"silent").unwrap();
        fs::write(root.join("2023-05-01_10.00.00_1.mkv"), b"partial").unwrap();
        fs::write(root.join("unrelated.txt.old"), b"keep").unwrap();

        let date_dir = root.join("camera_1").join("2023-05-01");
        fs::create_dir_all(&date_dir).unwrap();
        fs::write(date_dir.join("2023-05-01_09.00.00.mkv.old"), b"prior").unwrap();
        fs::write(date_dir.join("2023-05-01_09.00.00.mkv"), b"partial").unwrap();
        fs::write(date_dir.join("concat_abc123.txt"), b"file '/x'\n").unwrap();
        fs::write(date_dir.join("partial_2023-05-01_09.00.00.mkv"), b"half").unwrap();

        let config = CoreConfig::new(root.to_path_buf());
        let report = recover_leftovers(&config).unwrap();

        assert_eq!(report.restored_fragments, [root.join("2023-05-01_10.00.00_1.mkv")]);
        assert_eq!(report.restored_outputs, [date_dir.join("2023-05-01_09.00.00.mkv")]);
        assert_eq!(report.removed_manifests, [date_dir.join("concat_abc123.txt")]);
        assert_eq!(
            report.removed_partials,
            [date_dir.join("partial_2023-05-01_09.00.00.mkv")]
        );

        assert_eq!(fs::read(root.join("2023-05-01_10.00.00_1.mkv")).unwrap(), b"silent");
        assert_eq!(fs::read(date_dir.join("2023-05-01_09.00.00.mkv")).unwrap(), b"prior");
        assert!(!date_dir.join("2023-05-01_09.00.00.mkv.old").exists());
        assert!(root.join("unrelated.txt.old").exists());
    }

    #[test]
    fn ignores_directories_that_are_not_camera_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("archive").join("2023-05-01");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("2023-05-01_09.00.00.mkv.old"), b"x").unwrap();

        let config = CoreConfig::new(dir.path().to_path_buf());
        assert!(recover_leftovers(&config).unwrap().is_empty());
        assert!(other.join("2023-05-01_09.00.00.mkv.old").exists());
    }

    #[test]
    fn scanning_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("2023-05-01_10.00.00_1.mkv.old"), b"silent").unwrap();
        fs::write(root.join("2023-05-01_10.00.00_1.mkv"), b"partial").unwrap();

        let config = CoreConfig::new(root.to_path_buf());
        let leftovers = scan_leftovers(&config).unwrap();

        assert!(!leftovers.is_empty());
        assert_eq!(fs::read(root.join("2023-05-01_10.00.00_1.mkv")).unwrap(), b"partial");
        assert!(root.join("2023-05-01_10.00.00_1.mkv.old").exists());

        let report = leftovers.apply().unwrap();
        assert_eq!(report.restored_fragments.len(), 1);
        assert_eq!(fs::read(root.join("2023-05-01_10.00.00_1.mkv")).unwrap(), b"silent");
    }
}
