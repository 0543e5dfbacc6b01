//! Configuration structures and constants for the camcat-core library.
//!
//! Every stage of the pipeline receives a `CoreConfig` explicitly; nothing in
//! the library reads process-wide state.

mod builder;

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

pub use builder::CoreConfigBuilder;

// Default constants

/// Extension of the recorder's video fragments and of the hourly outputs.
pub const DEFAULT_VIDEO_EXTENSION: &str = "mkv";

/// Extension of the audio track the recorder writes next to each fragment.
pub const DEFAULT_AUDIO_EXTENSION: &str = "wav";

/// Suffix appended to a file that has been renamed aside while it is rebuilt.
pub const OLD_SUFFIX: &str = "old";

/// Prefix of every camera directory created under the target directory.
pub const CAMERA_DIR_PREFIX: &str = "camera_";

/// Main configuration structure for the camcat-core library.
///
/// Only `target_dir` is required. By default fragments are deleted after
/// concatenation, audio is not merged and leftovers are recovered.
///
/// # Examples
///
/// ```rust
/// use camcat_core::config::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(PathBuf::from("/srv/recordings"));
/// config.merge_audio = true;
/// assert_eq!(config.video_extension, "mkv");
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory scanned for fragments and root of the produced camera tree
    pub target_dir: PathBuf,

    /// Exact, case-sensitive extension of video fragments and outputs
    pub video_extension: String,

    /// Extension of the paired audio file used when `merge_audio` is set
    pub audio_extension: String,

    /// Require a sibling audio file per fragment and mux it in before grouping
    pub merge_audio: bool,

    /// Delete the fragments listed in a manifest after a successful concat
    pub remove_sources: bool,

    /// Restore `.old` leftovers of an interrupted run before collecting
    pub resume_leftovers: bool,

    /// Plan and report only; no renames, tool invocations or deletions
    pub dry_run: bool,
}

impl CoreConfig {
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            video_extension: DEFAULT_VIDEO_EXTENSION.to_string(),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
            merge_audio: false,
            remove_sources: true,
            resume_leftovers: true,
            dry_run: false,
        }
    }

    /// Checks that the target directory exists and both extensions are usable.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.target_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "target directory '{}' does not exist or is not a directory",
                self.target_dir.display()
            )));
        }
        validate_extension("video", &self.video_extension)?;
        validate_extension("audio", &self.audio_extension)?;
        if self.video_extension == self.audio_extension {
            return Err(CoreError::Config(format!(
                "video and audio extensions must differ (both are '{}')",
                self.video_extension
            )));
        }
        Ok(())
    }

    /// Directory holding the hourly outputs of one camera and date.
    pub fn date_dir(&self, camera_id: &str, date: &str) -> PathBuf {
        self.target_dir
            .join(format!("{CAMERA_DIR_PREFIX}{camera_id}"))
            .join(date)
    }

    /// Deterministic output path of one hour-group.
    pub fn output_path(&self, camera_id: &str, date: &str, hour: &str) -> PathBuf {
        self.date_dir(camera_id, date)
            .join(format!("{date}_{hour}.00.00.{}", self.video_extension))
    }

    /// Audio sibling of a video fragment: same stem, audio extension.
    pub fn audio_sibling(&self, video: &Path) -> PathBuf {
        video.with_extension(&self.audio_extension)
    }
}

/// Appends `.old` to the full file name (`a.mkv` becomes `a.mkv.old`).
pub fn old_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(OLD_SUFFIX);
    PathBuf::from(name)
}

fn validate_extension(kind: &str, ext: &str) -> CoreResult<()> {
    if ext.is_empty() || ext.contains('.') || ext.contains('/') {
        return Err(CoreError::Config(format!(
            "invalid {kind} extension '{ext}': expected a bare extension such as 'mkv'"
        )));
    }
    Ok(())
}
