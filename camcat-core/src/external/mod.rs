// ============================================================================
// camcat-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: The media tool capability and its ffmpeg implementation
//
// The pipeline never builds a process itself. It only asks a `MediaTool` to
// concatenate a manifest or to mux an audio track into a video, which keeps
// grouping, ordering and cleanup testable with an in-process fake.
//
// KEY COMPONENTS:
// - MediaTool: the two-operation capability used by the pipeline
// - FfmpegTool: implementation on top of ffmpeg-sidecar
// - FfmpegSpawner / SidecarSpawner: process spawning seam
// - check_dependency: verifies the ffmpeg binary before any mutation

use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Command construction and the ffmpeg-backed `MediaTool`
pub mod ffmpeg;

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

/// Mock spawner and byte-level fake tool used by tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::FfmpegTool;
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ============================================================================
// MEDIA TOOL CAPABILITY
// ============================================================================

/// The external media-processing collaborator.
///
/// Both operations are stream copies; neither re-encodes. An `Err` means the
/// output path may hold a partial file and must not be trusted.
pub trait MediaTool {
    /// Verifies the tool can run at all. Called once per run, before the
    /// first change on disk.
    fn preflight(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Joins the files listed in `manifest`, in order, into `output`.
    fn concatenate(&self, manifest: &Path, output: &Path) -> CoreResult<PathBuf>;

    /// Writes `output` with the video stream of `video` and the audio stream
    /// of `audio`, truncated to the shorter of the two.
    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> CoreResult<PathBuf>;
}

impl<T: MediaTool + ?Sized> MediaTool for &T {
    fn preflight(&self) -> CoreResult<()> {
        (**self).preflight()
    }

    fn concatenate(&self, manifest: &Path, output: &Path) -> CoreResult<PathBuf> {
        (**self).concatenate(manifest, output)
    }

    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> CoreResult<PathBuf> {
        (**self).mux_audio(video, audio, output)
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with its output discarded; only a failure to
/// start the process counts as missing.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(crate::error::command_start_error(cmd_name, e))
        }
    }
}
