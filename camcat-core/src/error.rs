// ============================================================================
// camcat-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the camcat core library
//
// A single error enum covers every failure the pipeline can report. Tool
// failures are wrapped into group- or mux-level variants so the caller can
// tell the operator exactly which unit of work stopped the run and which
// leftovers were kept on disk for a later resume.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the camcat core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No classifiable recordings found")]
    NoFilesFound,

    #[error("Required dependency '{0}' not found on PATH")]
    DependencyNotFound(String),

    #[error("Failed to start {cmd}: {source}")]
    CommandStart {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed while waiting for {cmd}: {source}")]
    CommandWait {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("{cmd} exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Concatenation of group {group} failed (manifest kept at {}): {source}", manifest.display())]
    GroupFailed {
        group: String,
        manifest: PathBuf,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Audio merge for {} failed (original kept as .old): {source}", video.display())]
    MuxFailed {
        video: PathBuf,
        #[source]
        source: Box<CoreError>,
    },
}

/// Result type for camcat core operations.
pub type CoreResult<T> = Result<T, CoreError>;

pub fn command_start_error(cmd: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandStart {
        cmd: cmd.into(),
        source,
    }
}

pub fn command_wait_error(cmd: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandWait {
        cmd: cmd.into(),
        source,
    }
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
