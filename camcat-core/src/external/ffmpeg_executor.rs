// ============================================================================
// camcat-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes. The spawner is the seam between command construction (pure,
// testable) and process execution.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating commands and spawning processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar

use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    /// Creates an empty command bound to the ffmpeg binary this spawner runs.
    fn command(&self) -> FfmpegCommand {
        FfmpegCommand::new()
    }

    /// Checks that the binary behind `command` can be started.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            command_failed_error("ffmpeg (sidecar - get iter)", ExitStatus::default(), e.to_string())
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
///
/// Runs `ffmpeg` from PATH unless an explicit binary was given.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner {
    binary: Option<PathBuf>,
}

impl SidecarSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self {
            binary: Some(binary),
        }
    }

    /// Name or path of the binary that will be executed.
    pub fn binary_name(&self) -> String {
        self.binary
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ffmpeg".to_string())
    }
}

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn command(&self) -> FfmpegCommand {
        match &self.binary {
            Some(path) => FfmpegCommand::new_with_path(path),
            None => FfmpegCommand::new(),
        }
    }

    fn check_available(&self) -> CoreResult<()> {
        super::check_dependency(&self.binary_name())
    }

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}
