//! FFmpeg-backed implementation of the media tool capability.
//!
//! Two invocations are needed: the concat demuxer joining a manifest of
//! fragments, and an audio mux that copies the video stream of one file and
//! the audio stream of another. Both are pure stream copies.

use super::MediaTool;
use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarSpawner};
use crate::error::{CoreResult, command_failed_error};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::{Path, PathBuf};

/// Builds `ffmpeg -hide_banner -y -f concat -safe 0 -i <manifest> -c copy <output>`.
pub fn build_concat_command(mut cmd: FfmpegCommand, manifest: &Path, output: &Path) -> FfmpegCommand {
    cmd.hide_banner();
    cmd.overwrite();
    cmd.format("concat");
    cmd.args(["-safe", "0"]);
    cmd.input(manifest.to_string_lossy());
    cmd.args(["-c", "copy"]);
    cmd.output(output.to_string_lossy());
    cmd
}

/// Builds the mux command: video stream of `video`, audio stream of `audio`,
/// video copied untouched, length truncated to the shorter input.
pub fn build_mux_command(
    mut cmd: FfmpegCommand,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> FfmpegCommand {
    cmd.hide_banner();
    cmd.overwrite();
    cmd.input(video.to_string_lossy());
    cmd.input(audio.to_string_lossy());
    cmd.args(["-map", "0:v", "-map", "1:a"]);
    cmd.args(["-c:v", "copy"]);
    cmd.arg("-shortest");
    cmd.output(output.to_string_lossy());
    cmd
}

/// `MediaTool` that shells out to ffmpeg through a spawner.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTool<S: FfmpegSpawner = SidecarSpawner> {
    spawner: S,
}

impl FfmpegTool<SidecarSpawner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: FfmpegSpawner> FfmpegTool<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Runs a command to completion, failing on a non-zero exit.
    fn run(&self, label: &str, cmd: FfmpegCommand) -> CoreResult<()> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        log::debug!("Running {}: ffmpeg {}", label, args.join(" "));

        let mut child = self.spawner.spawn(cmd)?;
        let mut stderr_buffer = String::new();

        let events = child.handle_events(|event| {
            match event {
                FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                    log::warn!("{}: {}", label, line);
                    stderr_buffer.push_str(&line);
                    stderr_buffer.push('\n');
                }
                FfmpegEvent::Log(_, line) => log::trace!("{}: {}", label, line),
                _ => {}
            }
            Ok(())
        });

        // The child is reaped even when its event stream failed.
        let status = child.wait();
        events?;
        let status = status?;
        if !status.success() {
            log::error!("{} failed: {}", label, status);
            return Err(command_failed_error(label, status, stderr_buffer.trim_end()));
        }
        Ok(())
    }
}

impl<S: FfmpegSpawner> MediaTool for FfmpegTool<S> {
    fn preflight(&self) -> CoreResult<()> {
        self.spawner.check_available()
    }

    fn concatenate(&self, manifest: &Path, output: &Path) -> CoreResult<PathBuf> {
        let cmd = build_concat_command(self.spawner.command(), manifest, output);
        self.run("ffmpeg (concat)", cmd)?;
        Ok(output.to_path_buf())
    }

    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> CoreResult<PathBuf> {
        let cmd = build_mux_command(self.spawner.command(), video, audio, output);
        self.run("ffmpeg (audio mux)", cmd)?;
        Ok(output.to_path_buf())
    }
}
