// camcat-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::MediaTool;
use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::processing::manifest::parse_manifest;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Separator the fake tool writes between video and audio bytes when muxing.
pub const FAKE_MUX_SEPARATOR: &[u8] = b"|audio|";

/// Exit status of a process that exited with `code`.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Exit status of a process that exited with `code`.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Make handle_events fail after emitting the events.
    pub fail_events: bool,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
    waits: Rc<Cell<usize>>,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        if self.fail_events {
            return Err(command_failed_error(
                "mock ffmpeg (events)",
                self.exit_status,
                "event stream broke off",
            ));
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.waits.set(self.waits.get() + 1);
        Ok(self.exit_status)
    }
}

struct MockFfmpegExpectation {
    arg_pattern: String,
    exit_code: i32,
    fail_events: bool,
}

/// Mock implementation of FfmpegSpawner matching expectations by argument substring.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    waits: Rc<Cell<usize>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one command containing `arg_pattern`; it exits with `exit_code`.
    pub fn add_exit_expectation(&self, arg_pattern: &str, exit_code: i32) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            exit_code,
            fail_events: false,
        });
    }

    /// Expects one command containing `arg_pattern` whose event stream fails.
    pub fn add_event_failure_expectation(&self, arg_pattern: &str) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            exit_code: 1,
            fail_events: true,
        });
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// How many times a spawned process was waited on.
    pub fn wait_count(&self) -> usize {
        self.waits.get()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        match found_index {
            Some(index) => {
                let expectation = expectations.remove(index);
                log::info!(
                    "MockFfmpegSpawner: Matched expectation with pattern '{}'",
                    expectation.arg_pattern
                );
                let events = if expectation.exit_code == 0 {
                    Vec::new()
                } else {
                    vec![FfmpegEvent::Error("simulated ffmpeg failure".to_string())]
                };
                Ok(MockFfmpegProcess {
                    events_to_emit: events,
                    fail_events: expectation.fail_events,
                    exit_status: exit_status(expectation.exit_code),
                    waits: Rc::clone(&self.waits),
                })
            }
            None => panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args),
        }
    }
}

/// A call the fake tool received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Concatenate { inputs: Vec<PathBuf>, output: PathBuf },
    MuxAudio { video: PathBuf, audio: PathBuf, output: PathBuf },
}

/// In-process `MediaTool` that works on raw bytes.
///
/// Concatenation writes the inputs' bytes back to back; muxing writes the
/// video bytes, `FAKE_MUX_SEPARATOR`, then the audio bytes. Failures can be
/// scheduled for the n-th call of either kind (zero-based).
#[derive(Clone, Default)]
pub struct FakeMediaTool {
    calls: Rc<RefCell<Vec<FakeCall>>>,
    fail_concat_at: Rc<RefCell<Option<usize>>>,
    fail_mux_at: Rc<RefCell<Option<usize>>>,
    unavailable: Rc<Cell<bool>>,
}

impl FakeMediaTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `index`-th concatenation fail after partially writing its output.
    pub fn fail_concat_at(&self, index: usize) {
        *self.fail_concat_at.borrow_mut() = Some(index);
    }

    /// Makes the `index`-th mux fail after partially writing its output.
    pub fn fail_mux_at(&self, index: usize) {
        *self.fail_mux_at.borrow_mut() = Some(index);
    }

    /// Makes `preflight` report the tool as missing.
    pub fn fail_preflight(&self) {
        self.unavailable.set(true);
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.borrow().clone()
    }

    fn count(&self, concat: bool) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, FakeCall::Concatenate { .. }) == concat)
            .count()
    }

    fn simulated_failure(label: &str, output: &Path) -> CoreResult<PathBuf> {
        fs::write(output, b"partial")?;
        Err(command_failed_error(
            label,
            exit_status(1),
            "simulated failure",
        ))
    }
}

impl MediaTool for FakeMediaTool {
    fn preflight(&self) -> CoreResult<()> {
        if self.unavailable.get() {
            return Err(CoreError::DependencyNotFound("ffmpeg".to_string()));
        }
        Ok(())
    }

    fn concatenate(&self, manifest: &Path, output: &Path) -> CoreResult<PathBuf> {
        let inputs = parse_manifest(&fs::read_to_string(manifest)?);
        let index = self.count(true);
        self.calls.borrow_mut().push(FakeCall::Concatenate {
            inputs: inputs.clone(),
            output: output.to_path_buf(),
        });

        if *self.fail_concat_at.borrow() == Some(index) {
            return Self::simulated_failure("fake (concat)", output);
        }

        let mut bytes = Vec::new();
        for input in &inputs {
            bytes.extend(fs::read(input)?);
        }
        fs::write(output, bytes)?;
        Ok(output.to_path_buf())
    }

    fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> CoreResult<PathBuf> {
        let index = self.count(false);
        self.calls.borrow_mut().push(FakeCall::MuxAudio {
            video: video.to_path_buf(),
            audio: audio.to_path_buf(),
            output: output.to_path_buf(),
        });

        if *self.fail_mux_at.borrow() == Some(index) {
            return Self::simulated_failure("fake (audio mux)", output);
        }

        let mut bytes = fs::read(video)?;
        bytes.extend_from_slice(FAKE_MUX_SEPARATOR);
        bytes.extend(fs::read(audio)?);
        fs::write(output, bytes)?;
        Ok(output.to_path_buf())
    }
}
