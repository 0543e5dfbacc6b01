//! Core library for concatenating security-camera recordings per hour.
//!
//! The recorder drops many short fragments named
//! `<date>_<HH.MM.SS>_<camera>[-<suffix>].<ext>` into one directory. This
//! crate classifies them, optionally muxes a same-named audio track into each
//! one, groups them per camera, date and hour, and asks ffmpeg to stream-copy
//! every hour into `<target>/camera_<id>/<date>/<date>_<hour>.00.00.<ext>`.
//! Re-running appends: an hourly output that already exists is played first
//! in the new one.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use camcat_core::{CoreConfig, FfmpegTool, NoopObserver, run_pipeline};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(PathBuf::from("/srv/recordings"));
//! let summary = run_pipeline(&config, &FfmpegTool::new(), &mut NoopObserver).unwrap();
//! for group in &summary.groups {
//!     println!("{} -> {}", group.key, group.output.display());
//! }
//! ```

pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod recovery;
pub mod temp_files;

// Re-exports for public API
pub use classify::{ClassifiedEntry, classify};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::collect_entries;
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegTool, MediaTool, SidecarSpawner, check_dependency};
pub use processing::planner::{GroupHierarchy, GroupKey, HourPlan, plan_groups};
pub use processing::{GroupOutcome, NoopObserver, PipelineObserver, RunSummary, run_pipeline};
pub use recovery::{Leftovers, RecoveryReport, recover_leftovers, scan_leftovers};
