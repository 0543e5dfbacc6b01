//! The camcat pipeline.
//!
//! directory → recovery → collector → [audio merge] → planner → executor.
//! Groups are handled strictly one after another; the first failure stops
//! the run and is returned to the caller. The media tool is checked before
//! the first change on disk, including the changes recovery makes.

pub mod audio_merge;
pub mod executor;
pub mod manifest;
pub mod planner;

use crate::classify::ClassifiedEntry;
use crate::config::CoreConfig;
use crate::discovery::collect_entries;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaTool;
use crate::recovery::{RecoveryReport, scan_leftovers};

use audio_merge::merge_audio_tracks;
use executor::execute_plan;
use planner::{GroupHierarchy, GroupKey, HourPlan, plan_groups};

use std::path::PathBuf;

/// Result of one hour-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub key: GroupKey,
    pub output: PathBuf,
    pub fragment_count: usize,
    /// An output from an earlier run was played first
    pub absorbed_prior: bool,
    /// Planned only, nothing was executed
    pub dry_run: bool,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub recovered: RecoveryReport,
    pub entries: usize,
    pub muxed: usize,
    pub groups: Vec<GroupOutcome>,
}

/// Receives progress notifications from `run_pipeline`.
///
/// All methods default to doing nothing.
pub trait PipelineObserver {
    fn on_recovery(&mut self, _report: &RecoveryReport) {}
    fn on_entries(&mut self, _entries: &[ClassifiedEntry]) {}
    fn on_mux(&mut self, _entry: &ClassifiedEntry) {}
    /// Called before the media tool runs for `plan`.
    fn on_group_start(&mut self, _plan: &HourPlan) {}
    fn on_group_done(&mut self, _outcome: &GroupOutcome) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Runs the whole pipeline against `config.target_dir`.
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every group was concatenated (or planned, on dry runs)
/// * `Err(CoreError::NoFilesFound)` - Nothing classified; nothing was touched
///   beyond leftover recovery
/// * `Err(CoreError::DependencyNotFound)` - The media tool is unusable;
///   nothing was touched
/// * `Err(CoreError::MuxFailed | CoreError::GroupFailed)` - A tool invocation
///   failed; its leftovers are kept for the next run to recover
pub fn run_pipeline<T, O>(config: &CoreConfig, tool: &T, observer: &mut O) -> CoreResult<RunSummary>
where
    T: MediaTool,
    O: PipelineObserver,
{
    config.validate()?;

    let target_dir = config.target_dir.canonicalize()?;
    if target_dir.to_string_lossy().contains('\'') {
        return Err(CoreError::Config(format!(
            "target directory '{}' contains a single quote, which the concat manifest cannot carry",
            target_dir.display()
        )));
    }
    let config = &CoreConfig {
        target_dir,
        ..config.clone()
    };

    let mut summary = RunSummary::default();
    let mut preflight_done = false;

    if config.resume_leftovers && !config.dry_run {
        let leftovers = scan_leftovers(config)?;
        if !leftovers.is_empty() {
            tool.preflight()?;
            preflight_done = true;
            summary.recovered = leftovers.apply()?;
            observer.on_recovery(&summary.recovered);
        }
    }

    let entries = collect_entries(config)?;
    summary.entries = entries.len();
    observer.on_entries(&entries);

    if !config.dry_run && !preflight_done {
        tool.preflight()?;
    }

    let entries = if config.merge_audio && !config.dry_run {
        let (entries, muxed) = merge_audio_tracks(tool, entries, |entry| observer.on_mux(entry))?;
        summary.muxed = muxed;
        entries
    } else {
        entries
    };

    let hierarchy = GroupHierarchy::from_entries(entries);
    let plans = plan_groups(config, &hierarchy, |output| output.is_file());
    log::info!(
        "Planned {} hour-group(s) across {} camera(s)",
        plans.len(),
        hierarchy.cameras().count()
    );

    for plan in &plans {
        observer.on_group_start(plan);

        let outcome = if config.dry_run {
            GroupOutcome {
                key: plan.key.clone(),
                output: plan.output.clone(),
                fragment_count: plan.fragments.len(),
                absorbed_prior: plan.prior.is_some(),
                dry_run: true,
            }
        } else {
            execute_plan(config, tool, plan)?
        };

        observer.on_group_done(&outcome);
        summary.groups.push(outcome);
    }

    Ok(summary)
}
