//! The concatenation run.
//!
//! Builds the core configuration and ffmpeg tool from the parsed arguments,
//! runs the pipeline and reports progress on the console as it goes.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::terminal;

use camcat_core::processing::planner::HourPlan;
use camcat_core::{
    ClassifiedEntry, CoreError, FfmpegTool, GroupOutcome, PipelineObserver, RecoveryReport,
    RunSummary, SidecarSpawner, run_pipeline,
};

use std::path::Path;

/// Prints pipeline notifications as they arrive.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    groups_started: usize,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl PipelineObserver for ConsoleObserver {
    fn on_recovery(&mut self, report: &RecoveryReport) {
        terminal::print_section("Recovery");
        for path in report
            .restored_fragments
            .iter()
            .chain(&report.restored_outputs)
        {
            terminal::print_sub_item(&format!("restored {}", path.display()));
        }
        for path in report.removed_manifests.iter().chain(&report.removed_partials) {
            terminal::print_sub_item(&format!("removed {}", path.display()));
        }
    }

    fn on_entries(&mut self, entries: &[ClassifiedEntry]) {
        terminal::print_section("Recordings");
        terminal::print_status("Fragments", &entries.len().to_string(), true);
        for entry in entries {
            terminal::print_sub_item(&format!(
                "{}  camera {}, {} {}h",
                entry.file_name(),
                entry.camera_id(),
                entry.date(),
                entry.hour()
            ));
        }
    }

    fn on_mux(&mut self, entry: &ClassifiedEntry) {
        terminal::print_processing(&format!("Merging audio into {}", entry.file_name()));
    }

    fn on_group_start(&mut self, plan: &HourPlan) {
        if self.groups_started == 0 {
            terminal::print_section("Hourly files");
        }
        self.groups_started += 1;

        terminal::print_processing(&plan.key.to_string());
        terminal::print_status("Output", &plan.output.display().to_string(), false);
        for input in plan.manifest_entries() {
            terminal::print_sub_item(&file_name(&input));
        }
    }

    fn on_group_done(&mut self, outcome: &GroupOutcome) {
        if !outcome.dry_run {
            terminal::print_success(&format!(
                "{} written ({} fragment(s))",
                file_name(&outcome.output),
                outcome.fragment_count
            ));
        }
    }
}

/// Prints the closing summary of a run.
pub fn print_summary(summary: &RunSummary, dry_run: bool) {
    terminal::print_section(if dry_run { "Plan (dry run)" } else { "Summary" });
    terminal::print_status("Fragments", &summary.entries.to_string(), false);
    if summary.muxed > 0 {
        terminal::print_status("Audio merged", &summary.muxed.to_string(), false);
    }
    let appended = summary.groups.iter().filter(|g| g.absorbed_prior).count();
    terminal::print_status("Hour groups", &summary.groups.len().to_string(), true);
    terminal::print_status("Appended", &appended.to_string(), false);
}

/// Runs one pass over `args.target_dir`.
///
/// An empty directory is reported and returned as `CoreError::NoFilesFound`
/// so the caller can pick a neutral exit code.
pub fn run_concat(args: &Cli) -> CliResult<()> {
    let config = args.to_core_config();
    let spawner = match &args.ffmpeg {
        Some(path) => SidecarSpawner::with_binary(path.clone()),
        None => SidecarSpawner::new(),
    };
    let tool = FfmpegTool::with_spawner(spawner);

    log::info!("Scanning {}", config.target_dir.display());
    if config.dry_run {
        log::info!("Dry run: nothing will be renamed, concatenated or deleted");
    }

    let mut observer = ConsoleObserver::default();
    match run_pipeline(&config, &tool, &mut observer) {
        Ok(summary) => {
            print_summary(&summary, config.dry_run);
            Ok(())
        }
        Err(CoreError::NoFilesFound) => {
            terminal::print_status(
                "Nothing to do",
                &format!("no recordings in {}", config.target_dir.display()),
                false,
            );
            Err(CoreError::NoFilesFound)
        }
        Err(e) => Err(e),
    }
}
