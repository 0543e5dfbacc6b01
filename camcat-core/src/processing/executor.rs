//! Concatenation executor.
//!
//! Each hour-group runs as a small transaction:
//!
//! 1. an existing output is renamed to `<output>.old`
//! 2. the manifest (prior output first, then fragments) is written
//! 3. the media tool concatenates it into `partial_<output name>`
//! 4. on success the partial file is renamed onto the output, then the
//!    manifest, the `.old` output and, when configured, the fragments are
//!    deleted
//!
//! On a tool failure the partial file is removed and nothing else is rolled
//! back: `.old`, the manifest and every fragment stay where they are and the
//! error names the group. The output path itself only ever holds a finished
//! concatenation.

use super::manifest::write_manifest;
use super::planner::HourPlan;
use super::GroupOutcome;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaTool;
use crate::temp_files::partial_output_path;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stops the manifest from being deleted on drop and returns its path.
///
/// A manifest that cannot be kept is logged; its path is still returned so
/// the caller can report the group.
pub fn keep_manifest(manifest: NamedTempFile) -> PathBuf {
    let path = manifest.path().to_path_buf();
    if let Err(persist) = manifest.keep() {
        log::error!(
            "Could not keep manifest {}: {}",
            path.display(),
            persist.error
        );
    }
    path
}

fn remove_partial(partial: &Path) {
    if !partial.exists() {
        return;
    }
    log::debug!("Removing unfinished output {}", partial.display());
    if let Err(e) = fs::remove_file(partial) {
        log::warn!(
            "Could not remove unfinished output {}: {}",
            partial.display(),
            e
        );
    }
}

pub fn execute_plan<T: MediaTool>(
    config: &CoreConfig,
    tool: &T,
    plan: &HourPlan,
) -> CoreResult<GroupOutcome> {
    fs::create_dir_all(&plan.date_dir)?;

    if let Some(prior) = &plan.prior {
        if prior.exists() {
            return Err(CoreError::PathError(format!(
                "'{}' already exists; resume the interrupted run before adding to {}",
                prior.display(),
                plan.output.display()
            )));
        }
        log::debug!(
            "Moving existing output {} aside to {}",
            plan.output.display(),
            prior.display()
        );
        fs::rename(&plan.output, prior)?;
    }

    let inputs = plan.manifest_entries();
    let manifest = write_manifest(&plan.date_dir, &inputs)?;

    log::info!(
        "Concatenating {} input(s) for {} into {}",
        inputs.len(),
        plan.key,
        plan.output.display()
    );

    let partial = partial_output_path(&plan.output);
    if let Err(e) = tool.concatenate(manifest.path(), &partial) {
        remove_partial(&partial);
        let manifest_path = keep_manifest(manifest);
        log::error!(
            "Concatenation failed for {}; manifest kept at {}",
            plan.key,
            manifest_path.display()
        );
        return Err(CoreError::GroupFailed {
            group: plan.key.to_string(),
            manifest: manifest_path,
            source: Box::new(e),
        });
    }

    fs::rename(&partial, &plan.output)?;
    manifest.close()?;

    // Prior output before fragments: while .old survives, every fragment of
    // the group is still on disk and recovery can redo the group.
    if let Some(prior) = &plan.prior {
        fs::remove_file(prior)?;
    }

    if config.remove_sources {
        for fragment in &plan.fragments {
            log::debug!("Removing fragment {}", fragment.display());
            fs::remove_file(fragment)?;
        }
    }

    Ok(GroupOutcome {
        key: plan.key.clone(),
        output: plan.output.clone(),
        fragment_count: plan.fragments.len(),
        absorbed_prior: plan.prior.is_some(),
        dry_run: false,
    })
}
