// camcat-core/tests/resume_tests.rs

mod common;

use camcat_core::config::{CoreConfig, CoreConfigBuilder};
use camcat_core::error::CoreError;
use camcat_core::external::mocks::{FAKE_MUX_SEPARATOR, FakeMediaTool};
use camcat_core::processing::{NoopObserver, run_pipeline};
use common::{create_dummy_file, list_names, list_tree};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_failed_concat_keeps_leftovers_and_next_run_recovers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();
    let date_dir = root.join("camera_1").join("2023-05-01");
    fs::create_dir_all(&date_dir)?;

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"[a]");
    create_dummy_file(root, "2023-05-01_10.30.00_1.mkv", b"[b]");
    create_dummy_file(root, "2023-05-01_11.00.00_1.mkv", b"[c]");
    create_dummy_file(&date_dir, "2023-05-01_11.00.00.mkv", b"[prior]");

    let config = CoreConfig::new(root.to_path_buf());
    let tool = FakeMediaTool::new();
    tool.fail_concat_at(1); // The 11h group

    let manifest = match run_pipeline(&config, &tool, &mut NoopObserver) {
        Err(CoreError::GroupFailed { group, manifest, source }) => {
            assert_eq!(group, "camera 1 / 2023-05-01 / 11h");
            assert!(matches!(*source, CoreError::CommandFailed { .. }));
            manifest
        }
        other => panic!("Unexpected result: {:?}", other),
    };

    // The 10h group finished before the failure.
    assert_eq!(fs::read(date_dir.join("2023-05-01_10.00.00.mkv"))?, b"[a][b]");
    assert!(!root.join("2023-05-01_10.00.00_1.mkv").exists());

    // The 11h group left everything needed to redo it, and no half-written
    // file at the output path.
    assert!(manifest.is_file());
    assert_eq!(manifest.parent(), Some(date_dir.canonicalize()?.as_path()));
    assert_eq!(fs::read(date_dir.join("2023-05-01_11.00.00.mkv.old"))?, b"[prior]");
    assert!(!date_dir.join("2023-05-01_11.00.00.mkv").exists());
    assert!(!date_dir.join("partial_2023-05-01_11.00.00.mkv").exists());
    assert_eq!(fs::read(root.join("2023-05-01_11.00.00_1.mkv"))?, b"[c]");

    let summary = run_pipeline(&config, &FakeMediaTool::new(), &mut NoopObserver)?;

    assert_eq!(summary.recovered.restored_outputs.len(), 1);
    assert_eq!(summary.recovered.removed_manifests.len(), 1);
    assert_eq!(summary.groups.len(), 1);
    assert_eq!(fs::read(date_dir.join("2023-05-01_11.00.00.mkv"))?, b"[prior][c]");
    assert_eq!(
        list_tree(root),
        [
            "camera_1/2023-05-01/2023-05-01_10.00.00.mkv",
            "camera_1/2023-05-01/2023-05-01_11.00.00.mkv",
        ]
    );
    Ok(())
}

#[test]
fn test_leftover_output_without_resume_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();
    let date_dir = root.join("camera_1").join("2023-05-01");
    fs::create_dir_all(&date_dir)?;

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"[a]");
    create_dummy_file(&date_dir, "2023-05-01_10.00.00.mkv", b"partial");
    create_dummy_file(&date_dir, "2023-05-01_10.00.00.mkv.old", b"[prior]");

    let config = CoreConfigBuilder::new(root.to_path_buf())
        .resume_leftovers(false)
        .build();
    let tool = FakeMediaTool::new();
    match run_pipeline(&config, &tool, &mut NoopObserver) {
        Err(CoreError::PathError(_)) => {}
        other => panic!("Unexpected result: {:?}", other),
    }

    assert!(tool.calls().is_empty());
    assert_eq!(fs::read(date_dir.join("2023-05-01_10.00.00.mkv.old"))?, b"[prior]");
    assert_eq!(fs::read(root.join("2023-05-01_10.00.00_1.mkv"))?, b"[a]");
    Ok(())
}

#[test]
fn test_failed_mux_keeps_silent_video_and_audio() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"[a]");
    create_dummy_file(root, "2023-05-01_10.00.00_1.wav", b"~a~");
    create_dummy_file(root, "2023-05-01_10.30.00_1.mkv", b"[b]");
    create_dummy_file(root, "2023-05-01_10.30.00_1.wav", b"~b~");

    let config = CoreConfigBuilder::new(root.to_path_buf())
        .merge_audio(true)
        .build();
    let tool = FakeMediaTool::new();
    tool.fail_mux_at(1);

    match run_pipeline(&config, &tool, &mut NoopObserver) {
        Err(CoreError::MuxFailed { video, .. }) => {
            assert!(video.ends_with("2023-05-01_10.30.00_1.mkv"));
        }
        other => panic!("Unexpected result: {:?}", other),
    }

    // No concatenation ran; the failed fragment sits beside its .old original.
    assert_eq!(
        list_names(root),
        [
            "2023-05-01_10.00.00_1.mkv",
            "2023-05-01_10.30.00_1.mkv",
            "2023-05-01_10.30.00_1.mkv.old",
            "2023-05-01_10.30.00_1.wav",
        ]
    );
    assert_eq!(fs::read(root.join("2023-05-01_10.30.00_1.mkv.old"))?, b"[b]");

    let summary = run_pipeline(&config, &FakeMediaTool::new(), &mut NoopObserver)?;
    assert_eq!(summary.recovered.restored_fragments.len(), 1);
    // Only the restored fragment still has a track to merge.
    assert_eq!(summary.entries, 1);
    assert_eq!(summary.muxed, 1);

    let sep = String::from_utf8_lossy(FAKE_MUX_SEPARATOR);
    let output = root
        .join("camera_1")
        .join("2023-05-01")
        .join("2023-05-01_10.00.00.mkv");
    assert_eq!(fs::read_to_string(&output)?, format!("[b]{sep}~b~"));

    // The fragment muxed in the first run has no audio left and stays put.
    assert_eq!(list_names(root), ["2023-05-01_10.00.00_1.mkv", "camera_1"]);
    Ok(())
}

#[test]
fn test_failed_first_concat_is_not_absorbed_on_rerun() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();
    let date_dir = root.join("camera_1").join("2023-05-01");
    let output = date_dir.join("2023-05-01_10.00.00.mkv");

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"[a]");

    let config = CoreConfig::new(root.to_path_buf());
    let tool = FakeMediaTool::new();
    tool.fail_concat_at(0);
    match run_pipeline(&config, &tool, &mut NoopObserver) {
        Err(CoreError::GroupFailed { .. }) => {}
        other => panic!("Unexpected result: {:?}", other),
    }

    // Only the manifest is left next to where the output will go.
    assert!(!output.exists());
    let names = list_names(&date_dir);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("concat_"));

    let summary = run_pipeline(&config, &FakeMediaTool::new(), &mut NoopObserver)?;

    assert_eq!(summary.recovered.removed_manifests.len(), 1);
    assert!(!summary.groups[0].absorbed_prior);
    assert_eq!(fs::read(&output)?, b"[a]");
    assert_eq!(list_tree(root), ["camera_1/2023-05-01/2023-05-01_10.00.00.mkv"]);
    Ok(())
}

#[test]
fn test_unfinished_output_from_a_crash_is_discarded() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();
    let date_dir = root.join("camera_1").join("2023-05-01");
    fs::create_dir_all(&date_dir)?;

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"[a]");
    create_dummy_file(&date_dir, "partial_2023-05-01_10.00.00.mkv", b"half");
    create_dummy_file(&date_dir, "concat_x1y2z3.txt", b"file '/gone'\n");

    let config = CoreConfig::new(root.to_path_buf());
    let summary = run_pipeline(&config, &FakeMediaTool::new(), &mut NoopObserver)?;

    assert_eq!(summary.recovered.removed_partials.len(), 1);
    assert_eq!(summary.recovered.removed_manifests.len(), 1);
    assert_eq!(fs::read(date_dir.join("2023-05-01_10.00.00.mkv"))?, b"[a]");
    assert_eq!(list_names(&date_dir), ["2023-05-01_10.00.00.mkv"]);
    Ok(())
}

#[test]
fn test_missing_tool_leaves_leftovers_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv", b"partial");
    create_dummy_file(root, "2023-05-01_10.00.00_1.mkv.old", b"[a]");
    let before = list_tree(root);

    let config = CoreConfig::new(root.to_path_buf());
    let tool = FakeMediaTool::new();
    tool.fail_preflight();
    match run_pipeline(&config, &tool, &mut NoopObserver) {
        Err(CoreError::DependencyNotFound(_)) => {}
        other => panic!("Unexpected result: {:?}", other),
    }

    assert_eq!(list_tree(root), before);
    assert_eq!(fs::read(root.join("2023-05-01_10.00.00_1.mkv"))?, b"partial");
    assert!(tool.calls().is_empty());

    let summary = run_pipeline(&config, &FakeMediaTool::new(), &mut NoopObserver)?;
    assert_eq!(summary.recovered.restored_fragments.len(), 1);
    assert_eq!(
        fs::read(root.join("camera_1").join("2023-05-01").join("2023-05-01_10.00.00.mkv"))?,
        b"[a]"
    );
    Ok(())
}
