//! Entry collection: finding the recorder fragments in the target directory.
//!
//! Only the top level of the directory is scanned. Every regular file is run
//! through the classifier; in the audio-aware variant a fragment is kept only
//! when its audio sibling exists as well.

use crate::classify::ClassifiedEntry;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};

use std::fs;
use std::path::PathBuf;

/// Collects the classified fragments of `config.target_dir`, sorted by
/// camera, date and full time of day.
///
/// # Returns
///
/// * `Ok(Vec<ClassifiedEntry>)` - The sorted, non-empty entry list
/// * `Err(CoreError::NoFilesFound)` - If nothing in the directory classifies
/// * `Err(CoreError::Io)` - If the directory cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use camcat_core::config::CoreConfig;
/// use camcat_core::discovery::collect_entries;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/srv/recordings"));
/// for entry in collect_entries(&config).unwrap() {
///     println!("{} camera={} hour={}", entry.file_name(), entry.camera_id(), entry.hour());
/// }
/// ```
pub fn collect_entries(config: &CoreConfig) -> CoreResult<Vec<ClassifiedEntry>> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(&config.target_dir)? {
        let path: PathBuf = dir_entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(entry) = ClassifiedEntry::from_path(&path, &config.video_extension) else {
            log::trace!("Skipping unrecognized file {}", path.display());
            continue;
        };

        if config.merge_audio {
            let audio = config.audio_sibling(&path);
            if !audio.is_file() {
                log::debug!(
                    "Skipping {}: no {} audio track next to it",
                    entry.file_name(),
                    config.audio_extension
                );
                continue;
            }
            entries.push(entry.with_audio(audio));
        } else {
            entries.push(entry);
        }
    }

    if entries.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.path().cmp(b.path())));

    for entry in &entries {
        log::info!(
            "{} camera={} date={} hour={}",
            entry.file_name(),
            entry.camera_id(),
            entry.date(),
            entry.hour()
        );
    }

    Ok(entries)
}
