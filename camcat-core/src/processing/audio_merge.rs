//! Audio merge stage.
//!
//! For each fragment paired with an audio track: move the silent video aside
//! to `<video>.old`, mux `.old` video + audio back into the original name,
//! then delete `.old` and the consumed audio file. A failed mux stops the
//! run and leaves `.old` and the audio file untouched so recovery can put
//! the fragment back.

use crate::classify::ClassifiedEntry;
use crate::config::old_path;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaTool;

use std::fs;

/// Muxes the audio of every paired entry into its video.
///
/// Returns the entries with their audio pairing consumed, in the same order,
/// and the number of muxes performed. `on_mux` is called before each mux.
pub fn merge_audio_tracks<T, F>(
    tool: &T,
    entries: Vec<ClassifiedEntry>,
    mut on_mux: F,
) -> CoreResult<(Vec<ClassifiedEntry>, usize)>
where
    T: MediaTool,
    F: FnMut(&ClassifiedEntry),
{
    let mut merged = Vec::with_capacity(entries.len());
    let mut muxed = 0;

    for entry in entries {
        let Some(audio) = entry.audio_path().map(|p| p.to_path_buf()) else {
            merged.push(entry);
            continue;
        };

        let video = entry.path().to_path_buf();
        let aside = old_path(&video);
        if aside.exists() {
            return Err(CoreError::PathError(format!(
                "'{}' already exists; a previous audio merge was interrupted",
                aside.display()
            )));
        }

        on_mux(&entry);
        log::info!(
            "Merging audio {} into {}",
            audio.display(),
            video.display()
        );

        fs::rename(&video, &aside)?;
        tool.mux_audio(&aside, &audio, &video)
            .map_err(|e| CoreError::MuxFailed {
                video: video.clone(),
                source: Box::new(e),
            })?;

        fs::remove_file(&aside)?;
        fs::remove_file(&audio)?;
        muxed += 1;
        merged.push(entry.without_audio());
    }

    Ok((merged, muxed))
}
