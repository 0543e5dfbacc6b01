//! Filename classification for recorder fragments.
//!
//! The recorder names every fragment `<date>_<HH.MM.SS>_<camera>[-<suffix>].<ext>`,
//! e.g. `2023-05-01_10.15.00_1-0.mkv`. Anything that does not follow that
//! shape exactly is not ours and is skipped without complaint.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Anchored at both ends so `notes_2023-05-01_10.00.00_1.mkv` or
/// `2023-05-01_10.00.00_1.mkv.old` never classify.
static FRAGMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>\d{4}-\d{2}-\d{2})_(?P<time>(?P<hour>\d{2})\.\d{2}\.\d{2})_(?P<camera>\d+)(?:-[0-9A-Za-z]+)?\.(?P<ext>[^.]+)$",
    )
    .expect("fragment name pattern is valid")
});

static HOURLY_OUTPUT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{2}\.00\.00\.(?P<ext>[^.]+)$")
        .expect("hourly output name pattern is valid")
});

/// Whether `file_name` has the shape of an hourly output, `<date>_<HH>.00.00.<ext>`.
pub fn is_hourly_output(file_name: &str, extension: &str) -> bool {
    HOURLY_OUTPUT_NAME
        .captures(file_name)
        .is_some_and(|caps| &caps["ext"] == extension)
}

/// Fields extracted from a fragment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub camera_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH.MM.SS`
    pub time: String,
    /// `HH`, the concatenation bucket
    pub hour: String,
}

/// Classifies a bare file name, accepting only the exact `extension`.
///
/// Returns `None` on any structural mismatch, including a differently cased
/// extension.
pub fn classify(file_name: &str, extension: &str) -> Option<Classification> {
    let caps = FRAGMENT_NAME.captures(file_name)?;
    if &caps["ext"] != extension {
        return None;
    }
    Some(Classification {
        camera_id: caps["camera"].to_string(),
        date: caps["date"].to_string(),
        time: caps["time"].to_string(),
        hour: caps["hour"].to_string(),
    })
}

/// One recognized input fragment.
///
/// Camera, date and hour are derived once from the file name and cannot be
/// changed afterwards; only the audio pairing can be attached or consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    path: PathBuf,
    camera_id: String,
    date: String,
    time: String,
    hour: String,
    audio_path: Option<PathBuf>,
}

impl ClassifiedEntry {
    /// Classifies `path` by its file name.
    pub fn from_path(path: &Path, extension: &str) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let Classification {
            camera_id,
            date,
            time,
            hour,
        } = classify(name, extension)?;
        Some(Self {
            path: path.to_path_buf(),
            camera_id,
            date,
            time,
            hour,
            audio_path: None,
        })
    }

    pub fn with_audio(mut self, audio_path: PathBuf) -> Self {
        self.audio_path = Some(audio_path);
        self
    }

    /// Drops the audio pairing once the track has been muxed in.
    pub fn without_audio(mut self) -> Self {
        self.audio_path = None;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn hour(&self) -> &str {
        &self.hour
    }

    pub fn audio_path(&self) -> Option<&Path> {
        self.audio_path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Composite ordering key: camera, then date, then full time of day.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.camera_id, &self.date, &self.time)
    }
}
