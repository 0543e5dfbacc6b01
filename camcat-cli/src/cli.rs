// camcat-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use camcat_core::CoreConfig;
use camcat_core::CoreConfigBuilder;
use camcat_core::config::{DEFAULT_AUDIO_EXTENSION, DEFAULT_VIDEO_EXTENSION};
use clap::ArgAction;
use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "camcat: group and concatenate security-camera recordings per hour",
    long_about = "Collects recorder fragments named <date>_<HH.MM.SS>_<camera>.<ext> from \
                  TARGET_DIR and stream-copies them into \
                  TARGET_DIR/camera_<id>/<date>/<date>_<HH>.00.00.<ext> with ffmpeg. \
                  Running again appends new fragments to the existing hourly files."
)]
pub struct Cli {
    /// Directory the recorder writes fragments into
    #[arg(value_name = "TARGET_DIR", value_parser = parse_target_dir)]
    pub target_dir: PathBuf,

    /// Merge each fragment's sibling audio file into it before concatenating.
    /// Fragments without an audio file are left alone.
    #[arg(long, env = "CAMCAT_AUDIO", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub audio: bool,

    /// Delete fragments once they are concatenated (1) or keep them (0)
    #[arg(
        long = "remove-small-files",
        value_name = "0|1",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub remove_small_files: u8,

    /// Extension of video fragments and hourly outputs
    #[arg(long = "video-ext", value_name = "EXT", default_value = DEFAULT_VIDEO_EXTENSION)]
    pub video_ext: String,

    /// Extension of the audio files paired with fragments
    #[arg(long = "audio-ext", value_name = "EXT", default_value = DEFAULT_AUDIO_EXTENSION)]
    pub audio_ext: String,

    /// Do not restore leftovers of an interrupted run before starting
    #[arg(long, default_value_t = false)]
    pub no_resume: bool,

    /// Print the plan without renaming, concatenating or deleting anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// ffmpeg binary to run instead of `ffmpeg` from PATH
    #[arg(long, value_name = "PATH", env = "CAMCAT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

impl Cli {
    /// Core configuration described by these arguments.
    pub fn to_core_config(&self) -> CoreConfig {
        CoreConfigBuilder::new(self.target_dir.clone())
            .video_extension(self.video_ext.as_str())
            .audio_extension(self.audio_ext.as_str())
            .merge_audio(self.audio)
            .remove_sources(self.remove_small_files == 1)
            .resume_leftovers(!self.no_resume)
            .dry_run(self.dry_run)
            .build()
    }
}

fn parse_target_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("'{}' is not an existing directory", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_core_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["camcat", dir.path().to_str().unwrap()]).unwrap();
        let config = cli.to_core_config();

        assert_eq!(config.target_dir, dir.path());
        assert_eq!(config.video_extension, "mkv");
        assert_eq!(config.audio_extension, "wav");
        assert!(config.remove_sources);
        assert!(config.resume_leftovers);
        assert!(!config.dry_run);
    }

    #[test]
    fn flags_are_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "camcat",
            "--audio",
            "--remove-small-files",
            "0",
            "--video-ext",
            "mp4",
            "--audio-ext",
            "aac",
            "--no-resume",
            "--dry-run",
            "-vv",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let config = cli.to_core_config();

        assert!(config.merge_audio);
        assert!(!config.remove_sources);
        assert!(!config.resume_leftovers);
        assert!(config.dry_run);
        assert_eq!(config.video_extension, "mp4");
        assert_eq!(config.audio_extension, "aac");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_missing_directory_and_bad_flag_value() {
        assert!(Cli::try_parse_from(["camcat", "surely/this/does/not/exist"]).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();
        assert!(Cli::try_parse_from(["camcat", "--remove-small-files", "2", path]).is_err());
    }
}
