// ============================================================================
// camcat-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Provides a fluent API for creating CoreConfig instances. Fields that are
// not set keep the defaults of `CoreConfig::new`.

use std::path::PathBuf;

use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use camcat_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new(PathBuf::from("/srv/recordings"))
///     .merge_audio(true)
///     .audio_extension("aac")
///     .remove_sources(false)
///     .build();
/// assert!(config.merge_audio);
/// assert_eq!(config.audio_extension, "aac");
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            config: CoreConfig::new(target_dir),
        }
    }

    /// Sets the extension of video fragments and hourly outputs.
    pub fn video_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.video_extension = ext.into();
        self
    }

    /// Sets the extension of paired audio files.
    pub fn audio_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.audio_extension = ext.into();
        self
    }

    /// Enables the audio-aware variant.
    pub fn merge_audio(mut self, enable: bool) -> Self {
        self.config.merge_audio = enable;
        self
    }

    /// Sets whether fragments are deleted after a successful concatenation.
    pub fn remove_sources(mut self, remove: bool) -> Self {
        self.config.remove_sources = remove;
        self
    }

    /// Sets whether leftovers of an interrupted run are restored first.
    pub fn resume_leftovers(mut self, resume: bool) -> Self {
        self.config.resume_leftovers = resume;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn build(self) -> CoreConfig {
        self.config
    }
}
