use anyhow::{Context, Result};
use log::LevelFilter;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Tag appended to output names (`<video>.<tag>.ass`)
    #[serde(default = "default_tag")]
    pub tag: String,

    /// File discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Name filters
    #[serde(default)]
    pub filters: FilterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which files are picked up next to the videos
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiscoveryConfig {
    // @field: Video extensions, without dot
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    // @field: Subtitle extensions, without dot
    #[serde(default = "default_subtitle_extensions")]
    pub subtitle_extensions: Vec<String>,

    // @field: Comment file extensions, without dot
    #[serde(default = "default_comment_extensions")]
    pub comment_extensions: Vec<String>,

    // @field: List embedded subtitle tracks with ffprobe
    #[serde(default = "default_true")]
    pub probe_embedded: bool,

    // @field: Per-video probe timeout
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    // @field: Maximum number of ffprobe processes running at once
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            video_extensions: default_video_extensions(),
            subtitle_extensions: default_subtitle_extensions(),
            comment_extensions: default_comment_extensions(),
            probe_embedded: default_true(),
            probe_timeout_secs: default_probe_timeout_secs(),
            max_concurrent_probes: default_max_concurrent_probes(),
        }
    }
}

/// Regex filters on file names.
///
/// An item is kept only when it matches every expression of its list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub videos: Vec<String>,

    #[serde(default)]
    pub subtitles: Vec<String>,

    #[serde(default)]
    pub comments: Vec<String>,
}

impl FilterConfig {
    // @returns: Compiled video filters
    pub fn video_filters(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_filters(&self.videos)
    }

    // @returns: Compiled subtitle filters
    pub fn subtitle_filters(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_filters(&self.subtitles)
    }

    // @returns: Compiled comment filters
    pub fn comment_filters(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_filters(&self.comments)
    }
}

fn compile_filters(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidFilter {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_tag() -> String {
    "danmaku".to_string()
}

fn default_video_extensions() -> Vec<String> {
    [
        "mp4", "m4v", "mov", "qt", "avi", "flv", "wmv", "mpeg", "mpg", "vob", "mkv", "asf", "rm",
        "rmvb", "ts", "dat",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}

fn default_subtitle_extensions() -> Vec<String> {
    ["ass", "srt", "smi", "ssa", "sub", "stl", "idx"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_comment_extensions() -> Vec<String> {
    ["xml", "json", "protobuf"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_probe_timeout_secs() -> u64 {
    60
}

fn default_max_concurrent_probes() -> usize {
    4
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load a configuration file, writing the defaults first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tag = self.tag.as_str();
        if tag.is_empty() || tag.contains(|c: char| c == '/' || c == '\\' || c.is_whitespace()) {
            return Err(ConfigError::InvalidTag(self.tag.clone()));
        }

        if self.discovery.video_extensions.is_empty() {
            return Err(ConfigError::EmptyExtensions("video"));
        }
        if self.discovery.subtitle_extensions.is_empty() {
            return Err(ConfigError::EmptyExtensions("subtitle"));
        }
        if self.discovery.comment_extensions.is_empty() {
            return Err(ConfigError::EmptyExtensions("comment"));
        }

        if self.discovery.max_concurrent_probes == 0 {
            return Err(ConfigError::NoProbeConcurrency);
        }

        self.filters.video_filters()?;
        self.filters.subtitle_filters()?;
        self.filters.comment_filters()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tag: default_tag(),
            discovery: DiscoveryConfig::default(),
            filters: FilterConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
