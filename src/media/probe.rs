/*!
 * Embedded subtitle track discovery.
 *
 * Video containers often carry their own subtitle streams. The streams are
 * listed with `ffprobe` and turned into subtitle candidates that carry the
 * stream's `language` and `title` tags.
 */

use async_trait::async_trait;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::{from_str, Value};
use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use super::LanguageMetadata;
use crate::errors::DiscoveryError;

/// Information about a subtitle stream inside a video container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// The stream index inside the container
    pub index: usize,
    /// The codec name of the stream
    pub codec_name: String,
    /// The `language` tag, if any
    pub language: Option<String>,
    /// The `title` tag, if any
    pub title: Option<String>,
}

impl LanguageMetadata for SubtitleTrack {
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Source of embedded subtitle track listings
///
/// Implemented by the `ffprobe` backed prober and by test doubles.
#[async_trait]
pub trait TrackProbe: Send + Sync + Debug {
    /// List the subtitle streams of a video file
    async fn subtitle_tracks(&self, video_path: &Path) -> Result<Vec<SubtitleTrack>, DiscoveryError>;
}

/// Lists subtitle streams by running `ffprobe`
#[derive(Debug, Clone)]
pub struct FfprobeTrackProbe {
    timeout: Duration,
}

impl FfprobeTrackProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Parse the JSON document printed by `ffprobe -show_streams`
    pub fn parse_streams(json: &str) -> Result<Vec<SubtitleTrack>, DiscoveryError> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let json: Value = from_str(json)
            .map_err(|e| DiscoveryError::Probe(format!("Failed to parse ffprobe JSON output: {}", e)))?;

        let mut tracks = Vec::new();

        if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
            for stream in streams {
                let index = stream
                    .get("index")
                    .and_then(|v| v.as_u64())
                    .map(|v| v as usize)
                    .unwrap_or(0);

                let codec_name = stream
                    .get("codec_name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");

                let tag = |key: &str| {
                    stream
                        .get("tags")
                        .and_then(|t| t.get(key))
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string())
                };

                tracks.push(SubtitleTrack {
                    index,
                    codec_name: codec_name.to_string(),
                    language: tag("language"),
                    title: tag("title"),
                });
            }
        }

        Ok(tracks)
    }
}

impl Default for FfprobeTrackProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[async_trait]
impl TrackProbe for FfprobeTrackProbe {
    async fn subtitle_tracks(&self, video_path: &Path) -> Result<Vec<SubtitleTrack>, DiscoveryError> {
        if !video_path.exists() {
            return Err(DiscoveryError::Probe(format!("Video file not found: {:?}", video_path)));
        }

        let ffprobe_future = Command::new("ffprobe")
            .args(["-v", "quiet", "-print_format", "json", "-show_streams", "-select_streams", "s"])
            .arg(video_path)
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|e| DiscoveryError::Probe(format!("Failed to execute ffprobe command: {}", e)))?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(DiscoveryError::Probe(format!(
                    "ffprobe command timed out after {} seconds",
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(DiscoveryError::Probe(format!("ffprobe command failed: {}", stderr)));
        }

        let tracks = Self::parse_streams(&String::from_utf8_lossy(&output.stdout))?;
        debug!("{:?}: {} embedded subtitle track(s)", video_path, tracks.len());
        Ok(tracks)
    }
}
