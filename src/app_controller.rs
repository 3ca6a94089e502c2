use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::alignment::{Aligner, SubtitleStrategy};
use crate::app_config::Config;
use crate::errors::AlignError;
use crate::file_utils::FileManager;
use crate::language_utils::describe_language_tag;
use crate::media::{FfprobeTrackProbe, LocalFile, NamedItem, Subtitle, TrackProbe, Video};
use crate::mix::{LocalCommentSet, MixSourceSet};

// @module: Application controller for episode planning

/// Episodes to keep in the plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    // @field: 1-based episode numbers, empty means every episode
    episodes: Vec<usize>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I: IntoIterator<Item = usize>>(episodes: I) -> Self {
        Self {
            episodes: episodes.into_iter().collect(),
        }
    }

    // @returns: Whether a 1-based episode number is selected
    pub fn includes(&self, episode: usize) -> bool {
        self.episodes.is_empty() || self.episodes.contains(&episode)
    }
}

/// One episode ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodePlan {
    /// 1-based episode number
    pub episode: usize,
    pub video: PathBuf,
    /// Human readable subtitle source, absent when the episode has none
    pub subtitle: Option<String>,
    pub comments: PathBuf,
    pub output: PathBuf,
}

/// Outcome of planning one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub directory: PathBuf,
    pub strategy: SubtitleStrategy,
    pub episodes: Vec<EpisodePlan>,
    /// Videos that could not be placed in the episode sequence
    pub unplaced_videos: Vec<PathBuf>,
    /// Episode at which planning stopped for lack of comments
    pub halted_at: Option<usize>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Embedded track lister
    probe: Arc<dyn TrackProbe>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.discovery.probe_timeout_secs);
        Self::with_probe(config, Arc::new(FfprobeTrackProbe::new(timeout)))
    }

    // @method: Create a controller with a custom track probe
    pub fn with_probe(config: Config, probe: Arc<dyn TrackProbe>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, probe })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plan the episodes of the series stored in `dir`.
    ///
    /// An episode without a subtitle is planned without one. Planning stops at
    /// the first selected episode that has no comment file.
    pub async fn plan<P: AsRef<Path>>(&self, dir: P, selection: &Selection) -> Result<PlanReport> {
        let start_time = Instant::now();
        let dir = dir.as_ref();
        let tag = self.config.tag.as_str();

        let found = FileManager::discover(dir, &self.config.discovery)
            .with_context(|| format!("Failed to discover files in {:?}", dir))?;

        let video_filters = self.config.filters.video_filters()?;
        let subtitle_filters = self.config.filters.subtitle_filters()?;
        let comment_filters = self.config.filters.comment_filters()?;

        let videos: Vec<Video> = found
            .videos
            .iter()
            .map(Video::new)
            .filter(|video| passes_filters(video.name(), &video_filters))
            .collect();

        let output_suffix = format!(".{}", tag);
        let mut subtitles: Vec<Subtitle> = found
            .subtitles
            .iter()
            .map(Subtitle::external)
            .filter(|subtitle| !subtitle.basename().ends_with(&output_suffix))
            .filter(|subtitle| passes_filters(subtitle.name(), &subtitle_filters))
            .collect();

        if self.config.discovery.probe_embedded {
            subtitles.extend(self.embedded_subtitles(&videos).await);
        }

        let comment_files: Vec<LocalFile> = found
            .comments
            .iter()
            .map(LocalFile::new)
            .filter(|file| passes_filters(file.name(), &comment_filters))
            .collect();
        let comment_sets = LocalCommentSet::series(&comment_files, tag);

        debug!(
            "Aligning {} video(s), {} subtitle(s), {} comment set(s)",
            videos.len(),
            subtitles.len(),
            comment_sets.len()
        );

        let alignment = Aligner::default().align(&videos, &subtitles, &comment_sets);
        if !videos.is_empty() && alignment.episodes.is_empty() {
            return Err(AlignError::OrderNotInferred { count: videos.len() }.into());
        }

        let mut episodes = Vec::new();
        let mut halted_at = None;

        for matched in alignment.episodes {
            let episode = matched.index + 1;
            if !selection.includes(episode) {
                continue;
            }

            let subtitle = match &matched.subtitle {
                Some(subtitle) => Some(describe_subtitle(subtitle)),
                None => {
                    warn!("Episode {} ({}) has no subtitle", episode, matched.video);
                    None
                }
            };

            let Some(comments) = matched.mix else {
                error!("Episode {} ({}) has no comment source, stopping", episode, matched.video);
                halted_at = Some(episode);
                break;
            };

            let output = FileManager::generate_output_path(matched.video.path(), comments.tag(), "ass");
            info!("Episode {}: {:?}", episode, output);

            episodes.push(EpisodePlan {
                episode,
                video: matched.video.path().to_path_buf(),
                subtitle,
                comments: comments.sources().to_path_buf(),
                output,
            });
        }

        debug!("Planned {} episode(s) in {}", episodes.len(), format_duration(start_time.elapsed()));

        Ok(PlanReport {
            directory: dir.to_path_buf(),
            strategy: alignment.strategy,
            episodes,
            unplaced_videos: alignment
                .unplaced_videos
                .iter()
                .map(|video| video.path().to_path_buf())
                .collect(),
            halted_at,
        })
    }

    // @returns: Embedded subtitle tracks of every video, probe failures skipped
    async fn embedded_subtitles(&self, videos: &[Video]) -> Vec<Subtitle> {
        // buffered keeps the results in video order
        let results: Vec<_> = stream::iter(videos)
            .map(|video| self.probe.subtitle_tracks(video.path()))
            .buffered(self.config.discovery.max_concurrent_probes)
            .collect()
            .await;

        let mut subtitles = Vec::new();
        for (video, result) in videos.iter().zip(results) {
            match result {
                Ok(tracks) => {
                    subtitles.extend(
                        tracks
                            .into_iter()
                            .map(|track| Subtitle::embedded(video.path(), track)),
                    );
                }
                Err(e) => warn!("No embedded subtitles for {}: {}", video, e),
            }
        }

        subtitles
    }
}

// @returns: True when the name matches every filter
fn passes_filters(name: &str, filters: &[Regex]) -> bool {
    filters.iter().all(|filter| filter.is_match(name))
}

fn describe_subtitle(subtitle: &Subtitle) -> String {
    match subtitle {
        Subtitle::External { file } => file.path.display().to_string(),
        Subtitle::Embedded { file, track } => {
            let mut description = format!("{} (track {}", file.path.display(), track.index);
            if let Some(language) = &track.language {
                description.push_str(", ");
                description.push_str(&describe_language_tag(language));
            }
            if let Some(title) = &track.title {
                description.push_str(", ");
                description.push_str(title);
            }
            description.push(')');
            description
        }
    }
}

// Format duration in a human-readable format
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
