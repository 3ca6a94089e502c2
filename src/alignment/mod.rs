/*!
 * Episode alignment engine.
 *
 * Turns three independently named collections (videos, subtitles and
 * pre-ordered mix sources) into one ordered list of per-episode bundles
 * without relying on any shared episode identifier:
 * - `sequence`: episode order inferred from file names
 * - `matcher`: ranked video/subtitle pairing
 * - `orchestrator`: ties both together with a global positional fallback
 * - `language`: language affinity used as a tie-breaker
 */

use serde::Serialize;
use std::fmt;

pub mod language;
pub mod matcher;
pub mod orchestrator;
pub mod sequence;

pub use language::{has_tag, language_score};
pub use matcher::{MatchCriterion, MatchTest, RankedPairMatcher, DEFAULT_MATCH_TESTS};
pub use orchestrator::{align, Aligner};
pub use sequence::{infer_order, infer_order_indices};

/// One episode of the aligned series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedEpisode<V, S, M> {
    /// The episode's video
    pub video: V,
    /// The subtitle paired with the video, if any
    pub subtitle: Option<S>,
    /// The mix source for the episode, if the series was long enough
    pub mix: Option<M>,
    /// Zero-based position in the inferred episode sequence
    pub index: usize,
}

/// How subtitles were paired with videos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleStrategy {
    /// Every video found a subtitle through ranked matching
    Ranked,
    /// At least one video had no ranked match; both sequences were zipped
    Positional,
}

impl fmt::Display for SubtitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ranked => write!(f, "ranked"),
            Self::Positional => write!(f, "positional"),
        }
    }
}

/// Result of one alignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment<V, S, M> {
    /// Episodes in episode order
    pub episodes: Vec<MatchedEpisode<V, S, M>>,
    pub strategy: SubtitleStrategy,
    /// Videos the name-based ordering could not place
    pub unplaced_videos: Vec<V>,
}
