/*!
 * Alignment of videos, subtitles and mix sources into episodes.
 *
 * One pass, no retries:
 * 1. the videos are ordered by name and numbered from zero,
 * 2. every video is ranked against the whole subtitle pool,
 * 3. if a single video is left without a subtitle, every ranked pairing is
 *    dropped and the independently ordered subtitles are zipped positionally,
 * 4. mix sources are zipped positionally in the order they were supplied.
 */

use log::{debug, info, warn};

use super::matcher::RankedPairMatcher;
use super::sequence::infer_order_indices;
use super::{Alignment, MatchedEpisode, SubtitleStrategy};
use crate::media::NamedItem;

/// Aligns episodes using a configurable pair matcher
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    matcher: RankedPairMatcher,
}

impl Aligner {
    pub fn new(matcher: RankedPairMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &RankedPairMatcher {
        &self.matcher
    }

    /// Align the three collections and report how the subtitles were paired.
    ///
    /// `mixes` must already be in episode order.
    pub fn align<V, S, M>(&self, videos: &[V], subtitles: &[S], mixes: &[M]) -> Alignment<V, S, M>
    where
        V: NamedItem + Clone,
        S: NamedItem + Clone,
        M: Clone,
    {
        let placed = infer_order_indices(videos);
        let mut is_placed = vec![false; videos.len()];
        for &position in &placed {
            is_placed[position] = true;
        }
        let unplaced_videos: Vec<V> = videos
            .iter()
            .zip(&is_placed)
            .filter(|&(_, &was_placed)| !was_placed)
            .map(|(video, _)| video.clone())
            .collect();
        for video in &unplaced_videos {
            warn!("Could not place video in the episode sequence: {}", video.name());
        }

        let ordered_videos: Vec<&V> = placed.iter().map(|&position| &videos[position]).collect();

        let ranked: Vec<Option<usize>> = ordered_videos
            .iter()
            .map(|video| self.matcher.match_best_index(*video, subtitles))
            .collect();

        let (strategy, subtitle_slots) = if ranked.iter().all(Option::is_some) {
            (SubtitleStrategy::Ranked, ranked)
        } else {
            let unmatched = ranked.iter().filter(|slot| slot.is_none()).count();
            debug!(
                "{} video(s) without a ranked subtitle, pairing subtitles by position",
                unmatched
            );
            let ordered_subtitles = infer_order_indices(subtitles);
            let slots = (0..ordered_videos.len())
                .map(|episode| ordered_subtitles.get(episode).copied())
                .collect();
            (SubtitleStrategy::Positional, slots)
        };

        info!(
            "Aligned {} episode(s) with {} subtitle pairing",
            ordered_videos.len(),
            strategy
        );

        let episodes = ordered_videos
            .into_iter()
            .zip(subtitle_slots)
            .enumerate()
            .map(|(index, (video, subtitle_slot))| MatchedEpisode {
                video: video.clone(),
                subtitle: subtitle_slot.map(|position| subtitles[position].clone()),
                mix: mixes.get(index).cloned(),
                index,
            })
            .collect();

        Alignment {
            episodes,
            strategy,
            unplaced_videos,
        }
    }
}

/// Align videos, subtitles and mix sources with the default matcher.
///
/// Returns one episode per placed video, in episode order.
pub fn align<V, S, M>(videos: &[V], subtitles: &[S], mixes: &[M]) -> Vec<MatchedEpisode<V, S, M>>
where
    V: NamedItem + Clone,
    S: NamedItem + Clone,
    M: Clone,
{
    Aligner::default().align(videos, subtitles, mixes).episodes
}
