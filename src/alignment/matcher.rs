/*!
 * Ranked pairing of a video with a subtitle candidate.
 *
 * A candidate is scored by an ordered list of boolean tests. Each test adds
 * one bit to the rank, the first test being the most significant one, so a
 * higher-priority test always outweighs every test after it. Threshold tests
 * express name correspondence: a candidate that passes none of them gets rank
 * zero whatever its language tags say.
 */

use log::trace;

use super::language::{has_tag, CHINESE_TAGS, SIMPLIFIED_TAGS, TRADITIONAL_TAGS};
use crate::media::NamedItem;

/// The predicates a pairing can be tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCriterion {
    /// Video and subtitle have the same full name
    FullName,
    /// Video and subtitle have the same basename
    BaseName,
    /// The subtitle basename starts with the video basename
    BaseNamePrefix,
    /// The subtitle is tagged as simplified Chinese
    SimplifiedTag,
    /// The subtitle is tagged as Chinese
    ChineseTag,
    /// The subtitle is not tagged as traditional Chinese
    NotTraditional,
}

impl MatchCriterion {
    // @returns: Whether the pairing passes this criterion
    pub fn passes<V, S>(self, video: &V, subtitle: &S) -> bool
    where
        V: NamedItem + ?Sized,
        S: NamedItem + ?Sized,
    {
        match self {
            Self::FullName => video.name() == subtitle.name(),
            Self::BaseName => video.basename() == subtitle.basename(),
            Self::BaseNamePrefix => subtitle.basename().starts_with(video.basename()),
            Self::SimplifiedTag => has_tag(subtitle, SIMPLIFIED_TAGS),
            Self::ChineseTag => has_tag(subtitle, CHINESE_TAGS),
            Self::NotTraditional => !has_tag(subtitle, TRADITIONAL_TAGS),
        }
    }
}

/// One entry of the ordered test list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTest {
    pub criterion: MatchCriterion,
    /// Passing at least one threshold test is required for a non-zero rank
    pub threshold: bool,
}

impl MatchTest {
    pub const fn new(criterion: MatchCriterion, threshold: bool) -> Self {
        Self { criterion, threshold }
    }
}

/// Default test order, most significant first
pub const DEFAULT_MATCH_TESTS: [MatchTest; 6] = [
    MatchTest::new(MatchCriterion::FullName, true),
    MatchTest::new(MatchCriterion::BaseName, true),
    MatchTest::new(MatchCriterion::BaseNamePrefix, true),
    MatchTest::new(MatchCriterion::SimplifiedTag, false),
    MatchTest::new(MatchCriterion::ChineseTag, false),
    MatchTest::new(MatchCriterion::NotTraditional, false),
];

/// Scores video/subtitle pairings and picks the best candidate
#[derive(Debug, Clone)]
pub struct RankedPairMatcher {
    tests: Vec<MatchTest>,
}

impl RankedPairMatcher {
    /// Create a matcher from an explicit test order.
    ///
    /// At most 32 tests fit in a rank.
    pub fn with_tests(tests: Vec<MatchTest>) -> Self {
        debug_assert!(tests.len() <= 32, "rank holds at most 32 tests");
        Self { tests }
    }

    pub fn tests(&self) -> &[MatchTest] {
        &self.tests
    }

    /// Bit-packed rank of a pairing; zero when no threshold test passes
    pub fn rank<V, S>(&self, video: &V, subtitle: &S) -> u32
    where
        V: NamedItem + ?Sized,
        S: NamedItem + ?Sized,
    {
        let mut rank = 0u32;
        let mut above_threshold = false;

        for test in &self.tests {
            rank <<= 1;
            if test.criterion.passes(video, subtitle) {
                rank |= 1;
                above_threshold |= test.threshold;
            }
        }

        if above_threshold { rank } else { 0 }
    }

    /// Pick the candidate with the strictly greatest non-zero rank.
    ///
    /// The first candidate wins ties.
    pub fn match_best<'a, V, S>(&self, video: &V, pool: &'a [S]) -> Option<&'a S>
    where
        V: NamedItem + ?Sized,
        S: NamedItem,
    {
        self.match_best_index(video, pool).map(|position| &pool[position])
    }

    /// Same as [`match_best`](Self::match_best), returning the pool position
    pub fn match_best_index<V, S>(&self, video: &V, pool: &[S]) -> Option<usize>
    where
        V: NamedItem + ?Sized,
        S: NamedItem,
    {
        let mut chosen = None;
        let mut chosen_rank = 0;

        for (position, subtitle) in pool.iter().enumerate() {
            let rank = self.rank(video, subtitle);
            trace!("{} <- {}: rank {:#08b}", video.name(), subtitle.name(), rank);
            if rank > chosen_rank {
                chosen = Some(position);
                chosen_rank = rank;
            }
        }

        chosen
    }
}

impl Default for RankedPairMatcher {
    fn default() -> Self {
        Self::with_tests(DEFAULT_MATCH_TESTS.to_vec())
    }
}
