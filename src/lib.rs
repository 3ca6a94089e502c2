/*!
 * # mixsub - episode alignment for comment-overlay subtitles
 *
 * A Rust library that works out, from file names alone, which subtitle and
 * which comment (danmaku) source belong to each video of a series.
 *
 * ## Features
 *
 * - Episode order inferred from arbitrary naming conventions
 * - Ranked video/subtitle pairing with language preferences
 * - Subtitle tracks embedded in video containers (via `ffprobe`)
 * - Regex filters and episode selection
 * - JSON configuration
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: the episode alignment engine:
 *   - `alignment::sequence`: order inference from names
 *   - `alignment::matcher`: ranked pair matching
 *   - `alignment::orchestrator`: alignment with positional fallback
 *   - `alignment::language`: language tags and scores
 * - `media`: named videos and subtitles, embedded track probing
 * - `mix`: pre-ordered comment sources
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow test_subject_withCondition_shouldOutcome
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod mix;

// Re-export main types for easier usage
pub use alignment::{align, infer_order, Aligner, Alignment, MatchedEpisode, RankedPairMatcher, SubtitleStrategy};
pub use app_config::Config;
pub use app_controller::{Controller, EpisodePlan, PlanReport, Selection};
pub use errors::{AlignError, AppError, ConfigError, DiscoveryError};
pub use media::{NamedItem, Subtitle, Video};
pub use mix::{LocalCommentSet, MixSourceSet};
