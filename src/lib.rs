/*!
 * # songtimes
 *
 * A Rust library for locating songs in films by aligning time-stamped
 * subtitle cues against the known lyric lines of each film's songs.
 *
 * ## Features
 *
 * - Parse SRT subtitle files into flat cue tables
 * - Word-overlap similarity scoring between cues and lyric lines
 * - Stateful segmentation of fuzzy matches into numbered song occurrences,
 *   including repeated performances ("reprises")
 * - Noise filtering of spurious short alignments
 * - Runtime-relative positioning of each occurrence for charting
 * - Batch processing across a film catalogue with per-film outcome reporting
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and matching tunables
 * - `subtitle_processor`: Subtitle cue parsing and handling
 * - `lyrics`: Lyrics table loading and per-film views
 * - `catalog`: Film catalogue with runtimes and matching hints
 * - `matching`: The matching pipeline:
 *   - `matching::line_matcher`: Cue/lyric similarity scoring
 *   - `matching::collector`: Candidate match collection
 *   - `matching::segmenter`: Occurrence numbering and reprise detection
 *   - `matching::aggregator`: Interval aggregation and noise filtering
 * - `timeline`: Percentage-of-runtime positions
 * - `app_controller`: Batch orchestration and reporting
 * - `file_utils`: File system operations
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

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod file_utils;
pub mod lyrics;
pub mod matching;
pub mod subtitle_processor;
pub mod timeline;

// Re-export main types for easier usage
pub use app_config::{Config, MatchingConfig};
pub use app_controller::{BatchReport, Controller, FilmOutcome, FilmStatus, SkipReason};
pub use catalog::{FilmCatalog, FilmRecord};
pub use lyrics::{LyricLine, LyricsTable};
pub use matching::{
    run_film_pipeline, LineMatcher, Match, MatchCollector, NumberedMatch, SongOccurrence,
    SongSegmenter, SongTimeAggregator,
};
pub use subtitle_processor::{CueCollection, SubtitleCue};
pub use timeline::{position_occurrences, PositionedOccurrence};
pub use errors::{AppError, LyricsError, SubtitleError};
