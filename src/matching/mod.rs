/*!
 * Song matching pipeline.
 *
 * Aligns a film's subtitle cues against the known lyric lines of its songs
 * to recover the on-screen start and end time of every song performance,
 * including reprises. Data flows strictly left to right:
 *
 * cues + lyric lines -> LineMatcher (pairwise scores)
 *                    -> MatchCollector (filtered matches)
 *                    -> SongSegmenter (occurrence numbers)
 *                    -> SongTimeAggregator (song occurrences)
 */

pub mod line_matcher;
pub mod collector;
pub mod segmenter;
pub mod aggregator;

pub use line_matcher::LineMatcher;
pub use collector::MatchCollector;
pub use segmenter::SongSegmenter;
pub use aggregator::SongTimeAggregator;

use serde::Serialize;
use crate::app_config::MatchingConfig;
use crate::lyrics::LyricLine;
use crate::subtitle_processor::{SubtitleCue, CueCollection};

/// A cue paired with a lyric line whose score cleared the threshold.
///
/// Matches only live within one film's processing batch; they are produced
/// by the collector, numbered by the segmenter and discarded after
/// aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Film title
    pub film: String,
    /// Cue number from the subtitle file
    pub sub_no: usize,
    /// Raw cue text
    pub subtitle_text: String,
    /// Raw lyric text
    pub lyric_text: String,
    /// Matched lyric line's position within its song
    pub lyric_line_num: u32,
    /// Matched song title
    pub song_title: String,
    /// Cue start time in ms
    pub start_time_ms: u64,
    /// Cue end time in ms
    pub end_time_ms: u64,
    /// Match probability in [0, 1]
    pub match_prob: f64,
}

/// A match annotated with its song-occurrence number
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedMatch {
    /// The underlying match
    pub matched: Match,
    /// 1-based occurrence number within the film
    pub song_occurrence: u32,
    /// Time elapsed since the previous match's end, None for the film's first
    pub time_gap_to_prev_ms: Option<i64>,
}

/// One numbered, time-bounded performance of a song within a film.
///
/// The terminal artifact of the pipeline; `length_ms` is always positive
/// and at least the configured noise floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongOccurrence {
    /// Film title
    pub film: String,
    /// Song title
    pub song_title: String,
    /// 1-based occurrence number (first performance = 1, reprise = 2, ...)
    pub occurrence: u32,
    /// Earliest matched cue start in ms
    pub start_time_ms: u64,
    /// Latest matched cue end in ms
    pub end_time_ms: u64,
    /// Interval length in ms
    pub length_ms: u64,
}

impl SongOccurrence {
    /// Start time as an SRT-style timestamp
    pub fn format_start_time(&self) -> String {
        SubtitleCue::format_timestamp(self.start_time_ms)
    }

    /// End time as an SRT-style timestamp
    pub fn format_end_time(&self) -> String {
        SubtitleCue::format_timestamp(self.end_time_ms)
    }
}

/// Run the full matching pipeline for one film.
///
/// A pure function from (cues, lyric lines, constants) to occurrences;
/// different films share no state, so callers may run several films
/// concurrently and concatenate the results.
pub fn run_film_pipeline(
    cues: &CueCollection,
    lines: &[LyricLine],
    config: &MatchingConfig,
) -> Vec<SongOccurrence> {
    let matches = MatchCollector::new(config).collect(&cues.film, &cues.cues, lines);
    let numbered = SongSegmenter::new(config).segment(matches);
    SongTimeAggregator::new(config).aggregate(&cues.film, &numbered)
}
