/*!
 * Occurrence numbering over a film's sorted matches.
 *
 * A single left-to-right fold assigns each match a 1-based song-occurrence
 * number. Each decision depends on the previous decision's output, so the
 * fold is inherently sequential within a film and must not be parallelized;
 * the accumulator is threaded explicitly rather than held in shared state.
 */

use crate::app_config::MatchingConfig;
use super::{Match, NumberedMatch};

/// State carried between consecutive matches of the same film
#[derive(Debug, Clone)]
struct SegmentState {
    prev_title: String,
    prev_lyric_line_num: u32,
    prev_end_time_ms: u64,
    prev_occurrence: u32,
}

/// Assigns song-occurrence numbers and detects reprises
#[derive(Debug, Clone)]
pub struct SongSegmenter {
    /// Gap above which a backward lyric jump means a new performance, in ms
    reprise_gap_ms: i64,
}

impl SongSegmenter {
    /// Create a segmenter from the matching tunables
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            reprise_gap_ms: config.reprise_gap_ms(),
        }
    }

    /// Number a film's matches in order of appearance.
    ///
    /// `matches` must already be sorted by `(start_time, lyric_line_num)`,
    /// which is how the collector hands them over. Rules per match, given
    /// the previous match:
    /// - first match of the film: occurrence 1
    /// - gap to the previous match exceeds the reprise gap AND the matched
    ///   lyric position jumped backward: a restarted performance, so the
    ///   occurrence number increments (reprise)
    /// - different song title: occurrence increments
    /// - otherwise: continuation of the current occurrence
    ///
    /// A long gap with the lyric position still moving forward stays a
    /// continuation (an interlude inside one performance, not a reprise).
    pub fn segment(&self, matches: Vec<Match>) -> Vec<NumberedMatch> {
        let mut numbered = Vec::with_capacity(matches.len());
        let mut state: Option<SegmentState> = None;

        for m in matches {
            let (occurrence, gap_ms) = match &state {
                None => (1, None),
                Some(prev) => {
                    let gap = m.start_time_ms as i64 - prev.prev_end_time_ms as i64;
                    let occurrence = if gap > self.reprise_gap_ms
                        && m.lyric_line_num < prev.prev_lyric_line_num
                    {
                        prev.prev_occurrence + 1
                    } else if m.song_title != prev.prev_title {
                        prev.prev_occurrence + 1
                    } else {
                        prev.prev_occurrence
                    };
                    (occurrence, Some(gap))
                }
            };

            state = Some(SegmentState {
                prev_title: m.song_title.clone(),
                prev_lyric_line_num: m.lyric_line_num,
                prev_end_time_ms: m.end_time_ms,
                prev_occurrence: occurrence,
            });

            numbered.push(NumberedMatch {
                song_occurrence: occurrence,
                time_gap_to_prev_ms: gap_ms,
                matched: m,
            });
        }

        numbered
    }
}
