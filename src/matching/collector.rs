/*!
 * Candidate match collection for one film.
 *
 * Scores every (cue, lyric line) pair and keeps the pairs whose match
 * probability clears the configured threshold. The scan is O(cues x lines)
 * per film; batch sizes keep that affordable, and the output ordering is
 * what the segmenter's fold depends on.
 */

use log::debug;
use crate::app_config::MatchingConfig;
use crate::lyrics::LyricLine;
use crate::subtitle_processor::SubtitleCue;
use super::line_matcher::LineMatcher;
use super::Match;

/// Pairwise scorer and threshold filter
#[derive(Debug, Clone)]
pub struct MatchCollector {
    /// Minimum match probability (exclusive)
    threshold: f64,
    /// Minimum token count on both sides (exclusive)
    min_tokens: usize,
}

impl MatchCollector {
    /// Create a collector from the matching tunables
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            threshold: config.match_threshold,
            min_tokens: config.min_token_count,
        }
    }

    /// Collect accepted matches for one film.
    ///
    /// Pairs where either side has `min_tokens` or fewer normalized tokens
    /// are skipped without scoring; generic short phrases ("oh yes", "no no")
    /// otherwise produce a high false-positive rate. The result is sorted by
    /// `(start_time, lyric_line_num)` with the cue number as a final
    /// tie-break so output is deterministic.
    pub fn collect(&self, film: &str, cues: &[SubtitleCue], lines: &[LyricLine]) -> Vec<Match> {
        // Normalize each side once rather than per pair
        let normalized_cues: Vec<String> = cues
            .iter()
            .map(|cue| LineMatcher::normalize(&cue.text))
            .collect();
        let normalized_lines: Vec<String> = lines
            .iter()
            .map(|line| LineMatcher::normalize(&line.text))
            .collect();

        let mut matches = Vec::new();

        for (cue, sub_norm) in cues.iter().zip(&normalized_cues) {
            if LineMatcher::token_count(sub_norm) <= self.min_tokens {
                continue;
            }

            for (line, lyric_norm) in lines.iter().zip(&normalized_lines) {
                if LineMatcher::token_count(lyric_norm) <= self.min_tokens {
                    continue;
                }

                let match_prob = LineMatcher::score_normalized(sub_norm, lyric_norm);
                if match_prob > self.threshold {
                    matches.push(Match {
                        film: film.to_string(),
                        sub_no: cue.sub_no,
                        subtitle_text: cue.text.clone(),
                        lyric_text: line.text.clone(),
                        lyric_line_num: line.line_num,
                        song_title: line.song_title.clone(),
                        start_time_ms: cue.start_time_ms,
                        end_time_ms: cue.end_time_ms,
                        match_prob,
                    });
                }
            }
        }

        matches.sort_by(|a, b| {
            a.start_time_ms
                .cmp(&b.start_time_ms)
                .then(a.lyric_line_num.cmp(&b.lyric_line_num))
                .then(a.sub_no.cmp(&b.sub_no))
        });

        debug!(
            "Collected {} matches for {} from {} cues x {} lyric lines",
            matches.len(),
            film,
            cues.len(),
            lines.len()
        );

        matches
    }
}
