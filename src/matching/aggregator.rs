/*!
 * Aggregation of numbered matches into song occurrences.
 *
 * Collapses every `(song_title, occurrence)` group into a single time
 * interval and drops intervals too short to be a real song. Distinct
 * occurrence numbers are never coalesced, even when their windows touch.
 */

use std::collections::BTreeMap;
use log::debug;
use crate::app_config::MatchingConfig;
use super::{NumberedMatch, SongOccurrence};

/// Collapses match groups into time-bounded occurrences
#[derive(Debug, Clone)]
pub struct SongTimeAggregator {
    /// Occurrences shorter than this are dropped as accidental alignments
    min_length_ms: u64,
}

impl SongTimeAggregator {
    /// Create an aggregator from the matching tunables
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            min_length_ms: config.min_song_length_ms(),
        }
    }

    /// Aggregate one film's numbered matches into occurrences.
    ///
    /// Each group keeps the earliest start and latest end among its
    /// matches. Groups shorter than the noise floor are silently dropped;
    /// that is the designed filter for spurious one-line alignments, not an
    /// error. Survivors are sorted by start time.
    pub fn aggregate(&self, film: &str, numbered: &[NumberedMatch]) -> Vec<SongOccurrence> {
        // BTreeMap keeps grouping order deterministic across runs
        let mut groups: BTreeMap<(String, u32), (u64, u64)> = BTreeMap::new();

        for nm in numbered {
            let key = (nm.matched.song_title.clone(), nm.song_occurrence);
            groups
                .entry(key)
                .and_modify(|(start, end)| {
                    *start = (*start).min(nm.matched.start_time_ms);
                    *end = (*end).max(nm.matched.end_time_ms);
                })
                .or_insert((nm.matched.start_time_ms, nm.matched.end_time_ms));
        }

        let total_groups = groups.len();
        let mut occurrences: Vec<SongOccurrence> = groups
            .into_iter()
            .filter_map(|((song_title, occurrence), (start_ms, end_ms))| {
                let length_ms = end_ms - start_ms;
                if length_ms < self.min_length_ms {
                    return None;
                }
                Some(SongOccurrence {
                    film: film.to_string(),
                    song_title,
                    occurrence,
                    start_time_ms: start_ms,
                    end_time_ms: end_ms,
                    length_ms,
                })
            })
            .collect();

        occurrences.sort_by_key(|occ| occ.start_time_ms);

        debug!(
            "Aggregated {} matches into {} occurrences for {} ({} below noise floor)",
            numbered.len(),
            occurrences.len(),
            film,
            total_groups - occurrences.len()
        );

        occurrences
    }
}
