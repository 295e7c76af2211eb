use log::warn;
use serde::Serialize;
use crate::catalog::FilmCatalog;
use crate::matching::SongOccurrence;

// @module: Runtime-relative positioning of song occurrences

/// A song occurrence annotated with its position in the film's runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedOccurrence {
    /// Film title
    pub film: String,
    /// Song title
    pub song_title: String,
    /// 1-based occurrence number
    pub occurrence: u32,
    /// Start time, SRT-style timestamp
    pub start_time: String,
    /// End time, SRT-style timestamp
    pub end_time: String,
    /// Interval length in seconds
    pub length_secs: u64,
    /// Fraction of the runtime elapsed when the song starts, in [0, 1]
    pub start_pos: f64,
    /// Fraction of the runtime elapsed when the song ends, in [0, 1]
    pub end_pos: f64,
}

/// Merge catalogue runtimes into occurrences and compute runtime fractions.
///
/// Positions are second-truncated (the sub-second part of a timestamp does
/// not move a mark on a chart). Occurrences for films without a known
/// runtime are dropped with a warning, mirroring an inner join against the
/// catalogue.
pub fn position_occurrences(
    occurrences: &[SongOccurrence],
    catalog: &FilmCatalog,
) -> Vec<PositionedOccurrence> {
    let mut positioned = Vec::with_capacity(occurrences.len());

    for occ in occurrences {
        let runtime_secs = match catalog.record(&occ.film).and_then(|f| f.runtime_secs()) {
            Some(secs) if secs > 0 => secs,
            _ => {
                warn!("No runtime for film '{}', dropping occurrence of '{}'", occ.film, occ.song_title);
                continue;
            }
        };

        let start_secs = occ.start_time_ms / 1000;
        let end_secs = occ.end_time_ms / 1000;

        positioned.push(PositionedOccurrence {
            film: occ.film.clone(),
            song_title: occ.song_title.clone(),
            occurrence: occ.occurrence,
            start_time: occ.format_start_time(),
            end_time: occ.format_end_time(),
            length_secs: occ.length_ms / 1000,
            start_pos: start_secs as f64 / runtime_secs as f64,
            end_pos: end_secs as f64 / runtime_secs as f64,
        });
    }

    positioned
}
