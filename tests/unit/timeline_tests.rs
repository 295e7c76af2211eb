/*!
 * Tests for runtime-relative positioning
 */

use songtimes::catalog::{FilmCatalog, FilmRecord};
use songtimes::matching::SongOccurrence;
use songtimes::timeline::position_occurrences;
use crate::common::hms;

fn occurrence(film: &str, start_ms: u64, end_ms: u64) -> SongOccurrence {
    SongOccurrence {
        film: film.to_string(),
        song_title: "Song".to_string(),
        occurrence: 1,
        start_time_ms: start_ms,
        end_time_ms: end_ms,
        length_ms: end_ms - start_ms,
    }
}

fn catalog_with(title: &str, runtime_minutes: Option<u32>) -> FilmCatalog {
    FilmCatalog::new(vec![FilmRecord {
        number: 1,
        title: title.to_string(),
        runtime_minutes,
        include: true,
        sung_marker: None,
    }])
}

/// Test positions as fractions of the runtime
#[test]
fn test_position_withKnownRuntime_shouldComputeFractions() {
    // 100 minute film, song from 1:00 to 2:00
    let catalog = catalog_with("Film", Some(100));
    let occurrences = vec![occurrence("Film", hms(0, 1, 0), hms(0, 2, 0))];

    let positioned = position_occurrences(&occurrences, &catalog);

    assert_eq!(positioned.len(), 1);
    let pos = &positioned[0];
    assert!((pos.start_pos - 0.01).abs() < 1e-9);
    assert!((pos.end_pos - 0.02).abs() < 1e-9);
    assert_eq!(pos.start_time, "00:01:00,000");
    assert_eq!(pos.end_time, "00:02:00,000");
    assert_eq!(pos.length_secs, 60);
}

/// Test that sub-second parts are truncated before computing positions
#[test]
fn test_position_withMillisecondTimes_shouldTruncateToSeconds() {
    let catalog = catalog_with("Film", Some(100));
    // 90.9s start truncates to 90s
    let occurrences = vec![occurrence("Film", 90_900, 150_900)];

    let positioned = position_occurrences(&occurrences, &catalog);

    assert!((positioned[0].start_pos - 90.0 / 6000.0).abs() < 1e-9);
    assert!((positioned[0].end_pos - 150.0 / 6000.0).abs() < 1e-9);
}

/// Test that occurrences for films without a runtime are dropped
#[test]
fn test_position_withUnknownRuntime_shouldDropOccurrence() {
    let catalog = catalog_with("Film", None);
    let occurrences = vec![occurrence("Film", hms(0, 1, 0), hms(0, 2, 0))];

    assert!(position_occurrences(&occurrences, &catalog).is_empty());
}

/// Test that occurrences for films missing from the catalogue are dropped
#[test]
fn test_position_withFilmNotInCatalog_shouldDropOccurrence() {
    let catalog = catalog_with("Film", Some(100));
    let occurrences = vec![occurrence("Other Film", hms(0, 1, 0), hms(0, 2, 0))];

    assert!(position_occurrences(&occurrences, &catalog).is_empty());
}
