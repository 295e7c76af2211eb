/*!
 * Tests for interval aggregation and the noise filter
 */

use songtimes::app_config::MatchingConfig;
use songtimes::matching::{Match, NumberedMatch, SongTimeAggregator};
use crate::common::hms;

fn numbered(song: &str, occurrence: u32, start_ms: u64, end_ms: u64) -> NumberedMatch {
    NumberedMatch {
        matched: Match {
            film: "Test Film".to_string(),
            sub_no: 0,
            subtitle_text: String::new(),
            lyric_text: String::new(),
            lyric_line_num: 1,
            song_title: song.to_string(),
            start_time_ms: start_ms,
            end_time_ms: end_ms,
            match_prob: 1.0,
        },
        song_occurrence: occurrence,
        time_gap_to_prev_ms: None,
    }
}

fn aggregator() -> SongTimeAggregator {
    SongTimeAggregator::new(&MatchingConfig::default())
}

/// Test that a group collapses to its earliest start and latest end
#[test]
fn test_aggregate_withOneGroup_shouldSpanMinStartToMaxEnd() {
    let matches = vec![
        numbered("Song", 1, hms(0, 1, 5), hms(0, 1, 9)),
        numbered("Song", 1, hms(0, 1, 0), hms(0, 1, 4)),
        numbered("Song", 1, hms(0, 1, 10), hms(0, 1, 14)),
    ];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert_eq!(occurrences.len(), 1);
    let occ = &occurrences[0];
    assert_eq!(occ.film, "Test Film");
    assert_eq!(occ.start_time_ms, hms(0, 1, 0));
    assert_eq!(occ.end_time_ms, hms(0, 1, 14));
    assert_eq!(occ.length_ms, 14_000);
}

/// Test that groups below the noise floor are dropped
#[test]
fn test_aggregate_withShortGroup_shouldDropIt() {
    let matches = vec![
        // a single accidental alignment lasting 4 seconds
        numbered("Noise Song", 1, hms(0, 2, 0), hms(0, 2, 4)),
        numbered("Real Song", 2, hms(0, 5, 0), hms(0, 5, 30)),
    ];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].song_title, "Real Song");
}

/// Test the boundary of the noise filter: exactly the floor survives
#[test]
fn test_aggregate_withGroupExactlyAtFloor_shouldKeepIt() {
    let matches = vec![numbered("Song", 1, hms(0, 1, 0), hms(0, 1, 10))];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].length_ms, 10_000);
}

/// Test that one millisecond under the floor is dropped
#[test]
fn test_aggregate_withGroupJustUnderFloor_shouldDropIt() {
    let matches = vec![numbered("Song", 1, hms(0, 1, 0), hms(0, 1, 10) - 1)];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert!(occurrences.is_empty());
}

/// Test that distinct occurrence numbers are never merged, even when adjacent
#[test]
fn test_aggregate_withAdjacentOccurrences_shouldNotCoalesce() {
    let matches = vec![
        numbered("Song", 1, hms(0, 1, 0), hms(0, 1, 30)),
        numbered("Song", 2, hms(0, 1, 30), hms(0, 2, 0)),
    ];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[0].occurrence, 1);
    assert_eq!(occurrences[1].occurrence, 2);
}

/// Test that surviving occurrences come out sorted by start time
#[test]
fn test_aggregate_withSeveralSongs_shouldSortByStartTime() {
    let matches = vec![
        numbered("Later Song", 2, hms(0, 30, 0), hms(0, 31, 0)),
        numbered("Early Song", 1, hms(0, 5, 0), hms(0, 6, 0)),
    ];

    let occurrences = aggregator().aggregate("Test Film", &matches);

    assert_eq!(occurrences[0].song_title, "Early Song");
    assert_eq!(occurrences[1].song_title, "Later Song");
}

/// Test that every surviving occurrence has a positive length at or above the floor
#[test]
fn test_aggregate_withAnyInput_shouldOnlyEmitValidLengths() {
    let min_length_ms = MatchingConfig::default().min_song_length_ms();
    let matches = vec![
        numbered("A", 1, hms(0, 1, 0), hms(0, 1, 12)),
        numbered("B", 2, hms(0, 3, 0), hms(0, 3, 5)),
        numbered("C", 3, hms(0, 9, 0), hms(0, 9, 45)),
    ];

    for occ in aggregator().aggregate("Test Film", &matches) {
        assert!(occ.end_time_ms > occ.start_time_ms);
        assert!(occ.length_ms >= min_length_ms);
        assert_eq!(occ.length_ms, occ.end_time_ms - occ.start_time_ms);
    }
}
