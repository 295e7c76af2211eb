/*!
 * End-to-end tests for the per-film matching pipeline
 */

use songtimes::app_config::MatchingConfig;
use songtimes::matching::run_film_pipeline;
use songtimes::subtitle_processor::CueCollection;
use crate::common::{hms, make_cue, morning_song_lyrics, MORNING_SONG_SRT};

/// Test the full pipeline over a performance with a later reprise
#[test]
fn test_pipeline_withPerformanceAndReprise_shouldFindTwoOccurrences() {
    let cues = CueCollection::from_srt_string("Musical Film", MORNING_SONG_SRT).unwrap();
    let lines = morning_song_lyrics("Musical Film");

    let occurrences = run_film_pipeline(&cues, &lines, &MatchingConfig::default());

    assert_eq!(occurrences.len(), 2);

    let first = &occurrences[0];
    assert_eq!(first.film, "Musical Film");
    assert_eq!(first.song_title, "Morning Song");
    assert_eq!(first.occurrence, 1);
    assert_eq!(first.start_time_ms, hms(0, 1, 0));
    assert_eq!(first.end_time_ms, hms(0, 1, 14));
    assert_eq!(first.length_ms, 14_000);

    let reprise = &occurrences[1];
    assert_eq!(reprise.occurrence, 2);
    assert_eq!(reprise.start_time_ms, hms(0, 3, 0));
    assert_eq!(reprise.end_time_ms, hms(0, 3, 12));
    assert_eq!(reprise.length_ms, 12_000);
}

/// Test occurrence numbering is non-decreasing and starts at 1
#[test]
fn test_pipeline_occurrences_shouldBeNumberedFromOne() {
    let cues = CueCollection::from_srt_string("Musical Film", MORNING_SONG_SRT).unwrap();
    let lines = morning_song_lyrics("Musical Film");

    let occurrences = run_film_pipeline(&cues, &lines, &MatchingConfig::default());

    assert_eq!(occurrences[0].occurrence, 1);
    for pair in occurrences.windows(2) {
        assert!(pair[1].occurrence >= pair[0].occurrence);
    }
}

/// Test that re-running on identical input yields identical output
#[test]
fn test_pipeline_rerun_shouldBeIdempotent() {
    let cues = CueCollection::from_srt_string("Musical Film", MORNING_SONG_SRT).unwrap();
    let lines = morning_song_lyrics("Musical Film");
    let config = MatchingConfig::default();

    let first_run = run_film_pipeline(&cues, &lines, &config);
    let second_run = run_film_pipeline(&cues, &lines, &config);

    assert_eq!(first_run, second_run);
}

/// Test a film whose cues never match its lyrics
#[test]
fn test_pipeline_withNoMatches_shouldReturnEmpty() {
    let mut cues = CueCollection::new("Talky Film".to_string());
    cues.cues.push(make_cue(1, 1_000, 4_000, "Nothing like the song lyrics here"));
    cues.cues.push(make_cue(2, 5_000, 8_000, "More unrelated spoken dialogue"));
    let lines = morning_song_lyrics("Talky Film");

    let occurrences = run_film_pipeline(&cues, &lines, &MatchingConfig::default());

    assert!(occurrences.is_empty());
}

/// Test a film with no cues at all
#[test]
fn test_pipeline_withNoCues_shouldReturnEmpty() {
    let cues = CueCollection::new("Empty Film".to_string());
    let lines = morning_song_lyrics("Empty Film");

    let occurrences = run_film_pipeline(&cues, &lines, &MatchingConfig::default());

    assert!(occurrences.is_empty());
}

/// Test that a lone spurious alignment is filtered as noise
#[test]
fn test_pipeline_withSingleShortAlignment_shouldFilterItOut() {
    let mut cues = CueCollection::new("Noisy Film".to_string());
    // one cue coincidentally equal to a lyric line, 4 seconds on screen
    cues.cues.push(make_cue(1, 10_000, 14_000, "The sun is shining bright today"));
    let lines = morning_song_lyrics("Noisy Film");

    let occurrences = run_film_pipeline(&cues, &lines, &MatchingConfig::default());

    assert!(occurrences.is_empty());
}
