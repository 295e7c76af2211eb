/*!
 * Tests for cue/lyric similarity scoring
 */

use songtimes::matching::LineMatcher;

/// Test that markup and music notes are stripped before comparison
#[test]
fn test_score_withMarkedUpCue_shouldMatchPlainLyric() {
    let score = LineMatcher::score("<i>\u{266a} A whole new world \u{266a}</i>", "A whole new world");
    assert_eq!(score, 1.0);
}

/// Test that the sword-in-the-stone style %% marker is removed as punctuation
#[test]
fn test_normalize_withPercentMarker_shouldRemoveIt() {
    assert_eq!(LineMatcher::normalize("%% Higitus Figitus zumbabazing"), "higitus figitus zumbabazing");
}

/// Test exact equality after normalization
#[test]
fn test_score_withPunctuationDifferences_shouldBeOne() {
    assert_eq!(LineMatcher::score("Let it go", "let it go!"), 1.0);
}

/// Test the substring rule in both directions
#[test]
fn test_score_withSubstringEitherWay_shouldBeOne() {
    assert_eq!(LineMatcher::score("let it go", "let it go let it go"), 1.0);
    assert_eq!(LineMatcher::score("let it go let it go", "let it go"), 1.0);
}

/// Test that reordered word bags are rejected as false positives
#[test]
fn test_score_withAnagramWordBags_shouldBeZero() {
    assert_eq!(LineMatcher::score("go it let", "let it go"), 0.0);
    assert_eq!(LineMatcher::score("you love I", "I love you"), 0.0);
}

/// Test the overlap ratio is normalized by the shorter side
#[test]
fn test_score_withPartialOverlap_shouldUseShorterSide() {
    // 4 of the 6 words on the shorter side are shared
    let score = LineMatcher::score(
        "look for the bare necessities forever",
        "the simple bare necessities forget about your worries look",
    );
    let expected = 4.0 / 6.0;
    assert!((score - expected).abs() < 1e-9, "got {score}");
}

/// Test the score range over a grab bag of realistic pairs
#[test]
fn test_score_overAssortedPairs_shouldStayInUnitInterval() {
    let subs = [
        "\u{266a} He's a tramp, but they love him \u{266a}",
        "Some day my prince will come",
        "completely ordinary dialogue line here",
        "<i>Zip-a-dee-doo-dah, zip-a-dee-ay</i>",
    ];
    let lyrics = [
        "He's a tramp but they love him",
        "Some day my prince will come",
        "When you wish upon a star",
        "My, oh my, what a wonderful day",
    ];

    for sub in &subs {
        for lyric in &lyrics {
            let score = LineMatcher::score(sub, lyric);
            assert!(
                (0.0..=1.0).contains(&score),
                "score({sub:?}, {lyric:?}) = {score}"
            );
        }
    }
}

/// Test that normalization-based token counting drives eligibility
#[test]
fn test_token_count_withMarkupOnlyTokens_shouldNotCountThem() {
    let normalized = LineMatcher::normalize("<i>\u{266a}</i> oh yes");
    assert_eq!(LineMatcher::token_count(&normalized), 2);
}
