/*!
 * Similarity scoring between a subtitle cue and a lyric line.
 *
 * The scorer is deliberately word-order-aware: two lines built from the
 * same bag of words in a different order are treated as a non-match, since
 * word order is meaningful evidence when deciding whether a cue is a sung
 * lyric rather than coincidentally similar dialogue.
 */

use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

// Markup tags subtitle authors wrap around sung lines
static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[ibu]>").unwrap()
});

/// Punctuation removed during normalization (the ASCII punctuation set)
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Music-note glyphs used to mark sung lines
const MUSIC_NOTES: [char; 2] = ['\u{266a}', '\u{266b}'];

/// Word-overlap scorer for (cue, lyric line) pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMatcher;

impl LineMatcher {
    /// Normalize one side of a comparison.
    ///
    /// Strips markup tags and music-note glyphs, lowercases, removes the
    /// declared punctuation set and trims surrounding whitespace.
    pub fn normalize(text: &str) -> String {
        let without_tags = MARKUP_TAG_REGEX.replace_all(text, "");

        without_tags
            .to_lowercase()
            .chars()
            .filter(|c| !PUNCTUATION.contains(*c) && !MUSIC_NOTES.contains(c))
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Number of whitespace-delimited tokens in a normalized string
    pub fn token_count(normalized: &str) -> usize {
        normalized.split_whitespace().count()
    }

    /// Score the similarity of a cue against a lyric line, in [0, 1]
    pub fn score(cue_text: &str, lyric_text: &str) -> f64 {
        let sub = Self::normalize(cue_text);
        let lyric = Self::normalize(lyric_text);
        Self::score_normalized(&sub, &lyric)
    }

    /// Score two already-normalized strings.
    ///
    /// Policy, evaluated in order:
    /// 1. equal or contiguous substring of the other: 1.0
    /// 2. same words but reordered (every word of either side appears in
    ///    the other): 0.0
    /// 3. otherwise the shared-word count over the shorter side's token count
    pub(crate) fn score_normalized(sub: &str, lyric: &str) -> f64 {
        if sub == lyric || lyric.contains(sub) || sub.contains(lyric) {
            return 1.0;
        }

        let sub_words: Vec<&str> = sub.split_whitespace().collect();
        let lyric_words: Vec<&str> = lyric.split_whitespace().collect();

        let sub_set: HashSet<&str> = sub_words.iter().copied().collect();
        let lyric_set: HashSet<&str> = lyric_words.iter().copied().collect();
        let common = sub_set.intersection(&lyric_set).count();

        // Token counts include duplicate words; the intersection does not
        if common == sub_words.len() || common == lyric_words.len() {
            return 0.0;
        }

        common as f64 / sub_words.len().min(lyric_words.len()) as f64
    }
}
