use std::collections::HashMap;
use std::path::Path;
use anyhow::{Result, Context};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::errors::LyricsError;
use crate::file_utils::FileManager;

// @module: Lyrics table loading and per-film views

/// One line of a song's canonical lyrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Film the song belongs to
    pub film: String,

    /// Song title
    pub song_title: String,

    /// Position of this line within the song's lyrics, strictly increasing
    pub line_num: u32,

    /// Lyric text
    pub text: String,
}

/// Table of lyric lines across all films
#[derive(Debug, Clone, Default)]
pub struct LyricsTable {
    lines: Vec<LyricLine>,
}

impl LyricsTable {
    /// Build a table from rows, validating line ordering
    pub fn new(lines: Vec<LyricLine>) -> Result<Self, LyricsError> {
        if lines.is_empty() {
            return Err(LyricsError::Empty);
        }

        // line_num must be strictly increasing within each (film, song)
        let mut last_seen: HashMap<(&str, &str), u32> = HashMap::new();
        for line in &lines {
            let key = (line.film.as_str(), line.song_title.as_str());
            if let Some(&prev) = last_seen.get(&key) {
                if line.line_num <= prev {
                    return Err(LyricsError::NonMonotonicLines {
                        film: line.film.clone(),
                        song_title: line.song_title.clone(),
                        line_num: line.line_num,
                    });
                }
            }
            last_seen.insert(key, line.line_num);
        }

        Ok(LyricsTable { lines })
    }

    /// Load the lyrics table from a JSON file
    ///
    /// The file holds a flat array of `{film, song_title, line_num, text}` rows.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(path.as_ref())
            .context("Failed to read lyrics file")?;
        Self::from_json_str(&content)
    }

    /// Parse the lyrics table from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let lines: Vec<LyricLine> = serde_json::from_str(content)
            .context("Failed to parse lyrics JSON")?;
        debug!("Loaded {} lyric lines", lines.len());
        Ok(Self::new(lines)?)
    }

    /// All lyric lines for one film, in table order
    pub fn lines_for_film(&self, film: &str) -> Vec<LyricLine> {
        self.lines
            .iter()
            .filter(|line| line.film == film)
            .cloned()
            .collect()
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
