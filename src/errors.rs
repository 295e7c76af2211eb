/*!
 * Error types for the songtimes application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when a timestamp cannot be parsed
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// Error when a cue's end time is not after its start time
    #[error("Invalid time range: end time {end_ms} <= start time {start_ms}")]
    InvalidTimeRange {
        /// Cue start time in milliseconds
        start_ms: u64,
        /// Cue end time in milliseconds
        end_ms: u64,
    },

    /// Error when a cue has no text
    #[error("Empty cue text for entry {0}")]
    EmptyText(usize),

    /// Error when no valid cues could be parsed from SRT content
    #[error("No valid subtitle cues were found in the SRT content")]
    NoCues,
}

/// Errors that can occur when loading or validating the lyrics table
#[derive(Error, Debug)]
pub enum LyricsError {
    /// Error when line numbers are not strictly increasing within a song
    #[error("Lyric line numbers not strictly increasing for '{film}' / '{song_title}' at line {line_num}")]
    NonMonotonicLines {
        /// Film title
        film: String,
        /// Song title
        song_title: String,
        /// Offending line number
        line_num: u32,
    },

    /// Error when the lyrics table contains no rows
    #[error("Lyrics table is empty")]
    Empty,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the lyrics table
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
