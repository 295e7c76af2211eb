use std::fmt;
use std::path::Path;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::Result;
use log::warn;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: Subtitle cue parsing and manipulation

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    // @field: Cue number as it appears in the subtitle file
    pub sub_no: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: On-screen text, multi-line cues joined with newlines
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new cue - used by tests and external consumers
    pub fn new(sub_no: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleCue {
            sub_no,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated cue
    // @validates: Time range and non-empty text
    pub fn new_validated(sub_no: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Result<Self, SubtitleError> {
        if end_time_ms <= start_time_ms {
            return Err(SubtitleError::InvalidTimeRange {
                start_ms: start_time_ms,
                end_ms: end_time_ms,
            });
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(SubtitleError::EmptyText(sub_no));
        }

        Ok(SubtitleCue {
            sub_no,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
        }

        let parse = |s: &str| -> Result<u64, SubtitleError> {
            s.parse()
                .map_err(|_| SubtitleError::InvalidTimestamp(timestamp.to_string()))
        };

        let hours = parse(parts[0])?;
        let minutes = parse(parts[1])?;
        let seconds = parse(parts[2])?;
        let millis = parse(parts[3])?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.sub_no)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// All cues for one film
#[derive(Debug, Clone)]
pub struct CueCollection {
    /// Film title the cues belong to
    pub film: String,

    /// List of cues in on-screen order
    pub cues: Vec<SubtitleCue>,
}

impl CueCollection {
    /// Create a new empty collection
    pub fn new(film: String) -> Self {
        CueCollection {
            film,
            cues: Vec::new(),
        }
    }

    /// Read and parse an SRT file for a film
    pub fn from_srt_file<P: AsRef<Path>>(film: &str, path: P) -> Result<Self> {
        let content = FileManager::read_to_string(path.as_ref())?;
        Self::from_srt_string(film, &content)
    }

    /// Parse SRT format content into a cue collection
    ///
    /// Malformed entries (bad cue number, unparseable timestamp, empty text)
    /// are dropped with a warning; the remaining cues are still returned.
    pub fn from_srt_string(film: &str, content: &str) -> Result<Self> {
        let cues = Self::parse_srt_string(content)?;
        Ok(CueCollection {
            film: film.to_string(),
            cues,
        })
    }

    /// Parse SRT format string into subtitle cues
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleCue>> {
        let mut cues = Vec::new();

        // State variables for parsing
        let mut current_sub_no: Option<usize> = None;
        let mut current_start_time_ms: Option<u64> = None;
        let mut current_end_time_ms: Option<u64> = None;
        let mut current_text = String::new();
        let mut line_count = 0;

        // Helper to add the current cue if complete
        let mut add_current_cue = |sub_no: usize, start_ms: u64, end_ms: u64, text: &str| {
            match SubtitleCue::new_validated(sub_no, start_ms, end_ms, text.trim().to_string()) {
                Ok(cue) => cues.push(cue),
                Err(e) => warn!("Skipping invalid subtitle cue {}: {}", sub_no, e),
            }
        };

        for line in content.lines() {
            line_count += 1;
            let trimmed = line.trim();

            // Blank line finalizes the current cue
            if trimmed.is_empty() {
                if let (Some(sub_no), Some(start_ms), Some(end_ms)) = (current_sub_no, current_start_time_ms, current_end_time_ms) {
                    if !current_text.is_empty() {
                        add_current_cue(sub_no, start_ms, end_ms, &current_text);

                        current_sub_no = None;
                        current_start_time_ms = None;
                        current_end_time_ms = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            // Try to parse as cue number (only when starting a new cue)
            if current_sub_no.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_sub_no = Some(num);
                    continue;
                }
            }

            // Try to parse as timestamp line
            if current_sub_no.is_some() && current_start_time_ms.is_none() && current_end_time_ms.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    match (Self::parse_timestamp_to_ms(&caps, 1), Self::parse_timestamp_to_ms(&caps, 5)) {
                        (Ok(start_ms), Ok(end_ms)) => {
                            current_start_time_ms = Some(start_ms);
                            current_end_time_ms = Some(end_ms);
                            continue;
                        },
                        _ => {
                            warn!("Invalid timestamp format at line {}: {}", line_count, trimmed);
                        }
                    }
                }
            }

            // With a cue number and timestamps, this must be cue text;
            // text for one on-screen cue can span several file lines
            if current_sub_no.is_some() && current_start_time_ms.is_some() && current_end_time_ms.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!("Unexpected text at line {} before cue number or timestamp: {}", line_count, trimmed);
            }
        }

        // Add the last cue if there is one
        if let (Some(sub_no), Some(start_ms), Some(end_ms)) = (current_sub_no, current_start_time_ms, current_end_time_ms) {
            if !current_text.is_empty() {
                add_current_cue(sub_no, start_ms, end_ms, &current_text);
            }
        }

        if cues.is_empty() {
            warn!("No valid subtitle cues found in content");
            return Err(SubtitleError::NoCues.into());
        }

        // Sort by start time; the original cue numbers are kept so each
        // cue stays linked to its position in the source file
        cues.sort_by_key(|cue| cue.start_time_ms);

        Ok(cues)
    }

    /// Keep only cues marked as sung lines
    ///
    /// Some subtitle authors mark sung lines with a glyph or tag (♪, ♫,
    /// <i>, %%). When a film declares such a marker, restricting the cues
    /// to marked lines shrinks the candidate space before matching.
    pub fn retain_sung_lines(&mut self, marker: &str) {
        let before = self.cues.len();
        self.cues.retain(|cue| cue.text.contains(marker));
        log::debug!(
            "Sung-line filter '{}' kept {} of {} cues for {}",
            marker,
            self.cues.len(),
            before,
            self.film
        );
    }

    /// Parse timestamp capture group to milliseconds
    fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> Result<u64, SubtitleError> {
        let field = |idx: usize| -> u64 {
            caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        let hours = field(start_idx);
        let minutes = field(start_idx + 1);
        let seconds = field(start_idx + 2);
        let millis = field(start_idx + 3);

        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}

impl fmt::Display for CueCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Cue Collection")?;
        writeln!(f, "Film: {}", self.film)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
