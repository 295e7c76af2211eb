use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use crate::file_utils::FileManager;

// @module: Film catalogue with runtimes and per-film matching hints

/// One film in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    /// Catalogue number, used for stable ordering of the batch
    pub number: u32,

    /// Film title; subtitle files are expected at `subs/<title>.srt`
    pub title: String,

    /// Runtime in minutes, needed for percentage-of-runtime positions
    #[serde(default)]
    pub runtime_minutes: Option<u32>,

    /// Whether the film takes part in the batch
    #[serde(default = "default_include")]
    pub include: bool,

    /// Marker glyph or tag the subtitle author uses for sung lines, if any
    #[serde(default)]
    pub sung_marker: Option<String>,
}

impl FilmRecord {
    /// Runtime in seconds, if known
    pub fn runtime_secs(&self) -> Option<u64> {
        self.runtime_minutes.map(|m| u64::from(m) * 60)
    }
}

fn default_include() -> bool {
    true
}

/// Catalogue of films for one batch run
#[derive(Debug, Clone, Default)]
pub struct FilmCatalog {
    films: Vec<FilmRecord>,
}

impl FilmCatalog {
    /// Build a catalogue from records
    pub fn new(films: Vec<FilmRecord>) -> Self {
        FilmCatalog { films }
    }

    /// Load the catalogue from a JSON file holding an array of film records
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(path.as_ref())
            .context("Failed to read film catalogue")?;
        Self::from_json_str(&content)
    }

    /// Parse the catalogue from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let films: Vec<FilmRecord> = serde_json::from_str(content)
            .context("Failed to parse film catalogue JSON")?;
        Ok(Self::new(films))
    }

    /// Films taking part in the batch, in catalogue-number order
    pub fn included(&self) -> Vec<FilmRecord> {
        let mut films: Vec<FilmRecord> = self
            .films
            .iter()
            .filter(|f| f.include)
            .cloned()
            .collect();
        films.sort_by_key(|f| f.number);
        films
    }

    /// Look up a film record by title
    pub fn record(&self, title: &str) -> Option<&FilmRecord> {
        self.films.iter().find(|f| f.title == title)
    }

    /// Number of records in the catalogue
    pub fn len(&self) -> usize {
        self.films.len()
    }

    /// Whether the catalogue has no records
    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}
