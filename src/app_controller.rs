use anyhow::{Result, anyhow};
use log::{warn, info, debug};
use std::fmt;
use std::path::{Path, PathBuf};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::app_config::{Config, MatchingConfig};
use crate::catalog::{FilmCatalog, FilmRecord};
use crate::file_utils::FileManager;
use crate::lyrics::{LyricLine, LyricsTable};
use crate::matching::{run_film_pipeline, SongOccurrence};
use crate::subtitle_processor::CueCollection;
use crate::timeline::{position_occurrences, PositionedOccurrence};

// @module: Batch orchestration over a film catalogue

/// Why a film was skipped rather than processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SkipReason {
    /// No subtitle file found for the film
    MissingSubtitles,
    /// The subtitle file existed but produced no usable cues
    UnreadableSubtitles(String),
    /// The lyrics table has no rows for the film
    NoLyrics,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingSubtitles => write!(f, "missing subtitles"),
            Self::UnreadableSubtitles(e) => write!(f, "unreadable subtitles: {}", e),
            Self::NoLyrics => write!(f, "no lyrics"),
        }
    }
}

/// Outcome of one film's pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilmStatus {
    /// The film was processed; zero occurrences is a normal outcome
    Processed {
        /// Cues fed to the collector after the sung-line filter
        cues: usize,
        /// Occurrences surviving aggregation
        occurrences: usize,
    },
    /// The film was skipped with a reason; the batch continues
    Skipped(SkipReason),
}

/// Per-film outcome entry in the batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmOutcome {
    /// Film title
    pub film: String,
    /// What happened to the film
    pub status: FilmStatus,
}

/// Result of a whole batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-film outcomes, in catalogue order
    pub outcomes: Vec<FilmOutcome>,
    /// All surviving occurrences, sorted by (film, start time)
    pub occurrences: Vec<SongOccurrence>,
    /// Occurrences annotated with runtime positions
    pub positioned: Vec<PositionedOccurrence>,
}

impl BatchReport {
    /// Number of films that ran the pipeline
    pub fn processed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FilmStatus::Processed { .. }))
            .count()
    }

    /// Number of films skipped
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.processed_count()
    }
}

/// Main application controller for the song-matching batch
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the batch over a data directory.
    ///
    /// Expects `films.json`, `lyrics.json` and `subs/<Title>.srt` under
    /// `data_dir`. Writes the positioned occurrences as pretty JSON to
    /// `output_path` when given.
    pub async fn run(&self, data_dir: &Path, output_path: Option<&Path>) -> Result<BatchReport> {
        if !FileManager::dir_exists(data_dir) {
            return Err(anyhow!("Data directory does not exist: {:?}", data_dir));
        }

        let catalog = FilmCatalog::load(data_dir.join("films.json"))?;
        let lyrics = LyricsTable::load(data_dir.join("lyrics.json"))?;
        let subs_dir = data_dir.join("subs");

        Self::report_orphan_subtitles(&catalog, &subs_dir);

        let report = self.run_batch(&catalog, &lyrics, &subs_dir).await?;

        if let Some(path) = output_path {
            let json = serde_json::to_string_pretty(&report.positioned)?;
            FileManager::write_to_file(path, &json)?;
            info!("Wrote {} positioned occurrences to {:?}", report.positioned.len(), path);
        }

        Ok(report)
    }

    /// Run the batch over already-loaded tables.
    ///
    /// Films are independent, so their pipelines run concurrently up to the
    /// configured limit; results are re-sorted afterwards so the output is
    /// identical run to run. Only a batch with nothing to process at all is
    /// an error; individual films skip with a reason instead.
    pub async fn run_batch(
        &self,
        catalog: &FilmCatalog,
        lyrics: &LyricsTable,
        subs_dir: &Path,
    ) -> Result<BatchReport> {
        let films = catalog.included();
        if films.is_empty() {
            return Err(anyhow!("Film catalogue has no included films"));
        }
        if lyrics.is_empty() {
            return Err(anyhow!("Lyrics table is empty"));
        }

        info!("Processing {} films", films.len());

        let progress = ProgressBar::new(films.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} films {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let matching = self.config.matching.clone();
        let subs_dir = subs_dir.to_path_buf();

        let tasks = films.into_iter().map(|film| {
            let lyric_lines = lyrics.lines_for_film(&film.title);
            let subs_dir = subs_dir.clone();
            let matching = matching.clone();
            let progress = progress.clone();

            async move {
                let number = film.number;
                let result = tokio::task::spawn_blocking(move || {
                    Self::process_film(&film, lyric_lines, &subs_dir, &matching)
                })
                .await
                .map_err(|e| anyhow!("Film task failed: {}", e));
                progress.inc(1);
                result.map(|(outcome, occurrences)| (number, outcome, occurrences))
            }
        });

        let mut results: Vec<(u32, FilmOutcome, Vec<SongOccurrence>)> = stream::iter(tasks)
            .buffer_unordered(self.config.concurrent_films)
            .collect::<Vec<Result<_>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        progress.finish_and_clear();

        // Deterministic order regardless of completion order
        results.sort_by_key(|(number, _, _)| *number);

        let mut outcomes = Vec::with_capacity(results.len());
        let mut occurrences = Vec::new();
        for (_, outcome, film_occurrences) in results {
            match &outcome.status {
                FilmStatus::Processed { cues, occurrences: n } => {
                    debug!("{}: {} cues, {} occurrences", outcome.film, cues, n);
                }
                FilmStatus::Skipped(reason) => {
                    warn!("Skipped {}: {}", outcome.film, reason);
                }
            }
            outcomes.push(outcome);
            occurrences.extend(film_occurrences);
        }

        occurrences.sort_by(|a, b| {
            a.film
                .cmp(&b.film)
                .then(a.start_time_ms.cmp(&b.start_time_ms))
        });

        let positioned = position_occurrences(&occurrences, catalog);

        let report = BatchReport {
            outcomes,
            occurrences,
            positioned,
        };

        info!(
            "Batch complete: {} films processed, {} skipped, {} song occurrences",
            report.processed_count(),
            report.skipped_count(),
            report.occurrences.len()
        );

        Ok(report)
    }

    /// Run one film's pipeline, turning every failure into an outcome.
    ///
    /// Missing input and unparseable subtitles skip the film with a reason
    /// code; a film with no matches simply contributes zero occurrences.
    fn process_film(
        film: &FilmRecord,
        lyric_lines: Vec<LyricLine>,
        subs_dir: &Path,
        matching: &MatchingConfig,
    ) -> (FilmOutcome, Vec<SongOccurrence>) {
        let skipped = |reason: SkipReason| {
            (
                FilmOutcome {
                    film: film.title.clone(),
                    status: FilmStatus::Skipped(reason),
                },
                Vec::new(),
            )
        };

        if lyric_lines.is_empty() {
            return skipped(SkipReason::NoLyrics);
        }

        let srt_path = Self::subtitle_path(subs_dir, &film.title);
        if !FileManager::file_exists(&srt_path) {
            return skipped(SkipReason::MissingSubtitles);
        }

        let mut cues = match CueCollection::from_srt_file(&film.title, &srt_path) {
            Ok(cues) => cues,
            Err(e) => return skipped(SkipReason::UnreadableSubtitles(e.to_string())),
        };

        if let Some(marker) = &film.sung_marker {
            cues.retain_sung_lines(marker);
        }

        let occurrences = run_film_pipeline(&cues, &lyric_lines, matching);

        (
            FilmOutcome {
                film: film.title.clone(),
                status: FilmStatus::Processed {
                    cues: cues.cues.len(),
                    occurrences: occurrences.len(),
                },
            },
            occurrences,
        )
    }

    /// Expected subtitle file path for a film
    pub fn subtitle_path(subs_dir: &Path, title: &str) -> PathBuf {
        subs_dir.join(format!("{}.srt", title))
    }

    /// Warn about subtitle files no catalogue entry claims
    fn report_orphan_subtitles(catalog: &FilmCatalog, subs_dir: &Path) {
        if !FileManager::dir_exists(subs_dir) {
            return;
        }

        match FileManager::find_files(subs_dir, "srt") {
            Ok(paths) => {
                for path in paths {
                    let title = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if catalog.record(&title).is_none() {
                        warn!("Subtitle file {:?} matches no catalogue entry", path);
                    }
                }
            }
            Err(e) => warn!("Could not scan subtitle directory {:?}: {}", subs_dir, e),
        }
    }
}
