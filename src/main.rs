// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod catalog;
mod errors;
mod file_utils;
mod lyrics;
mod matching;
mod subtitle_processor;
mod timeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match film subtitles against song lyrics (default command)
    #[command(alias = "run")]
    Match(MatchArgs),

    /// Generate shell completions for songtimes
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Data directory containing films.json, lyrics.json and a subs/ folder
    #[arg(value_name = "DATA_DIR")]
    data_dir: PathBuf,

    /// Output file for positioned song occurrences (default: <DATA_DIR>/song_times.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// songtimes - When do they sing?
///
/// Recovers the on-screen start and end time of every song performance in a
/// film by matching subtitle cues against the songs' lyric lines.
#[derive(Parser, Debug)]
#[command(name = "songtimes")]
#[command(version = "1.0.0")]
#[command(about = "Find song start/end times in films by matching subtitles against lyrics")]
#[command(long_about = "songtimes matches each film's subtitle cues against the lyric lines of its
songs and reports when every song performance (including reprises) starts
and ends, both as timestamps and as a fraction of the film's runtime.

EXAMPLES:
    songtimes data/                          # Process the films in data/
    songtimes -o out.json data/              # Write output to a custom path
    songtimes --dry-run data/                # Report without writing output
    songtimes --log-level debug data/        # Verbose per-film diagnostics
    songtimes completions bash               # Generate bash completions

DATA LAYOUT:
    <DATA_DIR>/films.json    film catalogue (title, runtime, include flag,
                             optional sung-line marker)
    <DATA_DIR>/lyrics.json   flat table of lyric lines per film and song
    <DATA_DIR>/subs/         one <Film Title>.srt per film

CONFIGURATION:
    Matching tunables (match threshold, minimum token count, reprise gap,
    minimum song length) live in conf.json by default. If the config file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Data directory containing films.json, lyrics.json and a subs/ folder
    #[arg(value_name = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output file for positioned song occurrences (default: <DATA_DIR>/song_times.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "songtimes", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Match(args)) => run_match(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let data_dir = cli.data_dir.ok_or_else(|| {
                anyhow!("DATA_DIR is required when no subcommand is specified")
            })?;

            let match_args = MatchArgs {
                data_dir,
                output: cli.output,
                dry_run: cli.dry_run,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_match(match_args).await
        }
    }
}

async fn run_match(options: MatchArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        let mut config = Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
            .save_to_file(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let output_path = if options.dry_run {
        None
    } else {
        Some(
            options
                .output
                .unwrap_or_else(|| options.data_dir.join("song_times.json")),
        )
    };

    let controller = Controller::with_config(config)?;
    let report = controller.run(&options.data_dir, output_path.as_deref()).await?;

    for occurrence in &report.positioned {
        info!(
            "{} / {} (occurrence {}): {} -> {} ({:.1}% - {:.1}%)",
            occurrence.film,
            occurrence.song_title,
            occurrence.occurrence,
            occurrence.start_time,
            occurrence.end_time,
            occurrence.start_pos * 100.0,
            occurrence.end_pos * 100.0
        );
    }

    Ok(())
}
