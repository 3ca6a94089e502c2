// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use mixsub::app_config::{Config, LogLevel};
use mixsub::app_controller::{Controller, PlanReport, Selection};
use mixsub::alignment::infer_order_indices;
use mixsub::media::LocalFile;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan which subtitle and comment file go with each video (default command)
    Plan(PlanArgs),

    /// Print the episode order inferred from a list of names
    Order {
        /// File names to order
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// Generate shell completions for mixsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct PlanArgs {
    /// Directory holding the videos, subtitles and comment files
    #[arg(value_name = "DIR", default_value = ".")]
    directory: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "mixsub.json")]
    config_path: PathBuf,

    /// Tag appended to output names
    #[arg(short, long)]
    tag: Option<String>,

    /// Only plan the given episode (1-based, repeatable)
    #[arg(short, long = "episode", value_name = "N")]
    episodes: Vec<usize>,

    /// Keep only videos matching this regex (repeatable)
    #[arg(long = "match", value_name = "REGEX")]
    match_video: Vec<String>,

    /// Keep only subtitles matching this regex (repeatable)
    #[arg(long, value_name = "REGEX")]
    match_subtitle: Vec<String>,

    /// Keep only comment files matching this regex (repeatable)
    #[arg(long, value_name = "REGEX")]
    match_comment: Vec<String>,

    /// Do not look for subtitle tracks inside the videos
    #[arg(long)]
    no_probe: bool,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// mixsub - mix comment overlays into episode subtitles
///
/// Works out which subtitle and which comment file belong to each video of a
/// series from the file names alone.
#[derive(Parser, Debug)]
#[command(name = "mixsub")]
#[command(version)]
#[command(about = "Align videos, subtitles and comment files by episode")]
#[command(long_about = "mixsub infers the episode order of a directory of videos from their names,
pairs every video with its best subtitle and with its comment file, and prints
the resulting plan.

EXAMPLES:
    mixsub                                      # Plan the current directory
    mixsub /anime/show                          # Plan another directory
    mixsub -e 3 -e 4 /anime/show                # Only episodes 3 and 4
    mixsub --match '1080p' --no-probe .         # Filter videos, skip ffprobe
    mixsub --json . > plan.json                 # Machine readable plan
    mixsub order 'Ep 10.mkv' 'Ep 9.mkv'         # Show the inferred order
    mixsub completions bash > mixsub.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in mixsub.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    plan: PlanArgs,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour sequence for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // The level is updated after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mixsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Order { names }) => run_order(&names),
        Some(Commands::Plan(args)) => run_plan(args).await,
        None => run_plan(cli.plan).await,
    }
}

fn run_order(names: &[String]) -> Result<()> {
    let items: Vec<LocalFile> = names.iter().map(LocalFile::new).collect();
    let placed = infer_order_indices(&items);

    let mut stdout = std::io::stdout();
    for (index, &position) in placed.iter().enumerate() {
        writeln!(stdout, "{:>3}  {}", index + 1, items[position].name())?;
    }

    let mut is_placed = vec![false; items.len()];
    for &position in &placed {
        is_placed[position] = true;
    }
    for (item, was_placed) in items.iter().zip(is_placed) {
        if !was_placed {
            warn!("Could not place: {}", item.name());
        }
    }

    Ok(())
}

async fn run_plan(options: PlanArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = options.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let controller = Controller::with_config(config)?;
    let selection = Selection::only(options.episodes.iter().copied());
    let report = controller.plan(&options.directory, &selection).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        print_report(&report)?;
    }

    Ok(())
}

// Override config with CLI options if provided
fn apply_overrides(config: &mut Config, options: &PlanArgs) {
    if let Some(tag) = &options.tag {
        config.tag = tag.clone();
    }
    config.filters.videos.extend(options.match_video.iter().cloned());
    config.filters.subtitles.extend(options.match_subtitle.iter().cloned());
    config.filters.comments.extend(options.match_comment.iter().cloned());
    if options.no_probe {
        config.discovery.probe_embedded = false;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
}

fn print_report(report: &PlanReport) -> Result<()> {
    let mut stdout = std::io::stdout();

    for plan in &report.episodes {
        writeln!(stdout, "Episode {}", plan.episode)?;
        writeln!(stdout, "  video:    {}", plan.video.display())?;
        writeln!(stdout, "  subtitle: {}", plan.subtitle.as_deref().unwrap_or("-"))?;
        writeln!(stdout, "  comments: {}", plan.comments.display())?;
        writeln!(stdout, "  output:   {}", plan.output.display())?;
    }

    info!(
        "{} episode(s) planned in {:?} ({} subtitle pairing)",
        report.episodes.len(),
        report.directory,
        report.strategy
    );
    if let Some(episode) = report.halted_at {
        warn!("Stopped at episode {}: no comment file left", episode);
    }

    Ok(())
}
