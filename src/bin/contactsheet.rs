use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use contactsheet::{
    FfmpegLogLevel, ProgressCallback, ProgressInfo, SampleOptions, SheetOptions, VideoSource,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  contactsheet clip.mp4\n  contactsheet --samples 16 --columns 4 *.mkv\n  contactsheet --json --quiet recordings/*.mp4";

#[derive(Debug, Parser)]
#[command(
    name = "contactsheet",
    version,
    about = "Generate contact-sheet preview grids from video files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video files. Each produces a `<name>.preview.jpg` next to it.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// How many frames to sample across each video.
    #[arg(long, default_value_t = 25)]
    samples: u32,

    /// Maximum number of grid columns.
    #[arg(long, default_value_t = 5)]
    columns: u32,

    /// Padding between cells and around the grid edge, in pixels.
    #[arg(long, default_value_t = 5)]
    padding: u32,

    /// Thumbnail target width in pixels (downscale divisor aims for this).
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Print one machine-readable JSON report line per file.
    #[arg(long)]
    json: bool,

    /// Suppress the per-file header and progress bar.
    #[arg(long)]
    quiet: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

/// Bridges library progress callbacks onto an `indicatif` bar.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        // Composition progress also flows through this callback; the bar
        // tracks the slow stage only.
        if info.operation == contactsheet::OperationType::FrameSampling {
            self.bar.set_position(info.current);
        }
    }
}

fn sheet_options(cli: &Cli) -> SheetOptions {
    SheetOptions::new()
        .with_sample_count(cli.samples)
        .with_columns(cli.columns)
        .with_padding(cli.padding)
        .with_target_width(cli.width)
        .with_jpeg_quality(cli.quality)
}

/// Process one input file. Returns the error instead of aborting the run so
/// the remaining files still get their sheets.
fn process_file(input: &PathBuf, cli: &Cli) -> Result<(), contactsheet::SheetError> {
    let options = sheet_options(cli);
    let source = VideoSource::open(input)?;

    if !cli.quiet && !cli.json {
        println!(
            "Total number of frames: {}\nNumber of screenshots: {}\n",
            source.frame_count(),
            options.sample_count,
        );
    }

    let progress_bar = if cli.quiet || cli.json {
        None
    } else {
        let bar = ProgressBar::new(options.sample_count as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        Some(bar)
    };

    let mut sampling = SampleOptions::new();
    if let Some(bar) = &progress_bar {
        sampling = sampling.with_progress(Arc::new(BarProgress { bar: bar.clone() }));
    }

    let report = contactsheet::generate_from_source(source, &options, &sampling)?;

    if let Some(bar) = progress_bar {
        bar.finish_and_clear();
    }

    if report.truncated {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!(
                "stream ended early, sampled {} of {} frames",
                report.sampled, options.sample_count
            )
            .yellow()
        );
    }

    if cli.json {
        let payload = json!({
            "input": report.input.display().to_string(),
            "output": report.output.display().to_string(),
            "frame_count": report.frame_count,
            "sampled": report.sampled,
            "truncated": report.truncated,
            "canvas_width": report.canvas_width,
            "canvas_height": report.canvas_height,
        });
        println!("{payload}");
    } else {
        println!(
            "{} {}\n",
            "Done:".green().bold(),
            report.output.display()
        );
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        match parse_log_level(level) {
            Some(parsed) => contactsheet::set_ffmpeg_log_level(parsed),
            None => {
                eprintln!("{} unsupported --log-level: {level}", "error:".red().bold());
                std::process::exit(2);
            }
        }
    }

    let mut failures = 0_usize;
    for input in &cli.inputs {
        if let Err(error) = process_file(input, &cli) {
            eprintln!(
                "{} {}: {error}",
                "error:".red().bold(),
                input.display(),
            );
            failures += 1;
        }
    }

    if failures > 0 {
        eprintln!(
            "{} {failures} of {} file(s) failed",
            "error:".red().bold(),
            cli.inputs.len(),
        );
        std::process::exit(1);
    }
}
