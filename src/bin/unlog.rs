use std::{path::PathBuf, process, sync::Arc};

use clap::Parser;
use colored::Colorize;
use unlog::{
    EventLog, ExtractConfig, NamingMode, ScanObserver, TimeWindow, UnlogError, WrittenFrame,
};

const CLI_AFTER_HELP: &str = "Examples:\n  unlog -c CAMERA_LEFT session.evl\n  unlog -c CAMERA_LEFT -s 10 -e 20 -n session.evl\n  unlog -c CAMERA_LEFT -v session.evl";

#[derive(Debug, Parser)]
#[command(
    name = "unlog",
    version,
    about = "Extract image frames from an event log, one file per frame",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Exact channel name of the image messages to extract.
    #[arg(short, long, value_name = "CHANNEL")]
    channel: String,

    /// Start time in seconds. Images logged less than START seconds after
    /// the first logged message are ignored.
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0.0)]
    start: f64,

    /// End time in seconds. The scan stops at the first message logged more
    /// than END seconds after the first logged message.
    #[arg(short, long, value_name = "SECONDS")]
    end: Option<f64>,

    /// Name images by frame number starting at 0 (00000.jpg, 00001.jpg, ...)
    /// instead of by capture timestamp.
    #[arg(short, long)]
    numframe: bool,

    /// Print the number of images generated.
    #[arg(short, long)]
    verbose: bool,

    /// Source event log.
    #[arg(value_name = "LOGFILE")]
    logfile: PathBuf,
}

/// Prints per-event outcomes to stderr as the scan runs.
struct TerminalObserver {
    verbose: bool,
}

impl ScanObserver for TerminalObserver {
    fn frame_written(&self, frame: &WrittenFrame) {
        if self.verbose {
            eprintln!(
                "saved frame {} -> {}",
                frame.frame_number,
                frame.path.display()
            );
        }
    }

    fn event_skipped(&self, error: &UnlogError) {
        eprintln!("{} {}", "warning:".yellow().bold(), error);
    }
}

fn run(cli: Cli) -> Result<(), UnlogError> {
    let window = TimeWindow::from_seconds(cli.start, cli.end)?;
    let naming = if cli.numframe {
        NamingMode::Sequence
    } else {
        NamingMode::CaptureTime
    };

    let config = ExtractConfig::new(cli.channel)
        .with_window(window)
        .with_naming(naming)
        .with_observer(Arc::new(TerminalObserver {
            verbose: cli.verbose,
        }));

    let mut log = EventLog::open(&cli.logfile)?;
    let summary = log.frames().extract(&config)?;

    if cli.verbose {
        println!("Generated {} images", summary.frames_written);
    }

    Ok(())
}

fn main() {
    // Usage errors and -h both exit 1; only a completed scan exits 0.
    let cli = Cli::try_parse().unwrap_or_else(|error| {
        let _ = error.print();
        process::exit(1);
    });

    if let Err(error) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), error);
        process::exit(1);
    }
}
