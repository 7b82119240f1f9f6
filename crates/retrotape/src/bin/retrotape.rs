use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use retrotape::pipeline::Pipeline;
use retrotape::sink::{JsonLineSink, TelemetrySink};
use retrotape::source::ImageSequenceSource;
use retrotape::{
    CalibrationBounds, CalibrationStore, LeanConvention, PairParams, TapePairDetector,
};

#[derive(Parser)]
#[command(
    name = "retrotape",
    about = "Vision-tape pair detection and steering telemetry",
    version
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process frames and publish steering telemetry.
    Run(RunArgs),
    /// Persist HSV threshold bounds for the segmenter.
    Tune(TuneArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Name of the output table telemetry is published to.
    #[arg(short, long)]
    table: String,

    /// Calibration bounds file.
    #[arg(short, long, default_value = "calibration.json")]
    calibration: PathBuf,

    /// Input frames, processed oldest first.
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Write annotated overlay frames into this directory.
    #[arg(short, long)]
    display: Option<PathBuf>,

    /// Publish telemetry to this TCP address instead of stdout.
    #[arg(long)]
    connect: Option<String>,

    /// Candidate area limit override (px²).
    #[arg(long)]
    min_area: Option<f32>,

    /// Mirror-angle tolerance override (degrees).
    #[arg(long)]
    tolerance_deg: Option<f32>,

    /// Expect outward-leaning strip pairs (flipped camera mounting).
    #[arg(long)]
    outward: bool,
}

#[derive(Args)]
struct TuneArgs {
    /// Calibration bounds file.
    #[arg(short, long, default_value = "calibration.json")]
    calibration: PathBuf,

    /// Lower H,S,V bound.
    #[arg(long, value_parser = parse_triplet)]
    low: [u8; 3],

    /// Upper H,S,V bound.
    #[arg(long, value_parser = parse_triplet)]
    high: [u8; 3],
}

fn parse_triplet(text: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected an H,S,V triplet, got {text:?}"));
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|e| format!("bad channel value {part:?}: {e}"))?;
    }
    Ok(out)
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = retrotape_core::init_with_level(level);

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Tune(args) => tune(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = PairParams::default();
    if let Some(min_area) = args.min_area {
        params.min_area = min_area;
    }
    if let Some(tolerance) = args.tolerance_deg {
        params.angle_tolerance_deg = tolerance;
    }
    if args.outward {
        params.lean = LeanConvention::Outward;
    }

    let detector = TapePairDetector::new(params);
    let calibration = CalibrationStore::new(args.calibration);
    let source = ImageSequenceSource::new(args.input);

    let sink: Box<dyn TelemetrySink> = match &args.connect {
        Some(addr) => Box::new(JsonLineSink::connect(&args.table, addr)?),
        None => Box::new(JsonLineSink::stdout(&args.table)),
    };

    let cancel = Arc::new(AtomicBool::new(false));
    spawn_interrupt_watcher(Arc::clone(&cancel));

    let mut pipeline = Pipeline::new(source, sink, detector, calibration);
    if let Some(dir) = args.display {
        pipeline = pipeline.with_overlay_dir(dir);
    }

    let stats = pipeline.run(&cancel)?;
    info!(
        "done: {} frames, {} reports",
        stats.frames, stats.published
    );
    Ok(())
}

fn tune(args: TuneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CalibrationStore::new(&args.calibration);
    let bounds = CalibrationBounds {
        low: args.low,
        high: args.high,
    };
    store.save(&bounds)?;
    info!(
        "saved bounds {:?}..{:?} to {:?}",
        bounds.low,
        bounds.high,
        store.path()
    );
    Ok(())
}

/// When run from a terminal, pressing enter (or closing stdin) stops the
/// loop after the current frame. Non-interactive runs end with their frame
/// source instead.
fn spawn_interrupt_watcher(cancel: Arc<AtomicBool>) {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return;
    }
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        cancel.store(true, Ordering::Relaxed);
    });
}
