use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::level_filters::LevelFilter;

use pipegrid_core::lib_tracing::LibTracer;
use pipegrid_core::{generate_layout, LayoutFile, SizeClass};

/// Place site sections on a grid and route pipes between them.
#[derive(Parser, Debug)]
#[command(name = "pipegrid", version, about)]
struct Args {
    /// Container width in pixels
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 1000.0)]
    height: f64,

    /// Force the compact size class (otherwise chosen from --width)
    #[arg(long)]
    compact: bool,

    /// Seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with a [layout] table and [[nodes]] entries
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write every log event to this file
    #[arg(long)]
    debug_log: Option<PathBuf>,

    /// Log progress on stderr (repeat for more detail)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    LibTracer::init(level_for(args.verbose), args.debug_log.as_deref())?;

    let file = match &args.config {
        Some(path) => LayoutFile::from_file(path)?,
        None => LayoutFile::default(),
    };

    let size_class = if args.compact {
        SizeClass::Compact
    } else {
        SizeClass::for_viewport_width(args.width, file.layout.compact_breakpoint)
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let layout = generate_layout(args.width, args.height, size_class, &file.nodes, &file.layout, &mut rng)?;
    Ok(serde_json::to_string_pretty(&layout)?)
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pipegrid: {}", e);
            ExitCode::FAILURE
        }
    }
}
