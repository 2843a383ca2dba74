//! FastRangeMap CLI entry point
//!
//! Reads an almanac and reports the lowest location reachable from its seeds.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fast_rangemap::core::{Execution, Pipeline};
use rayon::ThreadPool;
use fast_rangemap::formats::{parse_almanac_file, Almanac, SeedMode};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Seed interpretation (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum SeedModeArg {
    /// Every seed value is a single point
    #[value(name = "points")]
    Points,
    /// Seed values are (start, length) pairs
    #[default]
    #[value(name = "ranges")]
    Ranges,
    /// Run both interpretations
    #[value(name = "both")]
    Both,
}

impl SeedModeArg {
    fn modes(self) -> Vec<SeedMode> {
        match self {
            SeedModeArg::Points => vec![SeedMode::Points],
            SeedModeArg::Ranges => vec![SeedMode::Ranges],
            SeedModeArg::Both => vec![SeedMode::Points, SeedMode::Ranges],
        }
    }
}

#[derive(Parser)]
#[command(name = "fast-rangemap")]
#[command(about = "Exact interval remapping through chained translation stages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lowest location reachable from the seeds
    Lowest {
        /// Almanac file ('-' for stdin, .gz/.bz2 accepted)
        input: PathBuf,
        /// Seed interpretation
        #[arg(short = 'm', long, value_enum, default_value = "ranges")]
        mode: SeedModeArg,
        /// Number of threads (1 runs sequentially)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Print per-stage statistics along with the lowest location
    Trace {
        /// Almanac file ('-' for stdin, .gz/.bz2 accepted)
        input: PathBuf,
        /// Seed interpretation
        #[arg(short = 'm', long, value_enum, default_value = "ranges")]
        mode: SeedModeArg,
        /// Number of threads (1 runs sequentially)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

fn load_almanac(path: &Path) -> anyhow::Result<Almanac> {
    let start = Instant::now();
    eprintln!("Loading almanac: {:?}", path);

    let almanac = parse_almanac_file(path)
        .with_context(|| format!("Failed to load almanac {}", path.display()))?;

    eprintln!(
        "Almanac loaded in {:.2}s ({} seed values, {} stages)",
        start.elapsed().as_secs_f64(),
        almanac.seeds.len(),
        almanac.stages.len()
    );

    Ok(almanac)
}

fn print_trace(
    pipeline: &Pipeline,
    almanac: &Almanac,
    mode: SeedMode,
    pool: Option<&ThreadPool>,
) -> anyhow::Result<i64> {
    let seeds = almanac
        .seed_intervals(mode)
        .with_context(|| format!("Invalid {} seeds", mode))?;
    let report = pipeline.trace_in(&seeds, pool);

    eprintln!("\n=== Stage Statistics ({}) ===", mode);
    eprintln!("Path: {}", pipeline.categories().join(" -> "));
    eprintln!("Seed intervals:  {}", seeds.len());
    for stage in &report.stages {
        eprintln!(
            "{:<28} in {:>8}  out {:>8}  mapped {:>8}  unchanged {:>8}",
            stage.name,
            stage.stats.inputs,
            stage.stats.outputs,
            stage.stats.mapped,
            stage.stats.passed_through
        );
    }
    eprintln!("Final intervals: {}", report.intervals.len());

    report
        .lowest()
        .with_context(|| format!("No {} seeds to map", mode))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Lowest { input, mode, threads } => {
            let almanac = load_almanac(&input)?;
            let pipeline = almanac.pipeline();
            let pool = Execution::with_threads(threads).build_pool()?;
            let modes = mode.modes();

            for seed_mode in &modes {
                let seeds = almanac
                    .seed_intervals(*seed_mode)
                    .with_context(|| format!("Invalid {} seeds", seed_mode))?;
                let lowest = pipeline
                    .lowest_location_in(&seeds, pool.as_ref())
                    .with_context(|| format!("Failed to compute lowest location ({})", seed_mode))?;

                if modes.len() > 1 {
                    println!("{}: {}", seed_mode, lowest);
                } else {
                    println!("{}", lowest);
                }
            }
        }

        Commands::Trace { input, mode, threads } => {
            let almanac = load_almanac(&input)?;
            let pipeline = almanac.pipeline();
            let pool = Execution::with_threads(threads).build_pool()?;

            for seed_mode in mode.modes() {
                let lowest = print_trace(&pipeline, &almanac, seed_mode, pool.as_ref())?;
                println!("{}: {}", seed_mode, lowest);
            }
        }
    }

    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
