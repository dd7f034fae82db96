use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use diamond_square::utils::write_png;
use diamond_square::{DiamondSquare, GeneratorConfig, Schedule};

#[derive(Parser)]
#[command(name = "diamond-square")]
#[command(about = "Generate a diamond-square heightmap and write it as grayscale PNG")]
struct Args {
    /// RON file with generator settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recursion depth, the image side is 2^base + 1
    #[arg(long)]
    base: Option<u32>,

    /// Jitter scale per stage
    #[arg(long)]
    amplitude: Option<u32>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Spread per-tile work over all cores
    #[arg(long)]
    parallel: bool,

    /// Output PNG path, `-` for stdout
    #[arg(short, long, default_value = "image.png")]
    output: String,

    /// Dump the sample grid as text (small grids only)
    #[arg(long)]
    print: bool,
}

const PRINT_LIMIT: usize = 33;

fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config {:?}", path))?,
        None => GeneratorConfig::default(),
    };
    if let Some(base) = args.base {
        config.base = base;
    }
    if let Some(amplitude) = args.amplitude {
        config.amplitude = amplitude;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.parallel {
        config.schedule = Schedule::Parallel;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let generator = DiamondSquare::new(config).context("invalid generator settings")?;

    let start = Instant::now();
    let grid = generator.generate()?;
    log::info!(
        "generated {}x{} in {:.2} ms",
        grid.size(),
        grid.size(),
        start.elapsed().as_secs_f32() * 1000.0
    );

    if args.print {
        if grid.size() <= PRINT_LIMIT {
            eprint!("{}", grid);
        } else {
            log::warn!("grid is {}x{}, skipping text dump", grid.size(), grid.size());
        }
    }

    if args.output == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_png(&grid, &mut out).context("failed to encode PNG")?;
        out.flush()?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("failed to create {}", args.output))?;
        let mut out = BufWriter::new(file);
        write_png(&grid, &mut out).context("failed to encode PNG")?;
        out.flush()?;
        log::info!("saved {}", args.output);
    }
    Ok(())
}
