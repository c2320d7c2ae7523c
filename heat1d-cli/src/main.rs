mod ic;

use clap::Parser;
use heat1d_core::validation::analytical;
use heat1d_core::{ErrorReport, Field, GridParams, SolverConfig, SolverCore};
use ic::{IcType, generate_ic};
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON solver config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid points N, boundaries included
    #[arg(long)]
    points: Option<usize>,

    /// Domain length L
    #[arg(long)]
    length: Option<f64>,

    /// Diffusion coefficient alpha
    #[arg(long)]
    alpha: Option<f64>,

    /// Total simulated time T
    #[arg(long)]
    time: Option<f64>,

    /// Number of time steps nt
    #[arg(long)]
    steps: Option<usize>,

    /// Smallest range the scheduler still splits
    #[arg(long)]
    threshold: Option<usize>,

    /// Dedicated worker threads (default: shared global pool)
    #[arg(long)]
    threads: Option<usize>,

    /// Dirichlet value at x = 0
    #[arg(long, allow_hyphen_values = true)]
    left: Option<f64>,

    /// Dirichlet value at x = L
    #[arg(long, allow_hyphen_values = true)]
    right: Option<f64>,

    /// Initial condition family
    #[arg(long, value_enum, default_value_t = IcType::Sine)]
    ic: IcType,

    /// RNG seed for random initial conditions
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Write x,Numerical[,Analytical] rows to this CSV file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write a JSON run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level (error|warn|info|debug|trace); falls back to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    config: &'a SolverConfig,
    grid: &'a GridParams,
    ic_type: IcType,
    seed: u64,
    threads: usize,
    compute_s: f64,
    final_peak: f64,
    error: Option<ErrorReport>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = build_config(&args)?;
    let grid = config.grid()?;

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let initial = generate_ic(&mut rng, &grid, args.ic);

    let solver = SolverCore::from_field(&config, initial)?;
    let threads = solver.threads();
    info!(
        "running {} steps on {} points ({} initial condition, {} threads)",
        grid.steps,
        grid.points,
        args.ic.as_str(),
        threads
    );

    let t0 = Instant::now();
    let result = solver.run();
    let compute_s = t0.elapsed().as_secs_f64();

    println!("Computation time: {compute_s:.6}s");

    let error = args
        .ic
        .has_analytical()
        .then(|| ErrorReport::against_analytical(&result, &grid));
    if let Some(report) = &error {
        println!("L2 Error: {:.6e}", report.l2);
    }

    if let Some(path) = &args.out {
        let exact = args.ic.has_analytical().then(|| analytical(&grid));
        write_csv(path, &result, exact.as_ref())?;
        info!("wrote {}", path.display());
    }

    if let Some(path) = &args.summary {
        let summary = RunSummary {
            config: &config,
            grid: &grid,
            ic_type: args.ic,
            seed: args.seed,
            threads,
            compute_s,
            final_peak: result.max_abs(),
            error,
        };
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &summary)?;
        w.write_all(b"\n")?;
        w.flush()?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn init_logging(level: Option<&str>) {
    let level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}

fn build_config(args: &Args) -> Result<SolverConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {e}", path.display()))?;
            serde_json::from_str::<SolverConfig>(&text)
                .map_err(|e| format!("parsing {}: {e}", path.display()))?
        }
        None => SolverConfig::default(),
    };

    if let Some(v) = args.points {
        cfg.points = v;
    }
    if let Some(v) = args.length {
        cfg.length = v;
    }
    if let Some(v) = args.alpha {
        cfg.alpha = v;
    }
    if let Some(v) = args.time {
        cfg.total_time = v;
    }
    if let Some(v) = args.steps {
        cfg.steps = v;
    }
    if let Some(v) = args.threshold {
        cfg.threshold = v;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    if let Some(v) = args.left {
        cfg.boundary.left = v;
    }
    if let Some(v) = args.right {
        cfg.boundary.right = v;
    }
    Ok(cfg)
}

fn write_csv(path: &Path, result: &Field, exact: Option<&Field>) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    match exact {
        Some(exact) => {
            writeln!(w, "x,Numerical,Analytical")?;
            for ((x, u), a) in result.points().zip(exact.values()) {
                writeln!(w, "{x},{u},{a}")?;
            }
        }
        None => {
            writeln!(w, "x,Numerical")?;
            for (x, u) in result.points() {
                writeln!(w, "{x},{u}")?;
            }
        }
    }
    w.flush()
}
