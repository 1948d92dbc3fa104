mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use output::write_csv;
use potential_core::{DEFAULT_H, PotentialSolver, SolverConfig, StrategyKind};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Jacobi,
    RedBlack,
}

impl From<Strategy> for StrategyKind {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Jacobi => StrategyKind::Jacobi,
            Strategy::RedBlack => StrategyKind::RedBlack,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV output path
    #[arg(long, default_value = "out.csv")]
    out: PathBuf,

    /// Grid edge length H (HxH)
    #[arg(long, default_value_t = DEFAULT_H)]
    size: usize,

    /// Update rule
    #[arg(long, value_enum, default_value_t = Strategy::RedBlack)]
    strategy: Strategy,

    /// Worker threads (0 = run on the main thread; default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Optional JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary {
    h: usize,
    strategy: StrategyKind,
    threads: usize,
    iterations: usize,
    final_delta: Option<f32>,
    elapsed_secs: u64,
    free_cells: usize,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    let config = SolverConfig::default()
        .strategy(args.strategy.into())
        .threads(threads);
    let mut solver = PotentialSolver::with_config(args.size, config)
        .with_context(|| format!("building solver for H={}", args.size))?;

    let time = solver.solve();
    info!("time: {time}s");

    let mut out = BufWriter::new(
        File::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?,
    );
    write_csv(&mut out, solver.result())?;
    out.flush()?;
    info!("wrote {}", args.out.display());

    if let Some(path) = &args.summary {
        let summary = Summary {
            h: solver.h(),
            strategy: solver.strategy(),
            threads: solver.threads(),
            iterations: solver.iterations(),
            final_delta: solver.last_delta(),
            elapsed_secs: time,
            free_cells: solver.free_cells().len(),
        };
        let mut w = BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        );
        serde_json::to_writer_pretty(&mut w, &summary)?;
        w.write_all(b"\n")?;
        w.flush()?;
    }

    Ok(())
}
