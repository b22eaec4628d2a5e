//! Runs a load-balancing heuristic over a grid of instances and writes the
//! metrics as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_balance::best::{BestImprovementConfig, MovePolicy};
use u_balance::experiment::{run_sweep, write_allocation_csv, write_metrics_csv, Strategy, SweepConfig};
use u_balance::first::FirstImprovementConfig;
use u_balance::ils::IlsConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// First-Improvement local search
    First,
    /// Best-Improvement local search (load dispersion)
    Best,
    /// Best-Improvement restricted to the most-loaded machine
    BestMax,
    /// Iterated Local Search
    Ils,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Heuristic to run
    #[arg(long, value_enum, default_value = "best")]
    strategy: StrategyKind,

    /// Machine counts (M)
    #[arg(long, value_delimiter = ',', default_values_t = [10usize, 20, 50])]
    machines: Vec<usize>,

    /// Exponents r, with N = floor(M^r) tasks
    #[arg(long, value_delimiter = ',', default_values_t = [1.5f64, 2.0])]
    ratios: Vec<f64>,

    /// Replications per (M, r)
    #[arg(long, default_value_t = 10)]
    replications: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// ILS perturbation rate
    #[arg(long, default_value_t = 0.1)]
    perturbation: f64,

    /// ILS iterations without improvement before stopping
    #[arg(long, default_value_t = 1000)]
    ils_max: usize,

    /// Only move the longest task of the most-loaded machine. Requires
    /// `--strategy best-max`
    #[arg(long)]
    longest_only: bool,

    /// Metrics CSV output
    #[arg(long, default_value = "data/results.csv")]
    out: PathBuf,

    /// Allocation CSV of the first instance's final assignment
    #[arg(long)]
    allocation_out: Option<PathBuf>,
}

impl Args {
    fn strategy(&self) -> Result<Strategy> {
        anyhow::ensure!(
            !self.longest_only || matches!(self.strategy, StrategyKind::BestMax),
            "--longest-only requires --strategy best-max"
        );
        Ok(match self.strategy {
            StrategyKind::First => Strategy::FirstImprovement(FirstImprovementConfig::default()),
            StrategyKind::Best => Strategy::BestImprovement(BestImprovementConfig::default()),
            StrategyKind::BestMax => Strategy::BestImprovement(
                BestImprovementConfig::default().with_policy(MovePolicy::MaxLoadTargeted {
                    longest_task_only: self.longest_only,
                }),
            ),
            StrategyKind::Ils => Strategy::IteratedLocalSearch(
                IlsConfig::default()
                    .with_perturbation_rate(self.perturbation)
                    .with_max_non_improving(self.ils_max),
            ),
        })
    }

    fn sweep(&self) -> SweepConfig {
        let config = SweepConfig::default()
            .with_machine_counts(self.machines.clone())
            .with_ratios(self.ratios.clone())
            .with_replications(self.replications);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    enable_tracing();
    let args = Args::parse();

    let strategy = args.strategy()?;
    let sweep = args.sweep();
    tracing::info!(
        strategy = strategy.name(),
        instances = sweep.instance_count(),
        "starting sweep"
    );

    let outcome = run_sweep(&sweep, &strategy).context("sweep failed")?;

    write_metrics_csv(&outcome.records, create(&args.out)?)
        .with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!(path = %args.out.display(), rows = outcome.records.len(), "metrics written");

    if let (Some(path), Some(sample)) = (&args.allocation_out, &outcome.sample) {
        write_allocation_csv(sample, create(path)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "allocation written");
    }

    Ok(())
}
