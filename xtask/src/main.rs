use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maxheap::MaxHeap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "maxheap verification and benchmark driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a heap from random data, mutate it and check the invariant after every step
    Drill {
        /// Number of random values to build the heap from
        #[arg(long, default_value_t = 100_000)]
        size: usize,

        /// Seed for the value generator
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Values are drawn from `0..max_value`
        #[arg(long, default_value_t = 100_000)]
        max_value: i64,

        /// Index to update and remove (defaults to size / 2)
        #[arg(long)]
        index: Option<usize>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the criterion suite and summarise it
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH_NAME: &str = "max_heap_benchmark";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Drill {
            size,
            seed,
            max_value,
            index,
            json,
        } => {
            let config = DrillConfig {
                size,
                seed,
                max_value,
                index: index.unwrap_or(size / 2),
            };
            let report = run_drill(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            if let Some(step) = report.steps.iter().find(|step| !step.valid) {
                anyhow::bail!("heap invariant violated after {}", step.operation);
            }
        }
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

struct DrillConfig {
    size: usize,
    seed: u64,
    max_value: i64,
    index: usize,
}

#[derive(Serialize)]
struct DrillReport {
    size: usize,
    seed: u64,
    steps: Vec<StepReport>,
}

#[derive(Serialize)]
struct StepReport {
    operation: String,
    elapsed_ns: u64,
    len: usize,
    valid: bool,
}

impl StepReport {
    fn new(operation: String, elapsed: Duration, heap: &MaxHeap<i64>) -> Self {
        Self {
            operation,
            elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            len: heap.len(),
            valid: heap.is_heap_valid(),
        }
    }
}

fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn run_drill(config: &DrillConfig) -> Result<DrillReport> {
    if config.max_value <= 0 {
        anyhow::bail!("--max-value must be positive, got {}", config.max_value);
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let data: Vec<i64> = (0..config.size)
        .map(|_| rng.gen_range(0..config.max_value))
        .collect();

    let mut heap = MaxHeap::with_capacity(config.size + 1);
    let mut steps = Vec::new();

    let ((), elapsed) = timed(|| heap.build_heap(data));
    steps.push(StepReport::new(
        format!("build_heap({} values)", config.size),
        elapsed,
        &heap,
    ));

    let inserted = config.max_value / 2;
    let ((), elapsed) = timed(|| heap.insert(inserted));
    steps.push(StepReport::new(format!("insert({})", inserted), elapsed, &heap));

    let (result, elapsed) = timed(|| heap.update(config.index, config.max_value));
    result.with_context(|| format!("update at index {}", config.index))?;
    steps.push(StepReport::new(
        format!("update({}, {})", config.index, config.max_value),
        elapsed,
        &heap,
    ));

    let (result, elapsed) = timed(|| heap.remove(config.index));
    result.with_context(|| format!("remove at index {}", config.index))?;
    steps.push(StepReport::new(format!("remove({})", config.index), elapsed, &heap));

    let (result, elapsed) = timed(|| heap.extract_max());
    let max = result.context("extract_max")?;
    if heap.peek().is_some_and(|&rest| rest > max) {
        anyhow::bail!("extract_max returned {} but a larger element remains", max);
    }
    steps.push(StepReport::new(format!("extract_max() = {}", max), elapsed, &heap));

    Ok(DrillReport {
        size: config.size,
        seed: config.seed,
        steps,
    })
}

fn print_report(report: &DrillReport) {
    println!("Heap drill: {} values, seed {}", report.size, report.seed);
    println!("{:<32} {:>14} {:>10} {:>8}", "operation", "elapsed", "len", "valid");
    for step in &report.steps {
        println!(
            "{:<32} {:>14} {:>10} {:>8}",
            step.operation,
            format!("{:.2?}", Duration::from_nanos(step.elapsed_ns)),
            step.len,
            if step.valid { "yes" } else { "NO" }
        );
    }
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running {}...", BENCH_NAME);
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("bench").arg("--bench").arg(BENCH_NAME);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run bench {}", BENCH_NAME))?;
    if !status.success() {
        anyhow::bail!("Benchmark {} failed", BENCH_NAME);
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

struct Estimate {
    mean_ns: f64,
    elements: Option<f64>,
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# maxheap Benchmark Report")?;
    writeln!(file)?;
    writeln!(file, "| Benchmark | Mean | Throughput |")?;
    writeln!(file, "|---|---|---|")?;

    for (name, estimate) in &results {
        let mean = format!("{:.2?}", Duration::from_secs_f64(estimate.mean_ns / 1e9));
        let throughput = match estimate.elements {
            Some(elements) => format_ops((elements * 1e9) / estimate.mean_ns),
            None => format_ops(1e9 / estimate.mean_ns),
        };
        writeln!(file, "| {} | {} | {} |", name, mean, throughput)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M ops/s", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K ops/s", ops / 1_000.0)
    } else {
        format!("{:.0} ops/s", ops)
    }
}

fn collect_results(root: &Path, dir: &Path, results: &mut BTreeMap<String, Estimate>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, results);
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        // Structure: <root>/<group>/<function>[/<param>]/new/estimates.json
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(workload_dir) = run_dir.parent() else { continue };
        let Ok(workload) = workload_dir.strip_prefix(root) else { continue };
        if workload.starts_with("report") {
            continue;
        }

        let elements = fs::read_to_string(run_dir.join("benchmark.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("throughput")?.get("Elements")?.as_f64());

        let mean_ns = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("mean")?.get("point_estimate")?.as_f64());

        if let Some(mean_ns) = mean_ns.filter(|&ns| ns > 0.0) {
            let name = workload.to_string_lossy().replace('\\', "/");
            results.insert(name, Estimate { mean_ns, elements });
        }
    }
}
