use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "qpo workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark the crate with and without the `parallel` feature
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

/// Baseline name and the feature set it is built with.
const BUILDS: &[(&str, Option<&str>)] = &[("sequential", None), ("parallel", Some("parallel"))];

const BENCHES: &[&str] = &["candidate_paths", "labeling_search"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    for &(baseline, feature) in BUILDS {
        println!("\n>>> Benchmarking build: {baseline}");
        let start = Instant::now();

        for bench in BENCHES {
            let mut cmd = Command::new("cargo");
            cmd.args(["bench", "--bench", bench]);
            if let Some(feature) = feature {
                cmd.args(["--features", feature]);
            }

            // Criterion arguments go after --
            cmd.arg("--").args(["--save-baseline", baseline]);
            if quick {
                cmd.args(["--measurement-time", "0.5", "--noplot", "--sample-size", "10"]);
            }

            let status = cmd
                .status()
                .with_context(|| format!("Failed to run {bench} for {baseline}"))?;
            if !status.success() {
                bail!("Benchmark {bench} failed for {baseline}");
            }
        }

        println!("Finished {baseline} in {:.2?}", start.elapsed());
    }

    Ok(())
}

/// Mean time in nanoseconds, by workload and then by baseline.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# qpo Benchmark Report")?;
    writeln!(file)?;
    write!(file, "| Workload |")?;
    for (baseline, _) in BUILDS {
        write!(file, " {baseline} |")?;
    }
    writeln!(file, " speedup |")?;
    writeln!(file, "|---|{}---|", "---|".repeat(BUILDS.len()))?;

    for (workload, times) in &results {
        write!(file, "| {workload} |")?;
        for (baseline, _) in BUILDS {
            match times.get(*baseline) {
                Some(&ns) => write!(file, " {} |", format_time(ns))?,
                None => write!(file, " N/A |")?,
            }
        }
        match (times.get("sequential"), times.get("parallel")) {
            (Some(seq), Some(par)) if *par > 0.0 => writeln!(file, " **{:.2}x** |", seq / par)?,
            _ => writeln!(file, " - |")?,
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_time(ns: f64) -> String {
    if ns > 1e9 {
        format!("{:.2} s", ns / 1e9)
    } else if ns > 1e6 {
        format!("{:.2} ms", ns / 1e6)
    } else if ns > 1e3 {
        format!("{:.2} µs", ns / 1e3)
    } else {
        format!("{ns:.0} ns")
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|s| s.to_str()).map(str::to_owned)
}

// Layout: target/criterion/<group>/<workload>/<baseline>/estimates.json
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(());
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
            continue;
        }
        if file_name(&path).as_deref() != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let (Some(baseline), Some(workload)) = (file_name(baseline_dir), file_name(workload_dir)) else {
            continue;
        };
        if !BUILDS.iter().any(|(name, _)| *name == baseline) {
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let Some(mean) = json["mean"]["point_estimate"].as_f64() else { continue };

        // Parameterized benches nest one level deeper; keep the group in the name.
        let workload = match workload_dir.parent().and_then(file_name) {
            Some(group) if group != "criterion" => format!("{group}/{workload}"),
            _ => workload,
        };
        results.entry(workload).or_default().insert(baseline, mean);
    }

    Ok(())
}
