//! Grid A* scenario runner
//!
//! Loads a set of scenarios (map, start, goal, heuristic metric, connectivities) from YAML, runs
//! A* on each, and prints a benchmark summary: the path cost and length per connectivity, or a
//! failure notice when start and goal are disconnected. The summary can also be written to a
//! results file. Without a scenario file the built-in set in `scenarios/default.yaml` is used.
//!
//! Set `RUST_LOG=debug` to see per-search expansion counts.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;
use log::info;

use grid_astar::report::append_report;
use grid_astar::scenario::ScenarioFile;

const DEFAULT_SCENARIOS: &str = include_str!("../scenarios/default.yaml");

/// Run A* over grid scenarios and report path costs for each connectivity.
#[derive(clap::Parser, Debug)]
struct Args {
    /// YAML scenario file. The built-in scenarios are used when omitted
    scenarios: Option<PathBuf>,

    /// Write the benchmark summary to this file as well as stdout
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// Append to the results file instead of replacing it
    #[arg(short, long, requires = "results")]
    append: bool,
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {} - {}", record.level(), record.target(), record.args()))
        .init();

    let args = Args::parse();

    let now = std::time::Instant::now();
    let file = match &args.scenarios {
        None => {
            println!("Using built-in scenarios.");
            ScenarioFile::from_yaml(DEFAULT_SCENARIOS)?
        }
        Some(path) => {
            println!("Loading scenarios from disk.");
            ScenarioFile::load(path)?
        }
    };
    println!("{} scenarios loaded: {:.2} seconds", file.scenarios.len(), now.elapsed().as_secs_f32());

    if let Some(path) = &args.results {
        if !args.append && path.exists() {
            std::fs::remove_file(path)
                .wrap_err_with(|| format!("failed to clear previous results {}", path.display()))?;
        }
    }

    for scenario in &file.scenarios {
        println!("Running scenario: {}...", scenario.name);
        let report = scenario.run()?;

        for outcome in &report.outcomes {
            let ns_time = outcome.elapsed.as_nanos();
            info!(
                "{} ({}-connected): pathfind {} ns ({} ms), {} expanded, {} pushed, {} stale",
                report.name,
                outcome.connectivity,
                ns_time,
                ns_time / 1_000_000,
                outcome.stats.expanded,
                outcome.stats.pushed,
                outcome.stats.stale
            );
        }

        print!("{report}");
        if let Some(path) = &args.results {
            append_report(path, &report)?;
        }
    }

    if let Some(path) = &args.results {
        println!("Results written to {}", path.display());
    }

    Ok(())
}
