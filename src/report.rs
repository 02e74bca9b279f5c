//! Benchmark summary lines, one block per scenario:
//!
//! ```text
//! --- Scenario: wall ---
//! Connectivity 4 - Cost: 12.00, Nodes in Path: 13
//! Connectivity 8 - Failure: Disconnected Domain.
//!
//! ```

use eyre::WrapErr;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::grid::Connectivity;
use crate::planner::{SearchResult, SearchStats};

/// The result of searching one scenario under one connectivity.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub connectivity: Connectivity,
    pub result: SearchResult,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub outcomes: Vec<Outcome>,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.result {
            SearchResult::Found { path, cost } => write!(
                f,
                "Connectivity {} - Cost: {:.2}, Nodes in Path: {}",
                self.connectivity,
                cost,
                path.len()
            ),
            SearchResult::NotFound => write!(
                f,
                "Connectivity {} - Failure: Disconnected Domain.",
                self.connectivity
            ),
        }
    }
}

impl Display for ScenarioReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Scenario: {} ---", self.name)?;
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f)
    }
}

/// Append a report to the summary file at `path`, creating it and its directory if needed.
pub fn append_report(path: &Path, report: &ScenarioReport) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create results directory {}", dir.display()))?;
    }

    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open results file {}", path.display()))?;

    write!(f, "{report}").wrap_err_with(|| format!("failed to write results file {}", path.display()))
}
