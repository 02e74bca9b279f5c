//! YAML scenario files.
//!
//! ```yaml
//! scenarios:
//!   - name: wall
//!     map:
//!       - "..#.."
//!       - "....."
//!     start: [0, 0]
//!     goal: [0, 4]
//!     metric: euclidean      # optional, default euclidean
//!     connectivity: [4, 8]   # optional, default [4, 8]
//! ```
//!
//! Each scenario builds its grid and heuristic field once and then searches every requested
//! connectivity in parallel over those shared, read-only inputs.

use eyre::WrapErr;
use log::warn;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::error::SearchError;
use crate::grid::{Cell, Connectivity, OccupancyGrid};
use crate::heuristic::{HeuristicField, Metric};
use crate::planner::search_with_stats;
use crate::report::{Outcome, ScenarioReport};

#[derive(Debug, serde::Deserialize)]
pub struct ScenarioFile {
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, serde::Deserialize)]
pub struct Scenario {
    /// used as the heading of the scenario's report block
    pub name: String,
    /// map rows, `.` free and `#` blocked
    pub map: Vec<String>,
    pub start: Cell,
    pub goal: Cell,
    #[serde(default)]
    pub metric: Metric,
    #[serde(default = "default_connectivity")]
    pub connectivity: Vec<Connectivity>,
}

fn default_connectivity() -> Vec<Connectivity> {
    vec![Connectivity::Four, Connectivity::Eight]
}

impl ScenarioFile {
    pub fn from_yaml(text: &str) -> eyre::Result<ScenarioFile> {
        serde_yaml::from_str(text).wrap_err("failed to parse scenario yaml")
    }

    pub fn load(path: &Path) -> eyre::Result<ScenarioFile> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read scenario file {}", path.display()))?;
        ScenarioFile::from_yaml(&text)
            .wrap_err_with(|| format!("invalid scenario file {}", path.display()))
    }
}

impl Scenario {
    pub fn run(&self) -> eyre::Result<ScenarioReport> {
        let grid = OccupancyGrid::from_ascii(self.map.as_slice())
            .wrap_err_with(|| format!("invalid map in scenario {}", self.name))?;
        let heuristic = HeuristicField::precompute(grid.rows(), grid.cols(), self.goal, self.metric);

        for connectivity in &self.connectivity {
            if !self.metric.is_admissible_for(*connectivity) {
                warn!(
                    "scenario {}: {} heuristic overestimates with {}-connectivity, the path may not be optimal",
                    self.name, self.metric, connectivity
                );
            }
        }

        let outcomes = self
            .connectivity
            .par_iter()
            .map(|&connectivity| -> Result<Outcome, SearchError> {
                let started = Instant::now();
                let (result, stats) =
                    search_with_stats(&grid, self.start, self.goal, &heuristic, connectivity)?;
                Ok(Outcome {
                    connectivity,
                    result,
                    stats,
                    elapsed: started.elapsed(),
                })
            })
            .collect::<Result<Vec<_>, SearchError>>()
            .wrap_err_with(|| format!("scenario {} failed", self.name))?;

        Ok(ScenarioReport {
            name: self.name.clone(),
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use approx::assert_relative_eq;

    const YAML: &str = r##"
scenarios:
  - name: wall
    map:
      - "..#.."
      - "..#.."
      - "..#.."
      - "..#.."
      - "....."
    start: [0, 0]
    goal: [0, 4]
  - name: gap
    map:
      - ".#"
      - "#."
    start: [0, 0]
    goal: [1, 1]
    metric: chebyshev
    connectivity: [8, 4]
"##;

    #[test]
    fn parses_with_defaults() {
        let file = ScenarioFile::from_yaml(YAML).unwrap();
        assert_eq!(file.scenarios.len(), 2);
        let wall = &file.scenarios[0];
        assert_eq!(wall.start, Cell::new(0, 0));
        assert_eq!(wall.goal, Cell::new(0, 4));
        assert_eq!(wall.metric, Metric::Euclidean);
        assert_eq!(wall.connectivity, vec![Connectivity::Four, Connectivity::Eight]);
        assert_eq!(file.scenarios[1].metric, Metric::Chebyshev);
    }

    #[test]
    fn outcomes_follow_requested_connectivity_order() {
        let file = ScenarioFile::from_yaml(YAML).unwrap();
        let report = file.scenarios[1].run().unwrap();
        assert_eq!(report.outcomes[0].connectivity, Connectivity::Eight);
        assert!(report.outcomes[0].result.is_found());
        assert_eq!(report.outcomes[1].connectivity, Connectivity::Four);
        assert!(!report.outcomes[1].result.is_found());
    }

    #[test]
    fn wall_costs() {
        let file = ScenarioFile::from_yaml(YAML).unwrap();
        let report = file.scenarios[0].run().unwrap();
        assert_relative_eq!(report.outcomes[0].result.cost().unwrap(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(
            report.outcomes[1].result.cost().unwrap(),
            4.0 + 4.0 * std::f64::consts::SQRT_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_bad_connectivity_and_metric() {
        let bad_conn = YAML.replace("connectivity: [8, 4]", "connectivity: [6]");
        assert!(ScenarioFile::from_yaml(&bad_conn).is_err());
        let bad_metric = YAML.replace("metric: chebyshev", "metric: octile");
        let err = ScenarioFile::from_yaml(&bad_metric).unwrap_err();
        assert!(format!("{err:?}").contains("unknown heuristic metric: octile"));
    }

    #[test]
    fn out_of_bounds_goal_fails_the_scenario() {
        let yaml = YAML.replace("goal: [1, 1]", "goal: [5, 5]");
        let file = ScenarioFile::from_yaml(&yaml).unwrap();
        let err = file.scenarios[1].run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::Config(ConfigError::OutOfBounds { role: "goal", .. }))
        ));
    }
}
