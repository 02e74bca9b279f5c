//! Precomputed heuristic fields.
//!
//! A field holds h(cell), a lower bound on the cost of reaching the goal, for every cell of a
//! grid. The planner trusts whatever field it is given: admissibility is the caller's concern.
//! Steps cost their straight-line length (1 or sqrt(2)), so:
//!
//! - `Euclidean` is admissible and consistent for both connectivities.
//! - `Chebyshev` never exceeds the octile distance, so it is also admissible and consistent for
//!   both, just looser than `Euclidean` along diagonals.
//! - `Manhattan` is only admissible for 4-connectivity; with diagonal moves it overestimates.

use ordered_float::NotNan;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::grid::{Cell, Connectivity};

/// Metric selects the distance function a heuristic field is computed with.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Metric {
    /// sqrt(d_row^2 + d_col^2)
    #[default]
    Euclidean,
    /// |d_row| + |d_col|
    Manhattan,
    /// max(|d_row|, |d_col|)
    Chebyshev,
}

impl Metric {
    pub fn distance(self, from: Cell, to: Cell) -> f64 {
        let d_row = from.row.abs_diff(to.row) as f64;
        let d_col = from.col.abs_diff(to.col) as f64;
        match self {
            Metric::Euclidean => d_row.hypot(d_col),
            Metric::Manhattan => d_row + d_col,
            Metric::Chebyshev => d_row.max(d_col),
        }
    }

    /// Whether this metric never overestimates the true path cost under `connectivity`.
    pub fn is_admissible_for(self, connectivity: Connectivity) -> bool {
        match self {
            Metric::Euclidean | Metric::Chebyshev => true,
            Metric::Manhattan => connectivity == Connectivity::Four,
        }
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "straight-line" => Ok(Metric::Euclidean),
            "manhattan" | "grid-4" => Ok(Metric::Manhattan),
            "chebyshev" | "grid-8" => Ok(Metric::Chebyshev),
            _ => Err(ConfigError::UnknownMetric(s.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}

/// HeuristicField is a rows x cols table of non-negative estimates, read-only once built, so one
/// field can be shared by any number of concurrent searches towards the same goal.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicField {
    rows: usize,
    cols: usize,
    values: Vec<NotNan<f64>>,
}

impl HeuristicField {
    /// Distance from every cell of a rows x cols grid to `goal` under `metric`.
    pub fn precompute(rows: usize, cols: usize, goal: Cell, metric: Metric) -> Self {
        let values = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell { row, col }))
            .map(|cell| NotNan::new(metric.distance(cell, goal)).unwrap_or_default())
            .collect();

        HeuristicField { rows, cols, values }
    }

    /// An all-zero field. Searching with it is uniform-cost search (Dijkstra).
    pub fn zero(rows: usize, cols: usize) -> Self {
        HeuristicField {
            rows,
            cols,
            values: vec![NotNan::default(); rows * cols],
        }
    }

    /// Wrap a caller-computed row-major table. Values must be non-negative and not NaN.
    pub fn from_values(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, ConfigError> {
        if values.len() != rows * cols {
            return Err(ConfigError::ShapeMismatch {
                field_rows: values.len() / cols.max(1),
                field_cols: cols,
                rows,
                cols,
            });
        }

        let values = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| match NotNan::new(value) {
                Ok(v) if value >= 0.0 => Ok(v),
                _ => Err(ConfigError::InvalidHeuristic {
                    cell: Cell::new(i / cols, i % cols),
                    value,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HeuristicField { rows, cols, values })
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// h(cell), or None outside the field
    pub fn get(&self, cell: Cell) -> Option<f64> {
        self.estimate(cell).map(NotNan::into_inner)
    }

    #[inline]
    pub(crate) fn estimate(&self, cell: Cell) -> Option<NotNan<f64>> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        Some(self.values[cell.row * self.cols + cell.col])
    }
}
