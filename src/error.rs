//! Error types for grid construction and search configuration.
//!
//! A search that finds no path is not an error; see [`crate::planner::SearchResult::NotFound`].

use crate::astar::AStarError;
use crate::grid::Cell;

/// Malformed search configuration, rejected before any search work is done.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("connectivity {0} must be 4 or 8")]
    InvalidConnectivity(u8),

    #[error("unknown heuristic metric: {0}")]
    UnknownMetric(String),

    #[error("{role} cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// "start" or "goal"
        role: &'static str,
        cell: Cell,
        rows: usize,
        cols: usize,
    },

    #[error("heuristic field is {field_rows}x{field_cols} but the grid is {rows}x{cols}")]
    ShapeMismatch {
        field_rows: usize,
        field_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("heuristic value {value} at {cell} must be a non-negative number")]
    InvalidHeuristic { cell: Cell, value: f64 },
}

/// Failures building an [`crate::grid::OccupancyGrid`] from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map symbol {symbol:?} at row {row}, col {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("a {rows}x{cols} grid has more cells than can be addressed")]
    TooLarge { rows: usize, cols: usize },

    #[error("luminance buffer holds {found} bytes, expected {expected}")]
    BufferSize { expected: usize, found: usize },
}

/// Everything `planner::search` can fail with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("search state corrupted: {0}")]
    Kernel(AStarError),
}
