//! Grid A* path planning
//!
//! Shortest paths across a 2D occupancy grid using A*, guided by a precomputed heuristic field.
//! The search kernel in [`astar`] is generic and relies on implementations of an open list
//! and a closed list to work; `simpleopen` and `simpleclosed` are the minimal ones used for
//! grids. [`planner::search`] is the entry point that wires them together over an
//! [`grid::OccupancyGrid`] and a [`heuristic::HeuristicField`].
//!
//! Costs are `NotNan<f64>` so that they satisfy `Ord`: cardinal steps cost 1 and diagonal steps
//! sqrt(2), whichever heuristic metric is in use.

pub mod astar;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod planner;
pub mod report;
pub mod scenario;
pub(crate) mod simpleclosed;
pub(crate) mod simpleopen;

pub use error::{ConfigError, GridError, SearchError};
pub use grid::{Cell, Connectivity, Occupancy, OccupancyGrid};
pub use heuristic::{HeuristicField, Metric};
pub use planner::{path_cost, search, search_with_stats, SearchResult, SearchStats};
