//! Single-source, single-goal grid search.
//!
//! [`search`] validates its inputs, seeds a fresh open and closed list, runs the generic
//! [`astar`](crate::astar::astar) kernel over the grid and reconstructs the path. All scratch
//! state belongs to one call, so the grid and heuristic field can be shared between searches
//! running on different threads.

use log::{debug, trace};
use ordered_float::NotNan;

use crate::astar::{self, AStarError, ClosedList, ClosedListState, OpenItem, OpenList};
use crate::error::{ConfigError, SearchError};
use crate::grid::{step_cost, Cell, Connectivity, OccupancyGrid};
use crate::heuristic::HeuristicField;
use crate::simpleclosed::SimpleClosed;
use crate::simpleopen::SimpleOpenList;

pub use crate::astar::SearchStats;

/// Outcome of a search. Failing to find a path is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// `path` runs from start to goal inclusive; `cost` is the sum of its step lengths
    Found { path: Vec<Cell>, cost: f64 },
    /// start and goal are disconnected, or one of them is blocked
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SearchResult::Found { path, .. } => Some(path),
            SearchResult::NotFound => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            SearchResult::Found { cost, .. } => Some(*cost),
            SearchResult::NotFound => None,
        }
    }
}

/// Find the cheapest path from `start` to `goal`.
///
/// # Errors
///
/// - `start` or `goal` outside the grid
/// - `heuristic` shaped differently from `grid`
pub fn search(
    grid: &OccupancyGrid,
    start: Cell,
    goal: Cell,
    heuristic: &HeuristicField,
    connectivity: Connectivity,
) -> Result<SearchResult, SearchError> {
    search_with_stats(grid, start, goal, heuristic, connectivity).map(|(result, _)| result)
}

/// [`search`], also returning the kernel's counters.
pub fn search_with_stats(
    grid: &OccupancyGrid,
    start: Cell,
    goal: Cell,
    heuristic: &HeuristicField,
    connectivity: Connectivity,
) -> Result<(SearchResult, SearchStats), SearchError> {
    trace!("search: start={start} goal={goal} connectivity={connectivity}");
    validate(grid, start, goal, heuristic)?;

    let mut stats = SearchStats::default();

    if !grid.is_free(start) || !grid.is_free(goal) {
        debug!("search: start {start} or goal {goal} is blocked, no path");
        return Ok((SearchResult::NotFound, stats));
    }

    let (rows, cols) = grid.shape();
    let mut open = SimpleOpenList::new();
    let mut closed: SimpleClosed<NotNan<f64>> = SimpleClosed::new(rows, cols);

    let estimate = |cell: &Cell| heuristic.estimate(*cell).unwrap_or_default();

    // Start things off
    open.push_open(OpenItem {
        heuristic: estimate(&start),
        node: start,
    });
    closed[start] = ClosedListState::StartingPoint(NotNan::default());

    let result = astar::astar(
        &mut open,
        &mut closed,
        &mut stats,
        |n| *n == goal,
        estimate,
        |n| grid.neighbours(*n, connectivity),
    );

    match result {
        Ok(reached) => {
            let cost = closed[reached]
                .cost()
                .ok_or(SearchError::Kernel(AStarError::OpenItemNotInClosedList))?
                .into_inner();
            let path = closed.unwind(reached);
            debug!(
                "search: found path of {} cells, cost {cost:.3}, {} expanded, {} stale",
                path.len(),
                stats.expanded,
                stats.stale
            );
            Ok((SearchResult::Found { path, cost }, stats))
        }
        Err(AStarError::PathNotFound) => {
            debug!("search: no path after {} expansions", stats.expanded);
            Ok((SearchResult::NotFound, stats))
        }
        Err(e) => Err(SearchError::Kernel(e)),
    }
}

fn validate(
    grid: &OccupancyGrid,
    start: Cell,
    goal: Cell,
    heuristic: &HeuristicField,
) -> Result<(), ConfigError> {
    let (rows, cols) = grid.shape();

    for (role, cell) in [("start", start), ("goal", goal)] {
        if !grid.contains(cell) {
            return Err(ConfigError::OutOfBounds { role, cell, rows, cols });
        }
    }

    let (field_rows, field_cols) = heuristic.shape();
    if (field_rows, field_cols) != (rows, cols) {
        return Err(ConfigError::ShapeMismatch { field_rows, field_cols, rows, cols });
    }

    Ok(())
}

/// Total straight-line length of a path, summing each consecutive step.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.windows(2)
        .map(|w| {
            let d_row = w[1].row as isize - w[0].row as isize;
            let d_col = w[1].col as isize - w[0].col as isize;
            step_cost(d_row, d_col).into_inner()
        })
        .sum()
}
