use ordered_float::NotNan;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ConfigError, GridError};

/// 8-connectivity moves, clockwise from east. The first, third, fifth and seventh entries are
/// the cardinal moves used for 4-connectivity.
const MOVES: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const CARDINAL_MOVES: [(isize, isize); 4] = [MOVES[0], MOVES[2], MOVES[4], MOVES[6]];

/// Cell is a (row, col) position in a grid, 0-indexed from the top left.
/// It is the node identity used by the search: ordering is by row, then col, which is also the
/// tie-break order for frontier entries with equal estimates.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash, serde::Deserialize)]
#[serde(from = "[usize; 2]")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// The cell displaced by (d_row, d_col), or None if that would leave the non-negative quadrant
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Cell> {
        Some(Cell {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// true if `other` is exactly one move away under `connectivity`
    pub fn is_adjacent(self, other: Cell, connectivity: Connectivity) -> bool {
        let d_row = self.row.abs_diff(other.row);
        let d_col = self.col.abs_diff(other.col);
        match connectivity {
            Connectivity::Four => d_row + d_col == 1,
            Connectivity::Eight => d_row.max(d_col) == 1,
        }
    }
}

impl From<[usize; 2]> for Cell {
    fn from([row, col]: [usize; 2]) -> Self {
        Cell { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Connectivity selects the move set used when expanding a cell.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, serde::Deserialize)]
#[serde(try_from = "u8")]
pub enum Connectivity {
    /// the four axis-aligned unit steps
    Four,
    /// the axis-aligned steps plus the four diagonals
    Eight,
}

impl Connectivity {
    pub fn moves(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &CARDINAL_MOVES,
            Connectivity::Eight => &MOVES,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(ConfigError::InvalidConnectivity(other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(value: Connectivity) -> Self {
        match value {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Straight-line length of a single move: 1 for cardinal steps, sqrt(2) for diagonals.
#[inline]
pub fn step_cost(d_row: isize, d_col: isize) -> NotNan<f64> {
    let len = if d_row != 0 && d_col != 0 {
        std::f64::consts::SQRT_2
    } else {
        1.0
    };
    NotNan::new(len).unwrap_or_default()
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Occupancy {
    Free,
    Blocked,
}

impl Occupancy {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' | '0' => Some(Occupancy::Free),
            '#' | 'X' | '1' => Some(Occupancy::Blocked),
            _ => None,
        }
    }
}

/// OccupancyGrid is an immutable, row-major, rows x cols classification of free and blocked cells.
/// All lookups are bounds-checked; anything outside the grid reads as not free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Occupancy>,
}

impl OccupancyGrid {
    /// Build a grid from explicit rows, which must all have the same non-zero length.
    pub fn new(rows: Vec<Vec<Occupancy>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != cols {
                return Err(GridError::RaggedRow { row, expected: cols, found: r.len() });
            }
            cells.extend_from_slice(r);
        }

        Ok(OccupancyGrid { rows: rows.len(), cols, cells })
    }

    /// Build a grid from text rows: `.`, space or `0` is free, `#`, `X` or `1` is blocked.
    pub fn from_ascii<S: AsRef<str>>(lines: &[S]) -> Result<Self, GridError> {
        let rows = lines
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        Occupancy::from_symbol(symbol)
                            .ok_or(GridError::UnknownSymbol { row, col, symbol })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        OccupancyGrid::new(rows)
    }

    /// Binarise an 8-bit greyscale raster (row-major, `cols` pixels per row).
    /// Pixels brighter than half intensity are free space, everything else is an obstacle.
    pub fn from_luma(cols: usize, rows: usize, pixels: &[u8]) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::Empty);
        }
        let expected = cols
            .checked_mul(rows)
            .ok_or(GridError::TooLarge { rows, cols })?;
        if pixels.len() != expected {
            return Err(GridError::BufferSize { expected, found: pixels.len() });
        }

        let cells = pixels
            .iter()
            .map(|&p| {
                if f64::from(p) / 255.0 > 0.5 {
                    Occupancy::Free
                } else {
                    Occupancy::Blocked
                }
            })
            .collect();

        Ok(OccupancyGrid { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<Occupancy> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.cells[cell.row * self.cols + cell.col])
    }

    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.get(cell) == Some(Occupancy::Free)
    }

    /// Iterate over the in-bounds, free neighbours of `cell` with the cost of stepping to each.
    /// Diagonal steps only check the destination, so they may pass between two blocked
    /// cardinal neighbours.
    pub fn neighbours(
        &self,
        cell: Cell,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = (NotNan<f64>, Cell)> + '_ {
        connectivity.moves().iter().filter_map(move |&(d_row, d_col)| {
            let next = cell.offset(d_row, d_col)?;
            self.is_free(next).then(|| (step_cost(d_row, d_col), next))
        })
    }
}

impl FromStr for OccupancyGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        OccupancyGrid::from_ascii(&lines)
    }
}
