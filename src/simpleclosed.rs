use crate::astar::{ClosedList, ClosedListState};
use crate::grid::Cell;

/// SimpleClosed is a dense closed list covering every cell of a rows x cols grid.
/// It holds the best known cost and parent for each cell plus a finalized flag, and is created
/// fresh for each search.
pub struct SimpleClosed<Cost> {
    cols: usize,
    states: Vec<ClosedListState<Cell, Cost>>,
    finalized: Vec<bool>,
}

impl<Cost: Copy> SimpleClosed<Cost> {
    pub fn new(rows: usize, cols: usize) -> Self {
        SimpleClosed {
            cols,
            states: std::iter::repeat(ClosedListState::Unvisited).take(rows * cols).collect(),
            finalized: vec![false; rows * cols],
        }
    }
}

impl<Cost> SimpleClosed<Cost> {
    #[inline]
    fn offset(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }
}

// Indexing with a cell outside the grid the list was created for panics. The search only ever
// indexes cells the grid has already bounds-checked.
impl<Cost> std::ops::Index<Cell> for SimpleClosed<Cost> {
    type Output = ClosedListState<Cell, Cost>;

    fn index(&self, index: Cell) -> &Self::Output {
        &self.states[self.offset(index)]
    }
}

impl<Cost> std::ops::IndexMut<Cell> for SimpleClosed<Cost> {
    fn index_mut(&mut self, index: Cell) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.states[offset]
    }
}

impl<Cost> ClosedList<Cell, Cost> for SimpleClosed<Cost> {
    fn is_finalized(&self, node: Cell) -> bool {
        self.finalized[self.offset(node)]
    }

    fn finalize(&mut self, node: Cell) {
        let offset = self.offset(node);
        self.finalized[offset] = true;
    }
}
