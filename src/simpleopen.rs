use crate::astar;
use std::collections::binary_heap::BinaryHeap;

/// SimpleOpenList is a simplistic implementation of an astar::OpenList
/// It uses a BinaryHeap to implement a priority queue, and does not check for the presence
/// of an existing OpenItem entry for the same Node. An improved path just pushes another entry,
/// and the superseded one is dropped by the search when it is eventually popped, which keeps
/// each update at O(log n) instead of a scan and re-heapify of the queue.
pub struct SimpleOpenList<N, Cost: Ord> {
    ordering: BinaryHeap<astar::OpenItem<N, Cost>>,
}

impl<N, Cost: Ord> SimpleOpenList<N, Cost>
where
    astar::OpenItem<N, Cost>: Ord,
{
    pub fn new() -> Self {
        Self {
            ordering: BinaryHeap::new(),
        }
    }
}

impl<N, Cost: Ord> Default for SimpleOpenList<N, Cost>
where
    astar::OpenItem<N, Cost>: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, Cost: Ord> astar::OpenList<astar::OpenItem<N, Cost>> for SimpleOpenList<N, Cost>
where
    astar::OpenItem<N, Cost>: Ord,
{
    fn len(&self) -> usize {
        self.ordering.len()
    }

    fn push_open(&mut self, e: astar::OpenItem<N, Cost>) {
        self.ordering.push(e);
    }

    fn pop_min(&mut self) -> Option<astar::OpenItem<N, Cost>> {
        self.ordering.pop()
    }
}
