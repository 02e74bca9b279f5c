//! This implementation of A* is generic over the node, the cost and the open/closed list
//! implementations. In practice it runs over grid cells with `NotNan<f64>` costs, driven by
//! `planner::search`.
use std::cmp::Ordering;
use crate::astar::AStarError::*;
use crate::astar::ClosedListState::*;

/// OpenList is a general trait to allow templating of a priority queue implementation for the
/// AStar algorithm.
pub trait OpenList<Element> {
    fn len(&self) -> usize;
    fn push_open(&mut self, e: Element);
    fn pop_min(&mut self) -> Option<Element>;
}

/// OpenItem is an item in the OpenList.
/// It needs to implement Ord so that it is sortable / ordered
/// Additionally, in the implementation of ordering for BinaryHeap, it must reverse the Ordering
///
/// `heuristic` holds the estimated total cost (g + h) of reaching the goal through `node`.
#[derive(Debug, Clone)]
pub struct OpenItem<Node, Cost> {
    pub heuristic: Cost,
    pub node: Node,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClosedListState<Node, Cost> {
    /// Unvisited is the expected starting state of most nodes, allowing them to be explored
    Unvisited,
    /// StartingPoint is the origin of the search, reached at the given cost (normally zero)
    StartingPoint(Cost),
    /// PathFrom records the cheapest known predecessor and the cost of reaching the node through it
    PathFrom(Node, Cost)
}

impl<Node, Cost: Copy> ClosedListState<Node, Cost> {
    /// The best known cost from the start, if the node has been reached at all
    pub fn cost(&self) -> Option<Cost> {
        match self {
            Unvisited => None,
            StartingPoint(c) => Some(*c),
            PathFrom(_, c) => Some(*c),
        }
    }
}

/// ClosedList holds the per-node search state: best known cost, parent pointer, and whether the
/// node has been finalized (expanded with its optimal cost).
pub trait ClosedList<Node: Copy + Clone, Cost>: std::ops::IndexMut<Node, Output = ClosedListState<Node, Cost>>{
    fn is_finalized(&self, node: Node) -> bool;
    fn finalize(&mut self, node: Node);

    /// Walk the parent pointers back from `node` to the starting point and return the path in
    /// start-to-node order.
    fn unwind(&self, node: Node) -> Vec<Node> {
        let mut r = node;
        let mut path: Vec<Node> = vec![r];

        while let PathFrom(last, _) = &self[r] {
            path.push(*last);
            r = *last;
        }

        path.reverse();
        path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AStarError {
    #[error("a node was popped from the open list without an entry in the closed list")]
    OpenItemNotInClosedList,
    #[error("open list exhausted without reaching the goal")]
    PathNotFound
}

/// Counters collected while the search runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// nodes finalized and expanded
    pub expanded: usize,
    /// entries pushed onto the open list, including the seed(s)
    pub pushed: usize,
    /// superseded entries discarded on pop
    pub stale: usize,
}

/// astar implements A* over a number of trait bounds and using mostly things managed outside of it
/// This uses a number of trait bounds on things like Cost to be generic over integers / floats
///
/// The open list must be seeded with the starting node(s), each also recorded as a
/// `StartingPoint` in the closed list. Improved paths push a fresh entry rather than updating
/// the old one in place; the superseded entries are skipped when popped since their node has
/// already been finalized. With a consistent heuristic a finalized node is never reopened.
pub fn astar<
    Node: Copy,
    Open: OpenList<OpenItem<Node, Cost>>,
    Closed: ClosedList<Node, Cost>,
    Cost: Ord + Copy + std::ops::Add<Output=Cost>,
    IsGoalFn: Fn(&Node) -> bool,
    HeuristicFn: Fn(&Node) -> Cost,
    Neighbours: IntoIterator<Item = (Cost, Node)>,
    GetNeighboursFn: Fn(&Node) -> Neighbours,
>(
    openlist: &mut Open,
    closed: &mut Closed,
    stats: &mut SearchStats,
    is_goal: IsGoalFn,
    heuristic: HeuristicFn,
    neighbours: GetNeighboursFn,
) -> Result<Node, AStarError>
{
    stats.pushed += openlist.len();

    while let Some(item) = openlist.pop_min() {
        let current_node = item.node;

        // A cheaper entry for this node was already popped
        if closed.is_finalized(current_node) {
            stats.stale += 1;
            continue;
        }

        let current_cost = closed[current_node].cost().ok_or(OpenItemNotInClosedList)?;

        if is_goal(&current_node) {
            return Ok(current_node);
        }

        closed.finalize(current_node);
        stats.expanded += 1;

        for (neighbour_cost, neighbour) in neighbours(&current_node) {
            if closed.is_finalized(neighbour) {
                continue;
            }

            let potential_path_cost = current_cost + neighbour_cost;

            match closed[neighbour] {
                PathFrom(_, existing_cost) | StartingPoint(existing_cost) if existing_cost <= potential_path_cost => continue,
                _ => (),
            };

            // Set the cost of the neighbour to the total cost, and the origin as the current node
            closed[neighbour] = PathFrom(current_node, potential_path_cost);

            // Add the neighbour to the openlist to be explored when it is the lowest total estimated distance
            openlist.push_open(OpenItem {
                heuristic: potential_path_cost + heuristic(&neighbour),
                node: neighbour,
            });
            stats.pushed += 1;
        }
    }

    Err(PathNotFound)
}

// Equality and ordering both consider (heuristic, node) so that Ord stays consistent with Eq,
// and so that equal estimates pop in node order.
impl<Node: Eq, Cost: Eq> Eq for OpenItem<Node, Cost> {}

impl<Node: Eq, Cost: Eq> PartialEq for OpenItem<Node, Cost> {
    fn eq(&self, other: &Self) -> bool {
        self.heuristic == other.heuristic && self.node == other.node
    }
}

impl<Node: Ord, Cost: Ord> Ord for OpenItem<Node, Cost> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.heuristic
            .cmp(&other.heuristic)
            .then_with(|| self.node.cmp(&other.node))
            .reverse() // reverse the ordering so that a priority queue is min first
    }
}

impl<Node: Ord, Cost: Ord> PartialOrd for OpenItem<Node, Cost> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;
    use std::ops::{Index, IndexMut};

    /// Plain Vec-backed closed list over usize nodes for exercising the kernel on small graphs
    struct VecClosed {
        states: Vec<ClosedListState<usize, u32>>,
        finalized: Vec<bool>,
    }

    impl VecClosed {
        fn new(n: usize) -> Self {
            VecClosed { states: vec![Unvisited; n], finalized: vec![false; n] }
        }
    }

    impl Index<usize> for VecClosed {
        type Output = ClosedListState<usize, u32>;
        fn index(&self, index: usize) -> &Self::Output {
            &self.states[index]
        }
    }

    impl IndexMut<usize> for VecClosed {
        fn index_mut(&mut self, index: usize) -> &mut Self::Output {
            &mut self.states[index]
        }
    }

    impl ClosedList<usize, u32> for VecClosed {
        fn is_finalized(&self, node: usize) -> bool {
            self.finalized[node]
        }
        fn finalize(&mut self, node: usize) {
            self.finalized[node] = true;
        }
    }

    struct HeapOpen(BinaryHeap<OpenItem<usize, u32>>);

    impl OpenList<OpenItem<usize, u32>> for HeapOpen {
        fn len(&self) -> usize {
            self.0.len()
        }
        fn push_open(&mut self, e: OpenItem<usize, u32>) {
            self.0.push(e)
        }
        fn pop_min(&mut self) -> Option<OpenItem<usize, u32>> {
            self.0.pop()
        }
    }

    fn run(edges: &[Vec<(u32, usize)>], start: usize, goal: usize) -> (Result<usize, AStarError>, VecClosed, SearchStats) {
        let mut open = HeapOpen(BinaryHeap::new());
        let mut closed = VecClosed::new(edges.len());
        let mut stats = SearchStats::default();
        open.push_open(OpenItem { heuristic: 0, node: start });
        closed[start] = StartingPoint(0);
        let r = astar(
            &mut open,
            &mut closed,
            &mut stats,
            |n| *n == goal,
            |_| 0,
            |n| edges[*n].clone(),
        );
        (r, closed, stats)
    }

    #[test]
    fn open_item_pops_lowest_estimate_then_lowest_node() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenItem { heuristic: 5, node: 1 });
        heap.push(OpenItem { heuristic: 3, node: 9 });
        heap.push(OpenItem { heuristic: 3, node: 2 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|i| (i.heuristic, i.node)).collect();
        assert_eq!(order, vec![(3, 2), (3, 9), (5, 1)]);
    }

    #[test]
    fn takes_cheaper_detour_over_direct_edge() {
        // 0 -> 2 costs 10 directly, or 2 via node 1
        let edges = vec![vec![(10, 2), (1, 1)], vec![(1, 2)], vec![]];
        let (r, closed, stats) = run(&edges, 0, 2);
        assert_eq!(r, Ok(2));
        assert_eq!(closed[2], PathFrom(1, 2));
        assert_eq!(closed.unwind(2), vec![0, 1, 2]);
        // the direct entry for node 2 was superseded but never popped before the goal
        assert_eq!(stats.pushed, 4);
        assert_eq!(stats.expanded, 2);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // node 3 is first reached expensively through 0, then cheaply through 1, 2
        let edges = vec![
            vec![(1, 1), (9, 3)],
            vec![(1, 2)],
            vec![(1, 3)],
            vec![(1, 4)],
            vec![(20, 5)],
            vec![],
        ];
        let (r, closed, stats) = run(&edges, 0, 5);
        assert_eq!(r, Ok(5));
        assert_eq!(closed[5].cost(), Some(24));
        assert_eq!(stats.stale, 1);
    }

    #[test]
    fn disconnected_goal_is_not_found() {
        let edges = vec![vec![(1, 1)], vec![(1, 0)], vec![]];
        let (r, _, stats) = run(&edges, 0, 2);
        assert_eq!(r, Err(PathNotFound));
        assert_eq!(stats.expanded, 2);
    }

    #[test]
    fn unseeded_closed_list_is_reported() {
        let mut open = HeapOpen(BinaryHeap::new());
        let mut closed = VecClosed::new(2);
        let mut stats = SearchStats::default();
        open.push_open(OpenItem { heuristic: 0, node: 0 });
        let r = astar(&mut open, &mut closed, &mut stats, |n| *n == 1, |_| 0, |_| Vec::new());
        assert_eq!(r, Err(OpenItemNotInClosedList));
    }

    #[test]
    fn unwind_of_starting_point_is_single_node() {
        let mut closed = VecClosed::new(1);
        closed[0] = StartingPoint(0);
        assert_eq!(closed.unwind(0), vec![0]);
    }
}
