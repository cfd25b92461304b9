//! A* search over the 4-connected grid
//!
//! Every edge costs one step and the heuristic is Manhattan distance, which
//! never overestimates on a 4-connected grid and is consistent, so the first
//! time the goal leaves the frontier its path is a shortest one.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use super::action::Direction;
use super::state::Cell;

/// Frontier entry
///
/// Ordering looks only at `key`: the f-score first, then the insertion
/// sequence so equal f-scores come out first-in first-out. `BinaryHeap` is a
/// max-heap, hence the `Reverse`.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    key: Reverse<(u32, u64)>,
    cell: Cell,
    g_score: u32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Reusable A* search state
///
/// Holding on to a `Pathfinder` keeps its maps allocated between searches,
/// which matters when a path is recomputed every tick.
#[derive(Debug, Default)]
pub struct Pathfinder {
    open: BinaryHeap<OpenNode>,
    g_scores: HashMap<Cell, u32>,
    came_from: HashMap<Cell, Cell>,
    next_seq: u64,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.open.clear();
        self.g_scores.clear();
        self.came_from.clear();
        self.next_seq = 0;
    }

    fn push(&mut self, cell: Cell, g_score: u32, f_score: u32) {
        self.open.push(OpenNode {
            key: Reverse((f_score, self.next_seq)),
            cell,
            g_score,
        });
        self.next_seq += 1;
    }

    /// Shortest path from `start` to `goal`
    ///
    /// The returned cells exclude `start` and end with `goal`. An empty path
    /// means the goal is unreachable, or that `start == goal`. Only neighbours
    /// are checked against `is_passable`; the start cell never is.
    pub fn find_path<F>(&mut self, start: Cell, goal: Cell, mut is_passable: F) -> Vec<Cell>
    where
        F: FnMut(Cell) -> bool,
    {
        self.reset();

        if start == goal {
            return Vec::new();
        }

        self.g_scores.insert(start, 0);
        self.push(start, 0, start.manhattan(goal));

        while let Some(node) = self.open.pop() {
            let current = node.cell;

            if current == goal {
                return self.reconstruct(goal);
            }

            // A cheaper route to this cell was queued after this entry
            if self
                .g_scores
                .get(&current)
                .is_some_and(|&best| node.g_score > best)
            {
                continue;
            }

            let tentative = node.g_score + 1;

            for direction in Direction::ALL {
                let neighbour = current.step(direction);

                if !is_passable(neighbour) {
                    continue;
                }

                if self
                    .g_scores
                    .get(&neighbour)
                    .is_some_and(|&known| known <= tentative)
                {
                    continue;
                }

                self.g_scores.insert(neighbour, tentative);
                self.came_from.insert(neighbour, current);
                self.push(neighbour, tentative, tentative + neighbour.manhattan(goal));
            }
        }

        Vec::new()
    }

    fn reconstruct(&self, goal: Cell) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut current = goal;

        while let Some(&parent) = self.came_from.get(&current) {
            path.push(current);
            current = parent;
        }

        path.reverse();
        path
    }
}

/// One-off search with a fresh [`Pathfinder`]
pub fn find_path<F>(start: Cell, goal: Cell, is_passable: F) -> Vec<Cell>
where
    F: FnMut(Cell) -> bool,
{
    Pathfinder::new().find_path(start, goal, is_passable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;
    use crate::game::layout::Layout;

    fn assert_contiguous(start: Cell, path: &[Cell]) {
        let mut previous = start;
        for &cell in path {
            assert_eq!(previous.manhattan(cell), 1, "{previous} -> {cell}");
            previous = cell;
        }
    }

    #[test]
    fn test_straight_line() {
        let grid = Grid::bordered(3, 7);
        let path = find_path(Cell::new(1, 1), Cell::new(1, 5), |c| grid.is_passable(c));

        assert_eq!(
            path,
            vec![
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(1, 4),
                Cell::new(1, 5)
            ]
        );
    }

    #[test]
    fn test_open_grid_path_is_manhattan_length() {
        let grid = Grid::bordered(5, 5);
        let start = Cell::new(3, 3);
        let goal = Cell::new(1, 1);
        let path = find_path(start, goal, |c| grid.is_passable(c));

        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&goal));
        assert_contiguous(start, &path);
    }

    #[test]
    fn test_routes_around_walls() {
        let layout = Layout::parse(
            "\
#######
#R.#..#
#..#..#
#.....#
#####C#
#######",
        )
        .unwrap();
        let grid = layout.grid();

        let start = Cell::new(1, 1);
        let goal = Cell::new(1, 5);
        let path = find_path(start, goal, |c| grid.is_passable(c));

        // Down two, across four, up two
        assert_eq!(path.len(), 8);
        assert_eq!(path.last(), Some(&goal));
        assert_contiguous(start, &path);
        assert!(path.iter().all(|&c| grid.is_passable(c)));
    }

    #[test]
    fn test_unreachable_goal() {
        let layout = Layout::parse(
            "\
#######
#R.#..#
#..#.C#
#######",
        )
        .unwrap();
        let grid = layout.grid();

        let path = find_path(Cell::new(1, 1), Cell::new(2, 5), |c| grid.is_passable(c));
        assert!(path.is_empty());
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::bordered(4, 4);
        let path = find_path(Cell::new(1, 1), Cell::new(1, 1), |c| grid.is_passable(c));
        assert!(path.is_empty());
    }

    #[test]
    fn test_adjacent_goal() {
        let grid = Grid::bordered(4, 4);
        let path = find_path(Cell::new(1, 1), Cell::new(2, 1), |c| grid.is_passable(c));
        assert_eq!(path, vec![Cell::new(2, 1)]);
    }

    #[test]
    fn test_wall_goal_is_unreachable() {
        let grid = Grid::bordered(4, 4);
        let path = find_path(Cell::new(1, 1), Cell::new(0, 1), |c| grid.is_passable(c));
        assert!(path.is_empty());
    }

    #[test]
    fn test_reused_pathfinder_gives_same_length() {
        let grid = Layout::builtin().unwrap().grid().clone();
        let mut pathfinder = Pathfinder::new();
        let start = Cell::new(17, 33);
        let goal = Cell::new(1, 1);

        let first = pathfinder.find_path(start, goal, |c| grid.is_passable(c));
        let second = pathfinder.find_path(start, goal, |c| grid.is_passable(c));

        assert!(!first.is_empty());
        assert_eq!(first.len(), second.len());
        assert_contiguous(start, &first);
    }

    #[test]
    fn test_frontier_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        let cell = Cell::new(0, 0);
        for (f, seq) in [(5, 0), (3, 1), (3, 2), (4, 3)] {
            heap.push(OpenNode {
                key: Reverse((f, seq)),
                cell,
                g_score: 0,
            });
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|node| node.key.0)
            .collect();
        assert_eq!(order, vec![(3, 1), (3, 2), (4, 3), (5, 0)]);
    }
}
