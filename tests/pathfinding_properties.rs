use std::collections::{HashMap, VecDeque};

use grid_pursuit::game::{Cell, Direction, Grid, Layout, Pathfinder, Terrain, find_path};
use proptest::prelude::*;

/// Breadth-first distance, used as ground truth for path length
fn bfs_distance(grid: &Grid, start: Cell, goal: Cell) -> Option<usize> {
    let mut distances = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        let distance = distances[&cell];
        if cell == goal {
            return Some(distance);
        }
        for direction in Direction::ALL {
            let next = cell.step(direction);
            if grid.is_passable(next) && !distances.contains_key(&next) {
                distances.insert(next, distance + 1);
                queue.push_back(next);
            }
        }
    }

    None
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (2usize..9, 2usize..9).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::bool::weighted(0.3), rows * cols).prop_map(move |walls| {
            let tiles = walls
                .chunks(cols)
                .map(|row| {
                    row.iter()
                        .map(|&wall| if wall { Terrain::Wall } else { Terrain::Empty })
                        .collect()
                })
                .collect();
            Grid::from_rows(tiles)
        })
    })
}

fn passable_cells(grid: &Grid) -> Vec<Cell> {
    grid.cells()
        .filter(|&(_, terrain)| terrain != Terrain::Wall)
        .map(|(cell, _)| cell)
        .collect()
}

proptest! {
    #[test]
    fn path_length_matches_breadth_first_search(
        grid in grid_strategy(),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let open = passable_cells(&grid);
        prop_assume!(!open.is_empty());

        let start = open[picks.0.index(open.len())];
        let goal = open[picks.1.index(open.len())];

        let path = find_path(start, goal, |cell| grid.is_passable(cell));

        match bfs_distance(&grid, start, goal) {
            Some(distance) => prop_assert_eq!(path.len(), distance),
            None => prop_assert!(path.is_empty()),
        }
    }

    #[test]
    fn path_is_a_chain_of_open_neighbours(
        grid in grid_strategy(),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let open = passable_cells(&grid);
        prop_assume!(!open.is_empty());

        let start = open[picks.0.index(open.len())];
        let goal = open[picks.1.index(open.len())];

        let path = find_path(start, goal, |cell| grid.is_passable(cell));

        if let Some(&last) = path.last() {
            prop_assert_eq!(last, goal);
        }
        prop_assert!(!path.contains(&start));

        let mut previous = start;
        for &cell in &path {
            prop_assert_eq!(previous.manhattan(cell), 1);
            prop_assert!(grid.is_passable(cell));
            previous = cell;
        }
    }

    #[test]
    fn repeated_search_gives_the_same_path(
        grid in grid_strategy(),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let open = passable_cells(&grid);
        prop_assume!(!open.is_empty());

        let start = open[picks.0.index(open.len())];
        let goal = open[picks.1.index(open.len())];

        let mut pathfinder = Pathfinder::new();
        let first = pathfinder.find_path(start, goal, |cell| grid.is_passable(cell));
        let second = pathfinder.find_path(start, goal, |cell| grid.is_passable(cell));

        prop_assert_eq!(first, second);
    }
}

#[test]
fn wall_partition_leaves_no_path() {
    let mut rows: Vec<Vec<Terrain>> = (0..5).map(|_| vec![Terrain::Empty; 7]).collect();
    for row in &mut rows {
        row[3] = Terrain::Wall;
    }
    let grid = Grid::from_rows(rows);

    let path = find_path(Cell::new(0, 0), Cell::new(4, 6), |cell| grid.is_passable(cell));

    assert!(path.is_empty());
}

#[test]
fn detour_is_as_long_as_the_walk_around() {
    let grid = Grid::from_rows(vec![
        vec![Terrain::Empty; 5],
        vec![Terrain::Empty, Terrain::Wall, Terrain::Wall, Terrain::Wall, Terrain::Empty],
        vec![Terrain::Empty; 5],
    ]);

    let start = Cell::new(2, 2);
    let goal = Cell::new(0, 2);
    let path = find_path(start, goal, |cell| grid.is_passable(cell));

    assert_eq!(path.len(), 6);
    assert_eq!(path.last(), Some(&goal));
}

#[test]
fn every_builtin_collectible_is_reachable() {
    let layout = Layout::builtin().unwrap();
    let grid = layout.grid();
    let spawn = layout.evader_spawn();

    let unreachable: Vec<Cell> = grid
        .cells()
        .filter(|&(_, terrain)| terrain == Terrain::Collectible)
        .map(|(cell, _)| cell)
        .filter(|&cell| find_path(spawn, cell, |step| grid.is_passable(step)).is_empty())
        .collect();

    assert!(unreachable.is_empty(), "sealed collectibles: {unreachable:?}");
}
