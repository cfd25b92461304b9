use super::state::Cell;

/// What occupies a grid cell, independent of any entity standing on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Wall,
    Empty,
    Collectible,
}

/// Fixed-size terrain map
///
/// Walls never change once the grid is built. Collectibles only ever turn
/// into `Empty`, so the cached collectible count can only go down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Terrain>,
    collectibles: usize,
}

impl Grid {
    /// Build a grid from rows of terrain, padding short rows with walls
    pub fn from_rows(rows: Vec<Vec<Terrain>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let row_count = rows.len();

        let mut tiles = Vec::with_capacity(row_count * cols);
        for mut row in rows {
            row.resize(cols, Terrain::Wall);
            tiles.extend(row);
        }

        let collectibles = tiles
            .iter()
            .filter(|tile| **tile == Terrain::Collectible)
            .count();

        Self {
            rows: row_count,
            cols,
            tiles,
            collectibles,
        }
    }

    /// Open grid of the given size with walls along the border only
    pub fn bordered(rows: usize, cols: usize) -> Self {
        let grid_rows = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        if r == 0 || c == 0 || r + 1 == rows || c + 1 == cols {
                            Terrain::Wall
                        } else {
                            Terrain::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        Self::from_rows(grid_rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of collectibles still on the grid
    pub fn collectibles(&self) -> usize {
        self.collectibles
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Terrain at a cell, or `None` when out of bounds
    pub fn terrain(&self, cell: Cell) -> Option<Terrain> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Every cell with its terrain, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Terrain)> + '_ {
        self.tiles.iter().enumerate().map(|(index, &terrain)| {
            let cell = Cell::new((index / self.cols) as i32, (index % self.cols) as i32);
            (cell, terrain)
        })
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        matches!(
            self.terrain(cell),
            Some(Terrain::Empty | Terrain::Collectible)
        )
    }

    /// Remove the collectible at `cell`, if there is one
    ///
    /// Returns true only when a collectible was actually taken.
    pub fn pick_up(&mut self, cell: Cell) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };

        if self.tiles[index] != Terrain::Collectible {
            return false;
        }

        self.tiles[index] = Terrain::Empty;
        self.collectibles -= 1;
        true
    }
}
