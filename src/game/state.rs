use std::fmt;

use super::action::Direction;
use super::grid::Grid;
use super::layout::Layout;

/// A cell on the game grid, addressed as (row, column)
///
/// Coordinates are signed so that stepping off the top or left edge yields a
/// cell that simply fails the grid's bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cell one step away in a direction
    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Manhattan distance to another cell
    pub fn manhattan(&self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which side of the chase an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Evader,
    Pursuer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Evader => f.write_str("evader"),
            Role::Pursuer => f.write_str("pursuer"),
        }
    }
}

/// A moving piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub cell: Cell,
    /// Last direction the entity actually moved in
    pub facing: Option<Direction>,
}

impl Entity {
    pub fn new(cell: Cell) -> Self {
        Self { cell, facing: None }
    }

    /// Move to `cell`, recording the direction taken
    pub fn move_to(&mut self, cell: Cell, direction: Direction) {
        self.cell = cell;
        self.facing = Some(direction);
    }
}

/// How a session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    /// Every collectible was picked up
    Won,
    /// The pursuer reached the evader
    Caught,
}

/// Complete state of one chase
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub grid: Grid,
    pub evader: Entity,
    pub pursuer: Entity,
    pub score: u32,
    pub collectibles_remaining: usize,
    pub tick: u64,
    pub outcome: Outcome,
}

impl Session {
    /// Start a fresh session on a copy of the layout's grid
    pub fn new(layout: &Layout) -> Self {
        let grid = layout.grid().clone();
        let collectibles_remaining = grid.collectibles();

        let mut session = Self {
            grid,
            evader: Entity::new(layout.evader_spawn()),
            pursuer: Entity::new(layout.pursuer_spawn()),
            score: 0,
            collectibles_remaining,
            tick: 0,
            outcome: Outcome::Ongoing,
        };

        if session.collectibles_remaining == 0 {
            session.outcome = Outcome::Won;
        }
        session.check_capture();

        session
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Ongoing
    }

    /// Mark the session caught if both entities share a cell
    ///
    /// Returns true when this call ended the session.
    pub fn check_capture(&mut self) -> bool {
        if self.outcome == Outcome::Ongoing && self.evader.cell == self.pursuer.cell {
            self.outcome = Outcome::Caught;
            return true;
        }
        false
    }
}
