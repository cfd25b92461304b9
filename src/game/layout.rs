//! Text maps and spawn points
//!
//! A layout is plain text, one line per grid row:
//!
//! - `#` wall
//! - `o` collectible
//! - space or `.` empty floor
//! - `R` evader spawn (empty floor)
//! - `C` pursuer spawn (empty floor)
//!
//! Blank lines are skipped and short rows are padded with walls.

use thiserror::Error;

use super::grid::{Grid, Terrain};
use super::state::{Cell, Role};

/// The default cops-and-robbers maze
pub const BUILTIN_LAYOUT: &str = "\
#####################################
#R o o o o o o o o o o o o o o o o o#
#o ########### #o# # #############o#
#  #         # #o# # #           # #
#o # ####### # # #o# # ########### #
#  # #     # # # # #o# #         #o#
#o # # ### # # # ### # # ####### # #
#  # # # # # # # #   # #o#     # # #
#o # # # #o# # #o### # # # ### #o#o#
#  # # # # # # # # # # # # # # # #o#
#  ### # # # #o# # # # # # # ### #o#
#o o o # #o# # # # # # #o# # #   # #
# # #o# #o# # #o# #o# # # # # #o#o#
# # # #o#o# # # # # # # #o# # # # #
# #o# # # #o# # # # # # # #o# # # #
# # # # # # # # # # # # # # # # #o#
# # # # # #o# # # # # # # # # # # #
#o o o o o o o o o o o o o o o o C o#
#####################################
";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },

    #[error("layout has no {0} spawn marker")]
    MissingSpawn(Role),

    #[error("layout has more than one {0} spawn marker")]
    DuplicateSpawn(Role),

    #[error("{role} spawn {cell} is not passable")]
    BlockedSpawn { role: Role, cell: Cell },

    #[error("evader and pursuer both spawn at {0}")]
    SharedSpawn(Cell),
}

/// A grid together with the two spawn cells
///
/// Construction guarantees both spawns are distinct passable cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: Grid,
    evader_spawn: Cell,
    pursuer_spawn: Cell,
}

impl Layout {
    pub fn new(grid: Grid, evader_spawn: Cell, pursuer_spawn: Cell) -> Result<Self, LayoutError> {
        for (role, cell) in [(Role::Evader, evader_spawn), (Role::Pursuer, pursuer_spawn)] {
            if !grid.is_passable(cell) {
                return Err(LayoutError::BlockedSpawn { role, cell });
            }
        }

        if evader_spawn == pursuer_spawn {
            return Err(LayoutError::SharedSpawn(evader_spawn));
        }

        Ok(Self {
            grid,
            evader_spawn,
            pursuer_spawn,
        })
    }

    /// Parse a text layout
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut rows = Vec::new();
        let mut evader = None;
        let mut pursuer = None;

        for line in text.lines().filter(|line| !line.is_empty()) {
            let row = rows.len();
            let mut terrain = Vec::with_capacity(line.len());

            for (col, glyph) in line.chars().enumerate() {
                let tile = match glyph {
                    '#' => Terrain::Wall,
                    'o' => Terrain::Collectible,
                    ' ' | '.' => Terrain::Empty,
                    'R' => {
                        place_spawn(&mut evader, Role::Evader, row, col)?;
                        Terrain::Empty
                    }
                    'C' => {
                        place_spawn(&mut pursuer, Role::Pursuer, row, col)?;
                        Terrain::Empty
                    }
                    _ => return Err(LayoutError::UnknownGlyph { glyph, row, col }),
                };
                terrain.push(tile);
            }

            rows.push(terrain);
        }

        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let evader = evader.ok_or(LayoutError::MissingSpawn(Role::Evader))?;
        let pursuer = pursuer.ok_or(LayoutError::MissingSpawn(Role::Pursuer))?;

        Self::new(Grid::from_rows(rows), evader, pursuer)
    }

    /// The built-in maze
    pub fn builtin() -> Result<Self, LayoutError> {
        Self::parse(BUILTIN_LAYOUT)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn evader_spawn(&self) -> Cell {
        self.evader_spawn
    }

    pub fn pursuer_spawn(&self) -> Cell {
        self.pursuer_spawn
    }
}

fn place_spawn(
    slot: &mut Option<Cell>,
    role: Role,
    row: usize,
    col: usize,
) -> Result<(), LayoutError> {
    if slot.is_some() {
        return Err(LayoutError::DuplicateSpawn(role));
    }
    // Rows and columns come from enumerating a string, well within i32
    *slot = Some(Cell::new(row as i32, col as i32));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_layout() {
        let layout = Layout::builtin().unwrap();

        assert_eq!(layout.grid().rows(), 19);
        assert_eq!(layout.grid().cols(), 37);
        assert_eq!(layout.evader_spawn(), Cell::new(1, 1));
        assert_eq!(layout.pursuer_spawn(), Cell::new(17, 33));
        assert_eq!(layout.grid().collectibles(), 71);
    }

    #[test]
    fn test_parse_small_layout() {
        let layout = Layout::parse("#####\n#R.o#\n# C #\n#####").unwrap();

        assert_eq!(layout.grid().rows(), 4);
        assert_eq!(layout.grid().cols(), 5);
        assert_eq!(layout.evader_spawn(), Cell::new(1, 1));
        assert_eq!(layout.pursuer_spawn(), Cell::new(2, 2));
        assert_eq!(
            layout.grid().terrain(Cell::new(1, 3)),
            Some(Terrain::Collectible)
        );
        assert_eq!(layout.grid().terrain(Cell::new(1, 1)), Some(Terrain::Empty));
        assert_eq!(layout.grid().terrain(Cell::new(2, 1)), Some(Terrain::Empty));
    }

    #[test]
    fn test_short_rows_padded_and_blank_lines_skipped() {
        let layout = Layout::parse("\n#####\n#RC\n\n#####\n").unwrap();

        assert_eq!(layout.grid().rows(), 3);
        assert_eq!(layout.grid().terrain(Cell::new(1, 4)), Some(Terrain::Wall));
    }

    #[test]
    fn test_crlf_line_endings() {
        let layout = Layout::parse("####\r\n#RC#\r\n####\r\n").unwrap();
        assert_eq!(layout.grid().cols(), 4);
    }

    #[test]
    fn test_unknown_glyph() {
        let err = Layout::parse("####\n#RX#\n#C #").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownGlyph {
                glyph: 'X',
                row: 1,
                col: 2
            }
        );
    }

    #[test]
    fn test_missing_spawns() {
        assert_eq!(
            Layout::parse("####\n# C#\n####").unwrap_err(),
            LayoutError::MissingSpawn(Role::Evader)
        );
        assert_eq!(
            Layout::parse("####\n#R #\n####").unwrap_err(),
            LayoutError::MissingSpawn(Role::Pursuer)
        );
    }

    #[test]
    fn test_duplicate_spawn() {
        assert_eq!(
            Layout::parse("#####\n#RCR#\n#####").unwrap_err(),
            LayoutError::DuplicateSpawn(Role::Evader)
        );
    }

    #[test]
    fn test_empty_layout() {
        assert_eq!(Layout::parse("").unwrap_err(), LayoutError::Empty);
        assert_eq!(Layout::parse("\n\n").unwrap_err(), LayoutError::Empty);
    }

    #[test]
    fn test_new_rejects_bad_spawns() {
        let grid = Grid::bordered(4, 4);

        assert_eq!(
            Layout::new(grid.clone(), Cell::new(0, 0), Cell::new(1, 1)).unwrap_err(),
            LayoutError::BlockedSpawn {
                role: Role::Evader,
                cell: Cell::new(0, 0)
            }
        );
        assert_eq!(
            Layout::new(grid.clone(), Cell::new(1, 1), Cell::new(1, 1)).unwrap_err(),
            LayoutError::SharedSpawn(Cell::new(1, 1))
        );
        assert!(Layout::new(grid, Cell::new(1, 1), Cell::new(2, 2)).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LayoutError::MissingSpawn(Role::Pursuer).to_string(),
            "layout has no pursuer spawn marker"
        );
        assert_eq!(
            LayoutError::BlockedSpawn {
                role: Role::Evader,
                cell: Cell::new(0, 3)
            }
            .to_string(),
            "evader spawn (0, 3) is not passable"
        );
    }
}
