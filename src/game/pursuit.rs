use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::ConfigError;
use super::pathfinder::Pathfinder;
use super::state::Session;

/// How often the pursuer acts: `moves` ticks out of every `window`
///
/// Keeping `moves` below `window` makes the pursuer slightly slower than the
/// evader, which is what makes escaping possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub moves: u32,
    pub window: u32,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            moves: 2,
            window: 3,
        }
    }
}

impl Cadence {
    pub fn new(moves: u32, window: u32) -> Result<Self, ConfigError> {
        let cadence = Self { moves, window };
        cadence.validate()?;
        Ok(cadence)
    }

    /// Pursuer acts on every tick
    pub fn every_tick() -> Self {
        Self {
            moves: 1,
            window: 1,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 || self.moves > self.window {
            return Err(ConfigError::InvalidCadence {
                moves: self.moves,
                window: self.window,
            });
        }
        Ok(())
    }

    /// Whether the pursuer acts on a 1-based tick
    ///
    /// The first `moves` ticks of each window are active and the rest are
    /// skipped, so 2-of-3 runs on ticks 1, 2, 4, 5, 7, ...
    pub fn is_active(&self, tick: u64) -> bool {
        if self.window == 0 {
            return false;
        }
        tick.checked_sub(1)
            .is_some_and(|index| index % u64::from(self.window) < u64::from(self.moves))
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.moves, self.window)
    }
}

impl FromStr for Cadence {
    type Err = ConfigError;

    /// Parse `<moves>/<window>`, e.g. `2/3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || ConfigError::CadenceSyntax(s.to_string());

        let (moves, window) = s.split_once('/').ok_or_else(syntax)?;
        let moves = moves.trim().parse().map_err(|_| syntax())?;
        let window = window.trim().parse().map_err(|_| syntax())?;

        Self::new(moves, window)
    }
}

/// Chases the evader one step at a time
///
/// The full path is recomputed on every invocation rather than cached, so the
/// pursuer always reacts to where the evader is now.
#[derive(Debug, Default)]
pub struct PursuitController {
    pathfinder: Pathfinder,
}

impl PursuitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the pursuer one cell toward the evader
    ///
    /// Holds position when no path exists. Returns whether the pursuer moved.
    pub fn step(&mut self, session: &mut Session) -> bool {
        let start = session.pursuer.cell;
        let goal = session.evader.cell;
        let grid = &session.grid;

        let path = self
            .pathfinder
            .find_path(start, goal, |cell| grid.is_passable(cell));

        let Some(&next) = path.first() else {
            if start != goal {
                tracing::debug!(pursuer = %start, evader = %goal, "no path to evader");
            }
            return false;
        };

        let direction = Direction::ALL
            .into_iter()
            .find(|&direction| start.step(direction) == next);

        session.pursuer.cell = next;
        session.pursuer.facing = direction.or(session.pursuer.facing);
        session.check_capture();

        true
    }
}
