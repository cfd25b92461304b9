use super::action::{Action, Direction};
use super::state::{Outcome, Session};

/// What the evader did on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaderStep {
    /// No direction has been latched yet
    Idle,
    /// The latched direction points into a wall or off the grid
    Blocked,
    Moved { collected: bool },
}

/// Moves the player-controlled entity
///
/// The last direction given stays latched, so the evader keeps moving
/// without a key press every tick.
#[derive(Debug, Clone, Default)]
pub struct EvaderController {
    latched: Option<Direction>,
}

impl EvaderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latched(&self) -> Option<Direction> {
        self.latched
    }

    pub fn latch(&mut self, direction: Direction) {
        self.latched = Some(direction);
    }

    /// Forget the latched direction
    pub fn clear(&mut self) {
        self.latched = None;
    }

    /// Apply an action: a move replaces the latched direction
    pub fn apply(&mut self, action: Action) {
        if let Action::Move(direction) = action {
            self.latch(direction);
        }
    }

    /// Step the evader one cell in the latched direction
    pub fn step(&self, session: &mut Session) -> EvaderStep {
        let Some(direction) = self.latched else {
            return EvaderStep::Idle;
        };

        let candidate = session.evader.cell.step(direction);
        if !session.grid.is_passable(candidate) {
            tracing::debug!(cell = %candidate, ?direction, "evader move blocked");
            return EvaderStep::Blocked;
        }

        session.evader.move_to(candidate, direction);

        let collected = session.grid.pick_up(candidate);
        if collected {
            session.score += 1;
            session.collectibles_remaining -= 1;

            if session.collectibles_remaining == 0 && session.outcome == Outcome::Ongoing {
                session.outcome = Outcome::Won;
            }
        }

        EvaderStep::Moved { collected }
    }
}
