use super::{
    action::Action,
    evader::{EvaderController, EvaderStep},
    layout::Layout,
    pursuit::{Cadence, PursuitController},
    state::{Outcome, Session},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// What the evader did
    pub evader: EvaderStep,
    /// Whether the cadence allowed the pursuer to act this tick
    pub pursuer_active: bool,
    /// Whether the pursuer actually moved
    pub pursuer_moved: bool,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: Outcome,
    /// Whether the session has ended
    pub terminated: bool,
    pub info: StepInfo,
}

/// Runs the logical half of each tick
///
/// Owns the session and both controllers. Pacing, input sampling and
/// rendering are left to the scheduler.
pub struct GameEngine {
    layout: Layout,
    cadence: Cadence,
    session: Session,
    evader: EvaderController,
    pursuit: PursuitController,
}

impl GameEngine {
    /// Create a new game engine and start a session on `layout`
    pub fn new(layout: Layout, cadence: Cadence) -> Self {
        let session = Session::new(&layout);
        Self {
            layout,
            cadence,
            session,
            evader: EvaderController::new(),
            pursuit: PursuitController::new(),
        }
    }

    /// Reset the game to its initial state
    pub fn reset(&mut self) -> &Session {
        self.session = Session::new(&self.layout);
        self.evader.clear();
        tracing::info!(
            collectibles = self.session.collectibles_remaining,
            cadence = %self.cadence,
            "session started"
        );
        &self.session
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Execute one tick of the game
    ///
    /// Order: evader step, tick counter, pursuer step when the cadence
    /// allows it, capture check. An evader stepping onto the pursuer is
    /// caught before the pursuer gets a turn.
    pub fn step(&mut self, action: Action) -> StepResult {
        if self.session.is_over() {
            return self.result(StepInfo {
                evader: EvaderStep::Idle,
                pursuer_active: false,
                pursuer_moved: false,
            });
        }

        self.evader.apply(action);
        let evader = self.evader.step(&mut self.session);

        self.session.tick += 1;
        let tick = self.session.tick;

        self.session.check_capture();

        let pursuer_active = !self.session.is_over() && self.cadence.is_active(tick);
        let pursuer_moved = pursuer_active && self.pursuit.step(&mut self.session);

        self.session.check_capture();

        tracing::trace!(
            tick,
            evader = %self.session.evader.cell,
            pursuer = %self.session.pursuer.cell,
            latched = ?self.evader.latched(),
            pursuer_active,
            "tick"
        );

        if self.session.is_over() {
            tracing::info!(
                outcome = ?self.session.outcome,
                score = self.session.score,
                tick,
                "session ended"
            );
        }

        self.result(StepInfo {
            evader,
            pursuer_active,
            pursuer_moved,
        })
    }

    fn result(&self, info: StepInfo) -> StepResult {
        StepResult {
            outcome: self.session.outcome,
            terminated: self.session.is_over(),
            info,
        }
    }
}
