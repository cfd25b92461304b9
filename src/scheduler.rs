//! Fixed-rate tick driver
//!
//! One iteration is one tick: poll input without blocking, advance the
//! engine, hand the session to the render sink, then sleep. The sleep is the
//! only place the loop yields, and everything else happens on the caller's
//! task, so the session never has more than one writer.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;

use crate::game::{Action, GameConfig, GameEngine, Outcome, Session};
use crate::input::{InputSource, KeyAction};
use crate::render::RenderSink;

/// Maps the base tick and current score to the tick actually slept
pub type SpeedRamp = Box<dyn Fn(Duration, u32) -> Duration + Send + Sync>;

/// How long each tick lasts
pub struct Pacing {
    base: Duration,
    ramp: Option<SpeedRamp>,
}

impl Pacing {
    /// Same interval regardless of score
    pub fn fixed(base: Duration) -> Self {
        Self { base, ramp: None }
    }

    pub fn with_ramp<F>(mut self, ramp: F) -> Self
    where
        F: Fn(Duration, u32) -> Duration + Send + Sync + 'static,
    {
        self.ramp = Some(Box::new(ramp));
        self
    }

    /// Take `step` off the tick per point scored, never going below `floor`
    pub fn linear_ramp(
        step: Duration,
        floor: Duration,
    ) -> impl Fn(Duration, u32) -> Duration + Send + Sync + 'static {
        move |base, score| {
            base.saturating_sub(step.saturating_mul(score))
                .max(floor.min(base))
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let pacing = Self::fixed(config.tick_interval());
        match config.speed_ramp {
            Some(ramp) => pacing.with_ramp(Self::linear_ramp(
                Duration::from_millis(ramp.step_ms),
                Duration::from_millis(ramp.min_ms),
            )),
            None => pacing,
        }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn interval(&self, score: u32) -> Duration {
        match &self.ramp {
            Some(ramp) => ramp(self.base, score),
            None => self.base,
        }
    }
}

impl fmt::Debug for Pacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pacing")
            .field("base", &self.base)
            .field("ramp", &self.ramp.is_some())
            .finish()
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The session reached `Won` or `Caught`
    Finished(Outcome),
    Quit,
    Restart,
}

pub struct Scheduler<I, R> {
    engine: GameEngine,
    input: I,
    sink: R,
    pacing: Pacing,
}

impl<I, R> Scheduler<I, R> {
    pub fn new(engine: GameEngine, input: I, sink: R, pacing: Pacing) -> Self {
        Self {
            engine,
            input,
            sink,
            pacing,
        }
    }

    pub fn session(&self) -> &Session {
        self.engine.session()
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Throw the current session away and start over
    pub fn restart(&mut self) {
        self.engine.reset();
    }
}

impl<I: InputSource, R: RenderSink> Scheduler<I, R> {
    /// Run one tick without sleeping
    ///
    /// Returns `Some` when the loop should stop.
    pub fn tick(&mut self) -> Result<Option<LoopExit>> {
        let action = match self.input.poll_input()? {
            Some(KeyAction::GameAction(action)) => action,
            Some(KeyAction::Quit) => return Ok(Some(LoopExit::Quit)),
            Some(KeyAction::Restart) => return Ok(Some(LoopExit::Restart)),
            Some(KeyAction::None) | None => Action::Continue,
        };

        let result = self.engine.step(action);
        self.sink.render(self.engine.session())?;

        Ok(result
            .terminated
            .then_some(LoopExit::Finished(result.outcome)))
    }

    /// Tick until the session ends or the player quits
    ///
    /// The starting position is rendered once before the first tick.
    pub async fn run(&mut self) -> Result<LoopExit> {
        self.sink.render(self.engine.session())?;
        if self.engine.session().is_over() {
            return Ok(LoopExit::Finished(self.engine.session().outcome));
        }

        loop {
            if let Some(exit) = self.tick()? {
                return Ok(exit);
            }

            let interval = self.pacing.interval(self.engine.session().score);
            tokio::select! {
                _ = sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted");
                    return Ok(LoopExit::Quit);
                }
            }
        }
    }
}
