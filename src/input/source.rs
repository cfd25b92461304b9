use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use super::handler::{InputHandler, KeyAction};

/// Where the scheduler gets its per-tick command from
///
/// `poll_input` must never block: when nothing was pressed since the last
/// call it returns `Ok(None)` straight away.
pub trait InputSource {
    fn poll_input(&mut self) -> Result<Option<KeyAction>>;
}

/// Keyboard input from the terminal via crossterm
///
/// Expects the terminal to already be in raw mode.
pub struct TerminalInput {
    handler: InputHandler,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            handler: InputHandler::new(),
        }
    }

    /// Fold one terminal event into the action for this tick
    ///
    /// Breaks on quit. Otherwise carries the most recent mapped key; releases,
    /// resizes and unmapped keys leave it untouched.
    fn fold_event(
        &self,
        latest: Option<KeyAction>,
        event: Event,
    ) -> ControlFlow<KeyAction, Option<KeyAction>> {
        let Event::Key(key) = event else {
            return ControlFlow::Continue(latest);
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return ControlFlow::Continue(latest);
        }

        match self.handler.handle_key_event(key) {
            KeyAction::None => ControlFlow::Continue(latest),
            KeyAction::Quit => ControlFlow::Break(KeyAction::Quit),
            action => ControlFlow::Continue(Some(action)),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    /// Drain pending key presses and keep the most recent one
    ///
    /// Quit wins over anything else pressed in the same tick. Unmapped keys
    /// are ignored.
    fn poll_input(&mut self) -> Result<Option<KeyAction>> {
        let mut latest = None;

        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;
            match self.fold_event(latest, event) {
                ControlFlow::Break(action) => return Ok(Some(action)),
                ControlFlow::Continue(action) => latest = action,
            }
        }

        Ok(latest)
    }
}

/// Pre-recorded input, one entry per poll
///
/// Once the script runs out every poll reports nothing pending.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<KeyAction>>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<KeyAction>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> Result<Option<KeyAction>> {
        Ok(self.script.pop_front().flatten())
    }
}
