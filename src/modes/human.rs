use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::sleep;

use crate::game::{GameConfig, GameEngine, Layout};
use crate::input::{InputSource, KeyAction, TerminalInput};
use crate::render::TerminalSink;
use crate::scheduler::{LoopExit, Pacing, Scheduler};

/// How often the game-over screen checks for R or Q
const MENU_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Play the chase from the keyboard
pub struct HumanMode {
    config: GameConfig,
    layout: Layout,
}

impl HumanMode {
    pub fn new(config: GameConfig, layout: Layout) -> Self {
        Self { config, layout }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn engine(&self) -> GameEngine {
        GameEngine::new(self.layout.clone(), self.config.cadence)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let mut scheduler = Scheduler::new(
            self.engine(),
            TerminalInput::new(),
            TerminalSink::new(terminal),
            Pacing::from_config(&self.config),
        );

        tracing::info!(
            rows = self.layout.grid().rows(),
            cols = self.layout.grid().cols(),
            collectibles = self.layout.grid().collectibles(),
            tick = ?scheduler.pacing().base(),
            "starting game"
        );

        // Run game loop with cleanup
        let result = Self::play(&mut scheduler).await;

        // Cleanup terminal
        Self::cleanup_terminal(scheduler.sink_mut().terminal_mut())?;

        result
    }

    async fn play(scheduler: &mut Scheduler<TerminalInput, TerminalSink>) -> Result<()> {
        loop {
            match scheduler.run().await? {
                LoopExit::Quit => return Ok(()),
                LoopExit::Restart => Self::restart(scheduler),
                LoopExit::Finished(outcome) => {
                    let metrics = scheduler.sink().metrics();
                    tracing::info!(
                        ?outcome,
                        score = scheduler.session().score,
                        best = metrics.best_score,
                        games = metrics.games_played(),
                        "game over"
                    );

                    match Self::await_choice(scheduler.input_mut()).await? {
                        KeyAction::Restart => Self::restart(scheduler),
                        _ => return Ok(()),
                    }
                }
            }
        }
    }

    fn restart(scheduler: &mut Scheduler<TerminalInput, TerminalSink>) {
        scheduler.restart();
        scheduler.sink_mut().metrics_mut().on_game_start();
    }

    /// Wait on the game-over screen until the player restarts or quits
    async fn await_choice(input: &mut impl InputSource) -> Result<KeyAction> {
        loop {
            if let Some(action @ (KeyAction::Restart | KeyAction::Quit)) = input.poll_input()? {
                return Ok(action);
            }

            tokio::select! {
                _ = sleep(MENU_POLL_INTERVAL) => {}
                _ = tokio::signal::ctrl_c() => return Ok(KeyAction::Quit),
            }
        }
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
