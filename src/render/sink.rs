use std::io::Stderr;

use anyhow::{Context, Result};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::renderer::Renderer;
use crate::game::{Cell, Outcome, Session};
use crate::metrics::GameMetrics;

/// Receives the session once per tick and shows it somehow
pub trait RenderSink {
    fn render(&mut self, session: &Session) -> Result<()>;
}

/// Draws frames to the terminal with ratatui
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    metrics: GameMetrics,
}

impl TerminalSink {
    pub fn new(terminal: Terminal<CrosstermBackend<Stderr>>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }
}

impl RenderSink for TerminalSink {
    fn render(&mut self, session: &Session) -> Result<()> {
        if session.is_over() {
            self.metrics.on_game_over(session.outcome, session.score);
        } else {
            self.metrics.update();
        }

        let renderer = &self.renderer;
        let metrics = &self.metrics;
        self.terminal
            .draw(|frame| renderer.render(frame, session, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

/// Snapshot of what one rendered frame showed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRecord {
    pub tick: u64,
    pub evader: Cell,
    pub pursuer: Cell,
    pub score: u32,
    pub collectibles_remaining: usize,
    pub outcome: Outcome,
}

impl FrameRecord {
    pub fn of(session: &Session) -> Self {
        Self {
            tick: session.tick,
            evader: session.evader.cell,
            pursuer: session.pursuer.cell,
            score: session.score,
            collectibles_remaining: session.collectibles_remaining,
            outcome: session.outcome,
        }
    }
}

/// Keeps every frame it is given, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, session: &Session) -> Result<()> {
        self.frames.push(FrameRecord::of(session));
        Ok(())
    }
}
