use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Outcome, Session, Terrain};
use crate::metrics::GameMetrics;

const BACKGROUND: Color = Color::Rgb(48, 16, 64);

/// Glyph shown for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Evader,
    Pursuer,
    Collectible,
    Wall,
    Floor,
}

impl Glyph {
    /// What to draw at `cell` over `terrain`; the pursuer covers the evader
    pub fn at(session: &Session, cell: Cell, terrain: Terrain) -> Self {
        if cell == session.pursuer.cell {
            return Glyph::Pursuer;
        }
        if cell == session.evader.cell {
            return Glyph::Evader;
        }
        match terrain {
            Terrain::Collectible => Glyph::Collectible,
            Terrain::Empty => Glyph::Floor,
            Terrain::Wall => Glyph::Wall,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Evader => "R",
            Glyph::Pursuer => "C",
            Glyph::Collectible => "o",
            Glyph::Wall => "#",
            Glyph::Floor => " ",
        }
    }

    fn style(&self) -> Style {
        let base = Style::default().bg(BACKGROUND);
        match self {
            Glyph::Evader => base.fg(Color::Red).add_modifier(Modifier::BOLD),
            Glyph::Pursuer => base.fg(Color::Blue).add_modifier(Modifier::BOLD),
            Glyph::Collectible => base.fg(Color::Yellow),
            Glyph::Wall => base.fg(Color::Gray),
            Glyph::Floor => base,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &Session, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], session, metrics);
        frame.render_widget(stats, chunks[0]);

        if session.is_over() {
            let game_over = self.render_game_over(chunks[1], session, metrics);
            frame.render_widget(game_over, chunks[1]);
        } else {
            let grid = self.render_grid(chunks[1], session);
            frame.render_widget(grid, chunks[1]);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Plain-text rows of the board, one string per grid row
    pub fn board_lines(session: &Session) -> Vec<String> {
        let mut lines = vec![String::new(); session.grid.rows()];
        for (cell, terrain) in session.grid.cells() {
            lines[cell.row as usize].push_str(Glyph::at(session, cell, terrain).symbol());
        }
        lines
    }

    fn render_grid(&self, _area: Rect, session: &Session) -> Paragraph<'_> {
        let mut rows: Vec<Vec<Span>> = vec![Vec::new(); session.grid.rows()];
        for (cell, terrain) in session.grid.cells() {
            let glyph = Glyph::at(session, cell, terrain);
            rows[cell.row as usize].push(Span::styled(glyph.symbol(), glyph.style()));
        }
        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Cops & Robbers "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, session: &Session, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(session.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Left: ", label),
            Span::styled(session.collectibles_remaining.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        session: &Session,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let (headline, color) = match session.outcome {
            Outcome::Won => ("YOU GOT AWAY WITH EVERYTHING", Color::Green),
            Outcome::Caught => ("CAUGHT BY THE COPS", Color::Red),
            Outcome::Ongoing => ("", Color::White),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Escapes: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.wins.to_string(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled("Arrests: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.catches.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | grab every "),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
