use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::game::{Phase, Position, Snapshot};
use crate::metrics::GameMetrics;

const FOOD_COLOR: Color = Color::Rgb(255, 165, 0);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. Reads the snapshot only.
    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let area = frame.area();
        let (need_width, need_height) = Self::required_size(snapshot);
        let board_fits = area.width >= need_width && area.height >= need_height;
        if snapshot.phase == Phase::Running && !board_fits {
            frame.render_widget(self.render_too_small(need_width, need_height), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        match snapshot.phase {
            Phase::Running => frame.render_widget(self.render_grid(snapshot), chunks[1]),
            Phase::GameOver => {
                frame.render_widget(self.render_game_over(snapshot, metrics), chunks[1])
            }
        }

        frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
    }

    /// Terminal size that shows the whole board: two columns per cell plus
    /// borders, and the header and footer rows around the bordered grid
    pub fn required_size(snapshot: &Snapshot) -> (u16, u16) {
        let width = snapshot.grid_width.max(0) as u32 * 2 + 2;
        let height = snapshot.grid_height.max(0) as u32 + 8;
        (
            width.min(u16::MAX as u32) as u16,
            height.min(u16::MAX as u32) as u16,
        )
    }

    fn render_too_small(&self, need_width: u16, need_height: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {need_width}x{need_height}")),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height.max(0) as usize);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width.max(0) as usize);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x, y);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("  ", Style::default())
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.clock(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![Span::styled(
                format!("Games played: {}", metrics.games_played),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("[R] ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled("Try Again", Style::default().fg(Color::Gray)),
                Span::raw("    "),
                Span::styled("[Q] ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled("Give Up", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let text = match phase {
            Phase::Running => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Phase::GameOver => Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to try again | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to give up"),
            ]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
