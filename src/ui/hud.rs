use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::game::GameState;

/// Draws the one-line status row: snake length and score.
pub fn render_status(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    frame.render_widget(
        Paragraph::new(status_line(state.snake.len(), state.score))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn status_line(length: usize, score: u32) -> Line<'static> {
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw(" Length: "),
        Span::styled(length.to_string(), value),
        Span::raw("  Score: "),
        Span::styled(score.to_string(), value),
    ])
}
