use std::io;

use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthStr;

use crate::food::FoodKind;
use crate::game::{GameState, GameStatus};
use crate::grid::Position;
use crate::ui::hud::render_status;
use crate::ui::menu::render_pause_menu;

const GLYPH_FOOD: &str = "🍎";
const GLYPH_POISON: &str = "💀";
const GLYPH_SNAKE: &str = "🐍";
const GLYPH_EMPTY: &str = "⬜";

/// Something that can show the board after each tick.
pub trait Renderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

impl<B: Backend> Renderer for Terminal<B> {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        Terminal::draw(self, |frame| render(frame, state))?;
        Ok(())
    }
}

/// What occupies one board cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Food,
    Poison,
    Snake,
    Empty,
}

impl Cell {
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Food => GLYPH_FOOD,
            Self::Poison => GLYPH_POISON,
            Self::Snake => GLYPH_SNAKE,
            Self::Empty => GLYPH_EMPTY,
        }
    }
}

/// Classifies `position`; food is drawn over poison, poison over snake.
#[must_use]
pub fn cell_at(state: &GameState, position: Position) -> Cell {
    match state.item_at(position) {
        Some(FoodKind::Good) => Cell::Food,
        Some(FoodKind::Poison) => Cell::Poison,
        None if state.snake.occupies(position) => Cell::Snake,
        None => Cell::Empty,
    }
}

/// Terminal columns taken by one board cell.
#[must_use]
pub fn cell_width() -> u16 {
    let widest = [GLYPH_FOOD, GLYPH_POISON, GLYPH_SNAKE, GLYPH_EMPTY]
        .iter()
        .map(|glyph| glyph.width())
        .max()
        .unwrap_or(1);
    u16::try_from(widest).unwrap_or(2)
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let bounds = state.bounds();

    let board_width = bounds.width.saturating_mul(cell_width()).saturating_add(2);
    let board_height = bounds.height.saturating_add(2);

    let [board_row, status_row, _] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    let [board_area, _] =
        Layout::horizontal([Constraint::Length(board_width), Constraint::Min(0)])
            .areas(board_row);

    render_board(frame, board_area, state);
    render_status(frame, status_row, state);

    if state.status() == GameStatus::Paused {
        render_pause_menu(frame, area);
    }
}

fn render_board(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    let bounds = state.bounds();
    let lines: Vec<Line<'_>> = (0..bounds.height)
        .map(|row| {
            let spans: Vec<Span<'_>> = (0..bounds.width)
                .map(|col| Span::raw(cell_at(state, Position::new(row, col)).glyph()))
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered().border_style(Style::new().fg(Color::DarkGray)),
        ),
        area,
    );
}
