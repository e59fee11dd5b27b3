use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{Theme, GLYPH_CELL};
use crate::grid::{Cell, CellColor};
use crate::render::{RenderSnapshot, Row};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

const CELL_WIDTH: u16 = 2;

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &RenderSnapshot, theme: &Theme) {
    let area = frame.area();
    let available = render_hud(frame, area, snapshot, theme);
    let play_area = board_area(available, snapshot);

    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    for (y, row) in snapshot.rows.iter().enumerate() {
        let Ok(y) = u16::try_from(y) else {
            break;
        };
        render_row(frame, inner, y, row, theme);
    }

    if snapshot.game_over {
        render_game_over_menu(frame, play_area, snapshot.score, theme);
    } else if snapshot.pause {
        render_pause_menu(frame, play_area, theme);
    }
}

fn render_row(frame: &mut Frame<'_>, inner: Rect, y: u16, row: &Row, theme: &Theme) {
    let screen_y = inner.y.saturating_add(y);
    if screen_y >= inner.bottom() {
        return;
    }

    let buffer = frame.buffer_mut();
    for (column, cell) in row.cells().iter().enumerate() {
        let Ok(column) = u16::try_from(column) else {
            break;
        };
        let screen_x = inner.x.saturating_add(column.saturating_mul(CELL_WIDTH));
        if screen_x.saturating_add(CELL_WIDTH) > inner.right() {
            continue;
        }

        buffer.set_string(
            screen_x,
            screen_y,
            GLYPH_CELL,
            Style::new().fg(cell_color(*cell, theme)),
        );
    }
}

fn cell_color(cell: Cell, theme: &Theme) -> ratatui::style::Color {
    if !cell.is_filled {
        return theme.blank;
    }

    match cell.color {
        CellColor::Blank => theme.blank,
        CellColor::Food => theme.food,
        CellColor::Head => theme.head,
        CellColor::Body => theme.body,
    }
}

/// Centers a bordered box that fits the board inside `area`.
fn board_area(area: Rect, snapshot: &RenderSnapshot) -> Rect {
    let rows = u16::try_from(snapshot.rows.len()).unwrap_or(u16::MAX);
    let cols = snapshot
        .rows
        .first()
        .and_then(|row| u16::try_from(row.cells().len()).ok())
        .unwrap_or(0);

    let width = cols.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = rows.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}
