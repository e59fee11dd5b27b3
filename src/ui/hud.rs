use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::render::RenderSnapshot;

/// Renders the one-line score/speed HUD and returns the play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &RenderSnapshot,
    theme: &Theme,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot.score, snapshot.speed, theme))
            .alignment(Alignment::Center),
        hud_area,
    );

    play_area
}

fn info_line(score: u32, speed: u32, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.menu_footer);
    let value = Style::default()
        .fg(theme.hud)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  Speed ", label),
        Span::styled(speed.to_string(), value),
    ])
}
