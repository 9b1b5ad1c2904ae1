// UI module for rendering the TUI.
// Contains the tab bar, the animated content region, and the status bar.

pub mod content;
pub mod tab_bar;
pub mod theme;

use std::time::Instant;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

pub use content::measure_height;
pub use tab_bar::{BAR_HEIGHT, layout_tabs};
pub use theme::Palette;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let palette = Palette::for_mode(app.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.surface)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Title
            Constraint::Length(BAR_HEIGHT), // Tab bar
            Constraint::Min(1),             // Content
            Constraint::Length(1),          // Status bar
        ])
        .split(frame.area());

    draw_title(frame, app, &palette, chunks[0]);

    // Mouse hit testing uses the last rendered position of the bar.
    app.bar_area = chunks[1];
    tab_bar::draw_tab_bar(frame, &app.bar, &app.layout, &palette, chunks[1], now);

    content::draw_content(frame, &app.bar, &palette, chunks[2], now);

    draw_status_bar(frame, app, &palette, chunks[3]);
}

fn draw_title(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " slidetab ",
            Style::default()
                .fg(palette.text_active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("group: {}", app.group),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hints = " ←/→ switch │ 1-9 jump │ t theme │ q quit";
    let status = app.status.as_deref().unwrap_or("");

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(status.len() as u16 + 1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(palette.muted)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Right)
            .style(Style::default().fg(palette.text_inactive)),
        chunks[1],
    );
}
