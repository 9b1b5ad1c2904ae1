// Animated content region below the tab bar.
// Renders outgoing and incoming layers with slide offset and fade.

use std::time::Instant;

use ratatui::{prelude::*, widgets::*};

use crate::state::{ContentLayer, TabBar};

use super::theme::{Palette, mix};

/// Layout units per terminal column when converting slide offsets.
pub const UNITS_PER_CELL: f32 = 8.0;

/// Blank rows above the content body.
pub const CONTENT_TOP_PADDING: u16 = 1;

/// Blur above which content is drawn dimmed.
const DIM_BLUR: f32 = 1.0;

/// Rows needed to show `text` with top padding.
pub fn measure_height(text: &str) -> u16 {
    let lines = text.lines().count().max(1) as u16;
    lines.saturating_add(CONTENT_TOP_PADDING)
}

/// Draw the content region for the active tab, if it has any.
pub fn draw_content(frame: &mut Frame, bar: &TabBar, palette: &Palette, area: Rect, now: Instant) {
    let Some(region) = bar.content_region(now) else {
        return;
    };

    let height = (region.height.round().max(0.0) as u16).min(area.height);
    let inner = Rect {
        y: area.y + CONTENT_TOP_PADDING.min(height),
        height: height.saturating_sub(CONTENT_TOP_PADDING),
        ..area
    };
    if inner.height == 0 {
        return;
    }

    for layer in &region.layers {
        let Some(text) = bar.tabs().get(layer.index).and_then(|t| t.content.as_deref()) else {
            continue;
        };
        draw_layer(frame, layer, text, palette, inner);
    }
}

fn draw_layer(frame: &mut Frame, layer: &ContentLayer, text: &str, palette: &Palette, area: Rect) {
    let visual = layer.visual;
    if visual.opacity <= 0.01 {
        return;
    }

    let mut style = Style::default().fg(mix(palette.surface, palette.content, visual.opacity));
    if visual.blur > DIM_BLUR {
        style = style.add_modifier(Modifier::DIM);
    }

    let shift = (visual.x / UNITS_PER_CELL).round() as i32;
    let paragraph = Paragraph::new(text).style(style);
    if shift >= 0 {
        let shift = (shift as u16).min(area.width);
        let target = Rect {
            x: area.x + shift,
            width: area.width - shift,
            ..area
        };
        if target.width > 0 {
            frame.render_widget(paragraph, target);
        }
    } else {
        let scroll = shift.unsigned_abs().min(u32::from(u16::MAX)) as u16;
        frame.render_widget(paragraph.scroll((0, scroll)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RowLayout, Tab};
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn row(buffer: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_measure_height() {
        assert_eq!(measure_height("one line"), 2);
        assert_eq!(measure_height("a\nb\nc"), 4);
        assert_eq!(measure_height(""), 2);
    }

    #[test]
    fn test_draw_settled_content() {
        let layout = RowLayout::from_widths([5.0, 5.0], 1.0);
        let start = Instant::now();
        let mut bar = TabBar::new(vec![
            Tab::new("a", "A").with_content("hello"),
            Tab::new("b", "B").with_content("world"),
        ]);
        bar.mount(&layout, start);
        bar.set_content_height(2.0, start);
        let now = start + Duration::from_millis(400);
        bar.tick(&layout, now);

        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_content(frame, &bar, &Palette::LIGHT, area, now);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(row(buffer, 0, 12).trim(), "");
        assert_eq!(row(buffer, 1, 12).trim(), "hello");
    }

    #[test]
    fn test_nothing_drawn_without_content() {
        let layout = RowLayout::from_widths([5.0], 1.0);
        let now = Instant::now();
        let mut bar = TabBar::new(vec![Tab::new("a", "A")]);
        bar.mount(&layout, now);
        bar.set_content_height(3.0, now);

        let mut terminal = Terminal::new(TestBackend::new(8, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_content(frame, &bar, &Palette::DARK, area, now);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        for y in 0..3u16 {
            assert_eq!(row(buffer, y, 8).trim(), "");
        }
    }
}
