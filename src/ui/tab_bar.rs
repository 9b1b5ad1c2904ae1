// Tab bar rendering with hover highlight and active underline.
// Labels sit on the first row, the underline on the second.

use std::time::Instant;

use ratatui::{prelude::*, widgets::*};

use crate::state::{ElementHandle, Geometry, LayoutProbe, RowLayout, Tab, TabBar};

use super::theme::{Palette, mix};

/// Horizontal padding on each side of a label, in cells.
pub const TAB_PADDING: u16 = 1;

/// Space between adjacent tabs, in cells.
pub const TAB_GAP: u16 = 1;

/// Rows occupied by the bar: labels plus underline.
pub const BAR_HEIGHT: u16 = 2;

/// Lay out tab labels left to right in terminal cells.
pub fn layout_tabs(tabs: &[Tab]) -> RowLayout {
    RowLayout::from_widths(
        tabs.iter().map(|tab| {
            let label_width = Line::from(tab.label.as_str()).width() as u16;
            f32::from(label_width + TAB_PADDING * 2)
        }),
        f32::from(TAB_GAP),
    )
}

/// Cells covered by `geometry` on row `y`, clipped to `area`.
fn cells(area: Rect, y: u16, geometry: Geometry) -> Option<Rect> {
    let left = geometry.left.round().max(0.0) as u16;
    let right = (geometry.right().round().max(0.0) as u16).min(area.width);
    if right <= left {
        return None;
    }
    Some(Rect::new(area.x + left, y, right - left, 1))
}

/// Draw the tab bar into `area`.
pub fn draw_tab_bar(
    frame: &mut Frame,
    bar: &TabBar,
    layout: &RowLayout,
    palette: &Palette,
    area: Rect,
    now: Instant,
) {
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.surface)),
        area,
    );
    if area.height == 0 || area.width == 0 {
        return;
    }

    let label_row = area.y;
    let buf = frame.buffer_mut();

    // Hover highlight
    let opacity = bar.hover_opacity(now);
    if opacity > 0.0 {
        if let Some(rect) = cells(area, label_row, bar.hover_geometry(now)) {
            buf.set_style(rect, Style::default().bg(mix(palette.surface, palette.hover, opacity)));
        }
    }

    // Labels
    for (index, tab) in bar.tabs().iter().enumerate() {
        let Some(slot) = layout.measure(ElementHandle::for_tab(index)) else {
            continue;
        };
        let x = slot.left as u16 + TAB_PADDING;
        if x >= area.width {
            break;
        }

        let style = if index == bar.active_index() {
            Style::default()
                .fg(palette.text_active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_inactive)
        };
        let max_width = (area.width - x) as usize;
        buf.set_stringn(area.x + x, label_row, &tab.label, max_width, style);
    }

    // Active indicator
    if area.height < BAR_HEIGHT {
        return;
    }
    if let Some(geometry) = bar.active_geometry(now) {
        if let Some(rect) = cells(area, label_row + 1, geometry) {
            let underline = "▔".repeat(rect.width as usize);
            buf.set_string(rect.x, rect.y, underline, Style::default().fg(palette.underline));
        }
    }
}
