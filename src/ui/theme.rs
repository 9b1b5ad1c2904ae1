// Color palettes for the light and dark contexts.
// Translucent source colors are pre-blended against the surface.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Colors used to draw the tab bar and its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub surface: Color,
    pub text_active: Color,
    pub text_inactive: Color,
    pub hover: Color,
    pub underline: Color,
    pub content: Color,
    pub muted: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        surface: Color::Rgb(255, 255, 255),
        text_active: Color::Rgb(14, 14, 16),
        // #0e0f11 at 60%
        text_inactive: Color::Rgb(110, 111, 112),
        // #0e0f11 at 8%
        hover: Color::Rgb(236, 236, 236),
        underline: Color::Rgb(14, 15, 17),
        content: Color::Rgb(14, 15, 17),
        muted: Color::Rgb(150, 150, 152),
    };

    pub const DARK: Palette = Palette {
        surface: Color::Rgb(10, 10, 10),
        text_active: Color::Rgb(255, 255, 255),
        // white at 60%
        text_inactive: Color::Rgb(157, 157, 157),
        // white at 10%
        hover: Color::Rgb(35, 35, 35),
        underline: Color::Rgb(255, 255, 255),
        content: Color::Rgb(230, 230, 230),
        muted: Color::Rgb(100, 100, 100),
    };

    pub fn for_mode(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }
}

/// Blend `to` over `from` at `alpha`. Non-RGB colors switch at the halfway point.
pub fn mix(from: Color, to: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let channel =
                |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * alpha).round() as u8;
            Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
        }
        _ if alpha >= 0.5 => to,
        _ => from,
    }
}
