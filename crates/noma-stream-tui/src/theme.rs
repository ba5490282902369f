//! Runtime color themes for the stream UI.

use noma_stream_core::moment::Category;
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,
    pub purple: Color,

    // Semantic colors
    pub accent: Color,
    pub heart: Color,
    pub saved: Color,
}

impl Theme {
    /// The tag color for a moment category.
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Confession => self.purple,
            Category::Validation => self.green,
            Category::Guidance => self.blue,
            Category::Prompt => self.orange,
            Category::Reassurance => self.aqua,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        dusk()
    }
}

/// Dusk: the default palette, a muted indigo night.
pub fn dusk() -> Theme {
    Theme {
        bg0: Color::Rgb(0x1e, 0x1b, 0x2e),
        bg1: Color::Rgb(0x27, 0x23, 0x3a),
        bg2: Color::Rgb(0x32, 0x2e, 0x48),
        fg0: Color::Rgb(0xd9, 0xd4, 0xe7),
        fg1: Color::Rgb(0xe8, 0xe4, 0xf3),
        grey0: Color::Rgb(0x55, 0x4f, 0x6d),
        grey1: Color::Rgb(0x8a, 0x83, 0xa5),
        red: Color::Rgb(0xe8, 0x6a, 0x85),
        orange: Color::Rgb(0xe5, 0x9a, 0x6b),
        yellow: Color::Rgb(0xe0, 0xc0, 0x7a),
        green: Color::Rgb(0x95, 0xc0, 0x8c),
        aqua: Color::Rgb(0x7f, 0xc4, 0xb8),
        blue: Color::Rgb(0x7e, 0xa6, 0xe0),
        purple: Color::Rgb(0xb3, 0x92, 0xdd),
        accent: Color::Rgb(0xb3, 0x92, 0xdd),
        heart: Color::Rgb(0xee, 0x85, 0xa8),
        saved: Color::Rgb(0xe0, 0xc0, 0x7a),
    }
}

/// Dawn: a soft light palette.
pub fn dawn() -> Theme {
    Theme {
        bg0: Color::Rgb(0xf6, 0xf2, 0xee),
        bg1: Color::Rgb(0xec, 0xe6, 0xdf),
        bg2: Color::Rgb(0xe0, 0xd8, 0xcf),
        fg0: Color::Rgb(0x3d, 0x37, 0x4e),
        fg1: Color::Rgb(0x2a, 0x25, 0x3a),
        grey0: Color::Rgb(0xb5, 0xac, 0xa1),
        grey1: Color::Rgb(0x7a, 0x72, 0x88),
        red: Color::Rgb(0xc4, 0x45, 0x5e),
        orange: Color::Rgb(0xb8, 0x6a, 0x38),
        yellow: Color::Rgb(0xa8, 0x8a, 0x2d),
        green: Color::Rgb(0x5e, 0x8c, 0x54),
        aqua: Color::Rgb(0x3e, 0x8e, 0x80),
        blue: Color::Rgb(0x45, 0x6e, 0xb8),
        purple: Color::Rgb(0x7d, 0x5b, 0xb5),
        accent: Color::Rgb(0x7d, 0x5b, 0xb5),
        heart: Color::Rgb(0xd4, 0x57, 0x7e),
        saved: Color::Rgb(0xa8, 0x8a, 0x2d),
    }
}

/// Midnight: near-black, for OLED terminals.
pub fn midnight() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0e, 0x0e, 0x14),
        bg1: Color::Rgb(0x16, 0x16, 0x20),
        bg2: Color::Rgb(0x20, 0x20, 0x2e),
        fg0: Color::Rgb(0xc8, 0xc8, 0xd4),
        fg1: Color::Rgb(0xe2, 0xe2, 0xec),
        grey0: Color::Rgb(0x3c, 0x3c, 0x50),
        grey1: Color::Rgb(0x6e, 0x6e, 0x85),
        red: Color::Rgb(0xd9, 0x5c, 0x77),
        orange: Color::Rgb(0xd4, 0x8b, 0x5c),
        yellow: Color::Rgb(0xd0, 0xb1, 0x6b),
        green: Color::Rgb(0x86, 0xb1, 0x7d),
        aqua: Color::Rgb(0x70, 0xb5, 0xa9),
        blue: Color::Rgb(0x6f, 0x97, 0xd1),
        purple: Color::Rgb(0xa4, 0x83, 0xce),
        accent: Color::Rgb(0x70, 0xb5, 0xa9),
        heart: Color::Rgb(0xdf, 0x76, 0x99),
        saved: Color::Rgb(0xd0, 0xb1, 0x6b),
    }
}

/// Load a theme by name, falling back to dusk for unknown names.
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "dusk" => dusk(),
        "dawn" => dawn(),
        "midnight" => midnight(),
        _ => dusk(),
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["dusk", "dawn", "midnight"]
}
