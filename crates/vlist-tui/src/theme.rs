use ratatui::style::Color;

/// Runtime theme for the demo list
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey0: Color,
    pub grey2: Color,
    /// Focused item
    pub selection: Color,
    pub accent: Color,
    pub thumb: Color,
    pub track: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Dark living-room palette
        Self {
            bg0: Color::Rgb(0x12, 0x16, 0x21),
            bg1: Color::Rgb(0x1b, 0x21, 0x30),
            bg2: Color::Rgb(0x27, 0x2f, 0x44),
            fg0: Color::Rgb(0xe6, 0xe9, 0xf0),
            grey0: Color::Rgb(0x5c, 0x66, 0x7d),
            grey2: Color::Rgb(0x9a, 0xa3, 0xb8),
            selection: Color::Rgb(0x2f, 0x5f, 0xd0),
            accent: Color::Rgb(0x5e, 0xc8, 0xf2),
            thumb: Color::Rgb(0xc8, 0xd0, 0xe0),
            track: Color::Rgb(0x27, 0x2f, 0x44),
        }
    }
}
