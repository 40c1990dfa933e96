//! Fixed color palette for the browser UI.

use ratatui::style::Color;

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Top line
    pub dir_path_fg: Color,
    pub current_name_fg: Color,

    // File list
    pub dir_fg: Color,
    pub file_fg: Color,
    pub cursor_bg: Color,
    pub mode_fg: Color,
    pub modified_fg: Color,

    pub preview_fg: Color,

    // Overlays
    pub border_fg: Color,
    pub header_fg: Color,

    // Semantic
    pub error_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        ThemeColors {
            dir_path_fg: Color::Rgb(0, 108, 182),      // #006cb6
            current_name_fg: Color::Rgb(218, 245, 46), // #daf52e

            dir_fg: Color::Rgb(48, 113, 255), // #3071ff
            file_fg: Color::White,
            cursor_bg: Color::Rgb(97, 97, 97), // #616161
            mode_fg: Color::Rgb(255, 211, 94), // #ffd35e
            modified_fg: Color::Rgb(187, 187, 187),

            preview_fg: Color::Rgb(175, 175, 175),

            border_fg: Color::Rgb(24, 255, 32), // #18ff20
            header_fg: Color::Rgb(24, 255, 32),

            error_fg: Color::Red,
            accent_fg: Color::Rgb(218, 245, 46),
            dim_fg: Color::Rgb(108, 112, 134),
        }
    }
}
