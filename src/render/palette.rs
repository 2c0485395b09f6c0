use super::ColorMode;
use crossterm::style::Color;

/// Live cells are white on black, like a lit pixel.
pub const ALIVE: (u8, u8, u8) = (255, 255, 255);
pub const DEAD: (u8, u8, u8) = (0, 0, 0);
/// Foreground for the `.` of a dead cell in ASCII mode.
pub const DEAD_DOT: (u8, u8, u8) = (90, 90, 90);

/// Nearest color `mode` can express.
pub fn map_color(mode: ColorMode, (r, g, b): (u8, u8, u8)) -> Color {
    match mode {
        ColorMode::Mono => Color::White,
        ColorMode::TrueColor => Color::Rgb { r, g, b },
        ColorMode::Ansi256 => {
            // 6x6x6 cube
            let idx = 16 + (36 * (r as u16 / 51)) + (6 * (g as u16 / 51)) + (b as u16 / 51);
            Color::AnsiValue(idx as u8)
        }
        ColorMode::Ansi16 => {
            let brightness = (r as u16 + g as u16 + b as u16) / 3;
            if brightness < 64 {
                Color::Black
            } else if brightness > 180 {
                Color::White
            } else {
                Color::DarkGrey
            }
        }
    }
}

/// SGR parameters selecting `color` as foreground.
pub fn fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        Color::AnsiValue(v) => format!("38;5;{}", v),
        Color::Black => "30".into(),
        Color::DarkGrey => "90".into(),
        Color::White => "97".into(),
        _ => "37".into(),
    }
}

/// SGR parameters selecting `color` as background.
pub fn bg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        Color::AnsiValue(v) => format!("48;5;{}", v),
        Color::Black => "40".into(),
        Color::DarkGrey => "100".into(),
        Color::White => "107".into(),
        _ => "40".into(),
    }
}
