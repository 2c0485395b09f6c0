pub mod ascii;
pub mod halfblock;
pub mod palette;

use termlife::Board;

/// How board cells map to terminal characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Two characters per cell, `X` alive and `.` dead
    Ascii,
    /// Half-block characters ▀▄█ (two board rows per terminal row)
    HalfBlock,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// No color, monochrome
    Mono,
    /// ANSI 16 colors
    Ansi16,
    /// 256-color palette
    Ansi256,
    /// 24-bit true color (RGB)
    TrueColor,
}

/// Terminal area available for the board, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: usize,
    pub rows: usize,
}

/// Render the visible part of the board, starting at the terminal's home
/// position. Each row ends by moving the cursor to the start of the next one.
pub fn render(board: &Board, view: Viewport, render_mode: RenderMode, color_mode: ColorMode) -> String {
    match render_mode {
        RenderMode::Ascii => ascii::render(board, view, color_mode),
        RenderMode::HalfBlock => halfblock::render(board, view, color_mode),
    }
}

/// Plain text dump: ` X` per live cell, ` .` per dead one, a newline per
/// row and a blank line after the board.
pub fn plain(board: &Board) -> String {
    let mut out = String::with_capacity(board.rows() * (board.cols() * 2 + 1) + 1);
    for row in board.rows_iter() {
        for &alive in row {
            out.push_str(if alive { " X" } else { " ." });
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Cursor move to column 1 of the 1-based terminal `row`.
pub(crate) fn goto_row(out: &mut String, row: usize) {
    out.push_str("\x1b[");
    out.push_str(&row.to_string());
    out.push_str(";1H");
}
