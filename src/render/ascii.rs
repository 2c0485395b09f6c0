use super::palette::{self, ALIVE, DEAD_DOT};
use super::{ColorMode, Viewport, goto_row};
use termlife::Board;

/// Two terminal columns per cell keep the board roughly square.
const CELL_WIDTH: usize = 2;

pub fn render(board: &Board, view: Viewport, color_mode: ColorMode) -> String {
    let cols = board.cols().min(view.cols / CELL_WIDTH);
    let rows = board.rows().min(view.rows);
    let mut out = String::with_capacity(cols * rows * 12);
    let use_color = color_mode != ColorMode::Mono;
    let alive_fg = palette::fg(palette::map_color(color_mode, ALIVE));
    let dead_fg = palette::fg(palette::map_color(color_mode, DEAD_DOT));
    let mut last_fg: Option<&str> = None;

    for (row, cells) in board.rows_iter().take(rows).enumerate() {
        for &alive in &cells[..cols] {
            if use_color {
                let fg = if alive { &alive_fg } else { &dead_fg };
                if last_fg != Some(fg.as_str()) {
                    out.push_str("\x1b[");
                    out.push_str(fg);
                    out.push('m');
                    last_fg = Some(fg.as_str());
                }
            }
            out.push(' ');
            out.push(if alive { 'X' } else { '.' });
        }
        if use_color {
            out.push_str("\x1b[0m");
            last_fg = None;
        }
        goto_row(&mut out, row + 2);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(n: usize) -> Board {
        let mut board = Board::new(n, n).unwrap();
        for i in 0..n {
            board.set(i, i, true);
        }
        board
    }

    #[test]
    fn test_mono_rows() {
        let board = diagonal(2);
        let out = render(&board, Viewport { cols: 80, rows: 24 }, ColorMode::Mono);
        assert_eq!(out, " X .\x1b[2;1H . X\x1b[3;1H");
    }

    #[test]
    fn test_crops_to_viewport() {
        let board = diagonal(10);
        let out = render(&board, Viewport { cols: 7, rows: 2 }, ColorMode::Mono);
        // 7 columns fit 3 cells
        assert_eq!(out, " X . .\x1b[2;1H . X .\x1b[3;1H");
    }

    #[test]
    fn test_color_changes_only_on_transition() {
        let mut board = Board::new(1, 4).unwrap();
        board.set(0, 0, true);
        board.set(0, 1, true);
        let out = render(&board, Viewport { cols: 80, rows: 24 }, ColorMode::TrueColor);
        assert_eq!(
            out,
            "\x1b[38;2;255;255;255m X X\x1b[38;2;90;90;90m . .\x1b[0m\x1b[2;1H"
        );
    }
}
