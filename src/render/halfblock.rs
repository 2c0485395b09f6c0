use super::palette::{self, ALIVE, DEAD};
use super::{ColorMode, Viewport, goto_row};
use termlife::Board;

/// Each terminal row shows two board rows: the top one as the foreground of
/// `▀` and the bottom one as its background. A missing bottom row on boards
/// with an odd row count renders as dead.
pub fn render(board: &Board, view: Viewport, color_mode: ColorMode) -> String {
    let term_cols = board.cols().min(view.cols);
    let term_rows = board.rows().div_ceil(2).min(view.rows);
    let mut out = String::with_capacity(term_cols * term_rows * 10);

    let alive = palette::map_color(color_mode, ALIVE);
    let dead = palette::map_color(color_mode, DEAD);
    let mut last_fg = String::new();
    let mut last_bg = String::new();
    let mut in_color = false;

    for row in 0..term_rows {
        for col in 0..term_cols {
            let top = board.is_alive(row * 2, col);
            let bot = board.get(row * 2 + 1, col).unwrap_or(false);

            if color_mode == ColorMode::Mono {
                out.push(match (top, bot) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            } else if !top && !bot {
                // Both dead, just emit space on the default background
                if in_color {
                    out.push_str("\x1b[0m");
                    in_color = false;
                    last_fg.clear();
                    last_bg.clear();
                }
                out.push(' ');
            } else {
                let fg = palette::fg(if top { alive } else { dead });
                let bg = palette::bg(if bot { alive } else { dead });

                let fg_changed = fg != last_fg;
                let bg_changed = bg != last_bg;
                if fg_changed || bg_changed {
                    out.push_str("\x1b[");
                    match (fg_changed, bg_changed) {
                        (true, true) => {
                            out.push_str(&fg);
                            out.push(';');
                            out.push_str(&bg);
                        }
                        (true, false) => out.push_str(&fg),
                        _ => out.push_str(&bg),
                    }
                    out.push('m');
                }
                last_fg = fg;
                last_bg = bg;
                in_color = true;

                out.push('▀');
            }
        }
        if in_color {
            out.push_str("\x1b[0m");
            in_color = false;
            last_fg.clear();
            last_bg.clear();
        }
        goto_row(&mut out, row + 2);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport { cols: 80, rows: 24 };

    #[test]
    fn test_mono_glyphs() {
        // rows: [X X . .] / [X . X .]
        let mut board = Board::new(2, 4).unwrap();
        board.set(0, 0, true);
        board.set(0, 1, true);
        board.set(1, 0, true);
        board.set(1, 2, true);
        assert_eq!(render(&board, VIEW, ColorMode::Mono), "█▀▄ \x1b[2;1H");
    }

    #[test]
    fn test_odd_rows_pad_with_dead() {
        let mut board = Board::new(3, 1).unwrap();
        board.set(2, 0, true);
        assert_eq!(render(&board, VIEW, ColorMode::Mono), " \x1b[2;1H▀\x1b[3;1H");
    }

    #[test]
    fn test_crops_to_viewport() {
        let board = Board::new(10, 10).unwrap();
        let out = render(&board, Viewport { cols: 3, rows: 2 }, ColorMode::Mono);
        assert_eq!(out, "   \x1b[2;1H   \x1b[3;1H");
    }

    #[test]
    fn test_color_sgr() {
        let mut board = Board::new(2, 3).unwrap();
        board.set(0, 0, true);
        board.set(0, 1, true);
        let out = render(&board, VIEW, ColorMode::Ansi256);
        assert_eq!(out, "\x1b[38;5;231;48;5;16m▀▀\x1b[0m \x1b[2;1H");
    }
}
