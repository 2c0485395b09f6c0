use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;
use rand::rngs::StdRng;
use termlife::Board;
use tracing::{debug, info};

use crate::render::{self, ColorMode, RenderMode, Viewport};
use crate::tempo::Tempo;

/// How long to wait for input while paused before re-checking the terminal
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Below this the terminal is too small to draw into
const MIN_COLS: u16 = 10;
const MIN_ROWS: u16 = 3;

/// What the frame loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Interactive simulation state: the board plus the controls acting on it.
pub struct Player {
    board: Board,
    rng: StdRng,
    density: f64,
    tempo: Tempo,
    running: bool,
    /// Generation at which running stops on its own
    limit: Option<u64>,
}

impl Player {
    pub fn new(board: Board, rng: StdRng, density: f64, tempo: Tempo, running: bool, limit: Option<u64>) -> Self {
        Player {
            board,
            rng,
            density,
            tempo,
            running,
            limit,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn at_limit(&self) -> bool {
        self.limit.is_some_and(|l| self.board.generation() >= l)
    }

    /// Advance one generation unless the generation limit is reached, in
    /// which case the simulation stops instead.
    pub fn step(&mut self) -> bool {
        if self.at_limit() {
            if self.running {
                info!(generation = self.board.generation(), "generation limit reached");
                self.running = false;
            }
            return false;
        }
        self.board.advance();
        true
    }

    pub fn handle_key(&mut self, code: KeyCode) -> termlife::Result<Control> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char('n') | KeyCode::Char('>') | KeyCode::Right => {
                self.step();
            }
            KeyCode::Char(' ') | KeyCode::Char('s') => {
                self.running = !self.running;
                info!(running = self.running, "start/stop");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if self.tempo.slower() {
                    debug!(interval = %self.tempo.label(), "slower");
                }
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                if self.tempo.faster() {
                    debug!(interval = %self.tempo.label(), "faster");
                }
            }
            KeyCode::Char('r') => {
                self.board.randomize(&mut self.rng, self.density)?;
                info!(population = self.board.population(), "randomized");
            }
            KeyCode::Char('c') => {
                self.board.clear();
                info!("cleared");
            }
            _ => {}
        }
        Ok(Control::Continue)
    }

    pub fn status_line(&self) -> String {
        let state = if self.at_limit() {
            "done"
        } else if self.running {
            "running"
        } else {
            "paused"
        };
        format!(
            " gen {} | pop {} | {} | {} | [n] step  [space] start/stop  [+/-] slower/faster  [r] random  [c] clear  [q] quit ",
            self.board.generation(),
            self.board.population(),
            self.tempo.label(),
            state,
        )
    }

    /// Drive the simulation until the user quits. The terminal must already
    /// be in raw mode on the alternate screen.
    pub fn run<W: Write>(
        &mut self,
        out: &mut W,
        render_mode: RenderMode,
        color_mode: ColorMode,
        show_status: bool,
    ) -> io::Result<()> {
        let mut last_step = Instant::now();
        let mut redraw = true;

        loop {
            let timeout = if self.is_running() {
                self.tempo().interval().saturating_sub(last_step.elapsed())
            } else {
                IDLE_POLL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Resize(..) => {
                        out.write_all(b"\x1b[2J")?;
                        redraw = true;
                    }
                    Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        ..
                    }) => {
                        let was_running = self.running;
                        if self.handle_key(code)? == Control::Quit {
                            info!(generation = self.board.generation(), "quit");
                            return Ok(());
                        }
                        if self.running && !was_running {
                            last_step = Instant::now();
                        }
                        redraw = true;
                    }
                    _ => {}
                }
            }

            if self.is_running() && last_step.elapsed() >= self.tempo().interval() {
                self.step();
                last_step = Instant::now();
                redraw = true;
            }

            if redraw {
                self.draw(out, render_mode, color_mode, show_status)?;
                redraw = false;
            }
        }
    }

    fn draw<W: Write>(
        &self,
        out: &mut W,
        render_mode: RenderMode,
        color_mode: ColorMode,
        show_status: bool,
    ) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Ok(());
        }
        let board_rows = if show_status { rows - 1 } else { rows };
        let view = Viewport {
            cols: cols as usize,
            rows: board_rows as usize,
        };

        // Build entire frame into buffer before flushing
        out.write_all(b"\x1b[H")?;
        out.write_all(render::render(&self.board, view, render_mode, color_mode).as_bytes())?;

        if show_status {
            let w = cols as usize;
            let truncated: String = self.status_line().chars().take(w).collect();
            write!(out, "\x1b[{};1H\x1b[7m{:<width$}\x1b[0m", rows, truncated, width = w)?;
        }
        out.flush()
    }
}

/// Print `generations` frames of the board as plain text, advancing and
/// sleeping `interval` between frames.
pub fn run_plain<W: Write>(out: &mut W, board: &mut Board, generations: u64, interval: Duration) -> io::Result<()> {
    for i in 0..generations {
        out.write_all(render::plain(board).as_bytes())?;
        out.flush()?;
        board.advance();
        if i + 1 < generations && !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn player(running: bool, limit: Option<u64>) -> Player {
        let mut board = Board::new(5, 5).unwrap();
        // blinker
        for c in 1..4 {
            board.set(2, c, true);
        }
        Player::new(
            board,
            StdRng::seed_from_u64(9),
            0.3,
            Tempo::default(),
            running,
            limit,
        )
    }

    #[test]
    fn test_step_key_advances() {
        let mut p = player(false, None);
        assert_eq!(p.handle_key(KeyCode::Char('n')).unwrap(), Control::Continue);
        assert_eq!(p.board().generation(), 1);
        assert!(p.board().is_alive(1, 2));
        p.handle_key(KeyCode::Right).unwrap();
        assert_eq!(p.board().generation(), 2);
        assert!(p.board().is_alive(2, 1));
    }

    #[test]
    fn test_toggle_running() {
        let mut p = player(false, None);
        p.handle_key(KeyCode::Char(' ')).unwrap();
        assert!(p.is_running());
        p.handle_key(KeyCode::Char('s')).unwrap();
        assert!(!p.is_running());
    }

    #[test]
    fn test_speed_keys() {
        let mut p = player(false, None);
        p.handle_key(KeyCode::Char('+')).unwrap();
        p.handle_key(KeyCode::Char('+')).unwrap();
        assert_eq!(p.tempo().interval(), Duration::from_millis(300));
        p.handle_key(KeyCode::Char('-')).unwrap();
        assert_eq!(p.tempo().interval(), Duration::from_millis(200));
        for _ in 0..5 {
            p.handle_key(KeyCode::Char('-')).unwrap();
        }
        assert_eq!(p.tempo().interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_clear_and_randomize() {
        let mut p = player(false, None);
        p.handle_key(KeyCode::Char('n')).unwrap();
        p.handle_key(KeyCode::Char('c')).unwrap();
        assert_eq!(p.board().population(), 0);
        assert_eq!(p.board().generation(), 0);

        let mut full = Player::new(
            Board::new(4, 6).unwrap(),
            StdRng::seed_from_u64(1),
            1.0,
            Tempo::default(),
            false,
            None,
        );
        full.handle_key(KeyCode::Char('r')).unwrap();
        assert_eq!(full.board().population(), 24);
    }

    #[test]
    fn test_quit_keys() {
        let mut p = player(true, None);
        assert_eq!(p.handle_key(KeyCode::Char('q')).unwrap(), Control::Quit);
        assert_eq!(p.handle_key(KeyCode::Esc).unwrap(), Control::Quit);
        assert_eq!(p.handle_key(KeyCode::Char('z')).unwrap(), Control::Continue);
    }

    #[test]
    fn test_limit_stops_running() {
        let mut p = player(true, Some(2));
        assert!(p.step());
        assert!(p.step());
        assert!(!p.step());
        assert!(!p.is_running());
        assert_eq!(p.board().generation(), 2);
        assert!(p.status_line().contains("done"));
    }

    #[test]
    fn test_status_line() {
        let p = player(false, None);
        let status = p.status_line();
        assert!(status.starts_with(" gen 0 | pop 3 | 100ms | paused |"), "{status}");
    }

    #[test]
    fn test_run_plain() {
        let mut board = Board::new(3, 3).unwrap();
        for c in 0..3 {
            board.set(1, c, true);
        }
        let mut out = Vec::new();
        run_plain(&mut out, &mut board, 2, Duration::ZERO).unwrap();
        let text = String::from_utf8(out).unwrap();
        // On a 3x3 torus the blinker fills the board, then overcrowding kills it
        assert_eq!(text, " . . .\n X X X\n . . .\n\n X X X\n X X X\n X X X\n\n");
        assert_eq!(board.generation(), 2);
        assert_eq!(board.population(), 0);
    }
}
