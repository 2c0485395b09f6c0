use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};
use tracing::warn;

/// Switch for the terminal's raw input mode.
pub trait RawMode {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

/// Raw mode of the process's controlling terminal.
pub struct Crossterm;

impl RawMode for Crossterm {
    fn enable(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// Full-screen session: raw mode, alternate screen and hidden cursor.
/// All three are restored when the session is dropped.
pub struct Screen<W: Write, R: RawMode> {
    out: W,
    raw: R,
}

impl<W: Write, R: RawMode> Screen<W, R> {
    /// Enter full-screen mode. On failure whatever was already switched on
    /// is switched off again before the error is returned.
    pub fn enter(mut out: W, mut raw: R) -> io::Result<Self> {
        raw.enable()?;
        if let Err(e) = execute!(out, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = raw.disable();
            return Err(e);
        }
        Ok(Screen { out, raw })
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write, R: RawMode> Drop for Screen<W, R> {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {}", e);
        }
        if let Err(e) = self.raw.disable() {
            warn!("failed to disable raw mode: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts enable/disable calls
    #[derive(Clone, Default)]
    struct FakeRaw {
        enabled: Rc<Cell<u32>>,
        disabled: Rc<Cell<u32>>,
    }

    impl RawMode for FakeRaw {
        fn enable(&mut self) -> io::Result<()> {
            self.enabled.set(self.enabled.get() + 1);
            Ok(())
        }

        fn disable(&mut self) -> io::Result<()> {
            self.disabled.set(self.disabled.get() + 1);
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_enter_restores_raw_mode() {
        let raw = FakeRaw::default();
        let err = Screen::enter(BrokenPipe, raw.clone()).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(raw.enabled.get(), 1);
        assert_eq!(raw.disabled.get(), 1);
    }

    #[test]
    fn test_drop_leaves_screen() {
        let raw = FakeRaw::default();
        let mut screen = Screen::enter(Vec::new(), raw.clone()).unwrap();
        screen.writer().extend_from_slice(b"frame");
        assert_eq!(raw.disabled.get(), 0);
        drop(screen);
        assert_eq!(raw.enabled.get(), 1);
        assert_eq!(raw.disabled.get(), 1);
    }

    #[test]
    fn test_enter_failure_before_screen_switch() {
        struct NoTty;
        impl RawMode for NoTty {
            fn enable(&mut self) -> io::Result<()> {
                Err(io::Error::other("not a terminal"))
            }
            fn disable(&mut self) -> io::Result<()> {
                panic!("disable without enable");
            }
        }
        let mut out = Vec::new();
        assert!(Screen::enter(&mut out, NoTty).is_err());
        assert!(out.is_empty());
    }
}
