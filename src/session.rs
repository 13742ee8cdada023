//! Terminal ownership for the lifetime of the UI
//!
//! [`TerminalSession::enter`] switches to raw mode and the alternate screen. The
//! terminal is put back when the session is finished or dropped, so an error or
//! panic between setup and teardown never leaves the shell in raw mode.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

type Restore = Box<dyn FnMut() -> io::Result<()>>;

pub struct TerminalSession {
    restore: Option<Restore>,
}

impl TerminalSession {
    /// Raw mode, alternate screen, mouse capture, hidden cursor
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on a failed step still restores on drop
        let session = Self::with_restore(restore_terminal);
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(session)
    }

    pub(crate) fn with_restore(restore: impl FnMut() -> io::Result<()> + 'static) -> Self {
        Self {
            restore: Some(Box::new(restore)),
        }
    }

    /// Restore the terminal now and report the outcome
    pub fn finish(mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(e) = restore() {
                tracing::warn!("Failed to restore terminal: {}", e);
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting() -> (TerminalSession, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let session = TerminalSession::with_restore(move || {
            seen.set(seen.get() + 1);
            Ok(())
        });
        (session, calls)
    }

    #[test]
    fn test_early_error_still_restores() {
        let (session, calls) = counting();
        let run = move || -> anyhow::Result<()> {
            let _session = session;
            let size: Result<(u16, u16), io::Error> =
                Err(io::Error::new(io::ErrorKind::Other, "no size"));
            size?;
            Ok(())
        };
        assert!(run().is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_finish_restores_once() {
        let (session, calls) = counting();
        session.finish().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_finish_reports_restore_failure() {
        let session = TerminalSession::with_restore(|| Err(io::Error::new(io::ErrorKind::Other, "tty gone")));
        assert!(session.finish().is_err());
    }
}
