//! Terminal teardown for the page.

use std::io;

use crossterm::{execute, terminal};

/// Runs `restore` when dropped, including while unwinding from a panic.
pub struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)()
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
}

/// Restore the terminal before the default panic message is printed, so the
/// message lands on the normal screen.
pub fn install_panic_restore() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn restores_on_scope_exit() {
        let calls = AtomicUsize::new(0);
        {
            let _guard = RestoreGuard::new(|| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restores_when_setup_fails_early() {
        let calls = AtomicUsize::new(0);
        let setup = || -> io::Result<()> {
            let _guard = RestoreGuard::new(|| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
            Err(io::Error::other("terminal unavailable"))
        };
        assert!(setup().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restores_while_unwinding() {
        let calls = AtomicUsize::new(0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = RestoreGuard::new(|| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
