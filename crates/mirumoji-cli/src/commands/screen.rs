use std::fmt;
use std::io::{IsTerminal, Write};

/// Transcript entry for a clear.
pub(crate) const CLEAR_MARK: &str = "<clear>";

/// Step headers and terminal clearing between steps.
///
/// Clearing is skipped with `--no-clear` or when stdout is not a terminal.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    clear: bool,
    #[cfg(test)]
    transcript: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl Screen {
    pub fn new(no_clear: bool) -> Self {
        Self {
            clear: !no_clear && std::io::stdout().is_terminal(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Headers, lines and clears seen so far, clears as [`CLEAR_MARK`].
    #[cfg(test)]
    pub(crate) fn transcript(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }

    #[cfg(test)]
    fn record(&self, entry: &dyn fmt::Display) {
        self.transcript.borrow_mut().push(entry.to_string());
    }

    #[cfg(not(test))]
    fn record(&self, _entry: &dyn fmt::Display) {}

    pub fn header(&self, title: impl fmt::Display) {
        self.record(&title);
        println!("\n--- {title} ---");
    }

    pub fn say(&self, line: impl fmt::Display) {
        self.record(&line);
        println!("{line}");
    }

    pub fn clear(&self) {
        self.record(&CLEAR_MARK);
        if !self.clear {
            return;
        }
        print!("\x1B[2J\x1B[1;1H");
        // arch-lint: allow(no-error-swallowing) reason="clearing the screen is cosmetic"
        if let Err(e) = std::io::stdout().flush() {
            tracing::warn!(error = %e, "failed to clear terminal");
        }
    }
}
