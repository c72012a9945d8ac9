//! stdin/stderr implementations of the dialog and routing seams.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use qwenht_client::Navigator;

use crate::Notifier;

pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(&self, message: &str) -> Option<String> {
        eprint!("{message} ");
        io::stderr().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.read_line(&format!("{message} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn prompt(&self, message: &str) -> Option<String> {
        self.read_line(message)
    }
}

/// There is no screen to switch; the last target is kept and reported.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<String>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.last.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigate");
        if path == qwenht_auth::LOGIN_ROUTE {
            eprintln!("Session ended; run `qwenht login` to sign in again.");
        }
        *self.last.lock().unwrap_or_else(|p| p.into_inner()) = Some(path.to_string());
    }
}
