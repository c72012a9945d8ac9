//! Blocking user dialogs.

/// Alert/confirm/prompt surface of a front-end.
///
/// The browser maps these to `window.alert`/`confirm`/`prompt`; the terminal
/// to stderr and stdin.
pub trait Notifier {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    /// `None` when the user cancels.
    fn prompt(&self, message: &str) -> Option<String>;
}
