//! Terminal front-end (`qwenht` binary).

pub mod args;
pub mod commands;
pub mod console;

pub use args::{Cli, Command, UsersCommand};
pub use commands::run;
pub use console::{TerminalNavigator, TerminalNotifier};
