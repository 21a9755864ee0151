//! Front-ends: a line-mode loop and a full-screen chat screen

pub mod colors;
pub mod repl;
pub mod state;
pub mod terminal;

pub use repl::run_repl;
pub use state::{ChatUI, LogEntry, Speaker, Status};
