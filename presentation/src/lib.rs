//! Presentation layer for debate-coach
//!
//! This crate is a thin consumer of the core: it renders whatever
//! [`coach_domain::CoachState`] the controller produces and feeds user
//! actions back in. It carries no behavioral contracts of its own.

pub mod cli;
pub mod console;
pub mod repl;

// Re-export commonly used types
pub use cli::Cli;
pub use console::ConsoleFormatter;
pub use repl::ChatRepl;
