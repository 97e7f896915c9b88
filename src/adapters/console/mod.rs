//! Console adapter - interactive intake over a line-oriented terminal.
//!
//! Reads one input per line, prints each reply and, when a report is
//! produced, prints it and optionally saves it as Markdown.

mod repl;

pub use repl::{run_console, ConsoleOptions, EXIT_WORDS};
