//! CLI module - argument parsing, interactive prompts and subcommand runners

mod args;
mod commands;
mod prompts;

pub use args::*;
pub use commands::*;
pub use prompts::*;
