//! Command-line front end for the robonav search crates.
//!
//! The binaries stay thin: argument parsing lives in [`cli`], map lookup in
//! [`maps`] and output formatting in [`report`], so all of it is testable
//! without spawning a process.

pub mod cli;
pub mod error;
pub mod maps;
pub mod report;

pub use cli::{Cli, run};
pub use error::CliError;
