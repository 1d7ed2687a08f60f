//! CLI commands.
//!
//! - [`browse`] - One-shot catalog listing, detail and search
//! - [`shell`] - Interactive session loop

pub mod browse;
pub mod shell;
