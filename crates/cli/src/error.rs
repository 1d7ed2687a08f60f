//! CLI error type.

use mini_store_storefront::{AppError, CatalogError, CheckoutError, ConfigError};
use thiserror::Error;

use crate::commands::shell::ShellError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message shown to the user in place of the raw error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Shell(err) => err.to_string(),
            Self::Io(err) => err.to_string(),
        }
    }

    /// Whether this should be reported as an error rather than user feedback.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::App(err) => err.is_server_error(),
            Self::Shell(_) => false,
            Self::Io(_) => true,
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::App(err.into())
    }
}

impl From<CheckoutError> for CliError {
    fn from(err: CheckoutError) -> Self {
        Self::App(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::App(err.into())
    }
}
