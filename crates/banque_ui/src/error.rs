//! # UI Error Types
//!
//! All errors that can occur while configuring or driving the page.
//!
//! None of these are raised by timer callbacks: a selector that matches nothing
//! is a no-op, and locales are validated when the formatter is built.

use thiserror::Error;

/// Errors that can occur in the page driver.
#[derive(Error, Debug)]
pub enum UiError {
    /// Selector text could not be parsed.
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        /// The selector as written.
        selector: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Locale tag is not known to the formatter.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// No element with this id exists in the document.
    #[error("element not found: {0}")]
    UnknownElement(u64),

    /// The content-loaded signal was delivered more than once.
    #[error("content-loaded already handled")]
    AlreadyLoaded,

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for UiError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for page driver operations.
pub type UiResult<T> = Result<T, UiError>;
