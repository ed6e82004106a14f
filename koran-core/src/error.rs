//! Errors raised while configuring an extraction.
//!
//! Extraction itself never fails once configured; malformed pages and blocks
//! surface as diagnostics instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KoranError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid numeric locale: thousands '{thousands}', decimal '{decimal}'")]
    InvalidLocale { thousands: char, decimal: char },

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, KoranError>;
