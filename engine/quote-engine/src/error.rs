//! Error types for the quote engine

use thiserror::Error;

/// Result type for quote engine operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors that can occur while pricing or validating a rental
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Invalid duration: end {end} is not after start {start}")]
    InvalidDuration { start: u64, end: u64 },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid listing: {0}")]
    InvalidListing(String),

    #[error("Duration {duration}s outside allowed range {min}s..={max}s")]
    DurationOutOfBounds { duration: u64, min: u64, max: u64 },

    #[error("Listing is not active: {0}")]
    ListingInactive(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl QuoteError {
    /// True for failures the caller can fix by changing its input
    pub fn is_input_error(&self) -> bool {
        !matches!(self, QuoteError::Configuration(_) | QuoteError::ListingNotFound(_))
    }
}
