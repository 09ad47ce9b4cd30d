//! # Quote Engine
//!
//! Pricing and query logic for the NFT rental marketplace. Listings, rentals
//! and memberships are read from the rental contracts by the caller; this
//! crate turns them into cost breakdowns, filtered listing sets and display
//! strings. Everything here is synchronous and free of shared state.
//!
//! Amounts are [`Wei`] values backed by 256-bit integers, so 18-decimal
//! prices multiplied by long durations never overflow silently.

pub mod amount;
pub mod config;
pub mod duration;
pub mod error;
pub mod filter;
pub mod quote;
pub mod rentals;
pub mod subscription;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use amount::{parse_ether, Wei, ETHER_DECIMALS};
pub use config::QuoteConfig;
pub use duration::{
    format_countdown, format_duration, format_hours_minutes, format_time_remaining, DURATION_PRESETS,
};
pub use error::{QuoteError, Result};
pub use filter::{active_only, featured, filter_listings, find_listing, unique_collections};
pub use quote::{
    compute_quote, quote_listing, subscription_cost, validate_window, QuoteCalculator, RentalWindow,
    PLATFORM_FEE_DIVISOR,
};
pub use rentals::{outstanding_deposits, partition_rentals};
pub use subscription::{default_tiers, find_tier, MembershipStatus, SubscriptionTier};
pub use types::{Address, Listing, ListingFilters, Rental, RentalCost, Timestamp, TokenId};
pub use validation::{ListingDraft, ListingField, ListingParams, ValidationErrors};

/// Current version of the quote engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
