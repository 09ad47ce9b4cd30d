use crate::amount::Wei;
use crate::config::QuoteConfig;
use crate::error::{QuoteError, Result};
use crate::types::{Listing, RentalCost, Timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Platform fee is `cost / PLATFORM_FEE_DIVISOR` (5%), truncated toward zero
pub const PLATFORM_FEE_DIVISOR: u64 = 20;

/// Price a rental of `[start, end)` at `price_per_second`
///
/// `end` must be strictly after `start`. Cost is the exact product of rate
/// and duration, the fee truncates, and the deposit is added unchanged.
pub fn compute_quote(
    price_per_second: Wei,
    start: Timestamp,
    end: Timestamp,
    deposit: Wei,
) -> Result<RentalCost> {
    if end <= start {
        return Err(QuoteError::InvalidDuration { start, end });
    }
    let duration = end - start;

    let cost = price_per_second.checked_mul_secs(duration)?;
    let fee = cost.div_floor(PLATFORM_FEE_DIVISOR);
    let total = cost.checked_add(fee)?.checked_add(deposit)?;

    Ok(RentalCost { duration, cost, fee, deposit, total })
}

/// Price of holding a subscription tier for `seconds`
pub fn subscription_cost(price_per_second: Wei, seconds: u64) -> Result<Wei> {
    if seconds == 0 {
        return Err(QuoteError::InvalidDuration { start: 0, end: 0 });
    }
    price_per_second.checked_mul_secs(seconds)
}

/// A user-selected rental interval in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl RentalWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Window starting at `start` and lasting `seconds`
    pub fn starting_at(start: Timestamp, seconds: u64) -> Self {
        Self { start, end: start.saturating_add(seconds) }
    }

    /// Build from wall-clock instants, dropping sub-second precision
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let to_secs = |dt: DateTime<Utc>| {
            u64::try_from(dt.timestamp()).map_err(|_| QuoteError::InvalidDuration {
                start: 0,
                end: 0,
            })
        };
        Ok(Self { start: to_secs(start)?, end: to_secs(end)? })
    }

    /// Length in seconds, zero when the window is empty or inverted
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Check a window against the listing's rentable duration range
pub fn validate_window(listing: &Listing, window: &RentalWindow) -> Result<()> {
    if window.end <= window.start {
        return Err(QuoteError::InvalidDuration { start: window.start, end: window.end });
    }
    let duration = window.duration();
    if duration < listing.min_duration || duration > listing.max_duration {
        return Err(QuoteError::DurationOutOfBounds {
            duration,
            min: listing.min_duration,
            max: listing.max_duration,
        });
    }
    Ok(())
}

/// Validate the window for an active listing and price it
pub fn quote_listing(listing: &Listing, window: &RentalWindow) -> Result<RentalCost> {
    if !listing.active {
        return Err(QuoteError::ListingInactive(listing.id()));
    }
    validate_window(listing, window)?;
    listing.quote(window.start, window.end)
}

/// Quote calculator carrying display configuration
pub struct QuoteCalculator {
    config: QuoteConfig,
}

impl QuoteCalculator {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Price any positive-length interval, ignoring the listing's duration range
    pub fn quote(&self, listing: &Listing, window: &RentalWindow) -> Result<RentalCost> {
        let result = listing.quote(window.start, window.end);
        self.trace(listing, &result);
        result
    }

    /// Price an interval the listing contract would accept
    pub fn quote_checked(&self, listing: &Listing, window: &RentalWindow) -> Result<RentalCost> {
        let result = quote_listing(listing, window);
        self.trace(listing, &result);
        result
    }

    pub fn subscription_cost(&self, price_per_second: Wei, seconds: u64) -> Result<Wei> {
        subscription_cost(price_per_second, seconds)
    }

    /// Format an amount with the configured number of decimals
    pub fn display(&self, amount: Wei) -> String {
        format!("{} ETH", amount.format_ether(self.config.display_decimals))
    }

    fn trace(&self, listing: &Listing, result: &Result<RentalCost>) {
        match result {
            Ok(cost) => debug!(
                listing = %listing.id(),
                duration = cost.duration,
                cost = %cost.cost,
                fee = %cost.fee,
                total = %cost.total,
                "Computed rental quote"
            ),
            Err(e) => warn!(listing = %listing.id(), error = %e, "Rejected rental quote"),
        }
    }
}

impl Default for QuoteCalculator {
    fn default() -> Self {
        Self::new(QuoteConfig::default())
    }
}
