//! Listing, rental and quote records mirrored from the rental contracts

use crate::amount::Wei;
use crate::error::{QuoteError, Result};
use crate::quote::compute_quote;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub type TokenId = u64;
pub type Timestamp = u64;

/// A 20-byte account or contract address in `0x`-prefixed hex form
///
/// The original casing is kept for display; equality ignores case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(value: &str) -> bool {
        match value.strip_prefix("0x") {
            Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => false,
        }
    }
}

impl FromStr for Address {
    type Err = QuoteError;

    fn from_str(value: &str) -> Result<Self> {
        if Self::is_valid(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(QuoteError::InvalidAddress(value.to_string()))
        }
    }
}

impl TryFrom<String> for Address {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(QuoteError::InvalidAddress(value))
        }
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An NFT offered for time-bounded rental at a per-second price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub nft_address: Address,
    pub token_id: TokenId,
    pub owner: Address,
    pub price_per_second: Wei,
    /// Shortest rentable period in seconds
    pub min_duration: u64,
    /// Longest rentable period in seconds
    pub max_duration: u64,
    #[serde(default)]
    pub deposit: Wei,
    pub active: bool,
    #[serde(default)]
    pub nonce: u64,

    // Display metadata, read from the NFT contract when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl Listing {
    /// Listing key used by the marketplace: `{nft_address}-{token_id}`
    pub fn id(&self) -> String {
        format!("{}-{}", self.nft_address, self.token_id)
    }

    pub fn is_for(&self, nft_address: &Address, token_id: TokenId) -> bool {
        self.nft_address == *nft_address && self.token_id == token_id
    }

    pub fn price_per_hour(&self) -> Result<Wei> {
        self.price_per_second.checked_mul_secs(3600)
    }

    /// Check the invariants the listing contract enforces on create/update
    pub fn check_invariants(&self) -> Result<()> {
        if self.price_per_second.is_zero() {
            return Err(QuoteError::InvalidListing(format!("{}: price per second is zero", self.id())));
        }
        if self.min_duration > self.max_duration {
            return Err(QuoteError::InvalidListing(format!(
                "{}: min duration {} exceeds max duration {}",
                self.id(),
                self.min_duration,
                self.max_duration
            )));
        }
        Ok(())
    }

    /// Price the interval `[start, end)` against this listing's rate and deposit
    pub fn quote(&self, start: Timestamp, end: Timestamp) -> Result<RentalCost> {
        compute_quote(self.price_per_second, start, end, self.deposit)
    }
}

/// Optional predicates narrowing a listing collection for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilters {
    /// Exact, case-sensitive collection name
    pub collection: Option<String>,
    /// Inclusive lower bound on price per second
    pub min_price: Option<Wei>,
    /// Inclusive upper bound on price per second
    pub max_price: Option<Wei>,
}

impl ListingFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn min_price(mut self, price: Wei) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Wei) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(collection) = &self.collection {
            if listing.collection.as_deref() != Some(collection.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price_per_second < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price_per_second > max {
                return false;
            }
        }
        true
    }
}

/// Monetary breakdown of a rental quote; derived, never stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalCost {
    /// Rental length in seconds
    pub duration: u64,
    pub cost: Wei,
    pub fee: Wei,
    pub deposit: Wei,
    pub total: Wei,
}

/// A past or ongoing rental as reported by the rental manager contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: u64,
    pub renter: Address,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Amount paid for the rental period
    pub amount: Wei,
    pub deposit: Wei,
    pub finalized: bool,
    pub nft_address: Address,
    pub token_id: TokenId,
}

impl Rental {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.end > now && !self.finalized
    }

    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const APES: &str = "0x1234567890123456789012345678901234567890";
    pub const PUNKS: &str = "0x9876543210987654321098765432109876543210";
    pub const OWNER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

    pub fn listing(nft: &str, token_id: TokenId, price: u64, collection: &str) -> Listing {
        Listing {
            nft_address: nft.parse().unwrap(),
            token_id,
            owner: OWNER.parse().unwrap(),
            price_per_second: Wei::new(price),
            min_duration: 3600,
            max_duration: 86400,
            deposit: Wei::new(100_000_000_000_000_000),
            active: true,
            nonce: 1,
            name: Some(format!("{collection} #{token_id}")),
            description: None,
            image: None,
            collection: Some(collection.to_string()),
        }
    }

    pub fn sample_listings() -> Vec<Listing> {
        vec![
            listing(APES, 1, 1_000_000_000_000, "Cosmic Apes"),
            listing(APES, 2, 2_000_000_000_000, "Digital Dragons"),
            listing(PUNKS, 1, 500_000_000_000, "Pixel Punks"),
            listing(PUNKS, 2, 1_500_000_000_000, "Cosmic Apes"),
        ]
    }
}
