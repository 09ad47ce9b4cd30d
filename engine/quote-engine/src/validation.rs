//! Validation of owner-entered listing drafts before create/update calls

use crate::amount::{parse_ether, Wei};
use crate::config::QuoteConfig;
use crate::types::{Address, Listing, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Form field a validation message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListingField {
    NftAddress,
    TokenId,
    PricePerSecond,
    MinDuration,
    MaxDuration,
    Deposit,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingField::NftAddress => "nft_address",
            ListingField::TokenId => "token_id",
            ListingField::PricePerSecond => "price_per_second",
            ListingField::MinDuration => "min_duration",
            ListingField::MaxDuration => "max_duration",
            ListingField::Deposit => "deposit",
        };
        f.write_str(name)
    }
}

/// All field errors found in one pass over a draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ListingField, String>,
}

impl ValidationErrors {
    fn set(&mut self, field: ListingField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: ListingField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ListingField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, msg)| format!("{field}: {msg}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw listing form input, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub nft_address: String,
    pub token_id: String,
    /// Ether per second, decimal
    pub price_per_second: String,
    /// Seconds
    pub min_duration: String,
    /// Seconds
    pub max_duration: String,
    /// Ether, decimal; empty means no deposit
    pub deposit: String,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            nft_address: String::new(),
            token_id: String::new(),
            price_per_second: String::new(),
            min_duration: "3600".to_string(),
            max_duration: "86400".to_string(),
            deposit: "0".to_string(),
        }
    }
}

impl ListingDraft {
    /// Prefill from an existing listing for the edit form
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            nft_address: listing.nft_address.to_string(),
            token_id: listing.token_id.to_string(),
            price_per_second: listing.price_per_second.format_ether(18),
            min_duration: listing.min_duration.to_string(),
            max_duration: listing.max_duration.to_string(),
            deposit: listing.deposit.format_ether(18),
        }
    }

    /// Validate every field, returning contract call arguments or all errors
    pub fn validate(&self, config: &QuoteConfig) -> Result<ListingParams, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let nft_address = if self.nft_address.is_empty() {
            errors.set(ListingField::NftAddress, "NFT contract address is required");
            None
        } else {
            match self.nft_address.parse::<Address>() {
                Ok(address) => Some(address),
                Err(_) => {
                    errors.set(ListingField::NftAddress, "Invalid Ethereum address format");
                    None
                }
            }
        };

        let token_id = if self.token_id.trim().is_empty() {
            errors.set(ListingField::TokenId, "Token ID is required");
            None
        } else {
            match self.token_id.trim().parse::<TokenId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.set(ListingField::TokenId, "Token ID must be a valid number");
                    None
                }
            }
        };

        let price_per_second = if self.price_per_second.trim().is_empty() {
            errors.set(ListingField::PricePerSecond, "Price per second is required");
            None
        } else {
            match parse_ether(&self.price_per_second) {
                Ok(price) if !price.is_zero() => Some(price),
                _ => {
                    errors.set(ListingField::PricePerSecond, "Price must be a positive number");
                    None
                }
            }
        };

        let min_duration = self.min_duration.trim().parse::<u64>().ok();
        let max_duration = self.max_duration.trim().parse::<u64>().ok();

        match min_duration {
            Some(min) if min >= config.min_listing_duration => {}
            _ => errors.set(
                ListingField::MinDuration,
                format!(
                    "Minimum duration must be at least {} seconds",
                    config.min_listing_duration
                ),
            ),
        }

        match (min_duration, max_duration) {
            (_, Some(max)) if max > config.max_listing_duration => errors.set(
                ListingField::MaxDuration,
                format!("Maximum duration cannot exceed {} seconds", config.max_listing_duration),
            ),
            (Some(min), Some(max)) if max >= min => {}
            (None, Some(_)) => {}
            _ => errors.set(
                ListingField::MaxDuration,
                "Maximum duration must be greater than minimum duration",
            ),
        }

        let deposit = if self.deposit.trim().is_empty() {
            Some(Wei::zero())
        } else {
            match parse_ether(&self.deposit) {
                Ok(deposit) => Some(deposit),
                Err(_) => {
                    errors.set(ListingField::Deposit, "Deposit must be a valid number");
                    None
                }
            }
        };

        match (nft_address, token_id, price_per_second, min_duration, max_duration, deposit) {
            (Some(nft_address), Some(token_id), Some(price_per_second), Some(min), Some(max), Some(deposit))
                if errors.is_empty() =>
            {
                Ok(ListingParams {
                    nft_address,
                    token_id,
                    price_per_second,
                    min_duration: min,
                    max_duration: max,
                    deposit,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validated arguments for `createListing` / `updateListing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    pub nft_address: Address,
    pub token_id: TokenId,
    pub price_per_second: Wei,
    pub min_duration: u64,
    pub max_duration: u64,
    pub deposit: Wei,
}
