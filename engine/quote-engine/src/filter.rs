//! Listing queries used by the browse and asset views

use crate::error::{QuoteError, Result};
use crate::types::{Address, Listing, ListingFilters, TokenId};

/// Keep the listings matching every set predicate, preserving input order
pub fn filter_listings(listings: &[Listing], filters: &ListingFilters) -> Vec<Listing> {
    if filters.is_empty() {
        return listings.to_vec();
    }
    listings.iter().filter(|l| filters.matches(l)).cloned().collect()
}

/// Distinct collection names in first-seen order
pub fn unique_collections(listings: &[Listing]) -> Vec<String> {
    let mut collections: Vec<String> = Vec::new();
    for collection in listings.iter().filter_map(|l| l.collection.as_ref()) {
        if !collections.contains(collection) {
            collections.push(collection.clone());
        }
    }
    collections
}

pub fn find_listing<'a>(
    listings: &'a [Listing],
    nft_address: &Address,
    token_id: TokenId,
) -> Result<&'a Listing> {
    listings
        .iter()
        .find(|l| l.is_for(nft_address, token_id))
        .ok_or_else(|| QuoteError::ListingNotFound(format!("{nft_address}-{token_id}")))
}

/// The first `limit` listings, as shown on the landing page
pub fn featured(listings: &[Listing], limit: usize) -> &[Listing] {
    &listings[..limit.min(listings.len())]
}

pub fn active_only(listings: &[Listing]) -> Vec<Listing> {
    listings.iter().filter(|l| l.active).cloned().collect()
}
