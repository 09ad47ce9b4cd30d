//! Property tests for quote arithmetic and listing filters

use crate::types::fixtures::listing;
use crate::{compute_quote, filter_listings, format_duration, Listing, ListingFilters, Wei};
use primitive_types::U256;
use proptest::prelude::*;

const ADDRESSES: [&str; 2] = [
    "0x1234567890123456789012345678901234567890",
    "0x9876543210987654321098765432109876543210",
];
const COLLECTIONS: [&str; 3] = ["Cosmic Apes", "Digital Dragons", "Pixel Punks"];

fn wei_strategy() -> impl Strategy<Value = Wei> {
    any::<u128>().prop_map(Wei::from)
}

fn listing_strategy() -> impl Strategy<Value = Listing> {
    (0usize..2, 0u64..1_000, 1u64..5_000_000_000_000, 0usize..3).prop_map(|(a, token, price, c)| {
        listing(ADDRESSES[a], token, price, COLLECTIONS[c])
    })
}

fn filters_strategy() -> impl Strategy<Value = ListingFilters> {
    (
        proptest::option::of(0usize..3),
        proptest::option::of(0u64..5_000_000_000_000),
        proptest::option::of(0u64..5_000_000_000_000),
    )
        .prop_map(|(c, min, max)| ListingFilters {
            collection: c.map(|i| COLLECTIONS[i].to_string()),
            min_price: min.map(Wei::new),
            max_price: max.map(Wei::new),
        })
}

proptest! {
    #[test]
    fn cost_is_exact_product(price in wei_strategy(), start in 0u64..u32::MAX as u64, len in 1u64..10_000_000) {
        let quote = compute_quote(price, start, start + len, Wei::zero()).unwrap();
        prop_assert_eq!(quote.duration, len);
        prop_assert_eq!(quote.cost.as_u256(), price.as_u256() * U256::from(len));
    }

    #[test]
    fn fee_is_floor_of_cost_over_twenty(price in wei_strategy(), len in 1u64..10_000_000) {
        let quote = compute_quote(price, 0, len, Wei::zero()).unwrap();
        let fee = quote.fee.as_u256();
        let cost = quote.cost.as_u256();
        let twenty = U256::from(20u8);
        prop_assert!(fee * twenty <= cost);
        prop_assert!(cost < (fee + U256::one()) * twenty);
    }

    #[test]
    fn total_is_cost_plus_fee_plus_deposit(price in wei_strategy(), deposit in wei_strategy(), len in 1u64..10_000_000) {
        let quote = compute_quote(price, 0, len, deposit).unwrap();
        prop_assert_eq!(quote.deposit, deposit);
        prop_assert_eq!(
            quote.total.as_u256(),
            quote.cost.as_u256() + quote.fee.as_u256() + deposit.as_u256()
        );
    }

    #[test]
    fn non_positive_windows_are_rejected(price in wei_strategy(), start in 0u64..1_000_000, back in 0u64..1_000) {
        prop_assert!(compute_quote(price, start, start.saturating_sub(back), Wei::zero()).is_err());
    }

    #[test]
    fn empty_filters_are_identity(listings in proptest::collection::vec(listing_strategy(), 0..20)) {
        prop_assert_eq!(filter_listings(&listings, &ListingFilters::default()), listings);
    }

    #[test]
    fn filtering_is_idempotent(
        listings in proptest::collection::vec(listing_strategy(), 0..20),
        filters in filters_strategy(),
    ) {
        let once = filter_listings(&listings, &filters);
        let twice = filter_listings(&once, &filters);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filtering_keeps_relative_order(
        listings in proptest::collection::vec(listing_strategy(), 0..20),
        filters in filters_strategy(),
    ) {
        let filtered = filter_listings(&listings, &filters);
        let mut cursor = listings.iter();
        for kept in &filtered {
            prop_assert!(cursor.any(|l| l == kept));
        }
        for listing in &listings {
            prop_assert_eq!(filters.matches(listing), filtered.contains(listing));
        }
    }

    #[test]
    fn format_duration_uses_one_unit(seconds in 0u64..100_000_000) {
        let text = format_duration(seconds);
        let mut parts = text.split(' ');
        let count: u64 = parts.next().unwrap().parse().unwrap();
        let unit = parts.next().unwrap();
        prop_assert!(parts.next().is_none());
        prop_assert_eq!(unit.ends_with('s'), count != 1);
    }
}
