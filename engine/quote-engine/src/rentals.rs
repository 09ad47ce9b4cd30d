use crate::amount::Wei;
use crate::error::Result;
use crate::types::{Rental, Timestamp};

/// Split rentals into (active, history) at `now`, keeping input order
///
/// Active means not yet ended and not finalized; everything else is history.
pub fn partition_rentals(rentals: &[Rental], now: Timestamp) -> (Vec<Rental>, Vec<Rental>) {
    rentals.iter().cloned().partition(|r| r.is_active(now))
}

/// Deposits still held for rentals that have not been finalized
pub fn outstanding_deposits(rentals: &[Rental]) -> Result<Wei> {
    rentals
        .iter()
        .filter(|r| !r.finalized)
        .try_fold(Wei::zero(), |acc, r| acc.checked_add(r.deposit))
}
