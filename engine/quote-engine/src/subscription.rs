//! Subscription tiers and membership status

use crate::amount::Wei;
use crate::duration::format_time_remaining;
use crate::error::Result;
use crate::quote::subscription_cost;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// A subscription level granting time-boxed access to gated features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionTier {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price_per_second: Wei,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
}

impl SubscriptionTier {
    pub fn cost_for(&self, seconds: u64) -> Result<Wei> {
        subscription_cost(self.price_per_second, seconds)
    }
}

/// Membership of one account in one tier, as read from the pass contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStatus {
    pub tier_id: u64,
    pub is_active: bool,
    /// Expiry in unix seconds; zero when never purchased
    pub active_until: Timestamp,
}

impl MembershipStatus {
    pub fn inactive(tier_id: u64) -> Self {
        Self { tier_id, is_active: false, active_until: 0 }
    }

    pub fn time_remaining(&self, now: Timestamp) -> String {
        format_time_remaining(self.active_until, now)
    }
}

fn tier(id: u64, name: &str, description: &str, wei_per_second: u64, features: &[&str]) -> SubscriptionTier {
    SubscriptionTier {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price_per_second: Wei::new(wei_per_second),
        features: features.iter().map(|f| f.to_string()).collect(),
        popular: false,
    }
}

/// Tier catalogue offered by the marketplace
pub fn default_tiers() -> Vec<SubscriptionTier> {
    vec![
        tier(
            1,
            "Basic",
            "Access to basic features",
            1_000_000_000_000_000, // 0.001 ETH/s
            &["Basic NFT browsing", "Standard support", "Community access"],
        ),
        SubscriptionTier {
            popular: true,
            ..tier(
                2,
                "Pro",
                "Advanced features for power users",
                5_000_000_000_000_000, // 0.005 ETH/s
                &["All Basic features", "Priority support", "Advanced analytics", "API access"],
            )
        },
        tier(
            3,
            "Enterprise",
            "Full access with premium support",
            10_000_000_000_000_000, // 0.01 ETH/s
            &["All Pro features", "Dedicated support", "Custom integrations", "White-label options"],
        ),
    ]
}

pub fn find_tier(tiers: &[SubscriptionTier], id: u64) -> Option<&SubscriptionTier> {
    tiers.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let tiers = default_tiers();
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers.iter().filter(|t| t.popular).count(), 1);
        assert_eq!(find_tier(&tiers, 2).map(|t| t.name.as_str()), Some("Pro"));
        assert!(find_tier(&tiers, 4).is_none());
    }

    #[test]
    fn test_tier_cost() {
        let tiers = default_tiers();
        let pro = find_tier(&tiers, 2).unwrap();
        // 0.005 ETH/s for a day
        assert_eq!(pro.cost_for(86_400).unwrap(), Wei::from(432_000_000_000_000_000_000u128));
        assert!(pro.cost_for(0).is_err());
    }

    #[test]
    fn test_membership_time_remaining() {
        let now = 1_700_000_000;
        assert_eq!(MembershipStatus::inactive(1).time_remaining(now), "N/A");

        let status = MembershipStatus { tier_id: 1, is_active: true, active_until: now + 7_200 };
        assert_eq!(status.time_remaining(now), "2h 0m remaining");
    }
}
