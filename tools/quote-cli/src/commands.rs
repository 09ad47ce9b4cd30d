//! # Command Line Interface
//!
//! Commands for browsing a listing snapshot, pricing rentals and checking
//! listing drafts before they are submitted on-chain.

use crate::source::{load_rentals, ListingSource};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use quote_engine::{
    active_only, default_tiers, featured, filter_listings, find_listing, format_countdown,
    format_duration, format_hours_minutes, parse_ether, partition_rentals, unique_collections,
    Address, Listing, ListingDraft, ListingFilters, QuoteCalculator, QuoteConfig, Rental,
    RentalCost, RentalWindow, DURATION_PRESETS,
};
use std::path::PathBuf;
use tracing::info;

/// Rental quote CLI for the NFT rental marketplace
#[derive(Parser)]
#[command(name = "rental-quote")]
#[command(about = "Price NFT rentals and query marketplace listings")]
#[command(version)]
pub struct Cli {
    /// Path to the listing snapshot (JSON array)
    #[arg(short, long, default_value = "./listings.json")]
    pub listings: PathBuf,

    /// Optional TOML configuration file; environment variables are used otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format (compact, pretty, json)
    #[arg(long, default_value = "compact")]
    pub log_format: String,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List listings, optionally filtered
    Listings {
        /// Exact collection name
        #[arg(long)]
        collection: Option<String>,
        /// Minimum price per second in ETH
        #[arg(long)]
        min_price: Option<String>,
        /// Maximum price per second in ETH
        #[arg(long)]
        max_price: Option<String>,
        /// Hide cancelled listings
        #[arg(long)]
        active_only: bool,
        /// Only show the featured listings
        #[arg(long)]
        featured: bool,
    },
    /// Show the distinct collections in the snapshot
    Collections,
    /// Quote the cost of renting one listing
    Quote {
        /// NFT contract address
        #[arg(long)]
        nft: String,
        /// Token ID
        #[arg(long)]
        token_id: u64,
        /// Rental start (RFC 3339), defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Rental end (RFC 3339)
        #[arg(long, conflicts_with = "hours")]
        end: Option<String>,
        /// Rental length in hours
        #[arg(long)]
        hours: Option<u64>,
        /// Skip the listing's min/max duration check
        #[arg(long)]
        unchecked: bool,
    },
    /// Show subscription tiers and their cost
    Tiers {
        /// Subscription length in seconds; shows the standard presets when omitted
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Validate a listing before creating or updating it
    ValidateListing {
        #[arg(long, default_value = "")]
        nft: String,
        #[arg(long, default_value = "")]
        token_id: String,
        /// Price per second in ETH
        #[arg(long, default_value = "")]
        price: String,
        /// Seconds
        #[arg(long, default_value = "3600")]
        min_duration: String,
        /// Seconds
        #[arg(long, default_value = "86400")]
        max_duration: String,
        /// Deposit in ETH
        #[arg(long, default_value = "0")]
        deposit: String,
    },
    /// Split a rental snapshot into active rentals and history
    Rentals {
        /// Path to the rental snapshot (JSON array)
        #[arg(long)]
        file: PathBuf,
        /// Reference time in unix seconds, defaults to now
        #[arg(long)]
        now: Option<u64>,
    },
}

/// CLI handler
pub struct CliHandler {
    source: Box<dyn ListingSource>,
    calculator: QuoteCalculator,
}

impl CliHandler {
    pub fn new(source: Box<dyn ListingSource>, config: QuoteConfig) -> Self {
        Self { source, calculator: QuoteCalculator::new(config) }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Listings { collection, min_price, max_price, active_only, featured } => {
                let filters =
                    build_filters(collection, min_price.as_deref(), max_price.as_deref())?;
                self.show_listings(&filters, active_only, featured).await?;
            }
            Commands::Collections => {
                self.show_collections().await?;
            }
            Commands::Quote { nft, token_id, start, end, hours, unchecked } => {
                let window = resolve_window(
                    start.as_deref(),
                    end.as_deref(),
                    hours,
                    Utc::now(),
                    self.calculator.config().default_min_duration,
                )?;
                self.show_quote(&nft, token_id, &window, unchecked).await?;
            }
            Commands::Tiers { seconds } => {
                self.show_tiers(seconds)?;
            }
            Commands::ValidateListing { nft, token_id, price, min_duration, max_duration, deposit } => {
                let draft = ListingDraft {
                    nft_address: nft,
                    token_id,
                    price_per_second: price,
                    min_duration,
                    max_duration,
                    deposit,
                };
                self.validate_listing(&draft)?;
            }
            Commands::Rentals { file, now } => {
                let now = match now {
                    Some(now) => now,
                    None => unix_now()?,
                };
                self.show_rentals(&load_rentals(&file).await?, now);
            }
        }
        Ok(())
    }

    async fn show_listings(&self, filters: &ListingFilters, active: bool, featured_only: bool) -> Result<()> {
        let mut listings = self.source.listings().await?;
        if active {
            listings = active_only(&listings);
        }
        if featured_only {
            listings = featured(&listings, self.calculator.config().featured_limit).to_vec();
        }
        let filtered = filter_listings(&listings, filters);
        info!("{} of {} listings match", filtered.len(), listings.len());

        println!("Listings ({} shown)", filtered.len());
        println!("{}", "=".repeat(50));
        if filtered.is_empty() {
            println!("No listings found");
        }
        for listing in &filtered {
            println!("{}", render_listing(listing, &self.calculator)?);
        }
        Ok(())
    }

    async fn show_collections(&self) -> Result<()> {
        let listings = self.source.listings().await?;
        println!("Collections");
        println!("{}", "=".repeat(50));
        for collection in unique_collections(&listings) {
            println!("{collection}");
        }
        Ok(())
    }

    async fn show_quote(&self, nft: &str, token_id: u64, window: &RentalWindow, unchecked: bool) -> Result<()> {
        let nft: Address = nft.parse()?;
        let listings = self.source.listings().await?;
        let listing = find_listing(&listings, &nft, token_id)?;

        let cost = if unchecked {
            self.calculator.quote(listing, window)?
        } else {
            self.calculator.quote_checked(listing, window)?
        };

        let title = listing.name.clone().unwrap_or_else(|| listing.id());
        println!("Quote for {title}");
        println!("{}", "=".repeat(50));
        println!("Duration      {}", format_hours_minutes(cost.duration));
        println!("{}", render_cost(&cost, &self.calculator));
        Ok(())
    }

    fn show_tiers(&self, seconds: Option<u64>) -> Result<()> {
        let durations: Vec<(String, u64)> = match seconds {
            Some(seconds) => vec![(format_duration(seconds), seconds)],
            None => DURATION_PRESETS.iter().map(|(label, secs)| (label.to_string(), *secs)).collect(),
        };

        for tier in default_tiers() {
            let marker = if tier.popular { " (popular)" } else { "" };
            println!("{}{} - {}", tier.name, marker, tier.description);
            println!("{}", "=".repeat(50));
            for feature in &tier.features {
                println!("  * {feature}");
            }
            for (label, secs) in &durations {
                let cost = tier.cost_for(*secs)?;
                println!("  {label:<10} {}", self.calculator.display(cost));
            }
            println!();
        }
        Ok(())
    }

    fn validate_listing(&self, draft: &ListingDraft) -> Result<()> {
        match draft.validate(self.calculator.config()) {
            Ok(params) => {
                println!("Listing is valid");
                println!("{}", serde_json::to_string_pretty(&params)?);
                Ok(())
            }
            Err(errors) => {
                for (field, message) in errors.iter() {
                    println!("{field}: {message}");
                }
                bail!("listing has {} invalid field(s)", errors.len())
            }
        }
    }

    fn show_rentals(&self, rentals: &[Rental], now: u64) {
        let (active, history) = partition_rentals(rentals, now);

        println!("Active rentals ({})", active.len());
        println!("{}", "=".repeat(50));
        for rental in &active {
            println!(
                "#{} {}-{} renter {} ends in {}",
                rental.id,
                rental.nft_address,
                rental.token_id,
                rental.renter,
                format_countdown(rental.end, now)
            );
        }

        println!();
        println!("Rental history ({})", history.len());
        println!("{}", "=".repeat(50));
        for rental in &history {
            let state = if rental.finalized { "finalized" } else { "expired" };
            println!(
                "#{} {}-{} renter {} paid {} ({})",
                rental.id,
                rental.nft_address,
                rental.token_id,
                rental.renter,
                self.calculator.display(rental.amount),
                state
            );
        }
    }
}

/// Build listing filters from ETH-denominated CLI bounds
pub fn build_filters(
    collection: Option<String>,
    min_price: Option<&str>,
    max_price: Option<&str>,
) -> Result<ListingFilters> {
    let mut filters = ListingFilters::new();
    filters.collection = collection;
    if let Some(min) = min_price {
        filters.min_price = Some(parse_ether(min).context("Invalid --min-price")?);
    }
    if let Some(max) = max_price {
        filters.max_price = Some(parse_ether(max).context("Invalid --max-price")?);
    }
    Ok(filters)
}

/// Turn start/end/hours arguments into a rental window
///
/// Start defaults to `now`; without an end or length the window lasts
/// `default_secs`.
pub fn resolve_window(
    start: Option<&str>,
    end: Option<&str>,
    hours: Option<u64>,
    now: DateTime<Utc>,
    default_secs: u64,
) -> Result<RentalWindow> {
    let start = match start {
        Some(s) => parse_datetime(s).context("Invalid --start")?,
        None => now,
    };

    match (end, hours) {
        (Some(_), Some(_)) => bail!("--end and --hours are mutually exclusive"),
        (Some(e), None) => {
            let end = parse_datetime(e).context("Invalid --end")?;
            Ok(RentalWindow::from_datetimes(start, end)?)
        }
        (None, Some(hours)) => Ok(RentalWindow::starting_at(unix_secs(start)?, hours.saturating_mul(3_600))),
        (None, None) => Ok(RentalWindow::starting_at(unix_secs(start)?, default_secs)),
    }
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn unix_secs(instant: DateTime<Utc>) -> Result<u64> {
    u64::try_from(instant.timestamp()).with_context(|| format!("{instant} is before the unix epoch"))
}

fn unix_now() -> Result<u64> {
    unix_secs(Utc::now())
}

pub fn render_listing(listing: &Listing, calculator: &QuoteCalculator) -> Result<String> {
    let availability = if listing.active { "Available" } else { "Unavailable" };
    Ok(format!(
        "{:<12} {:<18} {:>16}/h  min {:<7} max {:<7} deposit {}  [{}]",
        listing.name.as_deref().unwrap_or("(unnamed)"),
        listing.collection.as_deref().unwrap_or("-"),
        calculator.display(listing.price_per_hour()?),
        format_hours_minutes(listing.min_duration),
        format_hours_minutes(listing.max_duration),
        calculator.display(listing.deposit),
        availability
    ))
}

pub fn render_cost(cost: &RentalCost, calculator: &QuoteCalculator) -> String {
    [
        format!("Rental Cost   {}", calculator.display(cost.cost)),
        format!("Platform Fee  {}", calculator.display(cost.fee)),
        format!("Deposit       {}", calculator.display(cost.deposit)),
        "-".repeat(50),
        format!("Total         {}", calculator.display(cost.total)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use quote_engine::{compute_quote, Wei};

    struct StaticSource(Vec<Listing>);

    #[async_trait]
    impl ListingSource for StaticSource {
        async fn listings(&self) -> Result<Vec<Listing>> {
            Ok(self.0.clone())
        }
    }

    fn listing(token_id: u64, active: bool) -> Listing {
        Listing {
            nft_address: "0x1234567890123456789012345678901234567890".parse().unwrap(),
            token_id,
            owner: "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd".parse().unwrap(),
            price_per_second: Wei::new(1_000_000_000_000),
            min_duration: 3_600,
            max_duration: 86_400,
            deposit: Wei::new(100_000_000_000_000_000),
            active,
            nonce: 1,
            name: Some(format!("Cosmic Ape #{token_id}")),
            description: None,
            image: None,
            collection: Some("Cosmic Apes".to_string()),
        }
    }

    fn handler() -> CliHandler {
        CliHandler::new(
            Box::new(StaticSource(vec![listing(1, true), listing(2, false)])),
            QuoteConfig::default(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_build_filters() {
        let filters = build_filters(Some("Cosmic Apes".to_string()), Some("0.000001"), None).unwrap();
        assert_eq!(filters.collection.as_deref(), Some("Cosmic Apes"));
        assert_eq!(filters.min_price, Some(Wei::new(1_000_000_000_000)));
        assert!(filters.max_price.is_none());

        assert!(build_filters(None, None, Some("-1")).is_err());
        assert!(build_filters(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_window_defaults() {
        let window = resolve_window(None, None, None, now(), 3_600).unwrap();
        assert_eq!(window, RentalWindow::new(1_700_000_000, 1_700_003_600));

        let window = resolve_window(None, None, Some(2), now(), 3_600).unwrap();
        assert_eq!(window.duration(), 7_200);
    }

    #[test]
    fn test_resolve_window_explicit() {
        let window = resolve_window(
            Some("2024-01-01T00:00:00Z"),
            Some("2024-01-01T01:30:00+00:00"),
            None,
            now(),
            3_600,
        )
        .unwrap();
        assert_eq!(window.start, 1_704_067_200);
        assert_eq!(window.duration(), 5_400);

        assert!(resolve_window(Some("yesterday"), None, None, now(), 3_600).is_err());
        assert!(resolve_window(None, Some("2024-01-01T00:00:00Z"), Some(1), now(), 3_600).is_err());
    }

    #[test]
    fn test_render_cost() {
        let cost = compute_quote(
            Wei::new(1_000_000_000_000),
            0,
            3_600,
            Wei::new(100_000_000_000_000_000),
        )
        .unwrap();
        let text = render_cost(&cost, &QuoteCalculator::default());
        assert!(text.contains("Rental Cost   0.0036 ETH"));
        assert!(text.contains("Platform Fee  0.0002 ETH"));
        assert!(text.contains("Deposit       0.1000 ETH"));
        assert!(text.ends_with("Total         0.1038 ETH"));
    }

    #[test]
    fn test_render_listing() {
        let line = render_listing(&listing(2, false), &QuoteCalculator::default()).unwrap();
        assert!(line.starts_with("Cosmic Ape #2"));
        assert!(line.contains("0.0036 ETH/h"));
        assert!(line.contains("min 1h 0m"));
        assert!(line.ends_with("[Unavailable]"));
    }

    #[tokio::test]
    async fn test_quote_command() {
        let handler = handler();
        let quote = |token_id, hours| Commands::Quote {
            nft: "0x1234567890123456789012345678901234567890".to_string(),
            token_id,
            start: Some("2024-01-01T00:00:00Z".to_string()),
            end: None,
            hours: Some(hours),
            unchecked: false,
        };

        assert!(handler.handle_command(quote(1, 2)).await.is_ok());
        // Longer than the listing allows
        assert!(handler.handle_command(quote(1, 48)).await.is_err());
        // Cancelled listing
        assert!(handler.handle_command(quote(2, 2)).await.is_err());
        // Unknown token
        assert!(handler.handle_command(quote(9, 2)).await.is_err());
    }

    #[tokio::test]
    async fn test_validate_listing_command() {
        let handler = handler();
        let command = |price: &str| Commands::ValidateListing {
            nft: "0x1234567890123456789012345678901234567890".to_string(),
            token_id: "1".to_string(),
            price: price.to_string(),
            min_duration: "3600".to_string(),
            max_duration: "86400".to_string(),
            deposit: "0.1".to_string(),
        };

        assert!(handler.handle_command(command("0.000001")).await.is_ok());
        assert!(handler.handle_command(command("")).await.is_err());
    }
}
