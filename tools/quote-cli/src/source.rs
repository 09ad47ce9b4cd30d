//! Listing and rental snapshots exported from the rental contracts

use anyhow::{Context, Result};
use async_trait::async_trait;
use quote_engine::{Listing, Rental};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Anything that can supply the current set of listings
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn listings(&self) -> Result<Vec<Listing>>;
}

/// Listings read from a JSON array on disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn listings(&self) -> Result<Vec<Listing>> {
        let listings: Vec<Listing> = read_json(&self.path).await?;
        let total = listings.len();

        // The contract never stores these, so a bad record means a bad export
        let valid: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| match listing.check_invariants() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping listing: {}", e);
                    false
                }
            })
            .collect();

        info!("Loaded {} of {} listings from {:?}", valid.len(), total, self.path);
        Ok(valid)
    }
}

/// Rentals read from a JSON array on disk
pub async fn load_rentals<P: AsRef<Path>>(path: P) -> Result<Vec<Rental>> {
    let rentals: Vec<Rental> = read_json(path.as_ref()).await?;
    info!("Loaded {} rentals from {:?}", rentals.len(), path.as_ref());
    Ok(rentals)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
