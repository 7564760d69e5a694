//! Catalog bootstrap.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Package, TravelType};
use crate::store::BookingStore;

/// The fixed catalog written to an empty store.
#[must_use]
pub fn catalog() -> Vec<Package> {
    vec![
        Package::new("Super Luxury Bedroom (Lower Deck)", TravelType::Domestic, 5000),
        Package::new("Panoramic View Seat (Upper Deck)", TravelType::Domestic, 3500),
        Package::new("Airport Premium Transfer", TravelType::International, 8000),
        Package::new("Guided City Tour (Full Day)", TravelType::International, 12000),
    ]
}

/// Insert the catalog if the store holds no packages.
///
/// Returns the number of packages written: the catalog size on a fresh
/// store, zero otherwise.
///
/// # Errors
///
/// Returns an error if counting or inserting fails. Nothing is retried.
pub async fn seed_packages(store: &dyn BookingStore) -> Result<usize> {
    let count = store.count_packages().await?;
    if count > 0 {
        debug!("Catalog already holds {} packages, skipping seed", count);
        return Ok(0);
    }

    let ids = store.bulk_add_packages(catalog()).await?;
    info!("Packages seeded successfully");
    Ok(ids.len())
}
