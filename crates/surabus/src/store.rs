//! Asynchronous store interface used by the booking handlers.
//!
//! Handlers await one store call at a time. [`SqliteStore`] serializes access
//! to the underlying [`Storage`] connection behind an async mutex.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::model::{Booking, Package, TravelType};
use crate::storage::{Storage, StorageStats};

/// Persistence operations for packages and bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Count catalog packages.
    async fn count_packages(&self) -> Result<i64>;

    /// Insert packages atomically, returning their ids.
    async fn bulk_add_packages(&self, packages: Vec<Package>) -> Result<Vec<i64>>;

    /// Look up a single package.
    async fn get_package(&self, id: i64) -> Result<Option<Package>>;

    /// Packages of one travel type, ascending id.
    async fn packages_by_type(&self, travel_type: TravelType) -> Result<Vec<Package>>;

    /// Every package, ascending id.
    async fn all_packages(&self) -> Result<Vec<Package>>;

    /// Persist a booking, returning its id.
    async fn add_booking(&self, booking: Booking) -> Result<i64>;

    /// Every booking, newest first.
    async fn bookings_newest_first(&self) -> Result<Vec<Booking>>;

    /// Counts and sizes for status reporting.
    async fn stats(&self) -> Result<StorageStats>;

    /// Where the data lives.
    fn location(&self) -> PathBuf;
}

/// [`BookingStore`] backed by a single `SQLite` connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    inner: Arc<Mutex<Storage>>,
    path: PathBuf,
}

impl SqliteStore {
    /// Wrap an opened storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        let path = storage.path().to_path_buf();
        Self {
            inner: Arc::new(Mutex::new(storage)),
            path,
        }
    }

    /// Open the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(Storage::open(path.into())?))
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Storage::open_in_memory()?))
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn count_packages(&self) -> Result<i64> {
        self.inner.lock().await.count_packages()
    }

    async fn bulk_add_packages(&self, packages: Vec<Package>) -> Result<Vec<i64>> {
        self.inner.lock().await.insert_packages(&packages)
    }

    async fn get_package(&self, id: i64) -> Result<Option<Package>> {
        self.inner.lock().await.get_package(id)
    }

    async fn packages_by_type(&self, travel_type: TravelType) -> Result<Vec<Package>> {
        self.inner.lock().await.packages_by_type(travel_type)
    }

    async fn all_packages(&self) -> Result<Vec<Package>> {
        self.inner.lock().await.all_packages()
    }

    async fn add_booking(&self, booking: Booking) -> Result<i64> {
        self.inner.lock().await.insert_booking(&booking)
    }

    async fn bookings_newest_first(&self) -> Result<Vec<Booking>> {
        self.inner.lock().await.bookings_newest_first()
    }

    async fn stats(&self) -> Result<StorageStats> {
        self.inner.lock().await.stats()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
