//! Storage layer for surabus.
//!
//! This module provides `SQLite`-based persistent storage for the package
//! catalog and the bookings made against it.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Booking, BookingStatus, Package, TravelType};

const PACKAGE_COLUMNS: &str = "id, name, type, price";

const BOOKING_COLUMNS: &str =
    "id, full_name, travel_type, package_id, date, seats, status, timestamp";

/// Storage engine for packages and bookings.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Bulk catalog insertion in a single transaction
/// - Package lookup by travel type
/// - Booking insertion and newest-first listing
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count stored packages.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_packages(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM packages", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert all `packages` in one transaction and return their new ids.
    ///
    /// Either every package is written or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_packages(&self, packages: &[Package]) -> Result<Vec<i64>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(packages.len());
        {
            let mut stmt =
                tx.prepare("INSERT INTO packages (name, type, price) VALUES (?1, ?2, ?3)")?;
            for package in packages {
                stmt.execute(params![
                    package.name,
                    package.travel_type.as_str(),
                    package.price
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        debug!("Inserted {} packages", ids.len());
        Ok(ids)
    }

    /// Get a package by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_package(&self, id: i64) -> Result<Option<Package>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = ?1"),
                [id],
                PackageRow::from_row,
            )
            .optional()?;
        row.map(PackageRow::into_package).transpose()
    }

    /// Get all packages of `travel_type`, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn packages_by_type(&self, travel_type: TravelType) -> Result<Vec<Package>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE type = ?1 ORDER BY id ASC"
        ))?;
        let rows = stmt
            .query_map([travel_type.as_str()], PackageRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(PackageRow::into_package).collect()
    }

    /// Get every package, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn all_packages(&self) -> Result<Vec<Package>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages ORDER BY id ASC"
        ))?;
        let rows = stmt
            .query_map([], PackageRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(PackageRow::into_package).collect()
    }

    /// Insert a booking and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_booking(&self, booking: &Booking) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO bookings (full_name, travel_type, package_id, date, seats, status, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                booking.full_name,
                booking.travel_type.as_str(),
                booking.package_id,
                booking.date,
                booking.seats,
                booking.status.as_str(),
                booking.timestamp.to_rfc3339(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted booking with id {}", id);
        Ok(id)
    }

    /// Get a booking by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_booking(&self, id: i64) -> Result<Option<Booking>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
                [id],
                BookingRow::from_row,
            )
            .optional()?;
        row.map(BookingRow::into_booking).transpose()
    }

    /// Get every booking, newest (highest id) first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn bookings_newest_first(&self) -> Result<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id DESC"
        ))?;
        let rows = stmt
            .query_map([], BookingRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    /// Count stored bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_bookings(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_packages = self.count_packages()?;
        let total_bookings = self.count_bookings()?;

        let latest: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, timestamp FROM bookings ORDER BY id DESC LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let latest_booking = latest
            .map(|(id, timestamp)| parse_booking_timestamp(id, &timestamp))
            .transpose()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_packages,
            total_bookings,
            latest_booking,
            db_size_bytes,
        })
    }
}

/// Raw `packages` row, decoded into a [`Package`] outside the rusqlite closure.
struct PackageRow {
    id: i64,
    name: String,
    travel_type: String,
    price: i64,
}

impl PackageRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            travel_type: row.get(2)?,
            price: row.get(3)?,
        })
    }

    fn into_package(self) -> Result<Package> {
        let travel_type = self
            .travel_type
            .parse::<TravelType>()
            .map_err(|e| Error::CorruptRow {
                table: "packages",
                id: self.id,
                message: e.to_string(),
            })?;
        Ok(Package {
            id: Some(self.id),
            name: self.name,
            travel_type,
            price: self.price,
        })
    }
}

/// Raw `bookings` row, decoded into a [`Booking`] outside the rusqlite closure.
struct BookingRow {
    id: i64,
    full_name: String,
    travel_type: String,
    package_id: Option<i64>,
    date: String,
    seats: i64,
    status: String,
    timestamp: String,
}

impl BookingRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            full_name: row.get(1)?,
            travel_type: row.get(2)?,
            package_id: row.get(3)?,
            date: row.get(4)?,
            seats: row.get(5)?,
            status: row.get(6)?,
            timestamp: row.get(7)?,
        })
    }

    fn into_booking(self) -> Result<Booking> {
        let id = self.id;
        let corrupt = |message: String| Error::CorruptRow {
            table: "bookings",
            id,
            message,
        };

        let travel_type = self
            .travel_type
            .parse::<TravelType>()
            .map_err(|e| corrupt(e.to_string()))?;
        let status = self.status.parse::<BookingStatus>().map_err(corrupt)?;
        let seats =
            u32::try_from(self.seats).map_err(|_| corrupt(format!("bad seats: {}", self.seats)))?;
        let timestamp = parse_booking_timestamp(id, &self.timestamp)?;

        Ok(Booking {
            id: Some(id),
            full_name: self.full_name,
            travel_type,
            package_id: self.package_id,
            date: self.date,
            seats,
            status,
            timestamp,
        })
    }
}

fn parse_booking_timestamp(id: i64, timestamp: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::CorruptRow {
            table: "bookings",
            id,
            message: format!("bad timestamp: {e}"),
        })
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of catalog packages.
    pub total_packages: i64,
    /// Number of bookings.
    pub total_bookings: i64,
    /// Submission time of the newest booking.
    pub latest_booking: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
