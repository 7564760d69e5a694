//! `SQLite` schema definitions for surabus.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the packages table.
pub const CREATE_PACKAGES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS packages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    price INTEGER NOT NULL
)
";

/// SQL statement to create an index on package `type` for the package filter.
pub const CREATE_PACKAGE_TYPE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_packages_type ON packages(type)
";

/// SQL statement to create the bookings table.
///
/// `package_id` is deliberately not a foreign key.
pub const CREATE_BOOKINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    travel_type TEXT NOT NULL,
    package_id INTEGER,
    date TEXT NOT NULL,
    seats INTEGER NOT NULL,
    status TEXT NOT NULL,
    timestamp TEXT NOT NULL
)
";

/// SQL statement to create an index on `full_name`.
pub const CREATE_BOOKING_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_full_name ON bookings(full_name)
";

/// SQL statement to create an index on `travel_type`.
pub const CREATE_BOOKING_TYPE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_travel_type ON bookings(travel_type)
";

/// SQL statement to create an index on `package_id`.
pub const CREATE_BOOKING_PACKAGE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_package_id ON bookings(package_id)
";

/// SQL statement to create an index on `date`.
pub const CREATE_BOOKING_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(date)
";

/// SQL statement to create an index on `status`.
pub const CREATE_BOOKING_STATUS_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_PACKAGES_TABLE,
    CREATE_PACKAGE_TYPE_INDEX,
    CREATE_BOOKINGS_TABLE,
    CREATE_BOOKING_NAME_INDEX,
    CREATE_BOOKING_TYPE_INDEX,
    CREATE_BOOKING_PACKAGE_INDEX,
    CREATE_BOOKING_DATE_INDEX,
    CREATE_BOOKING_STATUS_INDEX,
    CREATE_METADATA_TABLE,
];
