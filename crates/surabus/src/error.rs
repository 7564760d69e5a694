//! Error types for surabus.
//!
//! This module defines all error types used throughout the surabus crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for surabus operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A stored row could not be decoded into a record.
    #[error("corrupt {table} row {id}: {message}")]
    CorruptRow {
        /// Table the row belongs to.
        table: &'static str,
        /// Row id.
        id: i64,
        /// What could not be decoded.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Booking Errors ===
    /// The booking form failed its input constraints.
    #[error("invalid booking form: {}", .reasons.join("; "))]
    InvalidForm {
        /// One entry per failing field.
        reasons: Vec<String>,
    },

    /// The selected package does not belong to the selected travel type.
    #[error("package {package_id} does not match travel type {travel_type}")]
    PackageMismatch {
        /// The package id on the form.
        package_id: String,
        /// The travel type on the form.
        travel_type: String,
    },

    /// A travel type string was not recognized.
    #[error("unknown travel type: {0}")]
    UnknownTravelType(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for surabus operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a form validation error from a list of field reasons.
    #[must_use]
    pub fn invalid_form(reasons: Vec<String>) -> Self {
        Self::InvalidForm { reasons }
    }

    /// Check if this error was raised by the storage layer.
    ///
    /// Storage failures are the ones a user may simply retry.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::CorruptRow { .. }
        )
    }

    /// Check if this error is a rejected form.
    #[must_use]
    pub fn is_form_error(&self) -> bool {
        matches!(self, Self::InvalidForm { .. } | Self::PackageMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_invalid_form_lists_every_reason() {
        let err = Error::invalid_form(vec![
            "full name is required".to_string(),
            "seats must be at least 1".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid booking form: full name is required; seats must be at least 1"
        );
        assert!(err.is_form_error());
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_package_mismatch_display() {
        let err = Error::PackageMismatch {
            package_id: "3".to_string(),
            travel_type: "domestic".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "package 3 does not match travel type domestic"
        );
        assert!(err.is_form_error());
    }

    #[test]
    fn test_unknown_travel_type_display() {
        let err = Error::UnknownTravelType("lunar".to_string());
        assert_eq!(err.to_string(), "unknown travel type: lunar");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert!(err.is_storage_error());
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_corrupt_row_display() {
        let err = Error::CorruptRow {
            table: "bookings",
            id: 7,
            message: "unknown status: Pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt bookings row 7: unknown status: Pending"
        );
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "currency must not be blank".to_string(),
        };
        assert!(err.to_string().contains("currency"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
