//! Core booking types for surabus.
//!
//! Packages form the bookable catalog; bookings are reservations made
//! against them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Label shown for a booking whose package cannot be found.
pub const UNKNOWN_PACKAGE: &str = "Unknown Package";

/// Category of a package, used to filter the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelType {
    /// Travel within the country.
    #[default]
    Domestic,
    /// Cross-border travel and airport services.
    International,
}

impl TravelType {
    /// Every travel type, in selector order.
    pub const ALL: [TravelType; 2] = [TravelType::Domestic, TravelType::International];

    /// The stored string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domestic" => Ok(Self::Domestic),
            "international" => Ok(Self::International),
            other => Err(Error::UnknownTravelType(other.to_string())),
        }
    }
}

/// Lifecycle state of a booking. New bookings are always confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    /// The booking was accepted.
    #[default]
    Confirmed,
}

impl BookingStatus {
    /// The stored string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(Self::Confirmed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A bookable travel product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique identifier (assigned by storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name.
    pub name: String,

    /// Category used by the package filter.
    #[serde(rename = "type")]
    pub travel_type: TravelType,

    /// Price in whole currency units.
    pub price: i64,
}

impl Package {
    /// Create a package that has not been stored yet.
    #[must_use]
    pub fn new(name: impl Into<String>, travel_type: TravelType, price: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            travel_type,
            price,
        }
    }
}

/// A reservation against a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier (assigned by storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Name of the traveller.
    pub full_name: String,

    /// Travel type selected on the form.
    pub travel_type: TravelType,

    /// Referenced package. `None` when the form carried a non-numeric id.
    ///
    /// Not checked against the catalog by the store.
    pub package_id: Option<i64>,

    /// Travel date as entered, `YYYY-MM-DD`.
    pub date: String,

    /// Number of seats.
    pub seats: u32,

    /// Booking state.
    pub status: BookingStatus,

    /// When the booking was submitted.
    pub timestamp: DateTime<Utc>,
}

impl Booking {
    /// Create a confirmed booking stamped with the current time.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        travel_type: TravelType,
        package_id: Option<i64>,
        date: impl Into<String>,
        seats: u32,
    ) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            travel_type,
            package_id,
            date: date.into(),
            seats,
            status: BookingStatus::Confirmed,
            timestamp: Utc::now(),
        }
    }

    /// Resolve the package name against `packages` by linear scan.
    #[must_use]
    pub fn package_name<'a>(&self, packages: &'a [Package]) -> &'a str {
        self.package_id
            .and_then(|id| packages.iter().find(|p| p.id == Some(id)))
            .map_or(UNKNOWN_PACKAGE, |p| p.name.as_str())
    }
}
