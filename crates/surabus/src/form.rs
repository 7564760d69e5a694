//! The booking form.
//!
//! Holds raw field input exactly as typed, applies the input constraints a
//! date/number form control would, and turns the input into a [`Booking`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Booking, TravelType};

/// Format of the date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw booking form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    /// Full name field.
    pub full_name: String,
    /// Travel type selector.
    pub travel_type: TravelType,
    /// Package selector value (a package id).
    pub package: String,
    /// Date field, `YYYY-MM-DD`.
    pub date: String,
    /// Seat count field.
    pub seats: String,
}

impl BookingForm {
    /// Create a form with every field filled in.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        travel_type: TravelType,
        package: impl Into<String>,
        date: impl Into<String>,
        seats: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            travel_type,
            package: package.into(),
            date: date.into(),
            seats: seats.into(),
        }
    }

    /// Change the travel type. The package selection no longer applies.
    pub fn select_travel_type(&mut self, travel_type: TravelType) {
        if self.travel_type != travel_type {
            self.travel_type = travel_type;
            self.package.clear();
        }
    }

    /// Clear every field back to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the form holds no input.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// The package id, or `None` when the selector value is not a number.
    #[must_use]
    pub fn package_id(&self) -> Option<i64> {
        parse_package_id(&self.package)
    }

    /// Check the input constraints and build the booking.
    ///
    /// The booking is stamped with the current time and confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidForm`] listing every failing field.
    pub fn to_booking(&self) -> Result<Booking> {
        let mut reasons = Vec::new();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            reasons.push("full name is required".to_string());
        }

        let date = self.date.trim();
        if date.is_empty() {
            reasons.push("date is required".to_string());
        } else if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            reasons.push(format!("date '{date}' is not a YYYY-MM-DD calendar date"));
        }

        let seats = match parse_seats(&self.seats) {
            Ok(seats) => Some(seats),
            Err(reason) => {
                reasons.push(reason);
                None
            }
        };

        match seats {
            Some(seats) if reasons.is_empty() => Ok(Booking::new(
                full_name,
                self.travel_type,
                self.package_id(),
                date,
                seats,
            )),
            _ => Err(Error::invalid_form(reasons)),
        }
    }
}

/// Parse a package selector value. Non-numeric input yields `None`.
#[must_use]
pub fn parse_package_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_seats(value: &str) -> std::result::Result<u32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("seats is required".to_string());
    }
    match value.parse::<i64>() {
        Ok(n) if n < 1 => Err("seats must be at least 1".to_string()),
        Ok(n) => u32::try_from(n).map_err(|_| format!("seats value {n} is too large")),
        Err(_) => Err(format!("seats '{value}' is not a whole number")),
    }
}
