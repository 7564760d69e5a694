//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::BookingForm;
use crate::model::TravelType;
use crate::view::OutputFormat;

/// Package listing arguments.
#[derive(Debug, Args)]
pub struct PackagesCommand {
    /// Travel type to list packages for
    #[arg(short = 't', long = "type", value_enum, default_value = "domestic")]
    pub travel_type: TravelTypeArg,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Booking submission arguments, one per form field.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Full name of the traveller
    #[arg(short, long)]
    pub name: String,

    /// Travel type
    #[arg(short = 't', long = "type", value_enum, default_value = "domestic")]
    pub travel_type: TravelTypeArg,

    /// Package id (see `packages`)
    #[arg(short, long)]
    pub package: String,

    /// Travel date, YYYY-MM-DD
    #[arg(short, long)]
    pub date: String,

    /// Number of seats
    #[arg(short, long)]
    pub seats: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl BookCommand {
    /// The form these arguments fill in.
    #[must_use]
    pub fn to_form(&self) -> BookingForm {
        BookingForm::new(
            self.name.clone(),
            self.travel_type.into(),
            self.package.clone(),
            self.date.clone(),
            self.seats.clone(),
        )
    }
}

/// Booking list arguments.
#[derive(Debug, Args)]
pub struct BookingsCommand {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// In-page navigation arguments.
#[derive(Debug, Args)]
pub struct GotoCommand {
    /// Link to follow, e.g. "#my-bookings"
    pub href: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Travel type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TravelTypeArg {
    /// Domestic packages
    Domestic,
    /// International packages
    International,
}

impl From<TravelTypeArg> for TravelType {
    fn from(arg: TravelTypeArg) -> Self {
        match arg {
            TravelTypeArg::Domestic => Self::Domestic,
            TravelTypeArg::International => Self::International,
        }
    }
}
