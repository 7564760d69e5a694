//! Command-line interface for surabus.
//!
//! This module provides the CLI structure for the `surabus` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BookCommand, BookingsCommand, ConfigCommand, GotoCommand, PackagesCommand, StatusCommand,
    TravelTypeArg,
};

/// surabus - Book bus seats and tours
///
/// Browse the package catalog, book a trip and review your bookings. Data
/// is kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "surabus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the packages of one travel type
    Packages(PackagesCommand),

    /// Submit a booking
    Book(BookCommand),

    /// Show past bookings, newest first
    Bookings(BookingsCommand),

    /// Jump to a page section by its in-page link
    Goto(GotoCommand),

    /// Show database status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
