//! `surabus` - A local bus and tour booking store
//!
//! This library seeds a small package catalog, filters it by travel type,
//! records bookings, and builds the views that list them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod anchor;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod seed;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{App, Notice, StatusReport, SubmitOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use form::BookingForm;
pub use logging::init_logging;
pub use model::{Booking, BookingStatus, Package, TravelType};
pub use storage::{Storage, StorageStats};
pub use store::{BookingStore, SqliteStore};
pub use view::{BookingList, OutputFormat, Render, Section, SectionView, ViewBindings};
