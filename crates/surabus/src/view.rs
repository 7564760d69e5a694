//! View models and their renderers.
//!
//! Every screen is built as a plain data structure first and rendered
//! afterwards, so handlers never assemble output strings themselves.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::model::{Booking, BookingStatus, Package, TravelType};

/// Message shown in place of the booking list when there are no bookings.
pub const EMPTY_BOOKINGS_MESSAGE: &str = "No bookings yet. Start your journey today!";

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Something that can be written out in every [`OutputFormat`].
pub trait Render {
    /// Render as human-readable text.
    fn plain(&self) -> String;

    /// Render as an aligned table.
    fn table(&self) -> String;

    /// Render as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn json(&self) -> Result<serde_json::Value>;

    /// Render in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Plain => Ok(self.plain()),
            OutputFormat::Table => Ok(self.table()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.json()?)?),
        }
    }
}

/// Addressable regions of the page, reachable through `#fragment` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Landing banner.
    Home,
    /// The booking form.
    Book,
    /// The package catalog.
    Packages,
    /// The list of past bookings.
    MyBookings,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Book,
        Section::Packages,
        Section::MyBookings,
    ];

    /// The element id the section is anchored at.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Book => "book",
            Self::Packages => "packages",
            Self::MyBookings => "my-bookings",
        }
    }

    /// Heading shown above the section.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Sura Bus",
            Self::Book => "Book Your Trip",
            Self::Packages => "Our Packages",
            Self::MyBookings => "My Bookings",
        }
    }
}

/// Lookup table handed to every handler, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBindings {
    sections: Vec<Section>,
    /// Currency code used in option labels.
    pub currency: String,
    /// Format used when a command gives none.
    pub format: OutputFormat,
}

impl ViewBindings {
    /// Bind every section, taking display settings from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            currency: config.display.currency.clone(),
            format: config.display.format,
        }
    }

    /// Bind only `sections`.
    #[must_use]
    pub fn with_sections(mut self, sections: &[Section]) -> Self {
        self.sections = sections.to_vec();
        self
    }

    /// Find the bound section with element id `id`.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<Section> {
        self.sections.iter().copied().find(|s| s.id() == id)
    }

    /// Bound sections in page order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl Default for ViewBindings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One entry of the package selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOption {
    /// Value submitted with the form.
    pub value: String,
    /// Text shown to the user, `"<name> - <currency> <price>"`.
    pub label: String,
}

impl PackageOption {
    /// Build the option for `package`.
    #[must_use]
    pub fn new(package: &Package, currency: &str) -> Self {
        Self {
            value: package.id.map(|id| id.to_string()).unwrap_or_default(),
            label: format!("{} - {} {}", package.name, currency, package.price),
        }
    }
}

/// The package selector contents for one travel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOptions {
    /// Travel type the options were filtered by.
    pub travel_type: TravelType,
    /// Options in selector order.
    pub options: Vec<PackageOption>,
}

impl PackageOptions {
    /// Build the selector from already filtered packages.
    #[must_use]
    pub fn new(travel_type: TravelType, packages: &[Package], currency: &str) -> Self {
        Self {
            travel_type,
            options: packages
                .iter()
                .map(|p| PackageOption::new(p, currency))
                .collect(),
        }
    }

    /// Option labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// The value a fresh form selects by default.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.options.first().map(|o| o.value.as_str())
    }
}

impl Render for PackageOptions {
    fn plain(&self) -> String {
        let mut out = format!("{} packages\n", self.travel_type);
        if self.options.is_empty() {
            out.push_str("  (none)\n");
        }
        for option in &self.options {
            let _ = writeln!(out, "  [{}] {}", option.value, option.label);
        }
        out
    }

    fn table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .options
            .iter()
            .map(|o| vec![o.value.clone(), o.label.clone()])
            .collect();
        render_table(&["ID", "PACKAGE"], &rows)
    }

    fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// One rendered booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCard {
    /// Resolved package name, or the unknown-package label.
    pub package_name: String,
    /// Name of the traveller.
    pub full_name: String,
    /// Travel date.
    pub date: String,
    /// Seat count.
    pub seats: u32,
    /// Booking state.
    pub status: BookingStatus,
}

impl BookingCard {
    /// Build the card for `booking`, resolving its package in `packages`.
    #[must_use]
    pub fn new(booking: &Booking, packages: &[Package]) -> Self {
        Self {
            package_name: booking.package_name(packages).to_string(),
            full_name: booking.full_name.clone(),
            date: booking.date.clone(),
            seats: booking.seats,
            status: booking.status,
        }
    }

    /// Seat count as shown on the card.
    #[must_use]
    pub fn seats_label(&self) -> String {
        format!("{} Seats", self.seats)
    }
}

/// Placeholder rendered when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    /// Text shown to the user.
    pub message: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: EMPTY_BOOKINGS_MESSAGE.to_string(),
        }
    }
}

/// The bookings section: cards, or a single empty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BookingList {
    /// No bookings exist.
    Empty(EmptyState),
    /// One card per booking, in the order given.
    Cards {
        /// The cards.
        cards: Vec<BookingCard>,
    },
}

impl BookingList {
    /// Build the list for `bookings`, joined against `packages`.
    #[must_use]
    pub fn new(bookings: &[Booking], packages: &[Package]) -> Self {
        if bookings.is_empty() {
            return Self::Empty(EmptyState::default());
        }
        Self::Cards {
            cards: bookings
                .iter()
                .map(|b| BookingCard::new(b, packages))
                .collect(),
        }
    }

    /// The rendered cards; empty for the empty state.
    #[must_use]
    pub fn cards(&self) -> &[BookingCard] {
        match self {
            Self::Empty(_) => &[],
            Self::Cards { cards } => cards,
        }
    }

    /// Whether the empty state is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

impl Render for BookingList {
    fn plain(&self) -> String {
        match self {
            Self::Empty(empty) => format!("{}\n", empty.message),
            Self::Cards { cards } => {
                let mut out = String::new();
                for card in cards {
                    let _ = writeln!(out, "{}", card.package_name);
                    let _ = writeln!(
                        out,
                        "  {} | {} | {}",
                        card.full_name,
                        card.date,
                        card.seats_label()
                    );
                    let _ = writeln!(out, "  {}", card.status);
                }
                out
            }
        }
    }

    fn table(&self) -> String {
        match self {
            Self::Empty(empty) => format!("{}\n", empty.message),
            Self::Cards { cards } => {
                let rows: Vec<Vec<String>> = cards
                    .iter()
                    .map(|c| {
                        vec![
                            c.package_name.clone(),
                            c.full_name.clone(),
                            c.date.clone(),
                            c.seats_label(),
                            c.status.to_string(),
                        ]
                    })
                    .collect();
                render_table(&["PACKAGE", "NAME", "DATE", "SEATS", "STATUS"], &rows)
            }
        }
    }

    fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Landing section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    /// Page title.
    pub title: String,
    /// In-page links, `#<id>`.
    pub links: Vec<String>,
}

/// Booking form section content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFormView {
    /// Selectable travel types.
    pub travel_types: Vec<TravelType>,
    /// Package options for the default travel type.
    pub packages: PackageOptions,
}

/// A fully built page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum SectionView {
    /// See [`Section::Home`].
    Home(HomeView),
    /// See [`Section::Book`].
    Book(BookFormView),
    /// See [`Section::Packages`].
    Packages {
        /// One selector per travel type.
        catalog: Vec<PackageOptions>,
    },
    /// See [`Section::MyBookings`].
    MyBookings {
        /// The bookings list.
        bookings: BookingList,
    },
}

impl SectionView {
    /// Which section this is.
    #[must_use]
    pub fn section(&self) -> Section {
        match self {
            Self::Home(_) => Section::Home,
            Self::Book(_) => Section::Book,
            Self::Packages { .. } => Section::Packages,
            Self::MyBookings { .. } => Section::MyBookings,
        }
    }

    fn heading(&self) -> String {
        let title = self.section().title();
        format!("{title}\n{}\n", "=".repeat(title.chars().count()))
    }

    fn body(&self, table: bool) -> String {
        let pick = |r: &dyn Render| if table { r.table() } else { r.plain() };
        match self {
            Self::Home(home) => home
                .links
                .iter()
                .fold(String::new(), |mut out, link| {
                    let _ = writeln!(out, "  {link}");
                    out
                }),
            Self::Book(form) => {
                let types: Vec<&str> = form.travel_types.iter().map(TravelType::as_str).collect();
                format!(
                    "Fields: full name, travel type ({}), package, date, seats\n{}",
                    types.join(" | "),
                    pick(&form.packages)
                )
            }
            Self::Packages { catalog } => catalog
                .iter()
                .map(|options| pick(options))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::MyBookings { bookings } => pick(bookings),
        }
    }
}

impl Render for SectionView {
    fn plain(&self) -> String {
        format!("{}{}", self.heading(), self.body(false))
    }

    fn table(&self) -> String {
        format!("{}{}", self.heading(), self.body(true))
    }

    fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Render `rows` under `headers` with space-padded columns.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = table_line(headers.iter().copied(), &widths);
    out.push_str(&table_line(rule.iter().map(String::as_str), &widths));
    for row in rows {
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut out = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}
