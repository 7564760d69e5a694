//! The booking page as a service.
//!
//! [`App`] owns the store handle and the view bindings and exposes one
//! method per user interaction. Each method awaits its store calls in
//! sequence and returns a fully built view model.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::anchor::{self, Navigation};
use crate::config::{BookingConfig, Config};
use crate::error::{Error, Result};
use crate::form::BookingForm;
use crate::model::TravelType;
use crate::seed::seed_packages;
use crate::storage::StorageStats;
use crate::store::BookingStore;
use crate::view::{
    BookFormView, BookingList, HomeView, PackageOptions, Render, Section, SectionView,
    ViewBindings,
};

/// Notification shown to the user after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The booking was stored.
    BookingConfirmed,
    /// The booking could not be stored.
    BookingFailed,
}

impl Notice {
    /// Text of the notification.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::BookingConfirmed => "Booking Confirmed Successfully!",
            Self::BookingFailed => "Failed to book. Please try again.",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of submitting the booking form.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The booking was stored and the form cleared.
    Confirmed {
        /// Id of the new booking.
        booking_id: i64,
        /// Refreshed bookings section.
        bookings: BookingList,
        /// Section the view moves to.
        scroll_to: Section,
    },
    /// Storing failed. The form is untouched.
    Failed {
        /// What went wrong.
        error: Error,
    },
}

impl SubmitOutcome {
    /// The notification for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Confirmed { .. } => Notice::BookingConfirmed,
            Self::Failed { .. } => Notice::BookingFailed,
        }
    }

    /// Whether the booking was stored.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// The outcome as a JSON object with a `notice` field.
    ///
    /// # Errors
    ///
    /// Returns an error if serializing the bookings section fails.
    pub fn json(&self) -> Result<serde_json::Value> {
        let notice = self.notice().message();
        Ok(match self {
            Self::Confirmed {
                booking_id,
                bookings,
                scroll_to,
            } => {
                let view = SectionView::MyBookings {
                    bookings: bookings.clone(),
                };
                serde_json::json!({
                    "notice": notice,
                    "booking_id": booking_id,
                    "scroll_to": scroll_to.id(),
                    "view": view.json()?,
                })
            }
            Self::Failed { error } => serde_json::json!({
                "notice": notice,
                "error": error.to_string(),
            }),
        })
    }
}

/// Snapshot for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Database location.
    pub database_path: PathBuf,
    /// Number of catalog packages.
    pub packages: i64,
    /// Number of bookings.
    pub bookings: i64,
    /// Submission time of the newest booking, RFC 3339.
    pub latest_booking: Option<String>,
    /// Database file size.
    pub db_size_bytes: u64,
}

impl StatusReport {
    fn new(database_path: PathBuf, stats: StorageStats) -> Self {
        Self {
            database_path,
            packages: stats.total_packages,
            bookings: stats.total_bookings,
            latest_booking: stats.latest_booking.map(|t| t.to_rfc3339()),
            db_size_bytes: stats.db_size_bytes,
        }
    }
}

/// The booking page, bound to a store.
#[derive(Debug)]
pub struct App<S> {
    store: S,
    bindings: ViewBindings,
    rules: BookingConfig,
}

impl<S: BookingStore> App<S> {
    /// Bind `store` and run the catalog seeder.
    ///
    /// A failing seed is logged and startup continues with whatever the
    /// store holds.
    pub async fn start(store: S, config: &Config) -> Self {
        if let Err(e) = seed_packages(&store).await {
            error!("Seeding packages failed: {}", e);
        }

        Self {
            store,
            bindings: ViewBindings::from_config(config),
            rules: config.booking.clone(),
        }
    }

    /// The view bindings built at startup.
    #[must_use]
    pub fn bindings(&self) -> &ViewBindings {
        &self.bindings
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Package selector contents for `travel_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn package_options(&self, travel_type: TravelType) -> Result<PackageOptions> {
        let packages = self.store.packages_by_type(travel_type).await?;
        Ok(PackageOptions::new(
            travel_type,
            &packages,
            &self.bindings.currency,
        ))
    }

    /// A blank form with the first package of the default travel type
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn new_form(&self) -> Result<BookingForm> {
        let mut form = BookingForm::default();
        let travel_type = form.travel_type;
        self.select_travel_type(&mut form, travel_type).await?;
        Ok(form)
    }

    /// Change the form's travel type and reload its package selector.
    ///
    /// When the selection no longer applies, or was empty, the first package
    /// of `travel_type` is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn select_travel_type(
        &self,
        form: &mut BookingForm,
        travel_type: TravelType,
    ) -> Result<PackageOptions> {
        form.select_travel_type(travel_type);
        let options = self.package_options(travel_type).await?;
        if form.package.is_empty() {
            if let Some(first) = options.first_value() {
                form.package = first.to_string();
            }
        }
        Ok(options)
    }

    /// Submit the booking form.
    ///
    /// On success the form is reset to [`App::new_form`]. A storage failure is reported through
    /// [`SubmitOutcome::Failed`] and leaves the form as it was.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching the store, when the form breaks its
    /// input constraints or the package rule. Also returns an error if the
    /// form reset or list refresh after a successful write fails.
    pub async fn submit(&self, form: &mut BookingForm) -> Result<SubmitOutcome> {
        let booking = form.to_booking()?;

        if self.rules.enforce_package_type {
            match self.check_package(form).await {
                Ok(()) => {}
                Err(e) if e.is_storage_error() => return Ok(self.failed(e)),
                Err(e) => return Err(e),
            }
        }

        let booking_id = match self.store.add_booking(booking).await {
            Ok(id) => id,
            Err(e) => return Ok(self.failed(e)),
        };
        info!("Booking {} confirmed", booking_id);

        form.reset();
        self.select_travel_type(form, TravelType::default()).await?;
        let bookings = self.bookings_view().await?;

        Ok(SubmitOutcome::Confirmed {
            booking_id,
            bookings,
            scroll_to: Section::MyBookings,
        })
    }

    fn failed(&self, error: Error) -> SubmitOutcome {
        error!("Booking failed: {}", error);
        SubmitOutcome::Failed { error }
    }

    async fn check_package(&self, form: &BookingForm) -> Result<()> {
        let mismatch = || Error::PackageMismatch {
            package_id: form.package.clone(),
            travel_type: form.travel_type.to_string(),
        };

        let id = form.package_id().ok_or_else(mismatch)?;
        match self.store.get_package(id).await? {
            Some(package) if package.travel_type == form.travel_type => Ok(()),
            _ => Err(mismatch()),
        }
    }

    /// The bookings section, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if either store query fails.
    pub async fn bookings_view(&self) -> Result<BookingList> {
        let bookings = self.store.bookings_newest_first().await?;
        let packages = self.store.all_packages().await?;
        Ok(BookingList::new(&bookings, &packages))
    }

    /// Follow an in-page link.
    ///
    /// Returns the target section, or `None` when the link is not a
    /// fragment or names no bound section.
    ///
    /// # Errors
    ///
    /// Returns an error if building the section needs the store and the
    /// store fails.
    pub async fn navigate(&self, href: &str) -> Result<Option<SectionView>> {
        match anchor::intercept(href, &self.bindings) {
            Navigation::ScrollTo(section) => Ok(Some(self.section(section).await?)),
            Navigation::Follow => {
                warn!("'{}' is not an in-page link", href);
                Ok(None)
            }
            Navigation::MissingTarget(_) => Ok(None),
        }
    }

    /// Build one page section.
    ///
    /// # Errors
    ///
    /// Returns an error if a store query fails.
    pub async fn section(&self, section: Section) -> Result<SectionView> {
        Ok(match section {
            Section::Home => SectionView::Home(HomeView {
                title: section.title().to_string(),
                links: self
                    .bindings
                    .sections()
                    .iter()
                    .map(|s| format!("#{}", s.id()))
                    .collect(),
            }),
            Section::Book => SectionView::Book(BookFormView {
                travel_types: TravelType::ALL.to_vec(),
                packages: self.package_options(TravelType::default()).await?,
            }),
            Section::Packages => {
                let mut catalog = Vec::with_capacity(TravelType::ALL.len());
                for travel_type in TravelType::ALL {
                    catalog.push(self.package_options(travel_type).await?);
                }
                SectionView::Packages { catalog }
            }
            Section::MyBookings => SectionView::MyBookings {
                bookings: self.bookings_view().await?,
            },
        })
    }

    /// Counts for the `status` command.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn status(&self) -> Result<StatusReport> {
        let stats = self.store.stats().await?;
        Ok(StatusReport::new(self.store.location(), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::model::{Booking, Package};
    use crate::store::SqliteStore;
    use async_trait::async_trait;

    async fn seeded_app() -> App<SqliteStore> {
        App::start(SqliteStore::in_memory().unwrap(), &Config::default()).await
    }

    async fn first_domestic_id(app: &App<SqliteStore>) -> String {
        app.package_options(TravelType::Domestic)
            .await
            .unwrap()
            .first_value()
            .unwrap()
            .to_string()
    }

    /// Store whose writes always fail; reads are served by an inner store.
    struct ReadOnlyStore {
        inner: SqliteStore,
    }

    #[async_trait]
    impl BookingStore for ReadOnlyStore {
        async fn count_packages(&self) -> Result<i64> {
            self.inner.count_packages().await
        }
        async fn bulk_add_packages(&self, _packages: Vec<Package>) -> Result<Vec<i64>> {
            Err(Error::internal("read-only store"))
        }
        async fn get_package(&self, id: i64) -> Result<Option<Package>> {
            self.inner.get_package(id).await
        }
        async fn packages_by_type(&self, travel_type: TravelType) -> Result<Vec<Package>> {
            self.inner.packages_by_type(travel_type).await
        }
        async fn all_packages(&self) -> Result<Vec<Package>> {
            self.inner.all_packages().await
        }
        async fn add_booking(&self, _booking: Booking) -> Result<i64> {
            Err(Error::DatabaseMigration {
                message: "disk full".to_string(),
            })
        }
        async fn bookings_newest_first(&self) -> Result<Vec<Booking>> {
            self.inner.bookings_newest_first().await
        }
        async fn stats(&self) -> Result<StorageStats> {
            self.inner.stats().await
        }
        fn location(&self) -> PathBuf {
            self.inner.location()
        }
    }

    #[tokio::test]
    async fn test_start_seeds_once() {
        let store = SqliteStore::in_memory().unwrap();
        let app = App::start(store.clone(), &Config::default()).await;
        let _again = App::start(store, &Config::default()).await;

        assert_eq!(app.store().count_packages().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_start_survives_seed_failure() {
        init_test_logging();
        let store = ReadOnlyStore {
            inner: SqliteStore::in_memory().unwrap(),
        };
        let app = App::start(store, &Config::default()).await;

        let options = app.package_options(TravelType::Domestic).await.unwrap();
        assert!(options.options.is_empty());
        assert!(app.bookings_view().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_package_options_domestic() {
        let app = seeded_app().await;
        let options = app.package_options(TravelType::Domestic).await.unwrap();

        assert_eq!(
            options.labels(),
            [
                "Super Luxury Bedroom (Lower Deck) - LKR 5000",
                "Panoramic View Seat (Upper Deck) - LKR 3500",
            ]
        );
    }

    #[tokio::test]
    async fn test_package_options_only_match_type() {
        let app = seeded_app().await;
        for travel_type in TravelType::ALL {
            let options = app.package_options(travel_type).await.unwrap();
            assert_eq!(options.travel_type, travel_type);
            assert_eq!(options.options.len(), 2);

            for option in &options.options {
                let id = option.value.parse().unwrap();
                let package = app.store().get_package(id).await.unwrap().unwrap();
                assert_eq!(package.travel_type, travel_type);
            }
        }
    }

    #[tokio::test]
    async fn test_package_options_use_configured_currency() {
        let mut config = Config::default();
        config.display.currency = "USD".to_string();
        let app = App::start(SqliteStore::in_memory().unwrap(), &config).await;

        let options = app.package_options(TravelType::International).await.unwrap();
        assert_eq!(options.labels()[0], "Airport Premium Transfer - USD 8000");
    }

    #[tokio::test]
    async fn test_new_form_selects_first_domestic_package() {
        let app = seeded_app().await;
        let form = app.new_form().await.unwrap();

        assert_eq!(form.travel_type, TravelType::Domestic);
        assert_eq!(form.package, first_domestic_id(&app).await);
        assert!(form.full_name.is_empty());
    }

    #[tokio::test]
    async fn test_new_form_on_empty_catalog() {
        let store = ReadOnlyStore {
            inner: SqliteStore::in_memory().unwrap(),
        };
        let app = App::start(store, &Config::default()).await;

        assert!(app.new_form().await.unwrap().is_blank());
    }

    #[tokio::test]
    async fn test_type_change_books_first_package_of_new_type() {
        let app = seeded_app().await;
        let mut form = BookingForm::new("Jane", TravelType::Domestic, "", "2024-05-01", "2");

        let options = app
            .select_travel_type(&mut form, TravelType::International)
            .await
            .unwrap();
        assert_eq!(options.travel_type, TravelType::International);
        assert_eq!(Some(form.package.as_str()), options.first_value());

        let SubmitOutcome::Confirmed { bookings, .. } = app.submit(&mut form).await.unwrap()
        else {
            panic!("expected confirmation");
        };
        assert_eq!(bookings.cards()[0].package_name, "Airport Premium Transfer");
    }

    #[tokio::test]
    async fn test_same_type_keeps_selected_package() {
        let app = seeded_app().await;
        let mut form = BookingForm::new("Jane", TravelType::Domestic, "2", "2024-05-01", "2");

        app.select_travel_type(&mut form, TravelType::Domestic)
            .await
            .unwrap();
        assert_eq!(form.package, "2");
    }

    #[tokio::test]
    async fn test_outcome_json_carries_notice() {
        init_test_logging();
        let app = seeded_app().await;
        let mut form = app.new_form().await.unwrap();
        form.full_name = "Jane".to_string();
        form.date = "2024-05-01".to_string();
        form.seats = "2".to_string();

        let body = app.submit(&mut form).await.unwrap().json().unwrap();
        assert_eq!(body["notice"], "Booking Confirmed Successfully!");
        assert_eq!(body["scroll_to"], "my-bookings");
        assert_eq!(body["view"]["section"], "my-bookings");
        assert_eq!(body["view"]["bookings"]["cards"][0]["fullName"], "Jane");

        let inner = SqliteStore::in_memory().unwrap();
        let app = App::start(ReadOnlyStore { inner }, &Config::default()).await;
        let mut form = BookingForm::new("Jane", TravelType::Domestic, "1", "2024-05-01", "2");

        let body = app.submit(&mut form).await.unwrap().json().unwrap();
        assert_eq!(body["notice"], "Failed to book. Please try again.");
        assert!(body["error"].as_str().unwrap().contains("disk full"));
        assert!(body.get("booking_id").is_none());
    }

    #[tokio::test]
    async fn test_empty_bookings_view() {
        let app = seeded_app().await;
        let list = app.bookings_view().await.unwrap();

        assert!(list.is_empty());
        assert!(list.cards().is_empty());
    }

    #[tokio::test]
    async fn test_submit_booking_scenario() {
        let app = seeded_app().await;
        let package = first_domestic_id(&app).await;
        let mut form = BookingForm::new("Jane", TravelType::Domestic, package, "2024-05-01", "2");

        let outcome = app.submit(&mut form).await.unwrap();
        assert_eq!(outcome.notice(), Notice::BookingConfirmed);
        assert_eq!(form, app.new_form().await.unwrap());
        assert!(form.full_name.is_empty());

        let SubmitOutcome::Confirmed {
            bookings,
            scroll_to,
            ..
        } = outcome
        else {
            panic!("expected confirmation");
        };
        assert_eq!(scroll_to, Section::MyBookings);

        let cards = bookings.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].package_name, "Super Luxury Bedroom (Lower Deck)");
        assert_eq!(cards[0].full_name, "Jane");
        assert_eq!(cards[0].date, "2024-05-01");
        assert_eq!(cards[0].seats_label(), "2 Seats");
        assert_eq!(cards[0].status.to_string(), "Confirmed");
    }

    #[tokio::test]
    async fn test_submit_adds_exactly_one_newest_first() {
        let app = seeded_app().await;
        let package = first_domestic_id(&app).await;

        for name in ["First", "Second"] {
            let mut form =
                BookingForm::new(name, TravelType::Domestic, package.clone(), "2024-05-01", "1");
            assert!(app.submit(&mut form).await.unwrap().is_confirmed());
        }
        let before = app.status().await.unwrap().bookings;

        let mut form = BookingForm::new("Third", TravelType::Domestic, package, "2024-06-01", "3");
        app.submit(&mut form).await.unwrap();

        assert_eq!(app.status().await.unwrap().bookings, before + 1);
        let list = app.bookings_view().await.unwrap();
        let names: Vec<_> = list.cards().iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_dangling_package_renders_unknown() {
        let app = seeded_app().await;
        let mut form = BookingForm::new("Ghost", TravelType::Domestic, "999", "2024-05-01", "1");
        app.submit(&mut form).await.unwrap();

        let mut form = BookingForm::new("NaN", TravelType::Domestic, "abc", "2024-05-01", "1");
        app.submit(&mut form).await.unwrap();

        let list = app.bookings_view().await.unwrap();
        assert!(list
            .cards()
            .iter()
            .all(|c| c.package_name == "Unknown Package"));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form() {
        init_test_logging();
        let inner = SqliteStore::in_memory().unwrap();
        seed_packages(&inner).await.unwrap();
        let app = App::start(ReadOnlyStore { inner }, &Config::default()).await;

        let mut form = BookingForm::new("Jane", TravelType::Domestic, "1", "2024-05-01", "2");
        let before = form.clone();

        let outcome = app.submit(&mut form).await.unwrap();
        assert_eq!(outcome.notice(), Notice::BookingFailed);
        assert_eq!(outcome.notice().message(), "Failed to book. Please try again.");
        assert_eq!(form, before);
        assert!(app.bookings_view().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let app = seeded_app().await;
        let mut form = BookingForm::new("", TravelType::Domestic, "1", "2024-05-01", "0");

        let err = app.submit(&mut form).await.unwrap_err();
        assert!(err.is_form_error());
        assert_eq!(form.full_name, "");
        assert_eq!(form.seats, "0");
        assert!(app.bookings_view().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relaxed_rules_accept_mismatched_type() {
        let app = seeded_app().await;
        let domestic = first_domestic_id(&app).await;
        let mut form =
            BookingForm::new("Jane", TravelType::International, domestic, "2024-05-01", "1");

        assert!(app.submit(&mut form).await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_enforced_rules_reject_mismatched_type() {
        let mut config = Config::default();
        config.booking.enforce_package_type = true;
        let app = App::start(SqliteStore::in_memory().unwrap(), &config).await;
        let domestic = first_domestic_id(&app).await;

        let mut form = BookingForm::new(
            "Jane",
            TravelType::International,
            domestic.clone(),
            "2024-05-01",
            "1",
        );
        let err = app.submit(&mut form).await.unwrap_err();
        assert!(matches!(err, Error::PackageMismatch { .. }));

        let mut form = BookingForm::new("Jane", TravelType::Domestic, "abc", "2024-05-01", "1");
        assert!(app.submit(&mut form).await.is_err());

        let mut form = BookingForm::new("Jane", TravelType::Domestic, domestic, "2024-05-01", "1");
        assert!(app.submit(&mut form).await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_navigate_to_bookings_section() {
        let app = seeded_app().await;
        let view = app.navigate("#my-bookings").await.unwrap().unwrap();

        assert_eq!(view.section(), Section::MyBookings);
        assert!(matches!(view, SectionView::MyBookings { ref bookings } if bookings.is_empty()));
    }

    #[tokio::test]
    async fn test_navigate_packages_section_lists_both_types() {
        let app = seeded_app().await;
        let Some(SectionView::Packages { catalog }) = app.navigate("#packages").await.unwrap()
        else {
            panic!("expected packages section");
        };

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].travel_type, TravelType::International);
    }

    #[tokio::test]
    async fn test_navigate_missing_or_external_target() {
        let app = seeded_app().await;

        assert!(app.navigate("#nowhere").await.unwrap().is_none());
        assert!(app.navigate("https://example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_report() {
        let app = seeded_app().await;
        let status = app.status().await.unwrap();

        assert_eq!(status.packages, 4);
        assert_eq!(status.bookings, 0);
        assert!(status.latest_booking.is_none());
        assert_eq!(status.database_path, PathBuf::from(":memory:"));
    }
}
