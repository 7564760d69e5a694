//! `surabus` - CLI for the booking store
//!
//! This binary opens the local database, seeds the catalog on first use and
//! runs one page interaction per invocation.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use surabus::cli::{
    BookCommand, BookingsCommand, Cli, Command, ConfigCommand, GotoCommand, PackagesCommand,
};
use surabus::{
    init_logging, App, Config, Notice, OutputFormat, Render, SectionView, SqliteStore,
    SubmitOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Config(cmd) => {
            handle_config(&config, cmd)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Packages(cmd) => handle_packages(&open_app(&config).await?, &cmd).await,
        Command::Book(cmd) => handle_book(&open_app(&config).await?, &cmd).await,
        Command::Bookings(cmd) => handle_bookings(&open_app(&config).await?, &cmd).await,
        Command::Goto(cmd) => handle_goto(&open_app(&config).await?, &cmd).await,
        Command::Status(cmd) => handle_status(&open_app(&config).await?, cmd.json).await,
    }
}

/// Open the configured store and start the booking page on it.
async fn open_app(config: &Config) -> anyhow::Result<App<SqliteStore>> {
    let database_path = config.database_path();
    let store = SqliteStore::open(&database_path)
        .with_context(|| format!("cannot open bookings at {}", database_path.display()))?;
    Ok(App::start(store, config).await)
}

fn format_or_default(app: &App<SqliteStore>, format: Option<OutputFormat>) -> OutputFormat {
    format.unwrap_or(app.bindings().format)
}

async fn handle_packages(app: &App<SqliteStore>, cmd: &PackagesCommand) -> anyhow::Result<ExitCode> {
    let options = app.package_options(cmd.travel_type.into()).await?;
    print!("{}", options.render(format_or_default(app, cmd.format))?);
    Ok(ExitCode::SUCCESS)
}

async fn handle_book(app: &App<SqliteStore>, cmd: &BookCommand) -> anyhow::Result<ExitCode> {
    let format = format_or_default(app, cmd.format);
    let mut form = cmd.to_form();

    let outcome = app.submit(&mut form).await?;
    let code = if outcome.is_confirmed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome.json()?)?);
        return Ok(code);
    }

    match outcome {
        SubmitOutcome::Confirmed { bookings, .. } => {
            println!("{}", Notice::BookingConfirmed);
            println!();
            print!("{}", SectionView::MyBookings { bookings }.render(format)?);
        }
        SubmitOutcome::Failed { error } => {
            eprintln!("{}", Notice::BookingFailed);
            eprintln!("  cause: {error}");
        }
    }
    Ok(code)
}

async fn handle_bookings(app: &App<SqliteStore>, cmd: &BookingsCommand) -> anyhow::Result<ExitCode> {
    let list = app.bookings_view().await?;
    print!("{}", list.render(format_or_default(app, cmd.format))?);
    Ok(ExitCode::SUCCESS)
}

async fn handle_goto(app: &App<SqliteStore>, cmd: &GotoCommand) -> anyhow::Result<ExitCode> {
    match app.navigate(&cmd.href).await? {
        Some(view) => print!("{}", view.render(format_or_default(app, cmd.format))?),
        None => eprintln!("No section to scroll to for '{}'", cmd.href),
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_status(app: &App<SqliteStore>, json: bool) -> anyhow::Result<ExitCode> {
    let status = app.status().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("surabus status");
        println!("--------------");
        println!("Database:      {}", status.database_path.display());
        println!("Packages:      {}", status.packages);
        println!("Bookings:      {}", status.bookings);
        println!(
            "Last booking:  {}",
            status.latest_booking.as_deref().unwrap_or("never")
        );
        println!("Size (bytes):  {}", status.db_size_bytes);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:         {}", config.database_path().display());
                println!();
                println!("[Booking]");
                println!(
                    "  Enforce package type:  {}",
                    config.booking.enforce_package_type
                );
                println!();
                println!("[Display]");
                println!("  Currency:              {}", config.display.currency);
                println!("  Format:                {:?}", config.display.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
