// src/main.rs

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use salon_console::{
    api::{HttpSalonClient, SalonStore},
    common::format::format_money,
    config::AppConfig,
    models::booking::{BookingRecord, BookingStatus},
    services::{
        booking_draft::{BookingDraft, bookable_services},
        bookings_service::{BookingsConsole, BookingsFilter, DateRangeFilter, average_monthly_earnings},
        notifier::{NoticeLevel, RecordingNotifier, TracingNotifier},
        settings_service::SalonSettingsService,
    },
};

#[derive(Parser)]
#[command(name = "salon-console", version, about = "Salon owner console for the salon booking backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every salon known to the backend
    List,
    /// Print a salon record as JSON
    Show {
        username: String,
        /// Use the public booking-page route
        #[arg(long)]
        public: bool,
    },
    /// Update one field path, e.g. `location.city '"Austin"'`
    Set {
        username: String,
        field: String,
        /// JSON value; anything that is not valid JSON is sent as a string
        value: String,
    },
    /// Delete a stored gallery image by key
    DeleteImage { username: String, key: String },
    /// Filter and sort a bookings export (JSON array)
    Bookings {
        file: PathBuf,
        #[arg(long, default_value = "this-week")]
        range: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        hide_no_shows: bool,
    },
    /// Counts, earnings and monthly payment records of a bookings export
    Summary { file: PathBuf },
    /// Price a booking from a salon's service catalog
    Quote {
        username: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        time: String,
        /// Service ids as listed by the booking page (`lashes_0`, ...)
        #[arg(long = "service", required = true)]
        services: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Bookings { file, range, start, end, status, category, search, hide_no_shows } => {
            let date_range = match range.parse::<DateRangeFilter>().map_err(anyhow::Error::msg)? {
                DateRangeFilter::Custom { .. } => DateRangeFilter::Custom { start, end },
                other => other,
            };
            let status = status
                .filter(|s| s != "all")
                .map(|s| s.parse::<BookingStatus>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let filter = BookingsFilter {
                date_range,
                status,
                service_category: category.filter(|c| c != "all"),
                search,
                show_no_shows: !hide_no_shows,
            };

            let mut console = BookingsConsole::new(read_bookings(&file)?, Arc::new(TracingNotifier));
            console.set_filter(filter);
            let now = Local::now();
            for booking in console.visible(&now) {
                println!(
                    "{}  {:<11} {:<24} {:<20} {}",
                    booking.date_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    booking.status,
                    booking.client.full_name(),
                    booking.service.name,
                    format_money(booking.service.price),
                );
            }
        }
        Command::Summary { file } => {
            let bookings = read_bookings(&file)?;
            let console = BookingsConsole::new(bookings, Arc::new(TracingNotifier));
            let summary = console.summary(&Local::now());

            println!(
                "Total: {}  (today {}, week {}, month {})",
                summary.total, summary.today, summary.this_week, summary.this_month
            );
            println!("Upcoming: {}", summary.upcoming);
            if let Some(next) = &summary.next_appointment {
                println!(
                    "Next: {} with {} at {}",
                    next.service.name,
                    next.client.full_name(),
                    next.date_time.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                );
            }
            for status in BookingStatus::ALL {
                println!("{:<11} {}", status, summary.count(status));
            }
            println!("Earnings: {}", format_money(summary.earnings));

            let records = console.payment_records(&Local);
            for month in &records {
                println!(
                    "{:<16} {:>3} bookings  {:>10}  top: {}",
                    month.label,
                    month.bookings,
                    format_money(month.earnings),
                    month.top_category().unwrap_or("-"),
                );
            }
            println!("Average per month: {}", format_money(average_monthly_earnings(&records)));
        }
        command => run_remote(command).await?,
    }
    Ok(())
}

async fn run_remote(command: Command) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = Arc::new(HttpSalonClient::from_config(&config)?);
    let notifier = Arc::new(RecordingNotifier::new());

    let result: anyhow::Result<()> = async {
        match command {
            Command::List => {
                for salon in client.list_salons().await? {
                    println!("{:<24} {}", salon.id, salon.name);
                }
                Ok(())
            }
            Command::Show { username, public } => {
                let salon = match public {
                    true => client.fetch_public_salon(&username).await?,
                    false => client.fetch_salon(&username).await?,
                };
                println!("{}", serde_json::to_string_pretty(&salon)?);
                Ok(())
            }
            Command::Set { username, field, value } => {
                let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
                let mut settings = SalonSettingsService::new(client, notifier.clone(), username);
                settings.load().await?;
                settings.update_field(&field, value).await?;
                Ok(())
            }
            Command::DeleteImage { username, key } => {
                let mut settings = SalonSettingsService::new(client, notifier.clone(), username);
                settings.load().await?;
                settings.delete_image(&key).await?;
                Ok(())
            }
            Command::Quote { username, date, time, services } => {
                let salon = client.fetch_public_salon(&username).await?;
                let catalog = bookable_services(&salon);

                let mut draft = BookingDraft::new();
                draft.select_date(date);
                draft.select_time(&time)?;
                for id in &services {
                    let service = catalog
                        .iter()
                        .find(|s| &s.id == id)
                        .with_context(|| format!("no service '{id}' at {username}"))?;
                    draft.toggle_service(service);
                }

                for service in draft.services() {
                    println!("{:<28} {}", service.name, service.price);
                }
                println!("Subtotal: {}", format_money(draft.subtotal()));
                println!("Tax:      {}", format_money(draft.tax()));
                println!("Total:    {}", format_money(draft.total()));
                println!("{}", serde_json::to_string_pretty(&draft.submit()?)?);
                Ok(())
            }
            Command::Bookings { .. } | Command::Summary { .. } => Ok(()),
        }
    }
    .await;

    for notice in notifier.take() {
        let description = notice.description.unwrap_or_default();
        match notice.level {
            NoticeLevel::Error => eprintln!("✗ {} {}", notice.title, description),
            _ => println!("✓ {} {}", notice.title, description),
        }
    }
    result
}

fn read_bookings(path: &PathBuf) -> anyhow::Result<Vec<BookingRecord>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let bookings = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(bookings)
}
