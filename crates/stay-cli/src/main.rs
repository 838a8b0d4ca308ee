//! `stay` CLI — check a rental calendar for availability, pricing and alternative dates.
//!
//! ## Usage
//!
//! ```sh
//! # Is the place free from June 1st to June 5th? (feed saved on disk)
//! stay check --ics listing.ics --check-in 2024-06-01 --check-out 2024-06-05
//!
//! # Same, fetching the live feed and PriceLabs pricing
//! export STAY_ICAL_URL='https://www.airbnb.com/calendar/ical/123.ics?t=...'
//! export PRICELABS_API_KEY=...
//! export STAY_LISTING_ID=123
//! stay check --check-in 2024-06-01 --check-out 2024-06-05 --guests 3
//!
//! # Open windows near a date, without checking it first
//! stay alternatives --ics listing.ics --check-in 2024-06-01 --check-out 2024-06-05
//!
//! # Blocked ranges for calendar display
//! stay calendar --ics listing.ics
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr (`RUST_LOG`, `-v`).

mod oracle;
mod source;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use stay_engine::{CandidateInterval, StayRequest};
use tracing_subscriber::EnvFilter;

use crate::oracle::{FilePricing, NoPricing, PriceLabs, PricingOracle};
use crate::source::{FileFeed, HttpFeed, IntervalSource};

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Rental availability, pricing and alternative dates from a calendar feed"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Timeout for HTTP requests to the feed and pricing oracle, in seconds
    #[arg(long, global = true, default_value_t = 20)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a stay: availability, conflict, alternatives and pricing
    Check {
        #[command(flatten)]
        feed: FeedArgs,
        #[command(flatten)]
        dates: StayArgs,
        /// Number of guests
        #[arg(long, default_value_t = 2)]
        guests: u32,
        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// List open windows near a stay, whether or not the stay itself is free
    Alternatives {
        #[command(flatten)]
        feed: FeedArgs,
        #[command(flatten)]
        dates: StayArgs,
        /// Nights wanted (defaults to the stay length)
        #[arg(long)]
        nights: Option<i64>,
    },
    /// Print the blocked date ranges of the calendar
    Calendar {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

/// Where the calendar comes from. A file given with `--ics` wins over a URL,
/// so `STAY_ICAL_URL` can stay exported while testing against a saved feed.
#[derive(Args)]
#[group(required = true, multiple = true)]
struct FeedArgs {
    /// Read the calendar from an .ics file (takes precedence over --ical-url)
    #[arg(long)]
    ics: Option<PathBuf>,
    /// Fetch the calendar from an iCalendar export URL
    #[arg(long, env = "STAY_ICAL_URL", hide_env_values = true)]
    ical_url: Option<String>,
}

#[derive(Args)]
struct StayArgs {
    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    check_in: NaiveDate,
    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    check_out: NaiveDate,
    /// Date the search horizon is anchored to (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl StayArgs {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn candidate(&self) -> Result<CandidateInterval> {
        CandidateInterval::new(self.check_in, self.check_out).context("Invalid stay dates")
    }
}

#[derive(Args)]
struct PricingArgs {
    /// Skip pricing entirely
    #[arg(long)]
    no_pricing: bool,
    /// Read a saved pricing oracle response instead of calling the API
    #[arg(long, conflicts_with = "no_pricing")]
    pricing_file: Option<PathBuf>,
    /// PriceLabs API key
    #[arg(long, env = "PRICELABS_API_KEY", hide_env_values = true)]
    pricelabs_api_key: Option<String>,
    /// PriceLabs API base URL
    #[arg(long, env = "PRICELABS_URL", default_value = "https://api.pricelabs.co")]
    pricelabs_url: String,
    /// Listing id known to the pricing oracle
    #[arg(long, env = "STAY_LISTING_ID")]
    listing_id: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Check {
            feed,
            dates,
            guests,
            pricing,
        } => {
            let request = StayRequest {
                check_in: dates.check_in,
                check_out: dates.check_out,
                guests,
                now: dates.today(),
            };
            let candidate = request.candidate().context("Invalid stay dates")?;

            let source = build_source(&feed, &client)?;
            let oracle = build_oracle(pricing, &client);

            let blocked = source.fetch().await?;
            let quote = oracle.quote(&candidate).await;

            let report = stay_engine::evaluate(&request, &blocked, quote)?;
            tracing::info!(
                available = report.available,
                alternatives = report.alternatives.len(),
                "stay evaluated"
            );
            print_json(&report)?;
        }
        Commands::Alternatives {
            feed,
            dates,
            nights,
        } => {
            let candidate = dates.candidate()?;
            let blocked = build_source(&feed, &client)?.fetch().await?;

            let nights = nights.unwrap_or_else(|| candidate.nights());
            let windows =
                stay_engine::find_alternatives(&candidate, &blocked, nights, dates.today());
            print_json(&windows)?;
        }
        Commands::Calendar { feed } => {
            let blocked = build_source(&feed, &client)?.fetch().await?;
            print_json(&stay_engine::calendar_view(&blocked))?;
        }
    }

    Ok(())
}

/// Send logs to stderr so stdout stays pure JSON.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_source(feed: &FeedArgs, client: &reqwest::Client) -> Result<Box<dyn IntervalSource>> {
    match (&feed.ics, &feed.ical_url) {
        (Some(path), _) => Ok(Box::new(FileFeed::new(path.clone()))),
        (None, Some(url)) => Ok(Box::new(HttpFeed::new(client.clone(), url.clone()))),
        (None, None) => anyhow::bail!("No calendar feed given: pass --ics or --ical-url"),
    }
}

fn build_oracle(pricing: PricingArgs, client: &reqwest::Client) -> Box<dyn PricingOracle> {
    if pricing.no_pricing {
        return Box::new(NoPricing);
    }
    if let Some(path) = pricing.pricing_file {
        return Box::new(FilePricing::new(path));
    }
    Box::new(PriceLabs::new(
        client.clone(),
        pricing.pricelabs_url,
        pricing.pricelabs_api_key,
        pricing.listing_id,
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
