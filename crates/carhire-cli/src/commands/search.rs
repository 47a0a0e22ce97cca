//! Search command - vehicle search across every supplier

use anyhow::{bail, Context, Result};
use carhire_client::{CarHireClient, SearchEvent};
use carhire_core::dates::parse_api_date_time;
use carhire_core::{AgeGroup, Country, DateRange};
use chrono::{Duration, NaiveDateTime};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::output::{OutputContext, VehicleRow};

/// Time used when only a date is given
const DEFAULT_TIME: &str = "10:00";

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// IATA code of the pickup and return airport
    #[arg(long)]
    pub airport: String,

    /// Pickup, "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub from: Option<String>,

    /// Return, "YYYY-MM-DD" or "YYYY-MM-DD HH:MM" (default: three days after pickup)
    #[arg(long)]
    pub to: Option<String>,

    /// Driver age: 21, 25, 30 or 70
    #[arg(long, default_value_t = 30)]
    pub age: u64,

    /// Driver's country of residence (ISO code)
    #[arg(long, default_value = "AU")]
    pub residency: String,
}

/// Search an airport and print every vehicle, cheapest first
pub async fn search(client: &CarHireClient, args: &SearchArgs, ctx: &OutputContext) -> Result<()> {
    let age = AgeGroup::from_value(args.age).with_context(|| {
        format!(
            "Unsupported driver age {}, expected 21, 25, 30 or 70",
            args.age
        )
    })?;
    let range = trip(args.from.as_deref(), args.to.as_deref())?;
    let residency = Country::new(args.residency.to_uppercase());

    let mut handle = client
        .search()
        .search_at_airport(&args.airport, range, residency, age)
        .await?;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let pb = if ctx.interactive() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(format!("Finding depots near {}", args.airport.to_uppercase()));

    let mut suppliers = 0;
    let mut answered = 0;
    let results = loop {
        if !running.load(Ordering::SeqCst) {
            handle.cancel();
            pb.finish_with_message("Search cancelled");
            return Ok(());
        }

        tokio::select! {
            event = handle.next() => match event {
                Some(SearchEvent::DepotsFound(pairs)) => {
                    suppliers = pairs.len();
                    pb.set_message(format!("Searching {} suppliers", suppliers));
                }
                Some(SearchEvent::SupplierResults { supplier, results }) => {
                    answered += 1;
                    pb.set_message(format!(
                        "{}/{} suppliers, {} vehicles from {}",
                        answered,
                        suppliers,
                        results.len(),
                        supplier.name
                    ));
                }
                Some(SearchEvent::SupplierFailed { supplier, error }) => {
                    answered += 1;
                    pb.suspend(|| ctx.warn(&format!("{}: {}", supplier.name, error)));
                }
                Some(SearchEvent::Finished(results)) => break results,
                Some(SearchEvent::Failed(error)) => {
                    pb.finish_and_clear();
                    return Err(error.into());
                }
                None => {
                    pb.finish_and_clear();
                    bail!("Search ended without results");
                }
            },
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {
                // Check running flag periodically
            }
        }
    };
    pb.finish_and_clear();

    let rows: Vec<VehicleRow> = results.all().into_iter().map(VehicleRow::from).collect();
    ctx.print(&rows);
    if rows.is_empty() {
        ctx.info("No vehicles available for these dates");
    }
    Ok(())
}

/// Trip dates from the optional pickup and return arguments
fn trip(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let default = DateRange::default();
    let start = match from {
        Some(from) => parse_when(from)?,
        None => default.start,
    };
    let end = match (to, from) {
        (Some(to), _) => parse_when(to)?,
        (None, Some(_)) => start + Duration::days(3),
        (None, None) => default.end,
    };
    Ok(DateRange::new(start, end))
}

fn parse_when(value: &str) -> Result<NaiveDateTime> {
    let mut parts = value.trim().splitn(2, [' ', 'T']);
    let date = parts.next().unwrap_or_default();
    let time = parts.next().unwrap_or(DEFAULT_TIME);
    parse_api_date_time(date, time)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD [HH:MM]", value))
}
