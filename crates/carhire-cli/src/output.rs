//! Output formatting for carhire-cli (table, json, csv)

use carhire_core::{amount_string, Booking, Location, SearchResult, Supplier, SupplierTerm};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Whether progress decorations (spinners, banners) should be shown
    pub fn interactive(&self) -> bool {
        self.format == OutputFormat::Table && !self.quiet
    }

    /// Print data in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Csv => {
                print_csv(data);
            }
        }
    }

    /// Print key-value pairs (for single records)
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Csv => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
                println!("{}", keys.join(","));
                let values: Vec<String> = pairs.iter().map(|(_, v)| escape_csv(v)).collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Print data as CSV
fn print_csv<T: Serialize>(data: &[T]) {
    let Some(first) = data.first() else {
        return;
    };

    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(first) {
        let headers: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
        println!("{}", headers.join(","));

        for item in data {
            if let Ok(serde_json::Value::Object(row)) = serde_json::to_value(item) {
                let values: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        row.get(*h)
                            .map(|v| match v {
                                serde_json::Value::String(s) => escape_csv(s),
                                other => escape_csv(&other.to_string()),
                            })
                            .unwrap_or_default()
                    })
                    .collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Supplier display for suppliers command
#[derive(Debug, Tabled, Serialize)]
pub struct SupplierRow {
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Name")]
    pub name: String,
}

impl From<&Supplier> for SupplierRow {
    fn from(supplier: &Supplier) -> Self {
        Self {
            code: supplier.code.clone(),
            name: supplier.name.clone(),
        }
    }
}

/// Location display for locations command
#[derive(Debug, Tabled, Serialize)]
pub struct LocationRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Airport")]
    pub airport: String,
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Coordinate")]
    pub coordinate: String,
}

impl From<&Location> for LocationRow {
    fn from(location: &Location) -> Self {
        Self {
            name: location.full_name(),
            airport: location.airport_code.clone().unwrap_or_default(),
            country: location.country.clone(),
            coordinate: location.coordinate.comma_separated(),
        }
    }
}

/// Vehicle display for search command
#[derive(Debug, Tabled, Serialize)]
pub struct VehicleRow {
    #[tabled(rename = "Supplier")]
    pub supplier: String,
    #[tabled(rename = "Vehicle")]
    pub vehicle: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Transmission")]
    pub transmission: String,
    #[tabled(rename = "Seats")]
    pub seats: u32,
    #[tabled(rename = "Per Day")]
    pub per_day: String,
    #[tabled(rename = "Total")]
    pub total: String,
}

impl From<&SearchResult> for VehicleRow {
    fn from(result: &SearchResult) -> Self {
        Self {
            supplier: result.supplier.name.clone(),
            vehicle: result.name.clone(),
            category: result.category.clone(),
            transmission: result.features.transmission.name.clone(),
            seats: result.features.seats,
            per_day: result
                .cost
                .per_day
                .as_ref()
                .map(amount_string)
                .unwrap_or_default(),
            total: format!("{} {}", amount_string(&result.cost.total), result.cost.currency),
        }
    }
}

/// Terms display for terms command
#[derive(Debug, Tabled, Serialize)]
pub struct TermRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Terms")]
    pub text: String,
}

impl From<&SupplierTerm> for TermRow {
    fn from(term: &SupplierTerm) -> Self {
        Self {
            title: term.title.clone(),
            text: term.text.clone(),
        }
    }
}

/// Key-value summary of a booking
pub fn booking_summary(booking: &Booking) -> Vec<(&'static str, String)> {
    let status = if booking.status.is_cancelled {
        format!("{} (cancelled)", booking.status.name)
    } else {
        booking.status.name.clone()
    };
    vec![
        ("Booking", booking.id.to_string()),
        ("Confirmation", booking.supplier_confirmation.clone()),
        ("Status", status),
        ("Supplier", booking.depots.supplier.name.clone()),
        ("Vehicle", booking.vehicle_name.clone()),
        ("Driver", booking.driver.full_name()),
        (
            "Pick up",
            format!(
                "{} at {}",
                booking.pickup_time().format("%Y-%m-%d %H:%M"),
                booking.depots.pickup_depot.name
            ),
        ),
        (
            "Return",
            format!(
                "{} at {}",
                booking.return_time().format("%Y-%m-%d %H:%M"),
                booking.depots.return_depot.name
            ),
        ),
        (
            "Total",
            format!("{} {}", amount_string(&booking.cost.total), booking.cost.currency),
        ),
        (
            "Flight",
            booking.flight_number.clone().unwrap_or_default(),
        ),
    ]
}
