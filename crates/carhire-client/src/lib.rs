//! Car hire client library
//!
//! Provides a typed client for the car hire booking REST API: supplier and
//! location lookups, a fan-out vehicle search across every supplier, and
//! creating, fetching and cancelling bookings.
//!
//! # Example
//!
//! ```rust,no_run
//! use carhire_client::{CarHireClient, ClientConfig, SearchEvent};
//! use carhire_core::{AgeGroup, Country, DateRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::builder()
//!         .domain("https://api.example.com")
//!         .sdk_key("my-sdk-key")
//!         .build();
//!     let client = CarHireClient::from_config(&config)?;
//!     client.setup_from_config(&config).await?;
//!
//!     let mut search = client
//!         .search()
//!         .search_at_airport("SYD", DateRange::default(), Country::default(), AgeGroup::default())
//!         .await?;
//!
//!     while let Some(event) = search.next().await {
//!         if let SearchEvent::Finished(results) = event {
//!             for result in results.all() {
//!                 println!("{} {}", result.name, result.cost.total);
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom requests
//!
//! Every operation is a [`RequestDescriptor`]: an endpoint, parameters and
//! a decoder. The functions in [`requests`] build them and
//! [`CarHireClient::execute`] sends them.
//!
//! # Testing
//!
//! [`transport::MockTransport`] answers from canned routes without a
//! network. The `testing` module serves an axum router locally:
//!
//! ```rust,ignore
//! use carhire_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! server.setup("abc").await?;
//! let suppliers = server.client.suppliers().await?;
//! ```

mod cache;
mod client;
pub mod config;
pub mod encoding;
pub mod endpoint;
mod error;
mod executor;
mod locations;
pub mod request;
pub mod requests;
pub mod search;
mod session;
pub mod testing;
pub mod transport;
mod wire;

pub use client::CarHireClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{CarHireError, Result, REQUEST_FAILED, UNKNOWN_ERROR};
pub use executor::{build_request, RequestExecutor};
pub use locations::TopLocationsProvider;
pub use request::{HttpMethod, RequestDescriptor};
pub use search::{SearchEvent, SearchHandle, SearchOrchestrator};
pub use session::{ClientStatus, SessionSnapshot};

// Re-export core types for convenience
pub use carhire_core as core;
