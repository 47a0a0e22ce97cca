//! Command implementations for carhire-cli

pub mod booking;
pub mod locations;
pub mod search;
pub mod status;
pub mod suppliers;

pub use booking::{cancel_booking, fetch_booking, terms};
pub use locations::locations;
pub use search::search;
pub use status::status;
pub use suppliers::suppliers;
