//! carhire-core - Core models and traits for the car hire booking SDK
//!
//! This crate holds the domain types shared by the client and its front
//! ends: suppliers and depots, searches and their results, pending and
//! confirmed bookings. It performs no I/O; anything that needs the network
//! or the device lives behind the traits defined here.

pub mod dates;
pub mod error;
pub mod location;
pub mod models;

pub use error::{ModelError, ModelResult};
pub use location::LocationProvider;
pub use models::*;
