//! Domain models for suppliers, searches and bookings

mod booking;
mod depot;
mod location;
mod result;
mod search;
mod supplier;
mod terms;

pub use booking::*;
pub use depot::*;
pub use location::*;
pub use result::*;
pub use search::*;
pub use supplier::*;
pub use terms::*;
