//! Fan-out vehicle search
//!
//! A search runs as a background task:
//!
//! ```text
//! validate -> load suppliers -> nearest depots -> one vehicle search per depot pair -> finished
//!     |              |                 |
//!     +--------------+-----------------+--> failed
//! ```
//!
//! Progress is delivered as [`SearchEvent`]s on a [`SearchHandle`]. Every
//! search ends with exactly one terminal event unless it is cancelled, in
//! which case nothing more is delivered.

mod events;
mod handle;
mod orchestrator;

pub use events::SearchEvent;
pub use handle::SearchHandle;
pub use orchestrator::SearchOrchestrator;
