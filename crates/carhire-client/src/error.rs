//! Error types for car hire client operations

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, CarHireError>;

/// Message used when a response carries neither data nor an error message
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Message used when a response body is not JSON and the transport reported no error
pub const REQUEST_FAILED: &str = "Request failed with no error";

/// Errors that can occur during client operations
///
/// The `Display` output of every variant is the message shown to users.
#[derive(Error, Debug)]
pub enum CarHireError {
    /// Domain or credentials are not set
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Bootstrap has not completed; wait for the ready status and retry
    #[error("API client is not ready yet, wait for the client status to become ready before performing requests")]
    NotReady,

    /// Parameters could not be serialized
    #[error("Something went wrong, error encoding parameters: {0}")]
    Encoding(String),

    /// Network level failure, carrying the transport's description
    #[error("{0}")]
    Transport(String),

    /// Response was not JSON or did not have the expected shape
    #[error("{0}")]
    Decode(String),

    /// The API reported an error in its envelope
    #[error("{0}")]
    Api(String),

    /// The search is not complete enough to run
    #[error("{0}")]
    Validation(String),

    /// A location could not be resolved
    #[error("{0}")]
    Location(String),

    /// No supplier has depots near the search locations
    #[error("No depots found for this search")]
    NoDepots,

    /// The search was cancelled before it finished
    #[error("Search was cancelled")]
    Cancelled,

    /// A newer bootstrap replaced this one before it finished
    #[error("Setup was superseded by a newer setup call")]
    Superseded,

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Domain rule rejected the change
    #[error(transparent)]
    Model(#[from] carhire_core::ModelError),
}

impl CarHireError {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an API error from an envelope message
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
