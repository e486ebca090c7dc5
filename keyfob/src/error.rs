use thiserror::Error as ThisError;

/// Result type for management API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the management API.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A locally validated input was missing or outside its allowed set.
    ///
    /// Raised before any request is issued; the message names the
    /// offending field or value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, preserved verbatim
        body: String,
    },

    /// HTTP request failed (network, timeout, invalid URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
