use thiserror::Error;

/// Failure of a single weather or suggestion request.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request to weather provider failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status, e.g. 404 "city not found"
    /// or 401 for a missing/invalid API key.
    #[error("weather provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid coordinates ({latitude}, {longitude}): latitude must be -90..90, longitude -180..180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl LookupError {
    /// HTTP status reported by the provider, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::Status { status, .. } => Some(*status),
            LookupError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why the current position could not be determined.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Location lookup is switched off or not supported here.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed location: {0}")]
    Malformed(String),
}
