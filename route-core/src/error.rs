use thiserror::Error;

use crate::model::Coordinate;

/// Failures of the place-search endpoint.
///
/// Not-found is a distinct variant rather than an empty `Option` so the
/// orchestration can tell "the service had no match" apart from "the service
/// was unreachable", even though both end in the same user-visible message.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no match for {query:?}")]
    NotFound { query: String },

    #[error("place search returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("place search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed place search response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("place search result carried a non-numeric coordinate: {0}")]
    BadCoordinate(#[from] std::num::ParseFloatError),
}

impl GeocodeError {
    /// True when the service answered but simply had no result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound { .. })
    }
}

/// Failures of the routing endpoint.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("coordinate out of range: {0}")]
    OutOfRange(Coordinate),

    #[error("routing service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("routing service rejected the request with code {code:?}")]
    Rejected { code: String },

    #[error("routing response contained no routes")]
    NoRoute,

    #[error("routing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed routing response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not decode route geometry: {0}")]
    Geometry(String),
}

/// What the screen reports to the user when "Show Route" fails.
///
/// The display strings are the exact dialog messages.
#[derive(Debug, Error)]
pub enum ShowRouteError {
    #[error("Please enter both start and end locations")]
    MissingInput,

    #[error("Could not find: \"{0}\"")]
    NotFound(String),

    #[error("Failed to get route")]
    RouteFailed(#[source] RouteError),
}
