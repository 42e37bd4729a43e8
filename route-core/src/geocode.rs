use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::GeocodeError,
    model::{Coordinate, Suggestion},
};

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

/// Place-search abstraction: free text in, coordinates out.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve a query to its single best match.
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError>;

    /// Fetch up to five autocomplete candidates for a partial query.
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError>;
}
