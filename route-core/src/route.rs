use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::RouteError,
    model::{Coordinate, Route},
};

pub mod osrm;

pub use osrm::OsrmRouter;

/// Routing abstraction: two endpoints in, an ordered polyline out.
#[async_trait]
pub trait Router: Send + Sync + Debug {
    /// Fetch a driving route from `start` to `end`.
    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError>;
}
