//! Core library for the `route` CLI.
//!
//! This crate defines:
//! - Configuration for the public geocoding and routing endpoints
//! - Clients for place search (resolution + autocomplete) and route fetching
//! - The screen state and the controller orchestrating a route request
//!
//! It is used by `route-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod route;
pub mod screen;
pub mod suggest;

pub use config::Config;
pub use error::{GeocodeError, RouteError, ShowRouteError};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use model::{Coordinate, Route, Suggestion};
pub use route::{OsrmRouter, Router};
pub use screen::{ScreenController, ScreenState};
pub use suggest::Debouncer;
