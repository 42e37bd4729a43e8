use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::{
    config::Config,
    error::{GeocodeError, ShowRouteError},
    geocode::{Geocoder, NominatimGeocoder},
    model::{Coordinate, Route},
    route::{OsrmRouter, Router},
};

/// Everything the screen shows, owned in one place.
///
/// The controller is the only writer; it commits results wholesale on
/// completion of its own operation and never mutates mid-flight. A failed
/// request leaves whatever the previous successful one put here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenState {
    pub start_text: String,
    pub end_text: String,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
    pub route: Option<Route>,
    pub loading: bool,
}

/// Orchestrates one "Show Route" action: Idle, then resolving both inputs,
/// then either a committed route (success) or a reported error, then Idle
/// again. The loading flag is set on entry and cleared on every exit path.
#[derive(Debug)]
pub struct ScreenController<G, R> {
    geocoder: Arc<G>,
    router: R,
}

impl ScreenController<NominatimGeocoder, OsrmRouter> {
    /// Build a controller over the configured public endpoints.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoder = Arc::new(NominatimGeocoder::new(config)?);
        let router = OsrmRouter::new(config)?;
        Ok(Self::new(geocoder, router))
    }
}

impl<G: Geocoder, R: Router> ScreenController<G, R> {
    pub fn new(geocoder: Arc<G>, router: R) -> Self {
        Self { geocoder, router }
    }

    /// The geocoder this controller resolves with, shared so an autocomplete
    /// [`crate::suggest::Debouncer`] can reuse the same client.
    pub fn geocoder(&self) -> Arc<G> {
        self.geocoder.clone()
    }

    /// Handle the "Show Route" action.
    ///
    /// On success `state` carries both resolved coordinates and a fresh
    /// route. On failure `state` is untouched except that a route fetch
    /// failure keeps the two coordinates that were already resolved.
    pub async fn show_route(&self, state: &mut ScreenState) -> Result<(), ShowRouteError> {
        if state.start_text.trim().is_empty() || state.end_text.trim().is_empty() {
            return Err(ShowRouteError::MissingInput);
        }

        state.loading = true;
        let outcome = self.resolve_and_fetch(state).await;
        state.loading = false;
        outcome
    }

    async fn resolve_and_fetch(&self, state: &mut ScreenState) -> Result<(), ShowRouteError> {
        // The two lookups are independent; run them together but keep the
        // start-before-end order of the reported error.
        let (start, end) = tokio::join!(
            self.resolve_location(&state.start_text),
            self.resolve_location(&state.end_text),
        );

        let start = start.map_err(|err| not_found(&state.start_text, err))?;
        let end = end.map_err(|err| not_found(&state.end_text, err))?;

        state.start = Some(start);
        state.end = Some(end);

        let route = self.router.route(start, end).await.map_err(|err| {
            warn!(%err, "route fetch failed");
            ShowRouteError::RouteFailed(err)
        })?;

        state.route = Some(route);
        Ok(())
    }

    /// Literal `"lat,lng"` input parses locally; anything else goes to the
    /// geocoder as a place name.
    async fn resolve_location(&self, text: &str) -> Result<Coordinate, GeocodeError> {
        if let Some(pair) = Coordinate::parse_pair(text) {
            return Ok(pair);
        }
        self.geocoder.resolve(text.trim()).await
    }
}

/// Fold every geocoding failure into the "could not find" dialog, but keep
/// transport problems visible in the log.
fn not_found(text: &str, err: GeocodeError) -> ShowRouteError {
    if !err.is_not_found() {
        warn!(%err, "geocoding failed");
    }
    ShowRouteError::NotFound(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;
    use crate::model::Suggestion;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Resolves a fixed set of known names; records every query it sees.
    #[derive(Debug, Default)]
    struct StubGeocoder {
        known: Vec<(&'static str, Coordinate)>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
            self.queries.lock().unwrap().push(query.to_owned());
            self.known
                .iter()
                .find(|(name, _)| *name == query)
                .map(|(_, c)| *c)
                .ok_or_else(|| GeocodeError::NotFound {
                    query: query.to_owned(),
                })
        }

        async fn suggest(&self, _query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
            Ok(Vec::new())
        }
    }

    #[derive(Debug)]
    struct StubRouter {
        fail: bool,
    }

    #[async_trait]
    impl Router for StubRouter {
        async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError> {
            if self.fail {
                return Err(RouteError::NoRoute);
            }
            Ok(Route {
                points: vec![start, end],
                distance_m: 1000.0,
                duration_s: 60.0,
            })
        }
    }

    fn controller(
        known: Vec<(&'static str, Coordinate)>,
        fail_route: bool,
    ) -> ScreenController<StubGeocoder, StubRouter> {
        ScreenController::new(
            Arc::new(StubGeocoder {
                known,
                queries: Mutex::new(Vec::new()),
            }),
            StubRouter { fail: fail_route },
        )
    }

    const ISLAMABAD: Coordinate = Coordinate { lat: 33.6, lng: 73.0 };
    const LAHORE: Coordinate = Coordinate { lat: 31.5, lng: 74.3 };

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_lookup() {
        let controller = controller(vec![], false);
        let mut state = ScreenState {
            end_text: "Lahore".to_string(),
            ..Default::default()
        };

        let err = controller.show_route(&mut state).await.expect_err("must fail");
        assert!(matches!(err, ShowRouteError::MissingInput));
        assert_eq!(state, ScreenState {
            end_text: "Lahore".to_string(),
            ..Default::default()
        });
        assert!(controller.geocoder().queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn literal_pairs_never_reach_the_geocoder() {
        let controller = controller(vec![], false);
        let mut state = ScreenState {
            start_text: "33.6,73.0".to_string(),
            end_text: "31.5,74.3".to_string(),
            ..Default::default()
        };

        controller.show_route(&mut state).await.expect("route resolves");

        assert!(controller.geocoder().queries.lock().unwrap().is_empty());
        assert_eq!(state.start, Some(ISLAMABAD));
        assert_eq!(state.end, Some(LAHORE));
    }

    #[tokio::test]
    async fn place_names_resolve_through_the_geocoder() {
        let controller = controller(vec![("Lahore", LAHORE)], false);
        let mut state = ScreenState {
            start_text: "33.6,73.0".to_string(),
            end_text: "  Lahore ".to_string(),
            ..Default::default()
        };

        controller.show_route(&mut state).await.expect("route resolves");

        assert_eq!(state.start, Some(ISLAMABAD));
        assert_eq!(state.end, Some(LAHORE));
        let route = state.route.expect("route committed");
        assert_eq!(route.points, vec![ISLAMABAD, LAHORE]);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn unresolved_input_is_named_and_prior_state_kept() {
        let controller = controller(vec![("Lahore", LAHORE)], false);
        let mut state = ScreenState {
            start_text: "Atlantis".to_string(),
            end_text: "Lahore".to_string(),
            start: Some(ISLAMABAD),
            end: Some(LAHORE),
            ..Default::default()
        };

        let err = controller.show_route(&mut state).await.expect_err("must fail");

        assert_eq!(err.to_string(), "Could not find: \"Atlantis\"");
        // Previous successful coordinates stay on screen.
        assert_eq!(state.start, Some(ISLAMABAD));
        assert_eq!(state.end, Some(LAHORE));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn start_error_is_reported_before_end_error() {
        let controller = controller(vec![], false);
        let mut state = ScreenState {
            start_text: "Nowhere".to_string(),
            end_text: "Elsewhere".to_string(),
            ..Default::default()
        };

        let err = controller.show_route(&mut state).await.expect_err("must fail");
        assert_eq!(err.to_string(), "Could not find: \"Nowhere\"");
    }

    #[tokio::test]
    async fn route_failure_keeps_resolved_coordinates() {
        let controller = controller(vec![], true);
        let mut state = ScreenState {
            start_text: "33.6,73.0".to_string(),
            end_text: "31.5,74.3".to_string(),
            ..Default::default()
        };

        let err = controller.show_route(&mut state).await.expect_err("must fail");

        assert_eq!(err.to_string(), "Failed to get route");
        assert_eq!(state.start, Some(ISLAMABAD));
        assert_eq!(state.end, Some(LAHORE));
        assert_eq!(state.route, None);
        assert!(!state.loading);
    }
}
