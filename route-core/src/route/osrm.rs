use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::RouteError,
    model::{Coordinate, Route},
};

use super::Router;

/// Precision of the encoded polyline geometry (`geometries=polyline`).
const POLYLINE_PRECISION: u32 = 5;

/// Client for an OSRM-compatible routing endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    http: Client,
    base_url: String,
}

impl OsrmRouter {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.routing_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[async_trait]
impl Router for OsrmRouter {
    async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError> {
        for point in [start, end] {
            if !point.in_range() {
                return Err(RouteError::OutOfRange(point));
            }
        }

        // OSRM wants "lng,lat" pairs in the path.
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, start.lng, start.lat, end.lng, end.lat
        );

        debug!(url, "route fetch");

        let res = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "polyline")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(RouteError::Status(status));
        }

        let parsed: OsrmResponse = serde_json::from_str(&body)?;

        if parsed.code != "Ok" {
            return Err(RouteError::Rejected { code: parsed.code });
        }

        let best = parsed.routes.into_iter().next().ok_or(RouteError::NoRoute)?;

        let line = polyline::decode_polyline(&best.geometry, POLYLINE_PRECISION)
            .map_err(|e| RouteError::Geometry(e.to_string()))?;

        // geo-types convention: x is longitude, y is latitude.
        let points = line
            .coords()
            .map(|c| Coordinate { lat: c.y, lng: c.x })
            .collect();

        Ok(Route {
            points,
            distance_m: best.distance,
            duration_s: best.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected_locally() {
        let router = OsrmRouter::new(&Config::default()).expect("client builds");

        let bad = Coordinate { lat: 95.0, lng: 73.0 };
        let ok = Coordinate { lat: 33.6, lng: 73.0 };

        let err = router.route(bad, ok).await.expect_err("must fail");
        assert!(matches!(err, RouteError::OutOfRange(c) if c == bad));
    }
}
