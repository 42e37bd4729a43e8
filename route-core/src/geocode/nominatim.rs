use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::GeocodeError,
    model::{Coordinate, Suggestion},
};

use super::Geocoder;

const SUGGESTION_LIMIT: usize = 5;

/// Client for a Nominatim-compatible place-search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
    user_agent: String,
    country_codes: String,
    language: String,
}

impl NominatimGeocoder {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.geocoding_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            country_codes: config.country_codes.clone(),
            language: config.language.clone(),
        })
    }

    async fn search(
        &self,
        query: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<SearchResult>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        debug!(query, url, "place search");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .query(extra)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    osm_id: i64,
    #[serde(default)]
    name: String,
    display_name: String,
    // Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,
}

impl SearchResult {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        Ok(Coordinate {
            lat: self.lat.parse()?,
            lng: self.lon.parse()?,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let results = self.search(query, &[("limit", "1")]).await?;

        match results.first() {
            Some(best) => best.coordinate(),
            None => Err(GeocodeError::NotFound {
                query: query.to_string(),
            }),
        }
    }

    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        let limit = SUGGESTION_LIMIT.to_string();
        let results = self
            .search(
                query,
                &[
                    ("limit", limit.as_str()),
                    ("countrycodes", self.country_codes.as_str()),
                    ("accept-language", self.language.as_str()),
                ],
            )
            .await?;

        Ok(results
            .into_iter()
            .map(|item| Suggestion {
                id: item.osm_id,
                name: item.name,
                display_name: item.display_name,
            })
            .collect())
    }
}
