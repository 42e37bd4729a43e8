use serde::{Deserialize, Serialize};

/// A point on the map. Latitude first, like the polyline wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Parse a literal `"lat,lng"` pair.
    ///
    /// Returns `Some` only when the text contains a comma and both sides are
    /// finite numbers; anything else (including `"1,2,3"`, whose right-hand
    /// side is not a number) is left for the geocoder.
    pub fn parse_pair(text: &str) -> Option<Self> {
        let (lat, lng) = text.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }

    /// Whether the pair lies inside the valid WGS84 ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// One autocomplete candidate from the place-search endpoint.
///
/// Transient: the caller replaces the whole list on every accepted query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub display_name: String,
}

/// A decoded driving route, ordered from start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<Coordinate>,
    /// Total length in meters, as reported by the routing service.
    pub distance_m: f64,
    /// Estimated travel time in seconds.
    pub duration_s: f64,
}
