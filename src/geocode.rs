//! Free-text address resolution.
//!
//! `resolve` turns the request's location input into a `Coordinate`.
//! Inputs that already look like a numeric `"lat,lng"` pair bypass the
//! external geocoder entirely (deterministic, no network dependency);
//! everything else goes to the `Geocoder` collaborator and only the
//! first result is used.

use std::sync::OnceLock;
use std::time::Duration;

use futures_util::future::BoxFuture;
use regex::Regex;
use serde::Deserialize;

use crate::geo::Coordinate;

/// Strict numeric `"lat,lng"` pattern for the fast path.
fn numeric_location_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?,-?\d+(\.\d+)?$").expect("valid regex"))
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Http(String),
    #[error("Geocoding API error: status {status}")]
    UpstreamStatus { status: u16 },
    #[error("No results found for this address")]
    NoResults,
    #[error("Geocoder returned an unparseable result: {0}")]
    BadResult(String),
}

/// A single geocoder hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoHit {
    pub lat: f64,
    pub lng: f64,
}

/// Address-to-coordinates collaborator.
///
/// Implementations must treat an empty result list and a non-success
/// upstream response as errors.
pub trait Geocoder: Send + Sync {
    fn search<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Vec<GeoHit>, GeocodeError>>;
}

/// Resolve a location input to a coordinate.
///
/// Numeric `"lat,lng"` strings are parsed locally; anything else is
/// sent to the geocoder and the first hit wins.
pub async fn resolve(geocoder: &dyn Geocoder, input: &str) -> Result<Coordinate, GeocodeError> {
    if numeric_location_re().is_match(input) {
        return input
            .parse::<Coordinate>()
            .map_err(|e| GeocodeError::BadResult(e.to_string()));
    }

    let hits = geocoder.search(input).await?;
    let first = hits.first().ok_or(GeocodeError::NoResults)?;
    Ok(Coordinate::new(first.lat, first.lng))
}

// ═══════════════════════════════════════════════════════════
// Nominatim client
// ═══════════════════════════════════════════════════════════

/// OSM Nominatim hits carry coordinates as strings.
#[derive(Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// HTTP geocoder backed by an OSM Nominatim instance.
pub struct NominatimGeocoder {
    base_url: String,
    user_agent: String,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Nominatim usage policy requires an identifying User-Agent.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            client,
        }
    }
}

impl Geocoder for NominatimGeocoder {
    fn search<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Vec<GeoHit>, GeocodeError>> {
        Box::pin(async move {
            let url = format!("{}/search", self.base_url);

            // reqwest percent-encodes the query parameters.
            let response = self
                .client
                .get(&url)
                .header("User-Agent", &self.user_agent)
                .query(&[("q", address), ("format", "json"), ("limit", "1")])
                .send()
                .await
                .map_err(|e| GeocodeError::Http(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::UpstreamStatus {
                    status: status.as_u16(),
                });
            }

            let hits: Vec<NominatimHit> = response
                .json()
                .await
                .map_err(|e| GeocodeError::BadResult(e.to_string()))?;

            hits.into_iter()
                .map(|h| {
                    let lat = h
                        .lat
                        .parse::<f64>()
                        .map_err(|_| GeocodeError::BadResult(h.lat.clone()))?;
                    let lng = h
                        .lon
                        .parse::<f64>()
                        .map_err(|_| GeocodeError::BadResult(h.lon.clone()))?;
                    Ok(GeoHit { lat, lng })
                })
                .collect()
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Mock geocoder for tests
// ═══════════════════════════════════════════════════════════

/// Mock geocoder returning a configured result. Can be armed to panic
/// when the numeric fast path should have avoided it.
pub struct MockGeocoder {
    result: Result<Vec<GeoHit>, &'static str>,
    must_not_be_called: bool,
}

impl MockGeocoder {
    pub fn with_hit(lat: f64, lng: f64) -> Self {
        Self {
            result: Ok(vec![GeoHit { lat, lng }]),
            must_not_be_called: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            result: Ok(vec![]),
            must_not_be_called: false,
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            result: Err(message),
            must_not_be_called: false,
        }
    }

    /// Panics if `search` is invoked at all.
    pub fn unreachable() -> Self {
        Self {
            result: Ok(vec![]),
            must_not_be_called: true,
        }
    }
}

impl Geocoder for MockGeocoder {
    fn search<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Vec<GeoHit>, GeocodeError>> {
        Box::pin(async move {
            if self.must_not_be_called {
                panic!("geocoder invoked for input {address:?}");
            }
            match &self.result {
                Ok(hits) => Ok(hits.clone()),
                Err(message) => Err(GeocodeError::Http((*message).to_string())),
            }
        })
    }
}
