// crates/branchfinder-core/src/remote.rs

//! # Remote Fallback Search
//!
//! The [`Geocoder`] trait is the seam between the finder and the places
//! service. [`NominatimClient`] talks to OpenStreetMap Nominatim over a
//! blocking HTTP client; tests plug in their own implementation.

use crate::error::Result;
use crate::model::{MapPoint, Place};
use serde::Deserialize;
use tracing::{debug, warn};

/// A service that turns free text into places within one country.
pub trait Geocoder {
    /// Returns at most `limit` places for `query`.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>>;

    /// Resolves a single address to a point. Failures are logged and yield `None`.
    fn geocode(&self, address: &str) -> Option<MapPoint> {
        match self.search(address, 1) {
            Ok(places) => places.first().map(MapPoint::from),
            Err(e) => {
                warn!(address, error = %e, "geocoding failed");
                None
            }
        }
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        (**self).search(query, limit)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        (**self).search(query, limit)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for std::sync::Arc<G> {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        (**self).search(query, limit)
    }
}

/// Fail-soft search: any error becomes an empty list.
///
/// Network failures and empty responses are indistinguishable to callers.
pub fn remote_search<G: Geocoder + ?Sized>(geocoder: &G, query: &str, limit: usize) -> Vec<Place> {
    match geocoder.search(query, limit) {
        Ok(places) => {
            debug!(query, hits = places.len(), "remote search");
            places
        }
        Err(e) => {
            warn!(query, error = %e, "remote search failed");
            Vec::new()
        }
    }
}

/// Raw Nominatim search hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct PlaceRaw {
    #[serde(default)]
    display_name: Option<String>,
    lat: String,
    lon: String,
}

/// Parses a Nominatim JSON array into places.
///
/// Hits with coordinates that do not parse as `f64` are skipped.
pub fn parse_places(body: &str) -> Result<Vec<Place>> {
    let raw: Vec<PlaceRaw> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .filter_map(|p| {
            let latitude = p.lat.trim().parse::<f64>().ok()?;
            let longitude = p.lon.trim().parse::<f64>().ok()?;
            Some(Place {
                label: p.display_name.unwrap_or_default(),
                latitude,
                longitude,
            })
        })
        .collect())
}

#[cfg(feature = "remote")]
pub use client::NominatimClient;

#[cfg(feature = "remote")]
mod client {
    use super::{parse_places, Geocoder};
    use crate::config::FinderConfig;
    use crate::error::Result;
    use crate::model::Place;
    use reqwest::blocking::Client;
    use std::time::Duration;

    /// Blocking client for the Nominatim `/search` endpoint.
    #[derive(Debug, Clone)]
    pub struct NominatimClient {
        http: Client,
        endpoint: String,
        country_code: String,
    }

    impl NominatimClient {
        pub fn new(
            endpoint: impl Into<String>,
            country_code: impl Into<String>,
            user_agent: &str,
            timeout: Option<Duration>,
        ) -> Result<Self> {
            let mut builder = Client::builder().user_agent(user_agent.to_string());
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
            Ok(Self {
                http: builder.build()?,
                endpoint: endpoint.into(),
                country_code: country_code.into(),
            })
        }

        pub fn from_config(cfg: &FinderConfig) -> Result<Self> {
            let timeout = (cfg.timeout_secs > 0).then(|| Duration::from_secs(cfg.timeout_secs));
            Self::new(&cfg.endpoint, &cfg.country_code, &cfg.user_agent, timeout)
        }
    }

    impl Geocoder for NominatimClient {
        fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
            let limit = limit.to_string();
            let body = self
                .http
                .get(&self.endpoint)
                .query(&[
                    ("q", query),
                    ("format", "json"),
                    ("limit", limit.as_str()),
                    ("countrycodes", self.country_code.as_str()),
                ])
                .send()?
                .error_for_status()?
                .text()?;
            parse_places(&body)
        }
    }
}
