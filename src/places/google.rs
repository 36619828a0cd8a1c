use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::AppError;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const PLACES_SEARCH_URL: &str = "https://places.googleapis.com/v1/places:searchText";
const PLACES_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.types,places.location,places.rating,places.userRatingCount,places.websiteUri,places.googleMapsUri";
const MAX_RESULT_COUNT: u32 = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GoogleClient {
    client: Client,
    api_key: String,
}

impl GoogleClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    /// Resolve a free-text location to coordinates. `Ok(None)` means the
    /// service answered but found nothing; transport errors bubble up.
    pub async fn geocode(&self, location: &str) -> Result<Option<LatLng>, AppError> {
        let resp: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", location), ("key", &self.api_key)])
            .send()
            .await?
            .json()
            .await?;

        if resp.status != "OK" {
            warn!("geocode returned status {} for {:?}", resp.status, location);
            return Ok(None);
        }

        Ok(resp.results.first().map(|r| LatLng {
            lat: r.geometry.location.lat,
            lng: r.geometry.location.lng,
        }))
    }

    /// Text search against the places API. A response without a `places`
    /// key is an empty result, not an error.
    pub async fn search_text(&self, text_query: &str) -> Result<Vec<ProviderPlace>, AppError> {
        info!("places text search: {}", text_query);

        let resp = self
            .client
            .post(PLACES_SEARCH_URL)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PLACES_FIELD_MASK)
            .json(&SearchTextRequest {
                text_query,
                max_result_count: MAX_RESULT_COUNT,
            })
            .send()
            .await?;

        if let Err(e) = resp.error_for_status_ref() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!("places search failed ({}): {}", status, body);
            return Err(e.into());
        }

        let parsed: SearchTextResponse = resp.json().await?;
        Ok(parsed.places.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    max_result_count: u32,
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    places: Option<Vec<ProviderPlace>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeocodeLatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeLatLng {
    lat: f64,
    lng: f64,
}

/// Raw candidate venue as the provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPlace {
    pub id: Option<String>,
    /// Pre-v1 payloads carry the id under this key instead.
    #[serde(rename = "place_id")]
    pub legacy_place_id: Option<String>,
    pub display_name: Option<DisplayName>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub location: Option<PlaceLatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i64>,
    pub website_uri: Option<String>,
    pub google_maps_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayName {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaceLatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl ProviderPlace {
    pub fn name(&self) -> &str {
        self.display_name
            .as_ref()
            .and_then(|d| d.text.as_deref())
            .unwrap_or("")
    }

    pub fn address(&self) -> &str {
        self.formatted_address.as_deref().unwrap_or("")
    }

    /// Join key for vote lookups: provider id, then the legacy place id,
    /// then a name|address composite. Order-sensitive; votes recorded
    /// under one form would be orphaned by a different one.
    pub fn candidate_id(&self) -> String {
        if let Some(id) = self.id.as_deref().filter(|s| !s.is_empty()) {
            return id.to_string();
        }
        if let Some(id) = self.legacy_place_id.as_deref().filter(|s| !s.is_empty()) {
            return id.to_string();
        }
        format!("{}|{}", self.name(), self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, address: &str) -> ProviderPlace {
        ProviderPlace {
            display_name: Some(DisplayName {
                text: Some(name.to_string()),
            }),
            formatted_address: Some(address.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn provider_id_wins() {
        let mut place = named("Spot", "1 Main St");
        place.id = Some("places/abc123".to_string());
        place.legacy_place_id = Some("legacy".to_string());
        assert_eq!(place.candidate_id(), "places/abc123");
    }

    #[test]
    fn legacy_id_used_when_id_missing() {
        let mut place = named("Spot", "1 Main St");
        place.legacy_place_id = Some("ChIJlegacy".to_string());
        assert_eq!(place.candidate_id(), "ChIJlegacy");
    }

    #[test]
    fn composite_fallback_from_name_and_address() {
        let place = named("Mystery Spot", "465 Mystery Spot Rd");
        assert_eq!(place.candidate_id(), "Mystery Spot|465 Mystery Spot Rd");
    }

    #[test]
    fn empty_ids_fall_through() {
        let mut place = named("Spot", "1 Main St");
        place.id = Some(String::new());
        place.legacy_place_id = Some(String::new());
        assert_eq!(place.candidate_id(), "Spot|1 Main St");
    }

    #[test]
    fn missing_name_and_address_still_produce_a_key() {
        let place = ProviderPlace::default();
        assert_eq!(place.candidate_id(), "|");
    }
}
