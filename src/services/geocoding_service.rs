use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodingRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodingResponse {
    pub success: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted_address: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    geometry: MapboxGeometry,
    properties: MapboxProperties,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<f64>, // [longitude, latitude]
}

#[derive(Debug, Deserialize)]
struct MapboxProperties {
    #[serde(rename = "full_address")]
    full_address: Option<String>,
    #[serde(rename = "place_name")]
    place_name: Option<String>,
}

pub struct GeocodingService {
    mapbox_token: String,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(mapbox_token: String, client: reqwest::Client) -> Self {
        Self {
            mapbox_token,
            client,
        }
    }

    /// Resolver una dirección a coordenadas (Mapbox Geocoding v6 forward)
    pub async fn geocode_address(&self, address: &str) -> Result<GeocodingResponse> {
        log::info!("🗺️ Geocoding address: {}", address);

        // URL encode la dirección
        let encoded_address = urlencoding::encode(address);

        let url = format!(
            "https://api.mapbox.com/search/geocode/v6/forward?q={}&access_token={}&country=fr&limit=1",
            encoded_address, self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "VtcQuoting/1.0")
            .send()
            .await?;

        let status = response.status();
        log::info!("📡 Geocoding response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Geocoding failed with status {}: {}", status, error_text);
            return Ok(GeocodingResponse {
                success: false,
                latitude: None,
                longitude: None,
                formatted_address: None,
                error: Some(format!("Geocoding failed: {}", status)),
            });
        }

        let response_text = response.text().await?;

        let mapbox_response: MapboxGeocodingResponse = serde_json::from_str(&response_text)
            .map_err(|e| anyhow!("Failed to parse geocoding response: {}", e))?;

        // Extraer la primera feature (resultado más relevante)
        if let Some(feature) = mapbox_response.features.first() {
            if feature.geometry.coordinates.len() >= 2 {
                let longitude = feature.geometry.coordinates[0];
                let latitude = feature.geometry.coordinates[1];

                let formatted_address = feature
                    .properties
                    .full_address
                    .clone()
                    .or_else(|| feature.properties.place_name.clone());

                return Ok(GeocodingResponse {
                    success: true,
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                    formatted_address,
                    error: None,
                });
            }
        }

        Ok(GeocodingResponse {
            success: false,
            latitude: None,
            longitude: None,
            formatted_address: None,
            error: Some("No results found".to_string()),
        })
    }
}
