use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dto::quote_dto::Coordinates;

/// Ruta resuelta entre dos puntos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_km: Decimal,
    pub duration_minutes: i64,
}

#[derive(Debug, Deserialize)]
struct MapboxDirectionsResponse {
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    /// Distancia en metros
    distance: f64,
    /// Duración en segundos
    duration: f64,
}

pub struct RoutingService {
    mapbox_token: String,
    client: reqwest::Client,
}

impl RoutingService {
    pub fn new(mapbox_token: String, client: reqwest::Client) -> Self {
        Self {
            mapbox_token,
            client,
        }
    }

    /// Obtener distancia y duración entre dos coordenadas (Mapbox Directions)
    ///
    /// El motor de tarificación no se invoca hasta que la ruta está
    /// resuelta; los fallos aquí son avisos reintenables para el caller.
    pub async fn get_route(&self, origin: Coordinates, destination: Coordinates) -> Result<RouteResult> {
        let url = format!(
            "https://api.mapbox.com/directions/v5/mapbox/driving/{},{};{},{}?access_token={}&overview=false",
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
            self.mapbox_token
        );

        log::info!(
            "🛣️ Resolviendo ruta: ({}, {}) -> ({}, {})",
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "VtcQuoting/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Directions failed with status {}: {}", status, error_text);
            return Err(anyhow!("Directions request failed: {}", status));
        }

        let directions: MapboxDirectionsResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse directions response: {}", e))?;

        let route = directions
            .routes
            .first()
            .ok_or_else(|| anyhow!("No route found between the given coordinates"))?;

        let distance_km = Decimal::from_f64_retain(route.distance / 1000.0)
            .ok_or_else(|| anyhow!("Invalid distance value"))?
            .round_dp(3);
        // Redondeo hacia arriba: un minuto empezado cuenta entero
        let duration_minutes = (route.duration / 60.0).ceil() as i64;

        log::info!(
            "✅ Ruta resuelta: {} km, {} min",
            distance_km,
            duration_minutes
        );

        Ok(RouteResult {
            distance_km,
            duration_minutes,
        })
    }
}
