use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::dto::quote_dto::Coordinates;
use crate::services::geocoding_service::{GeocodingResponse, GeocodingService};
use crate::services::routing_service::{RouteResult, RoutingService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_coordinates;

pub fn create_geocoding_router() -> Router<AppState> {
    Router::new()
        .route("/forward", get(forward_geocode))
        .route("/route", get(get_route))
}

#[derive(Debug, Deserialize)]
struct ForwardGeocodeQuery {
    address: String,
}

#[derive(Debug, Deserialize)]
struct RouteQuery {
    from_lat: f64,
    from_lng: f64,
    to_lat: f64,
    to_lng: f64,
}

async fn forward_geocode(
    State(state): State<AppState>,
    Query(query): Query<ForwardGeocodeQuery>,
) -> Result<Json<GeocodingResponse>, AppError> {
    if query.address.trim().is_empty() {
        return Err(AppError::BadRequest("La dirección es requerida".to_string()));
    }

    let token = state.config.mapbox_token.clone().ok_or_else(|| {
        AppError::ExternalApi("Proveedor de geocoding no configurado (MAPBOX_TOKEN)".to_string())
    })?;

    let service = GeocodingService::new(token, state.http_client.clone());
    let response = service
        .geocode_address(&query.address)
        .await
        .map_err(|e| AppError::ExternalApi(e.to_string()))?;

    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResult>, AppError> {
    validate_coordinates(query.from_lat, query.from_lng)
        .map_err(|_| AppError::ValidationError("Coordenadas de origen inválidas".to_string()))?;
    validate_coordinates(query.to_lat, query.to_lng)
        .map_err(|_| AppError::ValidationError("Coordenadas de destino inválidas".to_string()))?;

    let token = state.config.mapbox_token.clone().ok_or_else(|| {
        AppError::ExternalApi("Proveedor de rutas no configurado (MAPBOX_TOKEN)".to_string())
    })?;

    let service = RoutingService::new(token, state.http_client.clone());
    let route = service
        .get_route(
            Coordinates {
                latitude: query.from_lat,
                longitude: query.from_lng,
            },
            Coordinates {
                latitude: query.to_lat,
                longitude: query.to_lng,
            },
        )
        .await
        .map_err(|e| AppError::ExternalApi(e.to_string()))?;

    Ok(Json(route))
}
