use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::quote_dto::{
    Coordinates, QuoteBreakdownResponse, QuotePreviewResponse, QuoteRequest, QuoteResponse,
};
use crate::models::quote::Quote;
use crate::pricing::{price_quote, QuoteBreakdown, TripContext};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::routing_service::RoutingService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_coordinates, validate_date, validate_time_of_day};

pub struct QuoteController {
    quote_repository: QuoteRepository,
    vehicle_repository: VehicleRepository,
    company_repository: CompanyRepository,
    client_repository: ClientRepository,
    routing: Option<RoutingService>,
    ride_vat_percent: Decimal,
    waiting_vat_percent: Decimal,
}

impl QuoteController {
    pub fn new(state: &AppState) -> Self {
        let routing = state
            .config
            .mapbox_token
            .clone()
            .map(|token| RoutingService::new(token, state.http_client.clone()));

        Self {
            quote_repository: QuoteRepository::new(state.pool.clone()),
            vehicle_repository: VehicleRepository::new(state.pool.clone()),
            company_repository: CompanyRepository::new(state.pool.clone()),
            client_repository: ClientRepository::new(state.pool.clone()),
            routing,
            ride_vat_percent: state.config.ride_vat_percent,
            waiting_vat_percent: state.config.waiting_vat_percent,
        }
    }

    /// Tarificar sin persistir (camino del widget embebido)
    pub async fn preview(&self, request: QuoteRequest) -> Result<QuotePreviewResponse, AppError> {
        let (trip, breakdown, _) = self.resolve_and_price(&request).await?;

        Ok(QuotePreviewResponse {
            vehicle_id: request.vehicle_id,
            departure_date: trip.departure_date,
            departure_time: trip.departure_time,
            outbound_distance_km: trip.outbound_distance_km,
            outbound_duration_minutes: trip.outbound_duration_minutes,
            return_distance_km: trip.return_distance_km,
            return_duration_minutes: trip.return_duration_minutes,
            breakdown: QuoteBreakdownResponse::from(&breakdown),
        })
    }

    /// Tarificar y persistir un presupuesto
    pub async fn create(
        &self,
        company_id: Uuid,
        request: QuoteRequest,
    ) -> Result<ApiResponse<QuoteResponse>, AppError> {
        // Verificar que el cliente, si viene, pertenece a la empresa
        if let Some(client_id) = request.client_id {
            let client = self
                .client_repository
                .find_by_id(client_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;
            if client.company_id != company_id {
                return Err(AppError::Forbidden(
                    "El cliente no pertenece a esta empresa".to_string(),
                ));
            }
        }

        let (trip, breakdown, vehicle_company_id) = self.resolve_and_price(&request).await?;

        if vehicle_company_id != company_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta empresa".to_string(),
            ));
        }

        // Un presupuesto solo se guarda con una distancia real; el
        // desglose cero del preview es informativo
        if trip.outbound_distance_km <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "La distancia del trayecto debe ser mayor que 0".to_string(),
            ));
        }

        let quote = build_quote(company_id, &request, &trip, &breakdown);
        let saved = self.quote_repository.create(&quote).await?;

        Ok(ApiResponse::success_with_message(
            QuoteResponse::from(saved),
            "Presupuesto creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, company_id: Uuid) -> Result<QuoteResponse, AppError> {
        let quote = self
            .quote_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Presupuesto no encontrado".to_string()))?;

        if quote.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este presupuesto".to_string(),
            ));
        }

        Ok(QuoteResponse::from(quote))
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<QuoteResponse>, AppError> {
        let quotes = self.quote_repository.find_by_company(company_id).await?;

        Ok(quotes.into_iter().map(QuoteResponse::from).collect())
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.quote_repository.delete(id, company_id).await?;
        Ok(())
    }

    /// Resolver el viaje (rutas incluidas), el perfil del vehículo y
    /// ejecutar el motor de tarificación
    async fn resolve_and_price(
        &self,
        request: &QuoteRequest,
    ) -> Result<(TripContext, QuoteBreakdown, Uuid), AppError> {
        let vehicle = self
            .vehicle_repository
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let company = self
            .company_repository
            .find_by_id(vehicle.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empresa no encontrada".to_string()))?;

        let profile = vehicle.pricing_profile(&company);
        let trip = self.resolve_trip(request).await?;

        let breakdown = price_quote(
            &trip,
            &profile,
            self.ride_vat_percent,
            self.waiting_vat_percent,
        );

        Ok((trip, breakdown, vehicle.company_id))
    }

    /// Construir el TripContext con distancias y duraciones resueltas
    async fn resolve_trip(&self, request: &QuoteRequest) -> Result<TripContext, AppError> {
        let departure_date = validate_date(&request.departure_date).map_err(|_| {
            AppError::ValidationError("Fecha de salida inválida: formato esperado YYYY-MM-DD".to_string())
        })?;
        let departure_time = validate_time_of_day(&request.departure_time).map_err(|_| {
            AppError::ValidationError("Hora de salida inválida: formato esperado HH:MM".to_string())
        })?;

        if request.waiting_minutes < 0 {
            return Err(AppError::ValidationError(
                "Los minutos de espera no pueden ser negativos".to_string(),
            ));
        }

        // Ida: distancia entregada por el caller o resuelta por rutas
        let (outbound_distance_km, outbound_duration_minutes) = match (
            request.outbound_distance_km,
            request.outbound_duration_minutes,
        ) {
            (Some(distance), Some(duration)) => {
                if distance < Decimal::ZERO || duration < 0 {
                    return Err(AppError::ValidationError(
                        "La distancia y la duración no pueden ser negativas".to_string(),
                    ));
                }
                (distance, duration)
            }
            _ => {
                let origin = request.departure_coordinates.ok_or_else(missing_route_input)?;
                let destination = request
                    .destination_coordinates
                    .ok_or_else(missing_route_input)?;
                let route = self.fetch_route(origin, destination).await?;
                (route.distance_km, route.duration_minutes)
            }
        };

        // Vuelta a dirección distinta: su distancia debe quedar resuelta
        // antes de tarificar
        let (return_distance_km, return_duration_minutes) =
            if request.has_return_trip && !request.return_to_same_address {
                match (request.return_distance_km, request.return_duration_minutes) {
                    (Some(distance), Some(duration)) => {
                        if distance < Decimal::ZERO || duration < 0 {
                            return Err(AppError::ValidationError(
                                "La distancia y la duración de la vuelta no pueden ser negativas"
                                    .to_string(),
                            ));
                        }
                        (Some(distance), Some(duration))
                    }
                    _ => {
                        let origin = request
                            .destination_coordinates
                            .ok_or_else(missing_route_input)?;
                        let destination = request
                            .return_coordinates
                            .or(request.departure_coordinates)
                            .ok_or_else(missing_route_input)?;
                        let route = self.fetch_route(origin, destination).await?;
                        (Some(route.distance_km), Some(route.duration_minutes))
                    }
                }
            } else {
                (None, None)
            };

        Ok(TripContext {
            departure_date,
            departure_time,
            outbound_distance_km,
            outbound_duration_minutes,
            has_return_trip: request.has_return_trip,
            return_to_same_address: request.return_to_same_address,
            return_distance_km,
            return_duration_minutes,
            has_waiting_time: request.has_waiting_time,
            waiting_minutes: request.waiting_minutes,
        })
    }

    async fn fetch_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<crate::services::routing_service::RouteResult, AppError> {
        validate_coordinates(origin.latitude, origin.longitude)
            .map_err(|_| AppError::ValidationError("Coordenadas de origen inválidas".to_string()))?;
        validate_coordinates(destination.latitude, destination.longitude).map_err(|_| {
            AppError::ValidationError("Coordenadas de destino inválidas".to_string())
        })?;

        let routing = self.routing.as_ref().ok_or_else(|| {
            AppError::ExternalApi("Proveedor de rutas no configurado (MAPBOX_TOKEN)".to_string())
        })?;

        routing
            .get_route(origin, destination)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))
    }
}

fn missing_route_input() -> AppError {
    AppError::BadRequest(
        "Faltan la distancia del trayecto o las coordenadas para resolverla".to_string(),
    )
}

/// Construir la fila de presupuesto a partir del viaje y su desglose
fn build_quote(
    company_id: Uuid,
    request: &QuoteRequest,
    trip: &TripContext,
    breakdown: &QuoteBreakdown,
) -> Quote {
    Quote {
        id: Uuid::new_v4(),
        company_id,
        vehicle_id: request.vehicle_id,
        client_id: request.client_id,
        departure_address: request.departure_address.clone(),
        destination_address: request.destination_address.clone(),
        departure_date: trip.departure_date,
        departure_time: trip.departure_time,
        outbound_distance_km: trip.outbound_distance_km,
        outbound_duration_minutes: trip.outbound_duration_minutes,
        has_return_trip: trip.has_return_trip,
        return_to_same_address: trip.return_to_same_address,
        return_distance_km: trip.return_distance_km,
        return_duration_minutes: trip.return_duration_minutes,
        has_waiting_time: trip.has_waiting_time,
        waiting_minutes: trip.waiting_minutes,
        day_km: breakdown.day_km,
        night_km: breakdown.night_km,
        total_km: breakdown.total_km,
        one_way_fare_ht: breakdown.one_way_fare_ht,
        return_fare_ht: breakdown.return_fare_ht,
        waiting_fare_ht: breakdown.waiting_fare_ht,
        one_way_fare_ttc: breakdown.one_way_fare_ttc,
        return_fare_ttc: breakdown.return_fare_ttc,
        waiting_fare_ttc: breakdown.waiting_fare_ttc,
        night_surcharge_amount: breakdown.night_surcharge_amount,
        sunday_surcharge_amount: breakdown.sunday_surcharge_amount,
        total_ht: breakdown.total_ht,
        total_vat: breakdown.total_vat,
        total_ttc: breakdown.total_ttc,
        is_night_rate_applied: breakdown.is_night_rate_applied,
        is_sunday_or_holiday: breakdown.is_sunday_or_holiday,
        minimum_fare_applied: breakdown.minimum_fare_applied,
        below_minimum_distance: breakdown.below_minimum_distance,
        quote_status: "draft".to_string(),
        created_at: Utc::now(),
    }
}
