use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_license_plate, validate_time_of_day};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El nombre del vehículo es requerido".to_string(),
            ));
        }

        if validate_license_plate(&request.license_plate).is_err() {
            return Err(AppError::ValidationError("Matrícula inválida".to_string()));
        }

        validate_pricing_overrides(
            &request.night_rate_start,
            &request.night_rate_end,
            &request.waiting_night_start,
            &request.waiting_night_end,
            &[
                request.price_per_km,
                request.minimum_trip_distance_km,
                request.minimum_trip_fare,
                request.night_rate_percent,
                request.waiting_per_quarter_hour,
                request.waiting_night_percent,
                request.sunday_surcharge_percent,
            ],
        )?;

        // Verificar que la matrícula no exista para esta empresa
        if self
            .repository
            .license_plate_exists(&request.license_plate, company_id)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada para esta empresa".to_string(),
            ));
        }

        let vehicle = self.repository.create(company_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, company_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Verificar que pertenece a la empresa
        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este vehículo".to_string(),
            ));
        }

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_company(company_id).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        validate_pricing_overrides(
            &request.night_rate_start,
            &request.night_rate_end,
            &request.waiting_night_start,
            &request.waiting_night_end,
            &[
                request.price_per_km,
                request.minimum_trip_distance_km,
                request.minimum_trip_fare,
                request.night_rate_percent,
                request.waiting_per_quarter_hour,
                request.waiting_night_percent,
                request.sunday_surcharge_percent,
            ],
        )?;

        let vehicle = self.repository.update(id, company_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, company_id).await?;
        Ok(())
    }
}

/// Validar los overrides de tarificación de un vehículo
fn validate_pricing_overrides(
    night_start: &Option<String>,
    night_end: &Option<String>,
    waiting_start: &Option<String>,
    waiting_end: &Option<String>,
    amounts: &[Option<Decimal>],
) -> Result<(), AppError> {
    for window_value in [night_start, night_end, waiting_start, waiting_end]
        .into_iter()
        .flatten()
    {
        if validate_time_of_day(window_value).is_err() {
            return Err(AppError::ValidationError(format!(
                "Hora inválida '{}': formato esperado HH:MM",
                window_value
            )));
        }
    }

    for amount in amounts.iter().flatten() {
        if *amount < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Los importes y porcentajes no pueden ser negativos".to_string(),
            ));
        }
    }

    Ok(())
}
