use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: &CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, company_id, name, license_plate, brand, model, seats, vehicle_status,
                price_per_km, minimum_trip_distance_km, minimum_trip_fare,
                night_rate_enabled, night_rate_start, night_rate_end, night_rate_percent,
                waiting_per_quarter_hour, waiting_night_enabled, waiting_night_start,
                waiting_night_end, waiting_night_percent, sunday_surcharge_percent, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(&request.name)
        .bind(&request.license_plate)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.seats.unwrap_or(4))
        .bind(request.price_per_km)
        .bind(request.minimum_trip_distance_km)
        .bind(request.minimum_trip_fare)
        .bind(request.night_rate_enabled)
        .bind(&request.night_rate_start)
        .bind(&request.night_rate_end)
        .bind(request.night_rate_percent)
        .bind(request.waiting_per_quarter_hour)
        .bind(request.waiting_night_enabled)
        .bind(&request.waiting_night_start)
        .bind(&request.waiting_night_end)
        .bind(request.waiting_night_percent)
        .bind(request.sunday_surcharge_percent)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        company_id: Uuid,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND company_id = $2)",
        )
        .bind(license_plate)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Verificar que pertenece a la empresa
        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta empresa".to_string(),
            ));
        }

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, license_plate = $3, brand = $4, model = $5, seats = $6,
                vehicle_status = $7, price_per_km = $8, minimum_trip_distance_km = $9,
                minimum_trip_fare = $10, night_rate_enabled = $11, night_rate_start = $12,
                night_rate_end = $13, night_rate_percent = $14, waiting_per_quarter_hour = $15,
                waiting_night_enabled = $16, waiting_night_start = $17, waiting_night_end = $18,
                waiting_night_percent = $19, sunday_surcharge_percent = $20
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.clone().unwrap_or(current.name))
        .bind(request.license_plate.clone().unwrap_or(current.license_plate))
        .bind(request.brand.clone().or(current.brand))
        .bind(request.model.clone().or(current.model))
        .bind(request.seats.unwrap_or(current.seats))
        .bind(request.vehicle_status.clone().unwrap_or(current.vehicle_status))
        .bind(request.price_per_km.or(current.price_per_km))
        .bind(
            request
                .minimum_trip_distance_km
                .or(current.minimum_trip_distance_km),
        )
        .bind(request.minimum_trip_fare.or(current.minimum_trip_fare))
        .bind(request.night_rate_enabled.or(current.night_rate_enabled))
        .bind(request.night_rate_start.clone().or(current.night_rate_start))
        .bind(request.night_rate_end.clone().or(current.night_rate_end))
        .bind(request.night_rate_percent.or(current.night_rate_percent))
        .bind(
            request
                .waiting_per_quarter_hour
                .or(current.waiting_per_quarter_hour),
        )
        .bind(request.waiting_night_enabled.or(current.waiting_night_enabled))
        .bind(
            request
                .waiting_night_start
                .clone()
                .or(current.waiting_night_start),
        )
        .bind(request.waiting_night_end.clone().or(current.waiting_night_end))
        .bind(request.waiting_night_percent.or(current.waiting_night_percent))
        .bind(
            request
                .sunday_surcharge_percent
                .or(current.sunday_surcharge_percent),
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        // Verificar que pertenece a la empresa
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
