use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para crear un nuevo vehículo
///
/// Los campos de tarificación son opcionales: los que falten usan los
/// valores por defecto de la empresa en el momento de presupuestar.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 5, max = 20))]
    pub license_plate: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1, max = 9))]
    pub seats: Option<i32>,

    pub price_per_km: Option<Decimal>,
    pub minimum_trip_distance_km: Option<Decimal>,
    pub minimum_trip_fare: Option<Decimal>,
    pub night_rate_enabled: Option<bool>,
    pub night_rate_start: Option<String>,
    pub night_rate_end: Option<String>,
    pub night_rate_percent: Option<Decimal>,
    pub waiting_per_quarter_hour: Option<Decimal>,
    pub waiting_night_enabled: Option<bool>,
    pub waiting_night_start: Option<String>,
    pub waiting_night_end: Option<String>,
    pub waiting_night_percent: Option<Decimal>,
    pub sunday_surcharge_percent: Option<Decimal>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1, max = 9))]
    pub seats: Option<i32>,

    pub vehicle_status: Option<String>,

    pub price_per_km: Option<Decimal>,
    pub minimum_trip_distance_km: Option<Decimal>,
    pub minimum_trip_fare: Option<Decimal>,
    pub night_rate_enabled: Option<bool>,
    pub night_rate_start: Option<String>,
    pub night_rate_end: Option<String>,
    pub night_rate_percent: Option<Decimal>,
    pub waiting_per_quarter_hour: Option<Decimal>,
    pub waiting_night_enabled: Option<bool>,
    pub waiting_night_start: Option<String>,
    pub waiting_night_end: Option<String>,
    pub waiting_night_percent: Option<Decimal>,
    pub sunday_surcharge_percent: Option<Decimal>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub seats: i32,
    pub vehicle_status: String,
    pub price_per_km: Option<Decimal>,
    pub minimum_trip_distance_km: Option<Decimal>,
    pub minimum_trip_fare: Option<Decimal>,
    pub night_rate_enabled: Option<bool>,
    pub night_rate_start: Option<String>,
    pub night_rate_end: Option<String>,
    pub night_rate_percent: Option<Decimal>,
    pub waiting_per_quarter_hour: Option<Decimal>,
    pub waiting_night_enabled: Option<bool>,
    pub waiting_night_start: Option<String>,
    pub waiting_night_end: Option<String>,
    pub waiting_night_percent: Option<Decimal>,
    pub sunday_surcharge_percent: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            company_id: vehicle.company_id,
            name: vehicle.name,
            license_plate: vehicle.license_plate,
            brand: vehicle.brand,
            model: vehicle.model,
            seats: vehicle.seats,
            vehicle_status: vehicle.vehicle_status,
            price_per_km: vehicle.price_per_km,
            minimum_trip_distance_km: vehicle.minimum_trip_distance_km,
            minimum_trip_fare: vehicle.minimum_trip_fare,
            night_rate_enabled: vehicle.night_rate_enabled,
            night_rate_start: vehicle.night_rate_start,
            night_rate_end: vehicle.night_rate_end,
            night_rate_percent: vehicle.night_rate_percent,
            waiting_per_quarter_hour: vehicle.waiting_per_quarter_hour,
            waiting_night_enabled: vehicle.waiting_night_enabled,
            waiting_night_start: vehicle.waiting_night_start,
            waiting_night_end: vehicle.waiting_night_end,
            waiting_night_percent: vehicle.waiting_night_percent,
            sunday_surcharge_percent: vehicle.sunday_surcharge_percent,
            created_at: vehicle.created_at,
        }
    }
}
