//! Modelo de Company
//!
//! Este módulo contiene el struct Company (la empresa VTC del conductor)
//! y sus variantes. Mapea exactamente a la tabla companies, incluidos
//! los ajustes de tarificación por defecto a nivel de empresa.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::{NightRateConfig, VehiclePricingProfile, WaitingRateConfig};

/// Company principal - mapea exactamente a la tabla companies
///
/// Los campos de tarificación son los valores por defecto de la empresa;
/// cada vehículo puede sobreescribirlos campo a campo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub siret: Option<String>,
    pub admin_full_name: String,
    pub admin_email: String,
    #[serde(skip_serializing)]
    pub admin_password_hash: String,
    // Tarificación por defecto
    pub price_per_km: Decimal,
    pub minimum_trip_distance_km: Decimal,
    pub minimum_trip_fare: Decimal,
    pub night_rate_enabled: bool,
    pub night_rate_start: String,
    pub night_rate_end: String,
    pub night_rate_percent: Decimal,
    pub waiting_per_quarter_hour: Decimal,
    pub waiting_night_enabled: bool,
    pub waiting_night_start: String,
    pub waiting_night_end: String,
    pub waiting_night_percent: Decimal,
    pub sunday_surcharge_percent: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Crear una empresa nueva con tarificación neutra
    pub fn new(
        name: String,
        address: String,
        siret: Option<String>,
        admin_full_name: String,
        admin_email: String,
        admin_password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            address,
            siret,
            admin_full_name,
            admin_email,
            admin_password_hash,
            price_per_km: Decimal::ZERO,
            minimum_trip_distance_km: Decimal::ZERO,
            minimum_trip_fare: Decimal::ZERO,
            night_rate_enabled: false,
            night_rate_start: "20:00".to_string(),
            night_rate_end: "06:00".to_string(),
            night_rate_percent: Decimal::ZERO,
            waiting_per_quarter_hour: Decimal::ZERO,
            waiting_night_enabled: false,
            waiting_night_start: "20:00".to_string(),
            waiting_night_end: "06:00".to_string(),
            waiting_night_percent: Decimal::ZERO,
            sunday_surcharge_percent: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Perfil de tarificación por defecto de la empresa
    pub fn default_pricing_profile(&self) -> VehiclePricingProfile {
        VehiclePricingProfile {
            price_per_km: self.price_per_km,
            minimum_trip_distance_km: self.minimum_trip_distance_km,
            minimum_trip_fare: self.minimum_trip_fare,
            night_rate: NightRateConfig {
                enabled: self.night_rate_enabled,
                start: self.night_rate_start.clone(),
                end: self.night_rate_end.clone(),
                surcharge_percent: self.night_rate_percent,
            },
            waiting_rate: WaitingRateConfig {
                per_quarter_hour: self.waiting_per_quarter_hour,
                night_enabled: self.waiting_night_enabled,
                night_start: self.waiting_night_start.clone(),
                night_end: self.waiting_night_end.clone(),
                night_surcharge_percent: self.waiting_night_percent,
            },
            sunday_holiday_surcharge_percent: self.sunday_surcharge_percent,
        }
    }
}
