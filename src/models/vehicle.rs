//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD
//! operations. Mapea exactamente a la tabla vehicles; los campos de
//! tarificación son opcionales y sobreescriben los valores por defecto
//! de la empresa cuando están presentes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::company::Company;
use crate::pricing::{NightRateConfig, VehiclePricingProfile, WaitingRateConfig};

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub seats: i32,
    pub vehicle_status: String,
    // Tarificación por vehículo (None = usar el valor de la empresa)
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

impl Vehicle {
    /// Resolver el perfil de tarificación del vehículo
    ///
    /// Los ajustes del vehículo sobreescriben los de la empresa campo a
    /// campo. La resolución ocurre aquí, en la frontera: el motor de
    /// tarificación recibe un perfil completo y nunca hace fallback.
    pub fn pricing_profile(&self, company: &Company) -> VehiclePricingProfile {
        let defaults = company.default_pricing_profile();

        VehiclePricingProfile {
            price_per_km: self.price_per_km.unwrap_or(defaults.price_per_km),
            minimum_trip_distance_km: self
                .minimum_trip_distance_km
                .unwrap_or(defaults.minimum_trip_distance_km),
            minimum_trip_fare: self.minimum_trip_fare.unwrap_or(defaults.minimum_trip_fare),
            night_rate: NightRateConfig {
                enabled: self.night_rate_enabled.unwrap_or(defaults.night_rate.enabled),
                start: self
                    .night_rate_start
                    .clone()
                    .unwrap_or(defaults.night_rate.start),
                end: self
                    .night_rate_end
                    .clone()
                    .unwrap_or(defaults.night_rate.end),
                surcharge_percent: self
                    .night_rate_percent
                    .unwrap_or(defaults.night_rate.surcharge_percent),
            },
            waiting_rate: WaitingRateConfig {
                per_quarter_hour: self
                    .waiting_per_quarter_hour
                    .unwrap_or(defaults.waiting_rate.per_quarter_hour),
                night_enabled: self
                    .waiting_night_enabled
                    .unwrap_or(defaults.waiting_rate.night_enabled),
                night_start: self
                    .waiting_night_start
                    .clone()
                    .unwrap_or(defaults.waiting_rate.night_start),
                night_end: self
                    .waiting_night_end
                    .clone()
                    .unwrap_or(defaults.waiting_rate.night_end),
                night_surcharge_percent: self
                    .waiting_night_percent
                    .unwrap_or(defaults.waiting_rate.night_surcharge_percent),
            },
            sunday_holiday_surcharge_percent: self
                .sunday_surcharge_percent
                .unwrap_or(defaults.sunday_holiday_surcharge_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn company_with_defaults() -> Company {
        let mut company = Company::new(
            "VTC Test".to_string(),
            "1 rue de la Paix, Paris".to_string(),
            None,
            "Jean Test".to_string(),
            "jean@test.fr".to_string(),
            "hash".to_string(),
        );
        company.price_per_km = dec("1.8");
        company.minimum_trip_fare = dec("20");
        company.night_rate_enabled = true;
        company.night_rate_percent = dec("30");
        company
    }

    fn bare_vehicle(company_id: Uuid) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            company_id,
            name: "Berline".to_string(),
            license_plate: "AB-123-CD".to_string(),
            brand: None,
            model: None,
            seats: 4,
            vehicle_status: "active".to_string(),
            price_per_km: None,
            minimum_trip_distance_km: None,
            minimum_trip_fare: None,
            night_rate_enabled: None,
            night_rate_start: None,
            night_rate_end: None,
            night_rate_percent: None,
            waiting_per_quarter_hour: None,
            waiting_night_enabled: None,
            waiting_night_start: None,
            waiting_night_end: None,
            waiting_night_percent: None,
            sunday_surcharge_percent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_falls_back_to_company_defaults() {
        let company = company_with_defaults();
        let vehicle = bare_vehicle(company.id);
        let profile = vehicle.pricing_profile(&company);
        assert_eq!(profile.price_per_km, dec("1.8"));
        assert_eq!(profile.minimum_trip_fare, dec("20"));
        assert!(profile.night_rate.enabled);
        assert_eq!(profile.night_rate.surcharge_percent, dec("30"));
    }

    #[test]
    fn test_vehicle_settings_override_field_by_field() {
        let company = company_with_defaults();
        let mut vehicle = bare_vehicle(company.id);
        vehicle.price_per_km = Some(dec("2.5"));
        vehicle.night_rate_enabled = Some(false);

        let profile = vehicle.pricing_profile(&company);
        assert_eq!(profile.price_per_km, dec("2.5"));
        assert!(!profile.night_rate.enabled);
        // Los campos sin sobreescribir conservan el valor de la empresa
        assert_eq!(profile.minimum_trip_fare, dec("20"));
    }
}
