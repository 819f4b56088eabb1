use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar una empresa
#[derive(Debug, Deserialize)]
pub struct RegisterCompanyRequest {
    pub company_name: String,
    pub company_address: String,
    pub company_siret: Option<String>,
    pub admin_full_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

// Request para actualizar la tarificación por defecto de la empresa
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePricingDefaultsRequest {
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

// Response de empresa (sin password)
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub siret: Option<String>,
    pub admin_full_name: String,
    pub admin_email: String,
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

impl From<crate::models::company::Company> for CompanyResponse {
    fn from(company: crate::models::company::Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            address: company.address,
            siret: company.siret,
            admin_full_name: company.admin_full_name,
            admin_email: company.admin_email,
            price_per_km: company.price_per_km,
            minimum_trip_distance_km: company.minimum_trip_distance_km,
            minimum_trip_fare: company.minimum_trip_fare,
            night_rate_enabled: company.night_rate_enabled,
            night_rate_start: company.night_rate_start,
            night_rate_end: company.night_rate_end,
            night_rate_percent: company.night_rate_percent,
            waiting_per_quarter_hour: company.waiting_per_quarter_hour,
            waiting_night_enabled: company.waiting_night_enabled,
            waiting_night_start: company.waiting_night_start,
            waiting_night_end: company.waiting_night_end,
            waiting_night_percent: company.waiting_night_percent,
            sunday_surcharge_percent: company.sunday_surcharge_percent,
            created_at: company.created_at,
        }
    }
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}
