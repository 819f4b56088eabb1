use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::quote::Quote;
use crate::pricing::{round_money, QuoteBreakdown};

/// Coordenadas GPS de una dirección resuelta
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request de presupuesto (preview o creación)
///
/// La distancia y duración pueden llegar ya resueltas por el widget; si
/// faltan y hay coordenadas, se resuelven contra el proveedor de rutas
/// antes de tarificar.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub vehicle_id: Uuid,
    pub client_id: Option<Uuid>,
    pub departure_address: String,
    pub destination_address: String,
    /// Fecha de salida, formato "YYYY-MM-DD"
    pub departure_date: String,
    /// Hora de salida, formato "HH:MM"
    pub departure_time: String,
    pub departure_coordinates: Option<Coordinates>,
    pub destination_coordinates: Option<Coordinates>,
    pub outbound_distance_km: Option<Decimal>,
    pub outbound_duration_minutes: Option<i64>,
    #[serde(default)]
    pub has_return_trip: bool,
    #[serde(default)]
    pub return_to_same_address: bool,
    pub return_address: Option<String>,
    pub return_coordinates: Option<Coordinates>,
    pub return_distance_km: Option<Decimal>,
    pub return_duration_minutes: Option<i64>,
    #[serde(default)]
    pub has_waiting_time: bool,
    #[serde(default)]
    pub waiting_minutes: i64,
}

/// Desglose de presupuesto para la API, redondeado a 2 decimales
///
/// El redondeo monetario ocurre solo aquí, en presentación; el cálculo y
/// la persistencia conservan la precisión completa.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteBreakdownResponse {
    pub day_km: Decimal,
    pub night_km: Decimal,
    pub total_km: Decimal,
    pub one_way_fare_ht: Decimal,
    pub return_fare_ht: Decimal,
    pub waiting_fare_ht: Decimal,
    pub one_way_fare_ttc: Decimal,
    pub return_fare_ttc: Decimal,
    pub waiting_fare_ttc: Decimal,
    pub night_surcharge_amount: Decimal,
    pub sunday_surcharge_amount: Decimal,
    pub total_ht: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
    pub is_night_rate_applied: bool,
    pub is_sunday_or_holiday: bool,
    pub minimum_fare_applied: bool,
    pub below_minimum_distance: bool,
}

impl From<&QuoteBreakdown> for QuoteBreakdownResponse {
    fn from(breakdown: &QuoteBreakdown) -> Self {
        Self {
            day_km: round_money(breakdown.day_km),
            night_km: round_money(breakdown.night_km),
            total_km: round_money(breakdown.total_km),
            one_way_fare_ht: round_money(breakdown.one_way_fare_ht),
            return_fare_ht: round_money(breakdown.return_fare_ht),
            waiting_fare_ht: round_money(breakdown.waiting_fare_ht),
            one_way_fare_ttc: round_money(breakdown.one_way_fare_ttc),
            return_fare_ttc: round_money(breakdown.return_fare_ttc),
            waiting_fare_ttc: round_money(breakdown.waiting_fare_ttc),
            night_surcharge_amount: round_money(breakdown.night_surcharge_amount),
            sunday_surcharge_amount: round_money(breakdown.sunday_surcharge_amount),
            total_ht: round_money(breakdown.total_ht),
            total_vat: round_money(breakdown.total_vat),
            total_ttc: round_money(breakdown.total_ttc),
            is_night_rate_applied: breakdown.is_night_rate_applied,
            is_sunday_or_holiday: breakdown.is_sunday_or_holiday,
            minimum_fare_applied: breakdown.minimum_fare_applied,
            below_minimum_distance: breakdown.below_minimum_distance,
        }
    }
}

/// Response de preview: desglose más el viaje resuelto
#[derive(Debug, Serialize)]
pub struct QuotePreviewResponse {
    pub vehicle_id: Uuid,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub outbound_distance_km: Decimal,
    pub outbound_duration_minutes: i64,
    pub return_distance_km: Option<Decimal>,
    pub return_duration_minutes: Option<i64>,
    pub breakdown: QuoteBreakdownResponse,
}

/// Response de presupuesto persistido
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Option<Uuid>,
    pub departure_address: String,
    pub destination_address: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub outbound_distance_km: Decimal,
    pub outbound_duration_minutes: i64,
    pub has_return_trip: bool,
    pub return_to_same_address: bool,
    pub has_waiting_time: bool,
    pub waiting_minutes: i64,
    pub quote_status: String,
    pub breakdown: QuoteBreakdownResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        let breakdown = QuoteBreakdownResponse::from(&quote.breakdown());
        Self {
            id: quote.id,
            company_id: quote.company_id,
            vehicle_id: quote.vehicle_id,
            client_id: quote.client_id,
            departure_address: quote.departure_address,
            destination_address: quote.destination_address,
            departure_date: quote.departure_date,
            departure_time: quote.departure_time,
            outbound_distance_km: quote.outbound_distance_km,
            outbound_duration_minutes: quote.outbound_duration_minutes,
            has_return_trip: quote.has_return_trip,
            return_to_same_address: quote.return_to_same_address,
            has_waiting_time: quote.has_waiting_time,
            waiting_minutes: quote.waiting_minutes,
            quote_status: quote.quote_status,
            breakdown,
            created_at: quote.created_at,
        }
    }
}
