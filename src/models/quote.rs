//! Modelo de Quote
//!
//! Este módulo contiene el struct Quote (presupuesto persistido) que
//! mapea exactamente a la tabla quotes: los metadatos del viaje más el
//! desglose completo de tarificación. Los nombres de los campos del
//! desglose se conservan tal cual para poder regenerarlo sin pérdidas
//! (PDF, informes).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::QuoteBreakdown;

/// Quote principal - mapea exactamente a la tabla quotes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Option<Uuid>,
    // Viaje
    pub departure_address: String,
    pub destination_address: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub outbound_distance_km: Decimal,
    pub outbound_duration_minutes: i64,
    pub has_return_trip: bool,
    pub return_to_same_address: bool,
    pub return_distance_km: Option<Decimal>,
    pub return_duration_minutes: Option<i64>,
    pub has_waiting_time: bool,
    pub waiting_minutes: i64,
    // Desglose
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
    pub quote_status: String,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Reconstruir el desglose persistido
    pub fn breakdown(&self) -> QuoteBreakdown {
        QuoteBreakdown {
            day_km: self.day_km,
            night_km: self.night_km,
            total_km: self.total_km,
            one_way_fare_ht: self.one_way_fare_ht,
            return_fare_ht: self.return_fare_ht,
            waiting_fare_ht: self.waiting_fare_ht,
            one_way_fare_ttc: self.one_way_fare_ttc,
            return_fare_ttc: self.return_fare_ttc,
            waiting_fare_ttc: self.waiting_fare_ttc,
            night_surcharge_amount: self.night_surcharge_amount,
            sunday_surcharge_amount: self.sunday_surcharge_amount,
            total_ht: self.total_ht,
            total_vat: self.total_vat,
            total_ttc: self.total_ttc,
            is_night_rate_applied: self.is_night_rate_applied,
            is_sunday_or_holiday: self.is_sunday_or_holiday,
            minimum_fare_applied: self.minimum_fare_applied,
            below_minimum_distance: self.below_minimum_distance,
        }
    }
}
