//! Motor de tarificación de presupuestos
//!
//! Este módulo contiene el algoritmo canónico de cálculo de presupuestos:
//! reparto día/noche, importe del trayecto (con recargo nocturno, recargo
//! de domingo y suelo de importe mínimo), importe de espera por bloques
//! de 15 minutos e IVA por bases separadas. Todas las etapas son
//! funciones puras y síncronas sobre sus entradas: el motor no hace I/O,
//! no guarda estado y es seguro invocarlo concurrentemente.

pub mod fare;
pub mod night_window;
pub mod profile;
pub mod totals;
pub mod waiting;

pub use fare::{compute_ride_fare, RideFare};
pub use night_window::{
    minutes_since_midnight, parse_time_of_day, split_by_night_window, NightWindow, TimeSplit,
    MINUTES_PER_DAY,
};
pub use profile::{NightRateConfig, VehiclePricingProfile, WaitingRateConfig};
pub use totals::{assemble_totals, round_money, QuoteBreakdown};
pub use waiting::{compute_waiting_fare, WaitingFare, MINUTES_PER_BLOCK};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;

/// Contexto del viaje a presupuestar, construido por petición
///
/// Las distancias y duraciones llegan ya resueltas (por el proveedor de
/// rutas); si hay vuelta a una dirección distinta, su distancia debe
/// estar resuelta antes de tarificar.
#[derive(Debug, Clone, PartialEq)]
pub struct TripContext {
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
}

impl TripContext {
    /// Viaje de ida simple, sin vuelta ni espera
    pub fn one_way(
        departure_date: NaiveDate,
        departure_time: NaiveTime,
        distance_km: Decimal,
        duration_minutes: i64,
    ) -> Self {
        Self {
            departure_date,
            departure_time,
            outbound_distance_km: distance_km,
            outbound_duration_minutes: duration_minutes,
            has_return_trip: false,
            return_to_same_address: false,
            return_distance_km: None,
            return_duration_minutes: None,
            has_waiting_time: false,
            waiting_minutes: 0,
        }
    }

    pub fn is_sunday(&self) -> bool {
        self.departure_date.weekday() == Weekday::Sun
    }
}

/// Repartir una duración según la tarifa nocturna del perfil
///
/// Con la tarifa desactivada no se camina el reloj: todos los minutos
/// cuentan como día.
fn split_for_profile(
    profile: &VehiclePricingProfile,
    start_minute: u32,
    duration_minutes: i64,
) -> TimeSplit {
    if profile.night_rate.enabled {
        split_by_night_window(start_minute, duration_minutes, profile.night_rate.window())
    } else {
        TimeSplit::all_day(duration_minutes)
    }
}

/// Calcular el desglose completo de un presupuesto
///
/// Ejecuta las etapas en secuencia: reparto día/noche, importe de ida (y
/// de vuelta si existe), importe de espera y ensamblado de totales con
/// IVA. Entradas degeneradas (distancia cero) producen un desglose nulo,
/// nunca un error.
pub fn price_quote(
    trip: &TripContext,
    profile: &VehiclePricingProfile,
    ride_vat_percent: Decimal,
    waiting_vat_percent: Decimal,
) -> QuoteBreakdown {
    if trip.outbound_distance_km <= Decimal::ZERO {
        return QuoteBreakdown::zero();
    }

    let is_sunday = trip.is_sunday();
    let departure_minute = minutes_since_midnight(trip.departure_time);

    // Etapa 1 + 2: ida
    let outbound_split = split_for_profile(
        profile,
        departure_minute,
        trip.outbound_duration_minutes,
    );
    let one_way = compute_ride_fare(
        trip.outbound_distance_km,
        outbound_split,
        profile,
        is_sunday,
    );

    // Vuelta: misma dirección duplica la ida; dirección distinta se
    // tarifica como trayecto propio con la salida desplazada por la
    // duración de la ida
    let mut total_km = trip.outbound_distance_km;
    let return_fare = if trip.has_return_trip {
        if trip.return_to_same_address {
            total_km += trip.outbound_distance_km;
            Some(one_way.clone())
        } else {
            let return_distance = trip.return_distance_km.unwrap_or(Decimal::ZERO);
            let return_duration = trip.return_duration_minutes.unwrap_or(0);
            let outbound_offset =
                (trip.outbound_duration_minutes.max(0) % MINUTES_PER_DAY as i64) as u32;
            let return_start = (departure_minute + outbound_offset) % MINUTES_PER_DAY;
            let return_split = split_for_profile(profile, return_start, return_duration);
            total_km += return_distance;
            Some(compute_ride_fare(
                return_distance,
                return_split,
                profile,
                is_sunday,
            ))
        }
    } else {
        None
    };

    // Etapa 3: espera
    let waiting = if trip.has_waiting_time && trip.waiting_minutes > 0 {
        compute_waiting_fare(
            trip.waiting_minutes,
            departure_minute,
            &profile.waiting_rate,
        )
    } else {
        WaitingFare::zero()
    };

    let below_minimum_distance = profile.minimum_trip_distance_km > Decimal::ZERO
        && trip.outbound_distance_km < profile.minimum_trip_distance_km;

    // Etapa 4: totales
    assemble_totals(
        &one_way,
        return_fare.as_ref(),
        &waiting,
        total_km,
        ride_vat_percent,
        waiting_vat_percent,
        is_sunday,
        below_minimum_distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    }

    fn at(hhmm: &str) -> NaiveTime {
        NaiveTime::parse_from_str(&format!("{}:00", hhmm), "%H:%M:%S").unwrap()
    }

    #[test]
    fn test_zero_distance_yields_zero_breakdown() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let trip = TripContext::one_way(monday(), at("10:00"), Decimal::ZERO, 0);
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown, QuoteBreakdown::zero());
    }

    #[test]
    fn test_return_to_same_address_duplicates_outbound() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let mut trip = TripContext::one_way(monday(), at("10:00"), dec("10"), 20);
        trip.has_return_trip = true;
        trip.return_to_same_address = true;

        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown.one_way_fare_ht, dec("20.0"));
        assert_eq!(breakdown.return_fare_ht, dec("20.0"));
        assert_eq!(breakdown.total_km, dec("20"));
    }

    #[test]
    fn test_return_leg_offset_into_night() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.night_rate = NightRateConfig {
            enabled: true,
            start: "20:00".to_string(),
            end: "06:00".to_string(),
            surcharge_percent: dec("50"),
        };
        // Ida 19:00–20:00 diurna; la vuelta sale a las 20:00, ya nocturna
        let mut trip = TripContext::one_way(monday(), at("19:00"), dec("10"), 60);
        trip.has_return_trip = true;
        trip.return_to_same_address = false;
        trip.return_distance_km = Some(dec("10"));
        trip.return_duration_minutes = Some(60);

        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown.one_way_fare_ht, dec("20.0"));
        // 10 km nocturnos con 50% de recargo
        assert_eq!(breakdown.return_fare_ht, dec("30.0"));
        assert!(breakdown.is_night_rate_applied);
    }

    #[test]
    fn test_sunday_flag_set() {
        let mut profile = VehiclePricingProfile::flat(dec("1.8"));
        profile.sunday_holiday_surcharge_percent = dec("20");
        let trip = TripContext::one_way(sunday(), at("10:00"), dec("10"), 20);
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert!(breakdown.is_sunday_or_holiday);
        assert_eq!(breakdown.sunday_surcharge_amount, dec("3.60"));
    }

    #[test]
    fn test_distance_warning_is_advisory() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.minimum_trip_distance_km = dec("5");
        profile.minimum_trip_fare = dec("15");
        let trip = TripContext::one_way(monday(), at("10:00"), dec("2"), 5);
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert!(breakdown.below_minimum_distance);
        assert!(breakdown.minimum_fare_applied);
        assert_eq!(breakdown.one_way_fare_ht, dec("15"));
    }

    #[test]
    fn test_end_to_end_simple_trip() {
        // 10 km a 1.8/km sin opciones: 18.0 HT, 1.8 de IVA al 10%, 19.8 TTC
        let profile = VehiclePricingProfile::flat(dec("1.8"));
        let trip = TripContext::one_way(monday(), at("10:00"), dec("10"), 20);
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown.one_way_fare_ht, dec("18.0"));
        assert_eq!(breakdown.total_vat, dec("1.8"));
        assert_eq!(round_money(breakdown.total_ttc), dec("19.80"));
        assert_eq!(breakdown.total_km, dec("10"));
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let mut profile = VehiclePricingProfile::flat(dec("2.1"));
        profile.night_rate = NightRateConfig {
            enabled: true,
            start: "21:00".to_string(),
            end: "06:30".to_string(),
            surcharge_percent: dec("25"),
        };
        let mut trip = TripContext::one_way(sunday(), at("22:40"), dec("37.5"), 85);
        trip.has_waiting_time = true;
        trip.waiting_minutes = 50;

        let first = price_quote(&trip, &profile, dec("10"), dec("20"));
        let second = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_waiting_requires_flag_and_positive_minutes() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.waiting_rate.per_quarter_hour = dec("7.5");
        let mut trip = TripContext::one_way(monday(), at("10:00"), dec("10"), 20);
        trip.waiting_minutes = 30;
        // Sin el flag activado la espera no se factura
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown.waiting_fare_ht, Decimal::ZERO);

        trip.has_waiting_time = true;
        let breakdown = price_quote(&trip, &profile, dec("10"), dec("20"));
        assert_eq!(breakdown.waiting_fare_ht, dec("15.0"));
    }
}
