//! Ensamblado de impuestos y totales
//!
//! Los componentes del trayecto (ida + vuelta + recargos) tributan al
//! tipo de IVA de transporte; la espera tributa a su propio tipo. Son dos
//! bases imponibles independientes, nunca un tipo mezclado. El cálculo
//! interno conserva la precisión completa; el redondeo a 2 decimales se
//! hace solo en presentación.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fare::RideFare;
use super::waiting::WaitingFare;

/// Desglose completo de un presupuesto, inmutable una vez producido
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteBreakdown {
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
    /// Aviso: la distancia está por debajo del mínimo configurado.
    /// Es informativo, nunca bloquea el presupuesto.
    pub below_minimum_distance: bool,
}

impl QuoteBreakdown {
    /// Desglose nulo (entradas degeneradas: sin distancia, sin duración)
    pub fn zero() -> Self {
        Self {
            day_km: Decimal::ZERO,
            night_km: Decimal::ZERO,
            total_km: Decimal::ZERO,
            one_way_fare_ht: Decimal::ZERO,
            return_fare_ht: Decimal::ZERO,
            waiting_fare_ht: Decimal::ZERO,
            one_way_fare_ttc: Decimal::ZERO,
            return_fare_ttc: Decimal::ZERO,
            waiting_fare_ttc: Decimal::ZERO,
            night_surcharge_amount: Decimal::ZERO,
            sunday_surcharge_amount: Decimal::ZERO,
            total_ht: Decimal::ZERO,
            total_vat: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            is_night_rate_applied: false,
            is_sunday_or_holiday: false,
            minimum_fare_applied: false,
            below_minimum_distance: false,
        }
    }
}

/// Redondeo monetario de presentación (2 decimales)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

fn apply_vat(amount_ht: Decimal, vat_percent: Decimal) -> Decimal {
    amount_ht + amount_ht * vat_percent / Decimal::ONE_HUNDRED
}

/// Ensamblar el desglose final a partir de los importes por etapa
///
/// Determinista e idempotente: las mismas entradas producen siempre el
/// mismo desglose.
#[allow(clippy::too_many_arguments)]
pub fn assemble_totals(
    one_way: &RideFare,
    return_fare: Option<&RideFare>,
    waiting: &WaitingFare,
    total_km: Decimal,
    ride_vat_percent: Decimal,
    waiting_vat_percent: Decimal,
    is_sunday: bool,
    below_minimum_distance: bool,
) -> QuoteBreakdown {
    let zero_ride = RideFare::zero();
    let ret = return_fare.unwrap_or(&zero_ride);

    let ride_ht = one_way.fare_ht + ret.fare_ht;
    let ride_vat = ride_ht * ride_vat_percent / Decimal::ONE_HUNDRED;
    let waiting_vat = waiting.fare_ht * waiting_vat_percent / Decimal::ONE_HUNDRED;

    let total_ht = ride_ht + waiting.fare_ht;
    let total_vat = ride_vat + waiting_vat;

    QuoteBreakdown {
        day_km: one_way.day_km + ret.day_km,
        night_km: one_way.night_km + ret.night_km,
        total_km,
        one_way_fare_ht: one_way.fare_ht,
        return_fare_ht: ret.fare_ht,
        waiting_fare_ht: waiting.fare_ht,
        one_way_fare_ttc: apply_vat(one_way.fare_ht, ride_vat_percent),
        return_fare_ttc: apply_vat(ret.fare_ht, ride_vat_percent),
        waiting_fare_ttc: apply_vat(waiting.fare_ht, waiting_vat_percent),
        night_surcharge_amount: one_way.night_surcharge + ret.night_surcharge,
        sunday_surcharge_amount: one_way.sunday_surcharge + ret.sunday_surcharge,
        total_ht,
        total_vat,
        total_ttc: total_ht + total_vat,
        is_night_rate_applied: one_way.night_rate_applied || ret.night_rate_applied,
        is_sunday_or_holiday: is_sunday,
        minimum_fare_applied: one_way.minimum_fare_applied || ret.minimum_fare_applied,
        below_minimum_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn simple_ride(fare_ht: &str, day_km: &str) -> RideFare {
        let mut fare = RideFare::zero();
        fare.fare_ht = dec(fare_ht);
        fare.day_km = dec(day_km);
        fare.day_price_ht = dec(fare_ht);
        fare
    }

    #[test]
    fn test_vat_split_two_bases() {
        let one_way = simple_ride("18.0", "10");
        let mut waiting = WaitingFare::zero();
        waiting.fare_ht = dec("15.0");
        waiting.day_fare_ht = dec("15.0");
        waiting.day_minutes = 30;

        let breakdown = assemble_totals(
            &one_way,
            None,
            &waiting,
            dec("10"),
            dec("10"),
            dec("20"),
            false,
            false,
        );

        assert_eq!(breakdown.total_ht, dec("33.0"));
        // 18 * 10% + 15 * 20% = 1.8 + 3.0
        assert_eq!(breakdown.total_vat, dec("4.80"));
        assert_eq!(breakdown.total_ttc, dec("37.80"));
    }

    #[test]
    fn test_end_to_end_scenario_without_options() {
        let one_way = simple_ride("18.0", "10");
        let breakdown = assemble_totals(
            &one_way,
            None,
            &WaitingFare::zero(),
            dec("10"),
            dec("10"),
            dec("20"),
            false,
            false,
        );
        assert_eq!(breakdown.one_way_fare_ht, dec("18.0"));
        assert_eq!(breakdown.total_vat, dec("1.800"));
        assert_eq!(round_money(breakdown.total_ttc), dec("19.80"));
    }

    #[test]
    fn test_idempotence() {
        let one_way = simple_ride("25.5", "12");
        let ret = simple_ride("25.5", "12");
        let first = assemble_totals(
            &one_way,
            Some(&ret),
            &WaitingFare::zero(),
            dec("24"),
            dec("10"),
            dec("20"),
            true,
            false,
        );
        let second = assemble_totals(
            &one_way,
            Some(&ret),
            &WaitingFare::zero(),
            dec("24"),
            dec("10"),
            dec("20"),
            true,
            false,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_money_presentation_only() {
        assert_eq!(round_money(dec("19.799999")), dec("19.80"));
        assert_eq!(round_money(dec("1.006")), dec("1.01"));
        assert_eq!(round_money(dec("7.5")), dec("7.50"));
    }

    #[test]
    fn test_zero_breakdown_roundtrips_serde() {
        let breakdown = QuoteBreakdown::zero();
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: QuoteBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(breakdown, back);
    }
}
