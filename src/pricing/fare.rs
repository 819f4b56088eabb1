//! Cálculo del importe del trayecto
//!
//! Este módulo reparte la distancia entre día y noche en proporción al
//! reparto de minutos, aplica el recargo nocturno y el de domingo, y el
//! suelo de importe mínimo configurado.

use rust_decimal::Decimal;

use super::night_window::TimeSplit;
use super::profile::VehiclePricingProfile;

/// Importe de un trayecto (una ida o una vuelta), antes de impuestos
#[derive(Debug, Clone, PartialEq)]
pub struct RideFare {
    pub day_km: Decimal,
    pub night_km: Decimal,
    pub day_price_ht: Decimal,
    pub night_price_ht: Decimal,
    /// Delta del recargo nocturno, ya incluido en night_price_ht
    pub night_surcharge: Decimal,
    pub sunday_surcharge: Decimal,
    pub fare_ht: Decimal,
    pub night_rate_applied: bool,
    pub minimum_fare_applied: bool,
}

impl RideFare {
    /// Importe nulo (distancia cero o trayecto inexistente)
    pub fn zero() -> Self {
        Self {
            day_km: Decimal::ZERO,
            night_km: Decimal::ZERO,
            day_price_ht: Decimal::ZERO,
            night_price_ht: Decimal::ZERO,
            night_surcharge: Decimal::ZERO,
            sunday_surcharge: Decimal::ZERO,
            fare_ht: Decimal::ZERO,
            night_rate_applied: false,
            minimum_fare_applied: false,
        }
    }
}

/// Calcular el importe HT de un trayecto
///
/// La distancia se reparte entre día y noche en proporción directa al
/// reparto de minutos. El recargo de domingo se aplica una sola vez
/// sobre la suma día+noche ya recargada. El suelo de importe mínimo
/// sobreescribe el total sin redistribuir el reparto día/noche.
pub fn compute_ride_fare(
    distance_km: Decimal,
    split: TimeSplit,
    profile: &VehiclePricingProfile,
    is_sunday: bool,
) -> RideFare {
    let total_minutes = split.total_minutes();

    // Reparto proporcional de la distancia; sin minutos todo es día
    let (day_km, night_km) = if total_minutes <= 0 || split.night_minutes <= 0 {
        (distance_km, Decimal::ZERO)
    } else {
        let day_km = distance_km * Decimal::from(split.day_minutes)
            / Decimal::from(total_minutes);
        (day_km, distance_km - day_km)
    };

    let day_price_ht = day_km * profile.price_per_km;
    let night_base = night_km * profile.price_per_km;

    let night_rate_applied = profile.night_rate.enabled
        && split.night_minutes > 0
        && profile.night_rate.surcharge_percent > Decimal::ZERO;

    let night_surcharge = if night_rate_applied {
        night_base * profile.night_rate.surcharge_percent / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let night_price_ht = night_base + night_surcharge;

    let sunday_surcharge = if is_sunday
        && profile.sunday_holiday_surcharge_percent > Decimal::ZERO
    {
        (day_price_ht + night_price_ht) * profile.sunday_holiday_surcharge_percent
            / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let mut fare_ht = day_price_ht + night_price_ht + sunday_surcharge;

    // Suelo de importe mínimo: sobreescribe el total
    let minimum_fare_applied =
        profile.minimum_trip_fare > Decimal::ZERO && fare_ht < profile.minimum_trip_fare;
    if minimum_fare_applied {
        fare_ht = profile.minimum_trip_fare;
    }

    RideFare {
        day_km,
        night_km,
        day_price_ht,
        night_price_ht,
        night_surcharge,
        sunday_surcharge,
        fare_ht,
        night_rate_applied,
        minimum_fare_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::profile::NightRateConfig;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_flat_fare_day_only() {
        let profile = VehiclePricingProfile::flat(dec("1.8"));
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 20, night_minutes: 0 },
            &profile,
            false,
        );
        assert_eq!(fare.fare_ht, dec("18.0"));
        assert_eq!(fare.day_km, dec("10"));
        assert_eq!(fare.night_km, Decimal::ZERO);
        assert!(!fare.night_rate_applied);
        assert!(!fare.minimum_fare_applied);
    }

    #[test]
    fn test_distance_conservation() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 7, night_minutes: 13 },
            &profile,
            false,
        );
        assert_eq!(fare.day_km + fare.night_km, dec("10"));
    }

    #[test]
    fn test_zero_minutes_treated_as_day() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let fare = compute_ride_fare(dec("5"), TimeSplit::default(), &profile, false);
        assert_eq!(fare.day_km, dec("5"));
        assert_eq!(fare.fare_ht, dec("10.0"));
    }

    #[test]
    fn test_night_surcharge_applied_and_recorded() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.night_rate = NightRateConfig {
            enabled: true,
            start: "20:00".to_string(),
            end: "06:00".to_string(),
            surcharge_percent: dec("50"),
        };
        // Mitad de los minutos de noche: 5 km de día, 5 km de noche
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 15, night_minutes: 15 },
            &profile,
            false,
        );
        assert_eq!(fare.day_price_ht, dec("10.0"));
        assert_eq!(fare.night_surcharge, dec("5.0"));
        assert_eq!(fare.night_price_ht, dec("15.0"));
        assert_eq!(fare.fare_ht, dec("25.0"));
        assert!(fare.night_rate_applied);
    }

    #[test]
    fn test_night_rate_disabled_no_surcharge() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 0, night_minutes: 30 },
            &profile,
            false,
        );
        assert_eq!(fare.night_surcharge, Decimal::ZERO);
        assert_eq!(fare.fare_ht, dec("20.0"));
    }

    #[test]
    fn test_sunday_surcharge_on_post_night_total() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.night_rate = NightRateConfig {
            enabled: true,
            start: "20:00".to_string(),
            end: "06:00".to_string(),
            surcharge_percent: dec("50"),
        };
        profile.sunday_holiday_surcharge_percent = dec("10");
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 15, night_minutes: 15 },
            &profile,
            true,
        );
        // (10 + 15) * 10% = 2.5 sobre la suma ya recargada
        assert_eq!(fare.sunday_surcharge, dec("2.50"));
        assert_eq!(fare.fare_ht, dec("27.50"));
    }

    #[test]
    fn test_sunday_surcharge_zero_on_weekday() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.sunday_holiday_surcharge_percent = dec("20");
        let fare = compute_ride_fare(
            dec("10"),
            TimeSplit { day_minutes: 20, night_minutes: 0 },
            &profile,
            false,
        );
        assert_eq!(fare.sunday_surcharge, Decimal::ZERO);
    }

    #[test]
    fn test_minimum_fare_floor_overrides_total() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.minimum_trip_fare = dec("15");
        let fare = compute_ride_fare(
            dec("1"),
            TimeSplit { day_minutes: 5, night_minutes: 0 },
            &profile,
            false,
        );
        assert_eq!(fare.fare_ht, dec("15"));
        assert!(fare.minimum_fare_applied);
        // El reparto día/noche no se redistribuye
        assert_eq!(fare.day_price_ht, dec("2.0"));
    }

    #[test]
    fn test_minimum_fare_not_applied_above_floor() {
        let mut profile = VehiclePricingProfile::flat(dec("2.0"));
        profile.minimum_trip_fare = dec("15");
        let fare = compute_ride_fare(
            dec("20"),
            TimeSplit { day_minutes: 30, night_minutes: 0 },
            &profile,
            false,
        );
        assert_eq!(fare.fare_ht, dec("40.0"));
        assert!(!fare.minimum_fare_applied);
    }

    #[test]
    fn test_zero_distance_is_zero_fare() {
        let profile = VehiclePricingProfile::flat(dec("2.0"));
        let fare = compute_ride_fare(
            Decimal::ZERO,
            TimeSplit { day_minutes: 10, night_minutes: 0 },
            &profile,
            false,
        );
        assert_eq!(fare.fare_ht, Decimal::ZERO);
    }
}
