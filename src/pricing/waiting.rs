//! Cálculo del importe de espera
//!
//! La espera se factura por bloques de 15 minutos redondeados hacia
//! arriba. Cada bloque se tarifica plano y se clasifica día/noche con la
//! ventana nocturna propia de la espera (ajustes distintos a los del
//! trayecto).

use rust_decimal::Decimal;

use super::night_window::{NightWindow, MINUTES_PER_DAY};
use super::profile::WaitingRateConfig;

/// Minutos por bloque de facturación
pub const MINUTES_PER_BLOCK: i64 = 15;

/// Importe de la espera, con su propio reparto día/noche
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingFare {
    pub fare_ht: Decimal,
    pub day_minutes: i64,
    pub night_minutes: i64,
    pub day_fare_ht: Decimal,
    pub night_fare_ht: Decimal,
}

impl WaitingFare {
    pub fn zero() -> Self {
        Self {
            fare_ht: Decimal::ZERO,
            day_minutes: 0,
            night_minutes: 0,
            day_fare_ht: Decimal::ZERO,
            night_fare_ht: Decimal::ZERO,
        }
    }
}

/// Calcular el importe HT de la espera
///
/// Cuantiza a bloques de 15 minutos (`ceil(minutos / 15)`), cada bloque
/// facturado completo independientemente de la ocupación parcial. El
/// reloj avanza 15 minutos por bloque desde la hora de salida y cada
/// bloque se clasifica por su minuto de inicio.
pub fn compute_waiting_fare(
    waiting_minutes: i64,
    departure_minute: u32,
    rate: &WaitingRateConfig,
) -> WaitingFare {
    if waiting_minutes <= 0 {
        return WaitingFare::zero();
    }

    let quarters = (waiting_minutes + MINUTES_PER_BLOCK - 1) / MINUTES_PER_BLOCK;
    let night_window = if rate.night_enabled {
        Some(rate.window())
    } else {
        None
    };

    let night_block_price = rate.per_quarter_hour
        + rate.per_quarter_hour * rate.night_surcharge_percent / Decimal::ONE_HUNDRED;

    let mut fare = WaitingFare::zero();
    let mut clock = departure_minute % MINUTES_PER_DAY;

    for _ in 0..quarters {
        let is_night = night_window
            .as_ref()
            .map(|w: &NightWindow| w.contains(clock))
            .unwrap_or(false);

        if is_night {
            fare.night_minutes += MINUTES_PER_BLOCK;
            fare.night_fare_ht += night_block_price;
        } else {
            fare.day_minutes += MINUTES_PER_BLOCK;
            fare.day_fare_ht += rate.per_quarter_hour;
        }
        clock = (clock + MINUTES_PER_BLOCK as u32) % MINUTES_PER_DAY;
    }

    fare.fare_ht = fare.day_fare_ht + fare.night_fare_ht;
    fare
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::night_window::parse_time_of_day;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn flat_rate(per_quarter: &str) -> WaitingRateConfig {
        WaitingRateConfig {
            per_quarter_hour: dec(per_quarter),
            night_enabled: false,
            night_start: "00:00".to_string(),
            night_end: "00:00".to_string(),
            night_surcharge_percent: Decimal::ZERO,
        }
    }

    #[test]
    fn test_zero_waiting_is_free() {
        let fare = compute_waiting_fare(0, 600, &flat_rate("7.5"));
        assert_eq!(fare, WaitingFare::zero());
        let fare = compute_waiting_fare(-10, 600, &flat_rate("7.5"));
        assert_eq!(fare, WaitingFare::zero());
    }

    #[test]
    fn test_quantization_rounds_up_to_blocks() {
        // 16 minutos -> 2 bloques completos, nunca prorrateado
        let fare = compute_waiting_fare(16, 600, &flat_rate("7.5"));
        assert_eq!(fare.fare_ht, dec("15.0"));
        assert_eq!(fare.day_minutes, 30);
    }

    #[test]
    fn test_exact_block_not_overbilled() {
        let fare = compute_waiting_fare(30, 600, &flat_rate("7.5"));
        assert_eq!(fare.fare_ht, dec("15.0"));
        assert_eq!(fare.day_minutes, 30);
    }

    #[test]
    fn test_night_blocks_carry_surcharge() {
        let rate = WaitingRateConfig {
            per_quarter_hour: dec("10"),
            night_enabled: true,
            night_start: "22:00".to_string(),
            night_end: "06:00".to_string(),
            night_surcharge_percent: dec("20"),
        };
        // Salida 21:45, una hora de espera: 1 bloque de día + 3 de noche
        let fare = compute_waiting_fare(60, parse_time_of_day("21:45"), &rate);
        assert_eq!(fare.day_minutes, 15);
        assert_eq!(fare.night_minutes, 45);
        assert_eq!(fare.day_fare_ht, dec("10"));
        assert_eq!(fare.night_fare_ht, dec("36.0"));
        assert_eq!(fare.fare_ht, dec("46.0"));
    }

    #[test]
    fn test_night_disabled_all_blocks_day() {
        let fare = compute_waiting_fare(60, parse_time_of_day("23:00"), &flat_rate("10"));
        assert_eq!(fare.night_minutes, 0);
        assert_eq!(fare.fare_ht, dec("40"));
    }

    #[test]
    fn test_blocks_cross_midnight() {
        let rate = WaitingRateConfig {
            per_quarter_hour: dec("10"),
            night_enabled: true,
            night_start: "20:00".to_string(),
            night_end: "06:00".to_string(),
            night_surcharge_percent: dec("50"),
        };
        // Salida 23:30, 90 minutos: los 6 bloques caen en la ventana
        let fare = compute_waiting_fare(90, parse_time_of_day("23:30"), &rate);
        assert_eq!(fare.night_minutes, 90);
        assert_eq!(fare.fare_ht, dec("90.0"));
    }
}
