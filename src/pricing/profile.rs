//! Perfil de tarificación resuelto
//!
//! Este módulo contiene el perfil de tarificación que recibe el motor de
//! cálculo. El perfil llega completamente resuelto (los ajustes por
//! vehículo ya han sobreescrito los valores por defecto de la empresa):
//! el motor nunca hace fallback de campos opcionales.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::night_window::NightWindow;

/// Tarifa nocturna del trayecto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NightRateConfig {
    pub enabled: bool,
    /// Inicio de la ventana, formato "HH:MM"
    pub start: String,
    /// Fin de la ventana, formato "HH:MM" (start > end cruza medianoche)
    pub end: String,
    pub surcharge_percent: Decimal,
}

impl NightRateConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            start: "00:00".to_string(),
            end: "00:00".to_string(),
            surcharge_percent: Decimal::ZERO,
        }
    }

    pub fn window(&self) -> NightWindow {
        NightWindow::from_hhmm(&self.start, &self.end)
    }
}

/// Tarifa de espera facturada por bloques de 15 minutos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitingRateConfig {
    pub per_quarter_hour: Decimal,
    pub night_enabled: bool,
    pub night_start: String,
    pub night_end: String,
    pub night_surcharge_percent: Decimal,
}

impl WaitingRateConfig {
    pub fn free() -> Self {
        Self {
            per_quarter_hour: Decimal::ZERO,
            night_enabled: false,
            night_start: "00:00".to_string(),
            night_end: "00:00".to_string(),
            night_surcharge_percent: Decimal::ZERO,
        }
    }

    pub fn window(&self) -> NightWindow {
        NightWindow::from_hhmm(&self.night_start, &self.night_end)
    }
}

/// Perfil de tarificación de un vehículo, resuelto en la frontera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehiclePricingProfile {
    pub price_per_km: Decimal,
    /// Distancia mínima aconsejada: por debajo se activa el aviso de
    /// distancia, no recorta la distancia facturada
    pub minimum_trip_distance_km: Decimal,
    /// Suelo del importe HT del trayecto calculado
    pub minimum_trip_fare: Decimal,
    pub night_rate: NightRateConfig,
    pub waiting_rate: WaitingRateConfig,
    pub sunday_holiday_surcharge_percent: Decimal,
}

impl VehiclePricingProfile {
    /// Perfil neutro: solo precio por km, sin recargos ni suelos
    pub fn flat(price_per_km: Decimal) -> Self {
        Self {
            price_per_km,
            minimum_trip_distance_km: Decimal::ZERO,
            minimum_trip_fare: Decimal::ZERO,
            night_rate: NightRateConfig::disabled(),
            waiting_rate: WaitingRateConfig::free(),
            sunday_holiday_surcharge_percent: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_profile_has_no_surcharges() {
        let profile = VehiclePricingProfile::flat(Decimal::from(2));
        assert!(!profile.night_rate.enabled);
        assert_eq!(profile.minimum_trip_fare, Decimal::ZERO);
        assert_eq!(profile.sunday_holiday_surcharge_percent, Decimal::ZERO);
    }

    #[test]
    fn test_night_rate_window_from_config() {
        let config = NightRateConfig {
            enabled: true,
            start: "20:00".to_string(),
            end: "06:00".to_string(),
            surcharge_percent: Decimal::from(50),
        };
        let window = config.window();
        assert!(window.contains(0));
        assert!(!window.contains(720));
    }
}
