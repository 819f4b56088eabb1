//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de
//! configuración del servicio de presupuestos.

use std::env;

use rust_decimal::Decimal;
use std::str::FromStr;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub mapbox_token: Option<String>,
    /// Tipo de IVA del transporte (porcentaje)
    pub ride_vat_percent: Decimal,
    /// Tipo de IVA de la espera (porcentaje)
    pub waiting_vat_percent: Decimal,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            mapbox_token: env::var("MAPBOX_TOKEN").ok(),
            ride_vat_percent: parse_vat("RIDE_VAT_PERCENT", "10"),
            waiting_vat_percent: parse_vat("WAITING_VAT_PERCENT", "20"),
        }
    }
}

fn parse_vat(var: &str, default: &str) -> Decimal {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(&raw)
        .unwrap_or_else(|_| panic!("{} must be a valid decimal percentage", var))
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
