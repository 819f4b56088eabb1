//! Modelo de Client
//!
//! Este módulo contiene el struct Client (cliente final de la empresa
//! VTC). Mapea exactamente a la tabla clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Client principal - mapea exactamente a la tabla clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        company_id: Uuid,
        full_name: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            full_name,
            email,
            phone,
            address,
            created_at: Utc::now(),
        }
    }
}
