use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::client::Client;

/// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 5, max = 500))]
    pub address: Option<String>,
}

/// Request para actualizar un cliente existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 5, max = 500))]
    pub address: Option<String>,
}

/// Response de cliente para la API
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            company_id: client.company_id,
            full_name: client.full_name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            created_at: client.created_at,
        }
    }
}
