use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::client_dto::{ClientResponse, CreateClientRequest, UpdateClientRequest};
use crate::dto::company_dto::ApiResponse;
use crate::models::client::Client;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::AppError;

pub struct ClientController {
    repository: ClientRepository,
}

impl ClientController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateClientRequest,
    ) -> Result<ApiResponse<ClientResponse>, AppError> {
        request.validate()?;

        let client = Client::new(
            company_id,
            request.full_name,
            request.email,
            request.phone,
            request.address,
        );

        let saved = self.repository.create(&client).await?;

        Ok(ApiResponse::success_with_message(
            ClientResponse::from(saved),
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, company_id: Uuid) -> Result<ClientResponse, AppError> {
        let client = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        if client.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este cliente".to_string(),
            ));
        }

        Ok(ClientResponse::from(client))
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ClientResponse>, AppError> {
        let clients = self.repository.find_by_company(company_id).await?;

        Ok(clients.into_iter().map(ClientResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateClientRequest,
    ) -> Result<ApiResponse<ClientResponse>, AppError> {
        request.validate()?;

        let client = self.repository.update(id, company_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            ClientResponse::from(client),
            "Cliente actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, company_id).await?;
        Ok(())
    }
}
