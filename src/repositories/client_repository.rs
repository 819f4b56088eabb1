use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::client_dto::UpdateClientRequest;
use crate::models::client::Client;
use crate::utils::errors::AppError;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, client: &Client) -> Result<Client, AppError> {
        let result = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, company_id, full_name, email, phone, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(client.id)
        .bind(client.company_id)
        .bind(&client.full_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let result = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Client>, AppError> {
        let result = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE company_id = $1 ORDER BY full_name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: &UpdateClientRequest,
    ) -> Result<Client, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "El cliente no pertenece a esta empresa".to_string(),
            ));
        }

        let result = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET full_name = $2, email = $3, phone = $4, address = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.full_name.clone().unwrap_or(current.full_name))
        .bind(request.email.clone().or(current.email))
        .bind(request.phone.clone().or(current.phone))
        .bind(request.address.clone().or(current.address))
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let client = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        if client.company_id != company_id {
            return Err(AppError::Forbidden(
                "El cliente no pertenece a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
