use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::UpdatePricingDefaultsRequest;
use crate::models::company::Company;
use crate::utils::errors::AppError;

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &Company) -> Result<Company, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, address, siret, admin_full_name, admin_email, admin_password_hash,
                price_per_km, minimum_trip_distance_km, minimum_trip_fare,
                night_rate_enabled, night_rate_start, night_rate_end, night_rate_percent,
                waiting_per_quarter_hour, waiting_night_enabled, waiting_night_start,
                waiting_night_end, waiting_night_percent, sunday_surcharge_percent, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.siret)
        .bind(&company.admin_full_name)
        .bind(&company.admin_email)
        .bind(&company.admin_password_hash)
        .bind(company.price_per_km)
        .bind(company.minimum_trip_distance_km)
        .bind(company.minimum_trip_fare)
        .bind(company.night_rate_enabled)
        .bind(&company.night_rate_start)
        .bind(&company.night_rate_end)
        .bind(company.night_rate_percent)
        .bind(company.waiting_per_quarter_hour)
        .bind(company.waiting_night_enabled)
        .bind(&company.waiting_night_start)
        .bind(&company.waiting_night_end)
        .bind(company.waiting_night_percent)
        .bind(company.sunday_surcharge_percent)
        .bind(company.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError> {
        let result =
            sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE admin_email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE admin_email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn siret_exists(&self, siret: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE siret = $1)")
                .bind(siret)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Actualizar la tarificación por defecto de la empresa
    ///
    /// Los campos ausentes de la request conservan su valor actual.
    pub async fn update_pricing_defaults(
        &self,
        id: Uuid,
        request: &UpdatePricingDefaultsRequest,
    ) -> Result<Company, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empresa no encontrada".to_string()))?;

        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET price_per_km = $2, minimum_trip_distance_km = $3, minimum_trip_fare = $4,
                night_rate_enabled = $5, night_rate_start = $6, night_rate_end = $7,
                night_rate_percent = $8, waiting_per_quarter_hour = $9,
                waiting_night_enabled = $10, waiting_night_start = $11,
                waiting_night_end = $12, waiting_night_percent = $13,
                sunday_surcharge_percent = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.price_per_km.unwrap_or(current.price_per_km))
        .bind(
            request
                .minimum_trip_distance_km
                .unwrap_or(current.minimum_trip_distance_km),
        )
        .bind(request.minimum_trip_fare.unwrap_or(current.minimum_trip_fare))
        .bind(request.night_rate_enabled.unwrap_or(current.night_rate_enabled))
        .bind(
            request
                .night_rate_start
                .clone()
                .unwrap_or(current.night_rate_start),
        )
        .bind(request.night_rate_end.clone().unwrap_or(current.night_rate_end))
        .bind(request.night_rate_percent.unwrap_or(current.night_rate_percent))
        .bind(
            request
                .waiting_per_quarter_hour
                .unwrap_or(current.waiting_per_quarter_hour),
        )
        .bind(
            request
                .waiting_night_enabled
                .unwrap_or(current.waiting_night_enabled),
        )
        .bind(
            request
                .waiting_night_start
                .clone()
                .unwrap_or(current.waiting_night_start),
        )
        .bind(
            request
                .waiting_night_end
                .clone()
                .unwrap_or(current.waiting_night_end),
        )
        .bind(
            request
                .waiting_night_percent
                .unwrap_or(current.waiting_night_percent),
        )
        .bind(
            request
                .sunday_surcharge_percent
                .unwrap_or(current.sunday_surcharge_percent),
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}
