use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quote::Quote;
use crate::utils::errors::AppError;

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persistir un presupuesto con su desglose completo
    ///
    /// Los importes se guardan con la precisión del cálculo para que el
    /// desglose pueda regenerarse sin pérdidas.
    pub async fn create(&self, quote: &Quote) -> Result<Quote, AppError> {
        let result = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                id, company_id, vehicle_id, client_id,
                departure_address, destination_address, departure_date, departure_time,
                outbound_distance_km, outbound_duration_minutes,
                has_return_trip, return_to_same_address, return_distance_km, return_duration_minutes,
                has_waiting_time, waiting_minutes,
                day_km, night_km, total_km,
                one_way_fare_ht, return_fare_ht, waiting_fare_ht,
                one_way_fare_ttc, return_fare_ttc, waiting_fare_ttc,
                night_surcharge_amount, sunday_surcharge_amount,
                total_ht, total_vat, total_ttc,
                is_night_rate_applied, is_sunday_or_holiday, minimum_fare_applied,
                below_minimum_distance, quote_status, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
                $31, $32, $33, $34, $35, $36
            )
            RETURNING *
            "#,
        )
        .bind(quote.id)
        .bind(quote.company_id)
        .bind(quote.vehicle_id)
        .bind(quote.client_id)
        .bind(&quote.departure_address)
        .bind(&quote.destination_address)
        .bind(quote.departure_date)
        .bind(quote.departure_time)
        .bind(quote.outbound_distance_km)
        .bind(quote.outbound_duration_minutes)
        .bind(quote.has_return_trip)
        .bind(quote.return_to_same_address)
        .bind(quote.return_distance_km)
        .bind(quote.return_duration_minutes)
        .bind(quote.has_waiting_time)
        .bind(quote.waiting_minutes)
        .bind(quote.day_km)
        .bind(quote.night_km)
        .bind(quote.total_km)
        .bind(quote.one_way_fare_ht)
        .bind(quote.return_fare_ht)
        .bind(quote.waiting_fare_ht)
        .bind(quote.one_way_fare_ttc)
        .bind(quote.return_fare_ttc)
        .bind(quote.waiting_fare_ttc)
        .bind(quote.night_surcharge_amount)
        .bind(quote.sunday_surcharge_amount)
        .bind(quote.total_ht)
        .bind(quote.total_vat)
        .bind(quote.total_ttc)
        .bind(quote.is_night_rate_applied)
        .bind(quote.is_sunday_or_holiday)
        .bind(quote.minimum_fare_applied)
        .bind(quote.below_minimum_distance)
        .bind(&quote.quote_status)
        .bind(quote.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let quote = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Presupuesto no encontrado".to_string()))?;

        if quote.company_id != company_id {
            return Err(AppError::Forbidden(
                "El presupuesto no pertenece a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
