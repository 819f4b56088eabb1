use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, RegisterCompanyRequest, UpdatePricingDefaultsRequest,
};
use crate::models::company::Company;
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::generate_token;
use crate::utils::validation::{validate_siret, validate_time_of_day};

pub struct CompanyController {
    repository: CompanyRepository,
    config: EnvironmentConfig,
}

impl CompanyController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: CompanyRepository::new(pool),
            config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        // Validar campos
        if request.company_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El nombre de la empresa es requerido".to_string(),
            ));
        }

        if request.company_address.trim().is_empty() {
            return Err(AppError::ValidationError("La dirección es requerida".to_string()));
        }

        if request.admin_full_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El nombre del administrador es requerido".to_string(),
            ));
        }

        if request.admin_email.trim().is_empty() || !request.admin_email.contains('@') {
            return Err(AppError::ValidationError("Email inválido".to_string()));
        }

        if request.admin_password.len() < 8 {
            return Err(AppError::ValidationError(
                "La contraseña debe tener al menos 8 caracteres".to_string(),
            ));
        }

        // Validar SIRET si existe
        if let Some(ref siret) = request.company_siret {
            if !siret.is_empty() && validate_siret(siret).is_err() {
                return Err(AppError::ValidationError(
                    "El SIRET debe tener 14 dígitos".to_string(),
                ));
            }
        }

        // Verificar que el email no exista
        if self.repository.email_exists(&request.admin_email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // Verificar que el SIRET no exista
        if let Some(ref siret) = request.company_siret {
            if !siret.is_empty() && self.repository.siret_exists(siret).await? {
                return Err(AppError::Conflict("El SIRET ya está registrado".to_string()));
            }
        }

        // Hash de la contraseña
        let password_hash = hash(&request.admin_password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        // Crear empresa
        let company = Company::new(
            request.company_name,
            request.company_address,
            request.company_siret.filter(|s| !s.is_empty()),
            request.admin_full_name,
            request.admin_email,
            password_hash,
        );

        // Guardar en DB
        let saved_company = self.repository.create(&company).await?;

        Ok(ApiResponse::success_with_message(
            CompanyResponse::from(saved_company),
            "Empresa registrada exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // Buscar empresa por email
        let company = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &company.admin_password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        // Generar JWT token
        let token = generate_token(company.id, &company.admin_email, &self.config)?;

        Ok(LoginResponse::success(
            token,
            company.id.to_string(),
            company.name,
        ))
    }

    pub async fn get_by_id(&self, id: uuid::Uuid) -> Result<CompanyResponse, AppError> {
        let company = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empresa no encontrada".to_string()))?;

        Ok(CompanyResponse::from(company))
    }

    /// Actualizar la tarificación por defecto de la empresa
    pub async fn update_pricing_defaults(
        &self,
        id: uuid::Uuid,
        request: UpdatePricingDefaultsRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        // Las ventanas horarias deben ser "HH:MM" válidas
        for window_value in [
            &request.night_rate_start,
            &request.night_rate_end,
            &request.waiting_night_start,
            &request.waiting_night_end,
        ]
        .into_iter()
        .flatten()
        {
            if validate_time_of_day(window_value).is_err() {
                return Err(AppError::ValidationError(format!(
                    "Hora inválida '{}': formato esperado HH:MM",
                    window_value
                )));
            }
        }

        // Los importes y porcentajes no pueden ser negativos
        for amount in [
            request.price_per_km,
            request.minimum_trip_distance_km,
            request.minimum_trip_fare,
            request.night_rate_percent,
            request.waiting_per_quarter_hour,
            request.waiting_night_percent,
            request.sunday_surcharge_percent,
        ]
        .into_iter()
        .flatten()
        {
            if amount < rust_decimal::Decimal::ZERO {
                return Err(AppError::ValidationError(
                    "Los importes y porcentajes no pueden ser negativos".to_string(),
                ));
            }
        }

        let company = self.repository.update_pricing_defaults(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            CompanyResponse::from(company),
            "Tarificación actualizada exitosamente".to_string(),
        ))
    }
}
