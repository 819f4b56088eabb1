//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de la empresa autenticada.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    repositories::company_repository::CompanyRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token},
};

/// Empresa autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedCompany {
    pub company_id: Uuid,
    pub email: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    // Decodificar y validar JWT
    let claims = verify_token(token, &state.config)?;

    let company_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de empresa inválido".to_string()))?;

    // Verificar que la empresa existe en la base de datos
    let repository = CompanyRepository::new(state.pool.clone());
    let company = repository
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Empresa no encontrada".to_string()))?;

    // Inyectar empresa autenticada en las extensions
    request.extensions_mut().insert(AuthenticatedCompany {
        company_id: company.id,
        email: company.admin_email,
    });

    Ok(next.run(request).await)
}
