use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, RegisterCompanyRequest, UpdatePricingDefaultsRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_current_company))
        .route("/pricing", put(update_pricing_defaults))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register_company))
        .route("/login", post(login_company))
        .merge(protected)
}

async fn register_company(
    State(state): State<AppState>,
    Json(request): Json<RegisterCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(state.pool.clone(), state.config.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login_company(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = CompanyController::new(state.pool.clone(), state.config.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn get_current_company(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<CompanyResponse>, AppError> {
    let controller = CompanyController::new(state.pool.clone(), state.config.clone());
    let response = controller.get_by_id(company.company_id).await?;
    Ok(Json(response))
}

async fn update_pricing_defaults(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<UpdatePricingDefaultsRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = CompanyController::new(state.pool.clone(), state.config.clone());
    let response = controller
        .update_pricing_defaults(company.company_id, request)
        .await?;
    Ok(Json(response))
}
