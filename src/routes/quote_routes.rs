use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quote_controller::QuoteController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::quote_dto::{QuotePreviewResponse, QuoteRequest, QuoteResponse};
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quote_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_quote))
        .route("/", get(list_quotes))
        .route("/:id", get(get_quote))
        .route("/:id", delete(delete_quote))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    // El preview es público: es el camino del widget embebido
    Router::new()
        .route("/preview", post(preview_quote))
        .merge(protected)
}

async fn preview_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuotePreviewResponse>, AppError> {
    let controller = QuoteController::new(&state);
    let response = controller.preview(request).await?;
    Ok(Json(response))
}

async fn create_quote(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(&state);
    let response = controller.create(company.company_id, request).await?;
    Ok(Json(response))
}

async fn get_quote(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(&state);
    let response = controller.get_by_id(id, company.company_id).await?;
    Ok(Json(response))
}

async fn list_quotes(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(&state);
    let response = controller.list_by_company(company.company_id).await?;
    Ok(Json(response))
}

async fn delete_quote(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = QuoteController::new(&state);
    controller.delete(id, company.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Presupuesto eliminado exitosamente"
    })))
}
