use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::client_controller::ClientController;
use crate::dto::client_dto::{ClientResponse, CreateClientRequest, UpdateClientRequest};
use crate::dto::company_dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_client_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_client))
        .route("/", get(list_clients))
        .route("/:id", get(get_client))
        .route("/:id", put(update_client))
        .route("/:id", delete(delete_client))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_client(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<ClientResponse>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.create(company.company_id, request).await?;
    Ok(Json(response))
}

async fn get_client(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientResponse>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.get_by_id(id, company.company_id).await?;
    Ok(Json(response))
}

async fn list_clients(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.list_by_company(company.company_id).await?;
    Ok(Json(response))
}

async fn update_client(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<ApiResponse<ClientResponse>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.update(id, company.company_id, request).await?;
    Ok(Json(response))
}

async fn delete_client(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    controller.delete(id, company.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado exitosamente"
    })))
}
