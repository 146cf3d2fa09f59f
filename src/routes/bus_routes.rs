use axum::{
    extract::{Path, State},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::bus_controller::BusController;
use crate::dto::bus_dto::{BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth_middleware::admin_guard;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_bus_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_bus))
        .route("/", get(list_buses))
        .route("/:id", get(get_bus))
        .route("/:id", put(update_bus))
        .route("/:id", delete(delete_bus))
        .route_layer(from_fn(admin_guard))
}

async fn create_bus(
    State(state): State<AppState>,
    Json(request): Json<CreateBusRequest>,
) -> Result<Json<ApiResponse<BusResponse>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_buses(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusResponse>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBusRequest>,
) -> Result<Json<ApiResponse<BusResponse>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = BusController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Bus eliminado exitosamente"
    })))
}
