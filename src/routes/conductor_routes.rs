use axum::{
    extract::{Path, State},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::assignment_controller::AssignmentController;
use crate::controllers::conductor_controller::ConductorController;
use crate::dto::assignment_dto::AssignmentResponse;
use crate::dto::common_dto::ApiResponse;
use crate::dto::conductor_dto::{ConductorResponse, CreateConductorRequest, UpdateConductorRequest};
use crate::middleware::auth_middleware::{admin_guard, conductor_guard};
use crate::models::auth::UserInfo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_conductor_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_conductor))
        .route("/", get(list_conductors))
        .route("/:id", get(get_conductor))
        .route("/:id", put(update_conductor))
        .route("/:id", delete(delete_conductor))
        .route_layer(from_fn(admin_guard));

    // Vista propia del conductor autenticado
    let own = Router::new()
        .route("/me/assignments", get(my_assignments))
        .route_layer(from_fn(conductor_guard));

    admin.merge(own)
}

async fn create_conductor(
    State(state): State<AppState>,
    Json(request): Json<CreateConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConductorResponse>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_conductors(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateConductorRequest>,
) -> Result<Json<ApiResponse<ConductorResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_conductor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Conductor eliminado exitosamente"
    })))
}

async fn my_assignments(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
) -> Result<Json<Vec<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list_for_user(user.id).await?;
    Ok(Json(response))
}
