use axum::{
    extract::{Path, Query, State},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, RouteFilters, RouteResponse, UpdateRouteRequest};
use crate::middleware::auth_middleware::{admin_guard, authenticated_guard};
use crate::services::directions_service::{DirectionsService, RouteDirections};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    // Lectura abierta a cualquier usuario autenticado (búsqueda del
    // pasajero); mutaciones sólo para administración.
    let read = Router::new()
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id/directions", get(get_route_directions))
        .route_layer(from_fn(authenticated_guard));

    let admin = Router::new()
        .route("/", post(create_route))
        .route("/:id", put(update_route))
        .route("/:id", delete(delete_route))
        .route_layer(from_fn(admin_guard));

    read.merge(admin)
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_route_directions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteDirections>, AppError> {
    let token = state
        .config
        .mapbox_token
        .clone()
        .ok_or_else(|| AppError::Internal("MAPBOX_TOKEN no configurado".to_string()))?;

    let directions_service = DirectionsService::new(token, state.http_client.clone());
    let controller = RouteController::new(state.pool.clone());
    let response = controller.directions(id, &directions_service).await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Ruta eliminada exitosamente"
    })))
}
