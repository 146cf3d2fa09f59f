use axum::{
    extract::{Path, State},
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::location_dto::UpdateLocationRequest;
use crate::middleware::auth_middleware::{authenticated_guard, conductor_guard};
use crate::models::location::BusLocation;
use crate::repositories::bus_repository::BusRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    let publish = Router::new()
        .route("/", post(publish_location))
        .route_layer(from_fn(conductor_guard));

    let read = Router::new()
        .route("/:bus_id", get(get_latest_location))
        .route_layer(from_fn(authenticated_guard));

    publish.merge(read)
}

/// Publicar la posición actual de un bus. El último mensaje sobreescribe
/// al anterior; no se conserva histórico.
async fn publish_location(
    State(state): State<AppState>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<BusLocation>>, AppError> {
    request.validate()?;

    let buses = BusRepository::new(state.pool.clone());
    if buses.find_by_id(request.bus_id).await?.is_none() {
        return Err(AppError::NotFound("Bus no encontrado".to_string()));
    }

    let location = BusLocation {
        bus_id: request.bus_id,
        latitude: request.latitude,
        longitude: request.longitude,
        heading: request.heading,
        recorded_at: Utc::now(),
    };

    state.update_bus_location(location.clone()).await;

    Ok(Json(ApiResponse::success(location)))
}

async fn get_latest_location(
    State(state): State<AppState>,
    Path(bus_id): Path<Uuid>,
) -> Result<Json<BusLocation>, AppError> {
    let location = state
        .get_bus_location(bus_id)
        .await
        .ok_or_else(|| AppError::NotFound("Sin posición conocida para este bus".to_string()))?;

    Ok(Json(location))
}
