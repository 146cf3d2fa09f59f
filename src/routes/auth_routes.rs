use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth_middleware::authenticated_guard;
use crate::models::auth::UserInfo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/me",
            get(me).route_layer(axum::middleware::from_fn(authenticated_guard)),
        )
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

/// Sesión actual, inyectada por el guard como extensión
async fn me(Extension(user): Extension<UserInfo>) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(user))
}
