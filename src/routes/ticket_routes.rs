use axum::{
    extract::{Path, State},
    middleware::from_fn,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::ticket_controller::TicketController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::ticket_dto::{
    IssueTicketRequest, TicketResponse, UpdatePaymentStatusRequest, UpdateTravelStatusRequest,
};
use crate::middleware::auth_middleware::{authenticated_guard, conductor_guard};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ticket_router() -> Router<AppState> {
    // Emitir y consultar billetes: pasajeros y conductores; los cambios de
    // estado de pago/viaje son operación del conductor.
    let open = Router::new()
        .route("/", post(issue_ticket))
        .route("/:id", get(get_ticket))
        .route("/assignment/:assignment_id", get(list_by_assignment))
        .route_layer(from_fn(authenticated_guard));

    let conductor = Router::new()
        .route("/:id/payment", patch(update_payment_status))
        .route("/:id/travel", patch(update_travel_status))
        .route_layer(from_fn(conductor_guard));

    open.merge(conductor)
}

async fn issue_ticket(
    State(state): State<AppState>,
    Json(request): Json<IssueTicketRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = TicketController::new(state.pool.clone());
    let response = controller.issue(request).await?;
    Ok(Json(response))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketResponse>, AppError> {
    let controller = TicketController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_by_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<Vec<TicketResponse>>, AppError> {
    let controller = TicketController::new(state.pool.clone());
    let response = controller.list_by_assignment(assignment_id).await?;
    Ok(Json(response))
}

async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = TicketController::new(state.pool.clone());
    let response = controller.update_payment_status(id, request).await?;
    Ok(Json(response))
}

async fn update_travel_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTravelStatusRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = TicketController::new(state.pool.clone());
    let response = controller.update_travel_status(id, request).await?;
    Ok(Json(response))
}
