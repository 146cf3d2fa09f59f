use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::assignment::Assignment;

/// Request para crear una asignación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub conductor_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// active | scheduled (por defecto scheduled)
    pub status: Option<String>,
}

/// Request para actualizar una asignación existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    pub route_id: Option<Uuid>,
    pub bus_id: Option<Uuid>,
    pub conductor_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Request para cambiar sólo el estado de una asignación
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Response de asignación para la API
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub route_id: String,
    pub bus_id: String,
    pub conductor_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id.to_string(),
            route_id: assignment.route_id.to_string(),
            bus_id: assignment.bus_id.to_string(),
            conductor_id: assignment.conductor_id.to_string(),
            start_date: assignment.start_date.to_rfc3339(),
            end_date: assignment.end_date.to_rfc3339(),
            status: assignment.status,
            created_at: assignment.created_at.to_rfc3339(),
        }
    }
}
