use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ticket::Ticket;

/// Request para emitir un billete
#[derive(Debug, Deserialize, Validate)]
pub struct IssueTicketRequest {
    pub assignment_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub passenger_name: String,

    #[validate(length(min = 6, max = 20))]
    pub passenger_phone: Option<String>,

    /// regular | student | senior (por defecto regular)
    pub passenger_category: Option<String>,

    #[validate(range(min = 1))]
    pub seat_number: i32,

    /// cash | card | mobile (por defecto cash)
    pub payment_method: Option<String>,
}

/// Request para actualizar el estado de pago
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePaymentStatusRequest {
    #[validate(length(min = 1))]
    pub payment_status: String,
}

/// Request para actualizar el estado del viaje
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTravelStatusRequest {
    #[validate(length(min = 1))]
    pub travel_status: String,
}

/// Response de billete para la API
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub assignment_id: String,
    pub passenger_name: String,
    pub passenger_phone: Option<String>,
    pub passenger_category: String,
    pub seat_number: i32,
    pub fare: String,
    pub payment_method: String,
    pub payment_status: String,
    pub travel_status: String,
    pub created_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            assignment_id: ticket.assignment_id.to_string(),
            passenger_name: ticket.passenger_name,
            passenger_phone: ticket.passenger_phone,
            passenger_category: ticket.passenger_category,
            seat_number: ticket.seat_number,
            fare: ticket.fare.to_string(),
            payment_method: ticket.payment_method,
            payment_status: ticket.payment_status,
            travel_status: ticket.travel_status,
            created_at: ticket.created_at.to_rfc3339(),
        }
    }
}
