use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::bus::Bus;

/// Request para crear un nuevo bus
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBusRequest {
    #[validate(length(min = 2, max = 20))]
    pub bus_number: String,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,

    #[validate(length(min = 2, max = 50))]
    pub bus_type: String,
}

/// Request para actualizar un bus existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBusRequest {
    #[validate(length(min = 2, max = 20))]
    pub bus_number: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: Option<i32>,

    pub status: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub bus_type: Option<String>,
}

/// Response de bus para la API
#[derive(Debug, Serialize)]
pub struct BusResponse {
    pub id: String,
    pub bus_number: String,
    pub capacity: i32,
    pub status: String,
    pub bus_type: String,
    pub current_route_id: Option<String>,
    pub current_conductor_id: Option<String>,
    pub current_assignment_id: Option<String>,
    pub created_at: String,
}

impl From<Bus> for BusResponse {
    fn from(bus: Bus) -> Self {
        Self {
            id: bus.id.to_string(),
            bus_number: bus.bus_number,
            capacity: bus.capacity,
            status: bus.status,
            bus_type: bus.bus_type,
            current_route_id: bus.current_route_id.map(|id| id.to_string()),
            current_conductor_id: bus.current_conductor_id.map(|id| id.to_string()),
            current_assignment_id: bus.current_assignment_id.map(|id| id.to_string()),
            created_at: bus.created_at.to_rfc3339(),
        }
    }
}
