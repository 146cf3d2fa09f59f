use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::conductor::Conductor;

/// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConductorRequest {
    /// Cuenta de usuario (rol conductor) a la que se enlaza el perfil
    pub user_id: Uuid,

    #[validate(length(min = 5, max = 30))]
    pub license_number: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(range(min = 0, max = 60))]
    pub experience_years: i32,
}

/// Request para actualizar un conductor existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateConductorRequest {
    #[validate(length(min = 5, max = 30))]
    pub license_number: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    pub status: Option<String>,

    #[validate(range(min = 0, max = 60))]
    pub experience_years: Option<i32>,
}

/// Response de conductor para la API
#[derive(Debug, Serialize)]
pub struct ConductorResponse {
    pub id: String,
    pub user_id: String,
    pub license_number: String,
    pub phone: String,
    pub status: String,
    pub experience_years: i32,
    pub current_route_id: Option<String>,
    pub current_bus_id: Option<String>,
    pub current_assignment_id: Option<String>,
    pub created_at: String,
}

impl From<Conductor> for ConductorResponse {
    fn from(conductor: Conductor) -> Self {
        Self {
            id: conductor.id.to_string(),
            user_id: conductor.user_id.to_string(),
            license_number: conductor.license_number,
            phone: conductor.phone,
            status: conductor.status,
            experience_years: conductor.experience_years,
            current_route_id: conductor.current_route_id.map(|id| id.to_string()),
            current_bus_id: conductor.current_bus_id.map(|id| id.to_string()),
            current_assignment_id: conductor.current_assignment_id.map(|id| id.to_string()),
            created_at: conductor.created_at.to_rfc3339(),
        }
    }
}
