//! Modelo de Conductor
//!
//! Perfil de conductor enlazado a una cuenta de usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductorStatus {
    Active,
    Inactive,
}

impl ConductorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConductorStatus::Active => "active",
            ConductorStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ConductorStatus::Active),
            "inactive" => Some(ConductorStatus::Inactive),
            _ => None,
        }
    }
}

/// Conductor principal - mapea exactamente a la tabla conductors
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conductor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub license_number: String,
    pub phone: String,
    pub status: String,
    pub experience_years: i32,
    pub current_route_id: Option<Uuid>,
    pub current_bus_id: Option<Uuid>,
    pub current_assignment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
