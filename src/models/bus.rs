//! Modelo de Bus
//!
//! Este módulo contiene el struct Bus y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusStatus {
    Active,
    Maintenance,
    Inactive,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Active => "active",
            BusStatus::Maintenance => "maintenance",
            BusStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(BusStatus::Active),
            "maintenance" => Some(BusStatus::Maintenance),
            "inactive" => Some(BusStatus::Inactive),
            _ => None,
        }
    }
}

/// Bus principal - mapea exactamente a la tabla buses
///
/// Las referencias current_* se mantienen al crear/cerrar asignaciones
/// activas y siempre dentro de la misma transacción que la asignación.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bus {
    pub id: Uuid,
    pub bus_number: String,
    pub capacity: i32,
    pub status: String,
    pub bus_type: String,
    pub current_route_id: Option<Uuid>,
    pub current_conductor_id: Option<Uuid>,
    pub current_assignment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
