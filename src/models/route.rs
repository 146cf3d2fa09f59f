//! Modelo de Route
//!
//! Este módulo contiene el struct Route y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    Active,
    Inactive,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Active => "active",
            RouteStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(RouteStatus::Active),
            "inactive" => Some(RouteStatus::Inactive),
            _ => None,
        }
    }
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub route_number: String,
    pub name: String,
    pub origin: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub distance_km: Decimal,
    pub base_fare: Decimal,
    pub estimated_duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
