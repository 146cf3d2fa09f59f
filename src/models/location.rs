//! Modelo de posición de bus en tiempo real
//!
//! Las posiciones no se persisten: el estado compartido guarda sólo la
//! última posición recibida por bus (el último mensaje sobreescribe).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Última posición conocida de un bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusLocation {
    pub bus_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}
