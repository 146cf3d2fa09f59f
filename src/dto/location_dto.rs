use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Request para publicar la posición actual de un bus
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    pub bus_id: Uuid,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,
}
