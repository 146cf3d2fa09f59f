use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::route::Route;

/// Request para crear una nueva ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 20))]
    pub route_number: String,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub origin: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub origin_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub origin_lng: f64,

    #[validate(length(min = 2, max = 100))]
    pub destination: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub destination_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub destination_lng: f64,

    pub distance_km: Decimal,

    pub base_fare: Decimal,

    #[validate(range(min = 1, max = 1440))]
    pub estimated_duration_minutes: i32,
}

/// Request para actualizar una ruta existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub origin: Option<String>,

    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,

    #[validate(length(min = 2, max = 100))]
    pub destination: Option<String>,

    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,

    pub distance_km: Option<Decimal>,
    pub base_fare: Option<Decimal>,

    #[validate(range(min = 1, max = 1440))]
    pub estimated_duration_minutes: Option<i32>,

    pub status: Option<String>,
}

/// Filtros para búsqueda de rutas (flujo de búsqueda del pasajero)
#[derive(Debug, Deserialize)]
pub struct RouteFilters {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: String,
    pub route_number: String,
    pub name: String,
    pub origin: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub distance_km: String,
    pub base_fare: String,
    pub estimated_duration_minutes: i32,
    pub status: String,
    pub created_at: String,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id.to_string(),
            route_number: route.route_number,
            name: route.name,
            origin: route.origin,
            origin_lat: route.origin_lat,
            origin_lng: route.origin_lng,
            destination: route.destination,
            destination_lat: route.destination_lat,
            destination_lng: route.destination_lng,
            distance_km: route.distance_km.to_string(),
            base_fare: route.base_fare.to_string(),
            estimated_duration_minutes: route.estimated_duration_minutes,
            status: route.status,
            created_at: route.created_at.to_rfc3339(),
        }
    }
}
