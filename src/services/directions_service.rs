//! Cliente de la API de direcciones de Mapbox
//!
//! La geometría de la ruta se consume como caja negra: una polyline más
//! distancia y duración. Cualquier fallo del servicio externo se expone
//! como error genérico al caller.

use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

#[derive(Debug, Serialize)]
pub struct RouteDirections {
    pub geometry: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct MapboxDirectionsResponse {
    code: String,
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}

pub struct DirectionsService {
    mapbox_token: String,
    client: reqwest::Client,
}

impl DirectionsService {
    pub fn new(mapbox_token: String, client: reqwest::Client) -> Self {
        Self {
            mapbox_token,
            client,
        }
    }

    /// Obtener la geometría (polyline) entre origen y destino.
    /// Coordenadas en (longitud, latitud), como espera Mapbox.
    pub async fn route_directions(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<RouteDirections, AppError> {
        log::info!(
            "🗺️ Solicitando direcciones: ({}, {}) -> ({}, {})",
            origin.0,
            origin.1,
            destination.0,
            destination.1
        );

        let coordinates = format!(
            "{},{};{},{}",
            origin.0, origin.1, destination.0, destination.1
        );
        let url = format!(
            "https://api.mapbox.com/directions/v5/mapbox/driving/{}?geometries=polyline&overview=full&access_token={}",
            urlencoding::encode(&coordinates),
            self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "BusTicketing/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Directions request failed: {}", e)))?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Directions failed with status {}: {}", status, error_text);
            return Err(AppError::ExternalApi(format!(
                "Directions failed: {}",
                status
            )));
        }

        let body: MapboxDirectionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse directions response: {}", e)))?;

        if body.code != "Ok" {
            return Err(AppError::ExternalApi(format!(
                "Directions API returned code {}",
                body.code
            )));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Directions API returned no routes".to_string()))?;

        Ok(RouteDirections {
            geometry: route.geometry,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
