//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use reqwest::Client;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::location::BusLocation;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
    /// Última posición conocida por bus. Semántica last-write-wins: cada
    /// mensaje entrante sobreescribe el anterior, sin histórico.
    pub bus_locations: Arc<RwLock<HashMap<Uuid, BusLocation>>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            http_client: Client::new(),
            bus_locations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sobreescribir la posición de un bus con el último mensaje recibido
    pub async fn update_bus_location(&self, location: BusLocation) {
        let mut locations = self.bus_locations.write().await;
        locations.insert(location.bus_id, location);
    }

    /// Obtener la última posición conocida de un bus
    pub async fn get_bus_location(&self, bus_id: Uuid) -> Option<BusLocation> {
        let locations = self.bus_locations.read().await;
        locations.get(&bus_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state_for_tests() -> AppState {
        // Pool "lazy": no abre conexiones hasta la primera query, por lo que
        // sirve para probar el estado en memoria sin base de datos.
        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "localhost".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 1,
            cors_origins: vec![],
            mapbox_token: None,
        };
        AppState::new(pool, config)
    }

    #[tokio::test]
    async fn test_latest_location_overwrites() {
        let state = state_for_tests();
        let bus_id = Uuid::new_v4();

        state
            .update_bus_location(BusLocation {
                bus_id,
                latitude: -12.05,
                longitude: -77.04,
                heading: None,
                recorded_at: Utc::now(),
            })
            .await;

        state
            .update_bus_location(BusLocation {
                bus_id,
                latitude: -12.06,
                longitude: -77.05,
                heading: Some(90.0),
                recorded_at: Utc::now(),
            })
            .await;

        let latest = state.get_bus_location(bus_id).await.unwrap();
        assert_eq!(latest.latitude, -12.06);
        assert_eq!(latest.heading, Some(90.0));
    }

    #[tokio::test]
    async fn test_unknown_bus_has_no_location() {
        let state = state_for_tests();
        assert!(state.get_bus_location(Uuid::new_v4()).await.is_none());
    }
}
