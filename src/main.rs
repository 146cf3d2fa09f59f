mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Bus Ticketing & Fleet Management API");
    info!("========================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Crear router de la API
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    // En producción sólo se aceptan los orígenes de CORS_ORIGINS
    let cors = if app_state.config.is_production() {
        cors_middleware_with_origins(app_state.config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/route", routes::route_routes::create_route_router())
        .nest("/api/bus", routes::bus_routes::create_bus_router())
        .nest("/api/conductor", routes::conductor_routes::create_conductor_router())
        .nest("/api/assignment", routes::assignment_routes::create_assignment_router())
        .nest("/api/ticket", routes::ticket_routes::create_ticket_router())
        .nest("/api/location", routes::location_routes::create_location_router())
        .layer(cors)
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Sesión actual");
    info!("🗺️ Endpoints - Route:");
    info!("   POST /api/route - Crear ruta");
    info!("   GET  /api/route - Buscar rutas");
    info!("   GET  /api/route/:id - Obtener ruta");
    info!("   GET  /api/route/:id/directions - Geometría de la ruta");
    info!("   PUT  /api/route/:id - Actualizar ruta");
    info!("   DELETE /api/route/:id - Eliminar ruta");
    info!("🚌 Endpoints - Bus:");
    info!("   POST /api/bus - Crear bus");
    info!("   GET  /api/bus - Listar buses");
    info!("   GET  /api/bus/:id - Obtener bus");
    info!("   PUT  /api/bus/:id - Actualizar bus");
    info!("   DELETE /api/bus/:id - Eliminar bus");
    info!("🧑 Endpoints - Conductor:");
    info!("   POST /api/conductor - Registrar conductor");
    info!("   GET  /api/conductor - Listar conductores");
    info!("   GET  /api/conductor/me/assignments - Asignaciones propias");
    info!("📋 Endpoints - Assignment:");
    info!("   POST /api/assignment - Crear asignación (con chequeo de solape)");
    info!("   GET  /api/assignment - Listar asignaciones");
    info!("   PUT  /api/assignment/:id - Actualizar asignación");
    info!("   PATCH /api/assignment/:id/status - Cambiar estado");
    info!("   DELETE /api/assignment/:id - Eliminar asignación");
    info!("🎫 Endpoints - Ticket:");
    info!("   POST /api/ticket - Emitir billete");
    info!("   GET  /api/ticket/:id - Obtener billete");
    info!("   GET  /api/ticket/assignment/:id - Billetes por asignación");
    info!("   PATCH /api/ticket/:id/payment - Estado de pago");
    info!("   PATCH /api/ticket/:id/travel - Estado de viaje");
    info!("📍 Endpoints - Location:");
    info!("   POST /api/location - Publicar posición de bus");
    info!("   GET  /api/location/:bus_id - Última posición conocida");

    // Iniciar servidor
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Bus Ticketing API funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
