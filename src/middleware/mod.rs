//! Middleware de la aplicación
//!
//! Autenticación/guard de roles y configuración de CORS.

pub mod auth_middleware;
pub mod cors;
