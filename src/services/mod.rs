//! Servicios del sistema
//!
//! Lógica de negocio que no pertenece a un repositorio concreto:
//! autenticación, JWT, tarifas y el cliente de direcciones de Mapbox.

pub mod auth_service;
pub mod directions_service;
pub mod fare_service;
pub mod jwt_service;
