//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod assignment;
pub mod auth;
pub mod bus;
pub mod conductor;
pub mod location;
pub mod route;
pub mod ticket;
pub mod user;
