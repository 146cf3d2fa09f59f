//! Controllers de la API
//!
//! Un controller por entidad: validación de entrada, reglas de negocio y
//! mapeo de modelos a DTOs. Los handlers HTTP (en routes/) son finos y
//! delegan aquí.

pub mod assignment_controller;
pub mod auth_controller;
pub mod bus_controller;
pub mod conductor_controller;
pub mod route_controller;
pub mod ticket_controller;
