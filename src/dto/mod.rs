//! DTOs de la API
//!
//! Requests y responses que cruzan la frontera HTTP. Los modelos de
//! dominio se mapean aquí, nunca se exponen filas crudas.

pub mod assignment_dto;
pub mod auth_dto;
pub mod bus_dto;
pub mod common_dto;
pub mod conductor_dto;
pub mod location_dto;
pub mod route_dto;
pub mod ticket_dto;
