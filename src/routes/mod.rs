//! Routers de la API
//!
//! Handlers finos: extraen la entrada, construyen el controller desde el
//! estado compartido y devuelven el DTO. Los guards de rol se aplican por
//! router con `route_layer`.

pub mod assignment_routes;
pub mod auth_routes;
pub mod bus_routes;
pub mod conductor_routes;
pub mod location_routes;
pub mod route_routes;
pub mod ticket_routes;
