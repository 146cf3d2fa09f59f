//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad, cada uno dueño de su tabla. Las queries
//! usan sqlx con `RETURNING *` para devolver la fila escrita.

pub mod assignment_repository;
pub mod bus_repository;
pub mod conductor_repository;
pub mod route_repository;
pub mod ticket_repository;
pub mod user_repository;
