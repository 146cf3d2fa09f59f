use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Passenger,
    Conductor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Passenger => "passenger",
            UserRole::Conductor => "conductor",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "passenger" => Some(UserRole::Passenger),
            "conductor" => Some(UserRole::Conductor),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Ruta de inicio para cada rol, usada por el guard para redirigir
    /// usuarios autenticados con un rol no permitido en la vista.
    pub fn home_path(&self) -> &'static str {
        match self {
            UserRole::Passenger => "/passenger/home",
            UserRole::Conductor => "/conductor/dashboard",
            UserRole::Admin => "/admin/dashboard",
        }
    }
}

/// Información del usuario autenticado
///
/// Se inyecta como extensión de request por el middleware de autenticación,
/// de forma que los handlers reciben la sesión explícitamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub name: String,
    pub email: String,
    pub role: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Passenger, UserRole::Conductor, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("livreur"), None);
    }

    #[test]
    fn test_home_paths() {
        assert_eq!(UserRole::Conductor.home_path(), "/conductor/dashboard");
        assert_eq!(UserRole::Admin.home_path(), "/admin/dashboard");
    }
}
