//! Middleware de autenticación y guard de roles
//!
//! El guard implementa la máquina de estados de acceso a una vista:
//! sin sesión se redirige a sign-in; con sesión de un rol no permitido se
//! redirige a la página de inicio de ese rol; con rol permitido la request
//! continúa y la sesión (`UserInfo`) queda inyectada como extensión de la
//! request, de forma que los handlers la reciben explícitamente.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::models::auth::{UserInfo, UserRole};
use crate::services::jwt_service::JwtService;

/// Destino de los usuarios no autenticados
pub const SIGN_IN_PATH: &str = "/signin";

const ANY_ROLE: &[UserRole] = &[UserRole::Passenger, UserRole::Conductor, UserRole::Admin];
const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
const CONDUCTOR_ONLY: &[UserRole] = &[UserRole::Conductor];

/// Resultado de evaluar el acceso a una vista
#[derive(Debug, PartialEq)]
pub enum GuardOutcome {
    Authorized(UserInfo),
    RedirectToSignIn,
    RedirectToHome(&'static str),
}

/// Decisión pura de acceso: no toca la request ni la red.
pub fn evaluate_access(session: Option<UserInfo>, allowed: &[UserRole]) -> GuardOutcome {
    match session {
        None => GuardOutcome::RedirectToSignIn,
        Some(user) if allowed.contains(&user.role) => GuardOutcome::Authorized(user),
        Some(user) => GuardOutcome::RedirectToHome(user.role.home_path()),
    }
}

/// Extraer la sesión del header Authorization (Bearer token)
fn extract_session(headers: &HeaderMap) -> Option<UserInfo> {
    let auth_header = headers.get("Authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    JwtService::new().get_user_info(token).ok()
}

async fn run_guard(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
    allowed: &[UserRole],
) -> Response {
    match evaluate_access(extract_session(&headers), allowed) {
        GuardOutcome::Authorized(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        GuardOutcome::RedirectToSignIn => Redirect::to(SIGN_IN_PATH).into_response(),
        GuardOutcome::RedirectToHome(path) => Redirect::to(path).into_response(),
    }
}

/// Guard para vistas que requieren cualquier usuario autenticado
pub async fn authenticated_guard(headers: HeaderMap, request: Request, next: Next) -> Response {
    run_guard(headers, request, next, ANY_ROLE).await
}

/// Guard para vistas de administración
pub async fn admin_guard(headers: HeaderMap, request: Request, next: Next) -> Response {
    run_guard(headers, request, next, ADMIN_ONLY).await
}

/// Guard para vistas del conductor
pub async fn conductor_guard(headers: HeaderMap, request: Request, next: Next) -> Response {
    run_guard(headers, request, next, CONDUCTOR_ONLY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(role: UserRole) -> UserInfo {
        UserInfo {
            id: Uuid::new_v4(),
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_no_session_redirects_to_sign_in() {
        assert_eq!(
            evaluate_access(None, ADMIN_ONLY),
            GuardOutcome::RedirectToSignIn
        );
    }

    #[test]
    fn test_allowed_role_is_authorized() {
        let user = session(UserRole::Admin);
        match evaluate_access(Some(user.clone()), ADMIN_ONLY) {
            GuardOutcome::Authorized(authorized) => assert_eq!(authorized.id, user.id),
            other => panic!("expected Authorized, got {:?}", other),
        }
    }

    #[test]
    fn test_conductor_on_admin_view_redirects_home() {
        // Un conductor nunca llega a renderizar la vista de admin:
        // se le redirige a su propio dashboard.
        assert_eq!(
            evaluate_access(Some(session(UserRole::Conductor)), ADMIN_ONLY),
            GuardOutcome::RedirectToHome("/conductor/dashboard")
        );
    }

    #[test]
    fn test_passenger_on_conductor_view_redirects_home() {
        assert_eq!(
            evaluate_access(Some(session(UserRole::Passenger)), CONDUCTOR_ONLY),
            GuardOutcome::RedirectToHome("/passenger/home")
        );
    }

    #[test]
    fn test_any_role_accepts_all_roles() {
        for role in [UserRole::Passenger, UserRole::Conductor, UserRole::Admin] {
            assert!(matches!(
                evaluate_access(Some(session(role)), ANY_ROLE),
                GuardOutcome::Authorized(_)
            ));
        }
    }
}
