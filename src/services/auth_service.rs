//! Servicio de autenticación
//!
//! Registro y login de usuarios con bcrypt + JWT.

use crate::models::auth::{UserInfo, UserRole};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::jwt_service::JwtService;
use crate::utils::errors::AppError;

pub struct AuthService {
    repository: UserRepository,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt: JwtService::new(),
        }
    }

    /// Registrar un usuario nuevo. El rol por defecto es passenger; las
    /// cuentas admin/conductor se crean con el rol explícito.
    pub async fn register(
        &self,
        full_name: String,
        email: String,
        password: String,
        role: Option<String>,
    ) -> Result<UserInfo, AppError> {
        let role = match role.as_deref() {
            None => UserRole::Passenger,
            Some(s) => UserRole::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Rol inválido: {}", s)))?,
        };

        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict(
                "El email ya está registrado".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self
            .repository
            .create(full_name, email, password_hash, role.as_str())
            .await?;

        Self::to_user_info(user)
    }

    /// Login: verifica credenciales y devuelve el usuario + token
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserInfo, String, chrono::DateTime<chrono::Utc>), AppError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let user_info = Self::to_user_info(user)?;
        let expires_at = self.jwt.expires_at();
        let token = self.jwt.generate_access_token(&user_info)?;

        Ok((user_info, token, expires_at))
    }

    fn to_user_info(user: User) -> Result<UserInfo, AppError> {
        let role = UserRole::from_str(&user.role)
            .ok_or_else(|| AppError::Internal(format!("Rol almacenado inválido: {}", user.role)))?;

        Ok(UserInfo {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role,
        })
    }
}
