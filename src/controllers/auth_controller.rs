use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::common_dto::ApiResponse;
use crate::models::auth::UserInfo;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppError;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: AuthService::new(pool),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserInfo>, AppError> {
        request.validate()?;

        let user = self
            .service
            .register(request.full_name, request.email, request.password, request.role)
            .await?;

        Ok(ApiResponse::success_with_message(
            user,
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let (user, token, expires_at) =
            self.service.login(&request.email, &request.password).await?;

        Ok(LoginResponse {
            success: true,
            token: Some(token),
            user: Some(user),
            message: None,
            expires_at: Some(expires_at),
        })
    }
}
