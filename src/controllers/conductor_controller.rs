use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::conductor_dto::{
    ConductorResponse, CreateConductorRequest, UpdateConductorRequest,
};
use crate::models::auth::UserRole;
use crate::repositories::conductor_repository::ConductorRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct ConductorController {
    repository: ConductorRepository,
    users: UserRepository,
}

impl ConductorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ConductorRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateConductorRequest,
    ) -> Result<ApiResponse<ConductorResponse>, AppError> {
        request.validate()?;

        // El perfil debe enlazar a una cuenta existente con rol conductor
        let user = self
            .users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        if user.role != UserRole::Conductor.as_str() {
            return Err(AppError::BadRequest(
                "La cuenta de usuario no tiene rol conductor".to_string(),
            ));
        }

        if self.repository.find_by_user(request.user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "El usuario ya tiene un perfil de conductor".to_string(),
            ));
        }

        if self.repository.license_exists(&request.license_number).await? {
            return Err(AppError::Conflict(
                "El número de licencia ya está registrado".to_string(),
            ));
        }

        let conductor = self
            .repository
            .create(
                request.user_id,
                request.license_number,
                request.phone,
                request.experience_years,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            conductor.into(),
            "Conductor registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ConductorResponse, AppError> {
        let conductor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(conductor.into())
    }

    pub async fn list(&self) -> Result<Vec<ConductorResponse>, AppError> {
        let conductors = self.repository.find_all().await?;
        Ok(conductors.into_iter().map(ConductorResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateConductorRequest,
    ) -> Result<ApiResponse<ConductorResponse>, AppError> {
        request.validate()?;

        let conductor = self
            .repository
            .update(
                id,
                request.license_number,
                request.phone,
                request.status,
                request.experience_years,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            conductor.into(),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
