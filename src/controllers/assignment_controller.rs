use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::assignment_dto::{
    AssignmentResponse, CreateAssignmentRequest, UpdateAssignmentRequest,
    UpdateAssignmentStatusRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::models::assignment::AssignmentStatus;
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::conductor_repository::ConductorRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

pub struct AssignmentController {
    repository: AssignmentRepository,
    routes: RouteRepository,
    buses: BusRepository,
    conductors: ConductorRepository,
}

impl AssignmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AssignmentRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            conductors: ConductorRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        request.validate()?;

        if request.end_date <= request.start_date {
            return Err(AppError::BadRequest(
                "La fecha de fin debe ser posterior a la de inicio".to_string(),
            ));
        }

        let status = match request.status.as_deref() {
            None => AssignmentStatus::Scheduled,
            Some(s) => match AssignmentStatus::from_str(s) {
                Some(status) if !status.is_terminal() => status,
                Some(_) => {
                    return Err(AppError::BadRequest(
                        "Una asignación no puede crearse en estado terminal".to_string(),
                    ))
                }
                None => {
                    return Err(AppError::BadRequest(format!(
                        "Estado de asignación inválido: {}",
                        s
                    )))
                }
            },
        };

        // Referencias válidas antes de tocar la tabla de asignaciones
        let (route, bus, conductor) = futures::try_join!(
            self.routes.find_by_id(request.route_id),
            self.buses.find_by_id(request.bus_id),
            self.conductors.find_by_id(request.conductor_id),
        )?;
        route.ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;
        bus.ok_or_else(|| AppError::NotFound("Bus no encontrado".to_string()))?;
        conductor.ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let assignment = self
            .repository
            .create(
                request.route_id,
                request.bus_id,
                request.conductor_id,
                request.start_date,
                request.end_date,
                status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Asignación creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AssignmentResponse, AppError> {
        let assignment = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        Ok(assignment.into())
    }

    pub async fn list(&self) -> Result<Vec<AssignmentResponse>, AppError> {
        let assignments = self.repository.find_all().await?;
        Ok(assignments.into_iter().map(AssignmentResponse::from).collect())
    }

    pub async fn list_by_conductor(
        &self,
        conductor_id: Uuid,
    ) -> Result<Vec<AssignmentResponse>, AppError> {
        let assignments = self.repository.find_by_conductor(conductor_id).await?;
        Ok(assignments.into_iter().map(AssignmentResponse::from).collect())
    }

    /// Asignaciones del conductor autenticado (por cuenta de usuario)
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AssignmentResponse>, AppError> {
        let conductor = self
            .conductors
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("La cuenta no tiene perfil de conductor".to_string())
            })?;

        self.list_by_conductor(conductor.id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAssignmentRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        request.validate()?;

        let status = match request.status.as_deref() {
            None => None,
            Some(s) => Some(AssignmentStatus::from_str(s).ok_or_else(|| {
                AppError::BadRequest(format!("Estado de asignación inválido: {}", s))
            })?),
        };

        let assignment = self
            .repository
            .update(
                id,
                request.route_id,
                request.bus_id,
                request.conductor_id,
                request.start_date,
                request.end_date,
                status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Asignación actualizada exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateAssignmentStatusRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        request.validate()?;

        let status = AssignmentStatus::from_str(&request.status).ok_or_else(|| {
            AppError::BadRequest(format!("Estado de asignación inválido: {}", request.status))
        })?;

        let assignment = self.repository.update_status(id, status).await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Estado de asignación actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
