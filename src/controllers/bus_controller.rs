use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bus_dto::{BusResponse, CreateBusRequest, UpdateBusRequest};
use crate::dto::common_dto::ApiResponse;
use crate::repositories::bus_repository::BusRepository;
use crate::utils::errors::AppError;

pub struct BusController {
    repository: BusRepository,
}

impl BusController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BusRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBusRequest,
    ) -> Result<ApiResponse<BusResponse>, AppError> {
        request.validate()?;

        if self.repository.bus_number_exists(&request.bus_number).await? {
            return Err(AppError::Conflict(
                "El número de bus ya está registrado".to_string(),
            ));
        }

        let bus = self
            .repository
            .create(request.bus_number, request.capacity, request.bus_type)
            .await?;

        Ok(ApiResponse::success_with_message(
            bus.into(),
            "Bus creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BusResponse, AppError> {
        let bus = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus no encontrado".to_string()))?;

        Ok(bus.into())
    }

    pub async fn list(&self) -> Result<Vec<BusResponse>, AppError> {
        let buses = self.repository.find_all().await?;
        Ok(buses.into_iter().map(BusResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBusRequest,
    ) -> Result<ApiResponse<BusResponse>, AppError> {
        request.validate()?;

        let bus = self
            .repository
            .update(
                id,
                request.bus_number,
                request.capacity,
                request.status,
                request.bus_type,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            bus.into(),
            "Bus actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
