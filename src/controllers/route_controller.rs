use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, RouteFilters, RouteResponse, UpdateRouteRequest};
use crate::repositories::route_repository::RouteRepository;
use crate::services::directions_service::{DirectionsService, RouteDirections};
use crate::utils::errors::AppError;

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        request.validate()?;

        if self.repository.route_number_exists(&request.route_number).await? {
            return Err(AppError::Conflict(
                "El número de ruta ya está registrado".to_string(),
            ));
        }

        let route = self
            .repository
            .create(
                request.route_number,
                request.name,
                request.origin,
                request.origin_lat,
                request.origin_lng,
                request.destination,
                request.destination_lat,
                request.destination_lng,
                request.distance_km,
                request.base_fare,
                request.estimated_duration_minutes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Ruta creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RouteResponse, AppError> {
        let route = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        Ok(route.into())
    }

    pub async fn list(&self, filters: RouteFilters) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self.repository.find_all(&filters).await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        request.validate()?;

        let route = self
            .repository
            .update(
                id,
                request.name,
                request.origin,
                request.origin_lat,
                request.origin_lng,
                request.destination,
                request.destination_lat,
                request.destination_lng,
                request.distance_km,
                request.base_fare,
                request.estimated_duration_minutes,
                request.status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Ruta actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    /// Geometría de la ruta (polyline) vía el servicio de direcciones
    pub async fn directions(
        &self,
        id: Uuid,
        directions_service: &DirectionsService,
    ) -> Result<RouteDirections, AppError> {
        let route = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        directions_service
            .route_directions(
                (route.origin_lng, route.origin_lat),
                (route.destination_lng, route.destination_lat),
            )
            .await
    }
}
