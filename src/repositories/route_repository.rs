use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::route_dto::RouteFilters;
use crate::models::route::{Route, RouteStatus};
use crate::utils::errors::AppError;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        route_number: String,
        name: String,
        origin: String,
        origin_lat: f64,
        origin_lng: f64,
        destination: String,
        destination_lat: f64,
        destination_lng: f64,
        distance_km: Decimal,
        base_fare: Decimal,
        estimated_duration_minutes: i32,
    ) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (
                id, route_number, name,
                origin, origin_lat, origin_lng,
                destination, destination_lat, destination_lng,
                distance_km, base_fare, estimated_duration_minutes,
                status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'active', $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(route_number)
        .bind(name)
        .bind(origin)
        .bind(origin_lat)
        .bind(origin_lng)
        .bind(destination)
        .bind(destination_lat)
        .bind(destination_lng)
        .bind(distance_km)
        .bind(base_fare)
        .bind(estimated_duration_minutes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    /// Listado con filtros opcionales de origen/destino/estado
    /// (búsqueda de rutas del pasajero).
    pub async fn find_all(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::text IS NULL OR origin ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR destination ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR status = $3)
            ORDER BY route_number
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.origin.as_deref())
        .bind(filters.destination.as_deref())
        .bind(filters.status.as_deref())
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn route_number_exists(&self, route_number: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes WHERE route_number = $1)")
                .bind(route_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        origin: Option<String>,
        origin_lat: Option<f64>,
        origin_lng: Option<f64>,
        destination: Option<String>,
        destination_lat: Option<f64>,
        destination_lng: Option<f64>,
        distance_km: Option<Decimal>,
        base_fare: Option<Decimal>,
        estimated_duration_minutes: Option<i32>,
        status: Option<String>,
    ) -> Result<Route, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        if let Some(ref s) = status {
            if RouteStatus::from_str(s).is_none() {
                return Err(AppError::BadRequest(format!("Estado de ruta inválido: {}", s)));
            }
        }

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = $2, origin = $3, origin_lat = $4, origin_lng = $5,
                destination = $6, destination_lat = $7, destination_lng = $8,
                distance_km = $9, base_fare = $10, estimated_duration_minutes = $11,
                status = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(origin.unwrap_or(current.origin))
        .bind(origin_lat.unwrap_or(current.origin_lat))
        .bind(origin_lng.unwrap_or(current.origin_lng))
        .bind(destination.unwrap_or(current.destination))
        .bind(destination_lat.unwrap_or(current.destination_lat))
        .bind(destination_lng.unwrap_or(current.destination_lng))
        .bind(distance_km.unwrap_or(current.distance_km))
        .bind(base_fare.unwrap_or(current.base_fare))
        .bind(estimated_duration_minutes.unwrap_or(current.estimated_duration_minutes))
        .bind(status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ruta no encontrada".to_string()));
        }

        Ok(())
    }
}
