use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bus::{Bus, BusStatus};
use crate::utils::errors::AppError;

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        bus_number: String,
        capacity: i32,
        bus_type: String,
    ) -> Result<Bus, AppError> {
        let bus = sqlx::query_as::<_, Bus>(
            r#"
            INSERT INTO buses (id, bus_number, capacity, status, bus_type, created_at)
            VALUES ($1, $2, $3, 'active', $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(bus_number)
        .bind(capacity)
        .bind(bus_type)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bus)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Bus>, AppError> {
        let bus = sqlx::query_as::<_, Bus>("SELECT * FROM buses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bus)
    }

    pub async fn find_all(&self) -> Result<Vec<Bus>, AppError> {
        let buses = sqlx::query_as::<_, Bus>("SELECT * FROM buses ORDER BY bus_number")
            .fetch_all(&self.pool)
            .await?;

        Ok(buses)
    }

    pub async fn bus_number_exists(&self, bus_number: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM buses WHERE bus_number = $1)")
                .bind(bus_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        bus_number: Option<String>,
        capacity: Option<i32>,
        status: Option<String>,
        bus_type: Option<String>,
    ) -> Result<Bus, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus no encontrado".to_string()))?;

        if let Some(ref s) = status {
            if BusStatus::from_str(s).is_none() {
                return Err(AppError::BadRequest(format!("Estado de bus inválido: {}", s)));
            }
        }

        let bus = sqlx::query_as::<_, Bus>(
            r#"
            UPDATE buses
            SET bus_number = $2, capacity = $3, status = $4, bus_type = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(bus_number.unwrap_or(current.bus_number))
        .bind(capacity.unwrap_or(current.capacity))
        .bind(status.unwrap_or(current.status))
        .bind(bus_type.unwrap_or(current.bus_type))
        .fetch_one(&self.pool)
        .await?;

        Ok(bus)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let bus = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus no encontrado".to_string()))?;

        if bus.current_assignment_id.is_some() {
            return Err(AppError::Conflict(
                "El bus tiene una asignación activa y no puede eliminarse".to_string(),
            ));
        }

        sqlx::query("DELETE FROM buses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
