use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::conductor::{Conductor, ConductorStatus};
use crate::utils::errors::AppError;

pub struct ConductorRepository {
    pool: PgPool,
}

impl ConductorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        license_number: String,
        phone: String,
        experience_years: i32,
    ) -> Result<Conductor, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            INSERT INTO conductors (id, user_id, license_number, phone, status, experience_years, created_at)
            VALUES ($1, $2, $3, $4, 'active', $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(license_number)
        .bind(phone)
        .bind(experience_years)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(conductor)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Conductor>, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>("SELECT * FROM conductors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(conductor)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Conductor>, AppError> {
        let conductor =
            sqlx::query_as::<_, Conductor>("SELECT * FROM conductors WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(conductor)
    }

    pub async fn find_all(&self) -> Result<Vec<Conductor>, AppError> {
        let conductors =
            sqlx::query_as::<_, Conductor>("SELECT * FROM conductors ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(conductors)
    }

    pub async fn license_exists(&self, license_number: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM conductors WHERE license_number = $1)")
                .bind(license_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        license_number: Option<String>,
        phone: Option<String>,
        status: Option<String>,
        experience_years: Option<i32>,
    ) -> Result<Conductor, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        if let Some(ref s) = status {
            if ConductorStatus::from_str(s).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Estado de conductor inválido: {}",
                    s
                )));
            }
        }

        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            UPDATE conductors
            SET license_number = $2, phone = $3, status = $4, experience_years = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(license_number.unwrap_or(current.license_number))
        .bind(phone.unwrap_or(current.phone))
        .bind(status.unwrap_or(current.status))
        .bind(experience_years.unwrap_or(current.experience_years))
        .fetch_one(&self.pool)
        .await?;

        Ok(conductor)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let conductor = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        if conductor.current_assignment_id.is_some() {
            return Err(AppError::Conflict(
                "El conductor tiene una asignación activa y no puede eliminarse".to_string(),
            ));
        }

        sqlx::query("DELETE FROM conductors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
