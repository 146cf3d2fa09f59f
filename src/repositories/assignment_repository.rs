//! Repositorio de asignaciones
//!
//! Aquí vive la regla central del sistema: un bus o un conductor no puede
//! tener dos asignaciones activas con ventanas de tiempo solapadas (bordes
//! inclusivos). La comprobación de solape, la escritura de la asignación y
//! el mantenimiento de las referencias current_* de bus y conductor se
//! ejecutan dentro de una única transacción. Antes de comprobar el solape
//! se toma un advisory lock transaccional por bus y por conductor: dos
//! creaciones concurrentes para el mismo recurso se serializan incluso
//! cuando todavía no existe ninguna fila en conflicto que `FOR UPDATE`
//! pudiera bloquear.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::assignment::{
    current_ref_maintenance, intervals_overlap, Assignment, AssignmentStatus,
};
use crate::utils::errors::AppError;

/// Clave de advisory lock derivada del UUID del recurso.
fn resource_lock_key(id: Uuid) -> i64 {
    let (hi, lo) = id.as_u64_pair();
    (hi ^ lo) as i64
}

/// Claves de lock para el par (bus, conductor) en orden estable, de forma
/// que dos transacciones que compiten por los mismos recursos las adquieren
/// siempre en el mismo orden y no pueden interbloquearse.
fn advisory_lock_keys(bus_id: Uuid, conductor_id: Uuid) -> [i64; 2] {
    let mut keys = [resource_lock_key(bus_id), resource_lock_key(conductor_id)];
    keys.sort_unstable();
    keys
}

pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Assignment>, AppError> {
        let assignment =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(assignment)
    }

    pub async fn find_all(&self) -> Result<Vec<Assignment>, AppError> {
        let assignments =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments ORDER BY start_date DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(assignments)
    }

    pub async fn find_by_conductor(&self, conductor_id: Uuid) -> Result<Vec<Assignment>, AppError> {
        let assignments = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE conductor_id = $1 ORDER BY start_date DESC",
        )
        .bind(conductor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    /// Crear una asignación. Si nace activa se comprueba el solape y se
    /// escriben las referencias current_* en la misma transacción.
    pub async fn create(
        &self,
        route_id: Uuid,
        bus_id: Uuid,
        conductor_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        status: AssignmentStatus,
    ) -> Result<Assignment, AppError> {
        let mut tx = self.pool.begin().await?;

        let refs = current_ref_maintenance(None, status);
        if status == AssignmentStatus::Active {
            Self::check_no_overlap(&mut tx, bus_id, conductor_id, start_date, end_date, None)
                .await?;
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (id, route_id, bus_id, conductor_id, start_date, end_date, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(route_id)
        .bind(bus_id)
        .bind(conductor_id)
        .bind(start_date)
        .bind(end_date)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if refs.set_new {
            Self::set_current_refs(&mut tx, &assignment).await?;
        }

        tx.commit().await?;

        Ok(assignment)
    }

    /// Actualizar una asignación. El solape se re-comprueba (excluyendo la
    /// propia fila) siempre que el estado resultante sea activo; las
    /// transiciones a completed/cancelled limpian las referencias current_*.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        route_id: Option<Uuid>,
        bus_id: Option<Uuid>,
        conductor_id: Option<Uuid>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        status: Option<AssignmentStatus>,
    ) -> Result<Assignment, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        let old_status = AssignmentStatus::from_str(&current.status)
            .ok_or_else(|| AppError::Internal(format!("Estado almacenado inválido: {}", current.status)))?;

        let new_route_id = route_id.unwrap_or(current.route_id);
        let new_bus_id = bus_id.unwrap_or(current.bus_id);
        let new_conductor_id = conductor_id.unwrap_or(current.conductor_id);
        let new_start = start_date.unwrap_or(current.start_date);
        let new_end = end_date.unwrap_or(current.end_date);
        let new_status = status.unwrap_or(old_status);

        if new_end <= new_start {
            return Err(AppError::BadRequest(
                "La fecha de fin debe ser posterior a la de inicio".to_string(),
            ));
        }

        if new_status == AssignmentStatus::Active {
            Self::check_no_overlap(
                &mut tx,
                new_bus_id,
                new_conductor_id,
                new_start,
                new_end,
                Some(id),
            )
            .await?;
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
            SET route_id = $2, bus_id = $3, conductor_id = $4,
                start_date = $5, end_date = $6, status = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_route_id)
        .bind(new_bus_id)
        .bind(new_conductor_id)
        .bind(new_start)
        .bind(new_end)
        .bind(new_status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        // Mantener referencias current_*: limpiar las de la versión previa
        // si estaba activa y escribir las nuevas si sigue/pasa a activa.
        let refs = current_ref_maintenance(Some(old_status), new_status);
        if refs.clear_old {
            Self::clear_current_refs(&mut tx, &current).await?;
        }
        if refs.set_new {
            Self::set_current_refs(&mut tx, &assignment).await?;
        }

        tx.commit().await?;

        Ok(assignment)
    }

    /// Cambiar sólo el estado (transiciones completed/cancelled incluidas).
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: AssignmentStatus,
    ) -> Result<Assignment, AppError> {
        self.update(id, None, None, None, None, None, Some(new_status))
            .await
    }

    /// Eliminar una asignación; si estaba activa se limpian las referencias
    /// current_* del bus y del conductor en la misma transacción.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        let old_status = AssignmentStatus::from_str(&current.status).ok_or_else(|| {
            AppError::Internal(format!("Estado almacenado inválido: {}", current.status))
        })?;
        if old_status == AssignmentStatus::Active {
            Self::clear_current_refs(&mut tx, &current).await?;
        }

        sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Test de solape contra las asignaciones activas del mismo bus O del
    /// mismo conductor. La cláusula de solape del WHERE es un prefiltro; la
    /// decisión final pasa por `intervals_overlap`, que fija la regla de
    /// bordes inclusivos (ventanas que se tocan en un instante cuentan como
    /// conflicto). Los advisory locks serializan creaciones concurrentes
    /// sobre el mismo recurso aunque la tabla aún no tenga filas que
    /// `FOR UPDATE` pudiera bloquear.
    async fn check_no_overlap(
        tx: &mut Transaction<'_, Postgres>,
        bus_id: Uuid,
        conductor_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        for key in advisory_lock_keys(bus_id, conductor_id) {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(key)
                .execute(&mut **tx)
                .await?;
        }

        let candidates = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM assignments
            WHERE (bus_id = $1 OR conductor_id = $2)
              AND status = 'active'
              AND start_date <= $4
              AND end_date >= $3
              AND ($5::uuid IS NULL OR id <> $5)
            FOR UPDATE
            "#,
        )
        .bind(bus_id)
        .bind(conductor_id)
        .bind(start_date)
        .bind(end_date)
        .bind(exclude_id)
        .fetch_all(&mut **tx)
        .await?;

        let conflicting = candidates
            .into_iter()
            .find(|a| intervals_overlap(a.start_date, a.end_date, start_date, end_date));

        if let Some(existing) = conflicting {
            let resource = if existing.bus_id == bus_id {
                "El bus"
            } else {
                "El conductor"
            };
            return Err(AppError::Conflict(format!(
                "{} ya está asignado durante ese periodo ({} - {})",
                resource,
                existing.start_date.to_rfc3339(),
                existing.end_date.to_rfc3339()
            )));
        }

        Ok(())
    }

    /// Escribir las referencias current_* del bus y del conductor.
    async fn set_current_refs(
        tx: &mut Transaction<'_, Postgres>,
        assignment: &Assignment,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE buses
            SET current_route_id = $2, current_conductor_id = $3, current_assignment_id = $4
            WHERE id = $1
            "#,
        )
        .bind(assignment.bus_id)
        .bind(assignment.route_id)
        .bind(assignment.conductor_id)
        .bind(assignment.id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE conductors
            SET current_route_id = $2, current_bus_id = $3, current_assignment_id = $4
            WHERE id = $1
            "#,
        )
        .bind(assignment.conductor_id)
        .bind(assignment.route_id)
        .bind(assignment.bus_id)
        .bind(assignment.id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Anular las referencias current_* del bus y del conductor.
    async fn clear_current_refs(
        tx: &mut Transaction<'_, Postgres>,
        assignment: &Assignment,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE buses
            SET current_route_id = NULL, current_conductor_id = NULL, current_assignment_id = NULL
            WHERE id = $1 AND current_assignment_id = $2
            "#,
        )
        .bind(assignment.bus_id)
        .bind(assignment.id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE conductors
            SET current_route_id = NULL, current_bus_id = NULL, current_assignment_id = NULL
            WHERE id = $1 AND current_assignment_id = $2
            "#,
        )
        .bind(assignment.conductor_id)
        .bind(assignment.id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_keys_do_not_depend_on_argument_order() {
        // Dos transacciones que compiten por el mismo par bus/conductor
        // deben adquirir los locks en el mismo orden, vengan los ids en el
        // orden que vengan.
        let bus_id = Uuid::new_v4();
        let conductor_id = Uuid::new_v4();

        assert_eq!(
            advisory_lock_keys(bus_id, conductor_id),
            advisory_lock_keys(conductor_id, bus_id)
        );
    }

    #[test]
    fn test_lock_key_is_stable_per_resource() {
        let id = Uuid::new_v4();
        assert_eq!(resource_lock_key(id), resource_lock_key(id));
    }

    #[test]
    fn test_distinct_resources_get_distinct_keys() {
        // Un bus sin asignaciones previas no comparte lock con otro bus:
        // sólo las creaciones sobre el mismo recurso se serializan.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_ne!(resource_lock_key(a), resource_lock_key(b));
    }
}
