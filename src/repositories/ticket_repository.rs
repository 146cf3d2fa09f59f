use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ticket::Ticket;
use crate::utils::errors::AppError;

/// Clave de advisory lock por asiento dentro de una asignación: dos ventas
/// concurrentes del mismo asiento se serializan antes de comprobar si ya
/// está ocupado.
fn seat_lock_key(assignment_id: Uuid, seat_number: i32) -> i64 {
    let (hi, lo) = assignment_id.as_u64_pair();
    (hi ^ lo ^ seat_number as u64) as i64
}

pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Emitir un billete. La comprobación de asiento ocupado y el INSERT
    /// corren en una transacción bajo un advisory lock por asiento, de
    /// forma que dos ventas concurrentes del mismo asiento no pueden pasar
    /// ambas la comprobación.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        assignment_id: Uuid,
        passenger_name: String,
        passenger_phone: Option<String>,
        passenger_category: &str,
        seat_number: i32,
        fare: Decimal,
        payment_method: &str,
    ) -> Result<Ticket, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(seat_lock_key(assignment_id, seat_number))
            .execute(&mut *tx)
            .await?;

        let (taken,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tickets
                WHERE assignment_id = $1 AND seat_number = $2 AND travel_status <> 'cancelled'
            )
            "#,
        )
        .bind(assignment_id)
        .bind(seat_number)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
            return Err(AppError::Conflict(format!(
                "El asiento {} ya está ocupado para este viaje",
                seat_number
            )));
        }

        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (
                id, assignment_id, passenger_name, passenger_phone, passenger_category,
                seat_number, fare, payment_method, payment_status, travel_status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 'booked', $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assignment_id)
        .bind(passenger_name)
        .bind(passenger_phone)
        .bind(passenger_category)
        .bind(seat_number)
        .bind(fare)
        .bind(payment_method)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ticket)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ticket)
    }

    pub async fn find_by_assignment(&self, assignment_id: Uuid) -> Result<Vec<Ticket>, AppError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE assignment_id = $1 ORDER BY seat_number",
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    pub async fn update_payment_status(
        &self,
        id: Uuid,
        payment_status: &str,
    ) -> Result<Ticket, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET payment_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Billete no encontrado".to_string()))?;

        Ok(ticket)
    }

    pub async fn update_travel_status(
        &self,
        id: Uuid,
        travel_status: &str,
    ) -> Result<Ticket, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET travel_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(travel_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Billete no encontrado".to_string()))?;

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_lock_key_is_stable() {
        let assignment_id = Uuid::new_v4();
        assert_eq!(
            seat_lock_key(assignment_id, 12),
            seat_lock_key(assignment_id, 12)
        );
    }

    #[test]
    fn test_seat_lock_key_distinguishes_seats() {
        // Ventas de asientos distintos del mismo viaje no se bloquean
        // entre sí.
        let assignment_id = Uuid::new_v4();
        assert_ne!(
            seat_lock_key(assignment_id, 12),
            seat_lock_key(assignment_id, 13)
        );
    }

    #[test]
    fn test_seat_lock_key_distinguishes_assignments() {
        assert_ne!(
            seat_lock_key(Uuid::new_v4(), 12),
            seat_lock_key(Uuid::new_v4(), 12)
        );
    }
}
