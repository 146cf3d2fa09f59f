use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::ticket_dto::{
    IssueTicketRequest, TicketResponse, UpdatePaymentStatusRequest, UpdateTravelStatusRequest,
};
use crate::models::assignment::AssignmentStatus;
use crate::models::ticket::{PassengerCategory, PaymentMethod, PaymentStatus, TravelStatus};
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::ticket_repository::TicketRepository;
use crate::services::fare_service;
use crate::utils::errors::AppError;

pub struct TicketController {
    repository: TicketRepository,
    assignments: AssignmentRepository,
    routes: RouteRepository,
    buses: BusRepository,
}

impl TicketController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TicketRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            buses: BusRepository::new(pool),
        }
    }

    /// Emitir un billete contra una asignación. La tarifa se calcula a
    /// partir de la tarifa base de la ruta y la categoría del pasajero.
    pub async fn issue(
        &self,
        request: IssueTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate()?;

        let assignment = self
            .assignments
            .find_by_id(request.assignment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        match AssignmentStatus::from_str(&assignment.status) {
            Some(status) if !status.is_terminal() => {}
            _ => {
                return Err(AppError::BadRequest(
                    "No se pueden emitir billetes para una asignación finalizada".to_string(),
                ))
            }
        }

        let category = match request.passenger_category.as_deref() {
            None => PassengerCategory::Regular,
            Some(s) => PassengerCategory::from_str(s).ok_or_else(|| {
                AppError::BadRequest(format!("Categoría de pasajero inválida: {}", s))
            })?,
        };

        let payment_method = match request.payment_method.as_deref() {
            None => PaymentMethod::Cash,
            Some(s) => PaymentMethod::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Método de pago inválido: {}", s)))?,
        };

        // El asiento debe existir en el bus; la comprobación de asiento
        // ocupado vive en el repositorio, dentro de la misma transacción
        // que el INSERT.
        let bus = self
            .buses
            .find_by_id(assignment.bus_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus no encontrado".to_string()))?;

        if request.seat_number > bus.capacity {
            return Err(AppError::BadRequest(format!(
                "El asiento {} no existe: el bus tiene capacidad {}",
                request.seat_number, bus.capacity
            )));
        }

        let route = self
            .routes
            .find_by_id(assignment.route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        let fare = fare_service::fare_for_category(route.base_fare, category);

        let ticket = self
            .repository
            .create(
                request.assignment_id,
                request.passenger_name,
                request.passenger_phone,
                category.as_str(),
                request.seat_number,
                fare,
                payment_method.as_str(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            ticket.into(),
            "Billete emitido exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TicketResponse, AppError> {
        let ticket = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Billete no encontrado".to_string()))?;

        Ok(ticket.into())
    }

    pub async fn list_by_assignment(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<TicketResponse>, AppError> {
        let tickets = self.repository.find_by_assignment(assignment_id).await?;
        Ok(tickets.into_iter().map(TicketResponse::from).collect())
    }

    pub async fn update_payment_status(
        &self,
        id: Uuid,
        request: UpdatePaymentStatusRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate()?;

        let status = PaymentStatus::from_str(&request.payment_status).ok_or_else(|| {
            AppError::BadRequest(format!("Estado de pago inválido: {}", request.payment_status))
        })?;

        let ticket = self
            .repository
            .update_payment_status(id, status.as_str())
            .await?;

        Ok(ApiResponse::success_with_message(
            ticket.into(),
            "Estado de pago actualizado".to_string(),
        ))
    }

    pub async fn update_travel_status(
        &self,
        id: Uuid,
        request: UpdateTravelStatusRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate()?;

        let status = TravelStatus::from_str(&request.travel_status).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Estado de viaje inválido: {}",
                request.travel_status
            ))
        })?;

        let ticket = self
            .repository
            .update_travel_status(id, status.as_str())
            .await?;

        Ok(ApiResponse::success_with_message(
            ticket.into(),
            "Estado de viaje actualizado".to_string(),
        ))
    }
}
