//! Modelo de Ticket
//!
//! Un billete emitido contra una asignación: pasajero, asiento, tarifa
//! y estados de pago y de viaje.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Categoría del pasajero - determina el descuento de la tarifa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassengerCategory {
    Regular,
    Student,
    Senior,
}

impl PassengerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerCategory::Regular => "regular",
            PassengerCategory::Student => "student",
            PassengerCategory::Senior => "senior",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(PassengerCategory::Regular),
            "student" => Some(PassengerCategory::Student),
            "senior" => Some(PassengerCategory::Senior),
            _ => None,
        }
    }
}

/// Método de pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mobile => "mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "mobile" => Some(PaymentMethod::Mobile),
            _ => None,
        }
    }
}

/// Estado de pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// Estado del viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelStatus {
    Booked,
    Boarded,
    Completed,
    Cancelled,
}

impl TravelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStatus::Booked => "booked",
            TravelStatus::Boarded => "boarded",
            TravelStatus::Completed => "completed",
            TravelStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "booked" => Some(TravelStatus::Booked),
            "boarded" => Some(TravelStatus::Boarded),
            "completed" => Some(TravelStatus::Completed),
            "cancelled" => Some(TravelStatus::Cancelled),
            _ => None,
        }
    }
}

/// Ticket principal - mapea exactamente a la tabla tickets
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub passenger_name: String,
    pub passenger_phone: Option<String>,
    pub passenger_category: String,
    pub seat_number: i32,
    pub fare: Decimal,
    pub payment_method: String,
    pub payment_status: String,
    pub travel_status: String,
    pub created_at: DateTime<Utc>,
}
