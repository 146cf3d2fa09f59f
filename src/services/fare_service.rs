//! Cálculo de tarifas
//!
//! Tabla única de descuentos por categoría de pasajero. Única fuente de
//! verdad: cualquier emisión de billete pasa por aquí.

use rust_decimal::Decimal;

use crate::models::ticket::PassengerCategory;

/// Multiplicador de tarifa por categoría
fn discount_multiplier(category: PassengerCategory) -> Decimal {
    match category {
        PassengerCategory::Regular => Decimal::new(100, 2), // 1.00
        PassengerCategory::Student => Decimal::new(80, 2),  // 0.80
        PassengerCategory::Senior => Decimal::new(70, 2),   // 0.70
    }
}

/// Tarifa final para una categoría dada, redondeada a dos decimales
pub fn fare_for_category(base_fare: Decimal, category: PassengerCategory) -> Decimal {
    (base_fare * discount_multiplier(category)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_pays_full_fare() {
        let base = Decimal::new(2500, 2); // 25.00
        assert_eq!(fare_for_category(base, PassengerCategory::Regular), base);
    }

    #[test]
    fn test_student_discount() {
        let base = Decimal::new(2500, 2);
        assert_eq!(
            fare_for_category(base, PassengerCategory::Student),
            Decimal::new(2000, 2) // 20.00
        );
    }

    #[test]
    fn test_senior_discount() {
        let base = Decimal::new(2500, 2);
        assert_eq!(
            fare_for_category(base, PassengerCategory::Senior),
            Decimal::new(1750, 2) // 17.50
        );
    }

    #[test]
    fn test_rounding_to_cents() {
        // 9.99 * 0.8 = 7.992 -> 7.99
        let base = Decimal::new(999, 2);
        assert_eq!(
            fare_for_category(base, PassengerCategory::Student),
            Decimal::new(799, 2)
        );
    }
}
