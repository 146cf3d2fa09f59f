//! Modelo de Assignment
//!
//! Una asignación vincula un bus y un conductor a una ruta durante una
//! ventana de tiempo [start_date, end_date]. La invariante central del
//! sistema: para un mismo bus o un mismo conductor no pueden existir dos
//! asignaciones activas con ventanas solapadas (bordes inclusivos).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la asignación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Active,
    Scheduled,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Active => "active",
            AssignmentStatus::Scheduled => "scheduled",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AssignmentStatus::Active),
            "scheduled" => Some(AssignmentStatus::Scheduled),
            "completed" => Some(AssignmentStatus::Completed),
            "cancelled" => Some(AssignmentStatus::Cancelled),
            _ => None,
        }
    }

    /// Estados terminales: al entrar en ellos se limpian las referencias
    /// current_* del bus y del conductor.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Completed | AssignmentStatus::Cancelled)
    }
}

/// Assignment principal - mapea exactamente a la tabla assignments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub conductor_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Qué hacer con las referencias current_* del bus y del conductor al
/// escribir una asignación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefMaintenance {
    pub clear_old: bool,
    pub set_new: bool,
}

/// Decide el mantenimiento de referencias en una transición de estado
/// (`old` es `None` al crear): las referencias de la versión previa se
/// limpian si estaba activa y se escriben las nuevas si el estado
/// resultante es activo. Marcar una asignación activa como completed o
/// cancelled deja al bus y al conductor sin referencias current_*.
pub fn current_ref_maintenance(
    old: Option<AssignmentStatus>,
    new: AssignmentStatus,
) -> RefMaintenance {
    RefMaintenance {
        clear_old: old == Some(AssignmentStatus::Active),
        set_new: new == AssignmentStatus::Active,
    }
}

/// Test de solapamiento de intervalos con bordes inclusivos en ambos
/// extremos: dos ventanas que se tocan en un instante cuentan como
/// conflicto. Equivale a `NOT (a_end < b_start OR a_start > b_end)`. Es la
/// misma regla que aplica la query de solape del repositorio de
/// asignaciones, que la usa como decisión final sobre las filas candidatas.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_overlapping_windows_conflict() {
        // 08:00-16:00 contra 15:00-20:00: solapan entre 15:00 y 16:00
        assert!(intervals_overlap(ts(15), ts(20), ts(8), ts(16)));
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        // Bordes inclusivos: 16:00-20:00 toca el final de 08:00-16:00
        assert!(intervals_overlap(ts(16), ts(20), ts(8), ts(16)));
        assert!(intervals_overlap(ts(8), ts(16), ts(16), ts(20)));
    }

    #[test]
    fn test_disjoint_windows_do_not_conflict() {
        assert!(!intervals_overlap(ts(17), ts(20), ts(8), ts(16)));
        assert!(!intervals_overlap(ts(1), ts(7), ts(8), ts(16)));
    }

    #[test]
    fn test_contained_window_conflicts() {
        assert!(intervals_overlap(ts(10), ts(12), ts(8), ts(16)));
        assert!(intervals_overlap(ts(8), ts(16), ts(10), ts(12)));
    }

    #[test]
    fn test_terminal_states() {
        assert!(AssignmentStatus::Completed.is_terminal());
        assert!(AssignmentStatus::Cancelled.is_terminal());
        assert!(!AssignmentStatus::Active.is_terminal());
        assert!(!AssignmentStatus::Scheduled.is_terminal());
    }

    #[test]
    fn test_completing_active_assignment_clears_refs() {
        let refs = current_ref_maintenance(
            Some(AssignmentStatus::Active),
            AssignmentStatus::Completed,
        );
        assert!(refs.clear_old);
        assert!(!refs.set_new);
    }

    #[test]
    fn test_ref_maintenance_table() {
        use AssignmentStatus::*;

        // (estado previo, estado nuevo) -> (limpiar refs viejas, escribir nuevas)
        let cases = [
            (Some(Active), Cancelled, true, false),
            (Some(Active), Active, true, true),
            (Some(Scheduled), Active, false, true),
            (Some(Scheduled), Completed, false, false),
            (None, Active, false, true),
            (None, Scheduled, false, false),
        ];

        for (old, new, clear_old, set_new) in cases {
            let refs = current_ref_maintenance(old, new);
            assert_eq!(refs.clear_old, clear_old, "{:?} -> {:?}", old, new);
            assert_eq!(refs.set_new, set_new, "{:?} -> {:?}", old, new);
        }
    }
}
