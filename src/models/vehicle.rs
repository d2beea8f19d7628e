//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el enum de estados operacionales.
//! Mapea exactamente al formato JSON del store (`camelCase` en el wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado operacional del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InUse => "InUse",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - registro completo tal como se persiste en el store
///
/// El `id` lo asigna el store (entero positivo en forma de string) y
/// `created_at` se fija una sola vez al crear; ninguno de los dos se muta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}
