use serde::{Deserialize, Serialize};

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::services::vehicle_validation::ValidationError;

// Datos de un vehículo nuevo (un item de creación)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub license_plate: String,
    pub status: Option<VehicleStatus>,
}

// Request de creación: un vehículo suelto o un lote.
// El shape `{"vehicles": [...]}` selecciona la variante Batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateVehicleRequest {
    Batch(BatchCreateRequest),
    Single(NewVehicle),
}

// Request para crear un lote de vehículos
#[derive(Debug, Deserialize)]
pub struct BatchCreateRequest {
    pub vehicles: Vec<NewVehicle>,
}

// Request para actualizar un vehículo (parcial: matrícula y/o estado)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,
    pub status: Option<VehicleStatus>,
}

// Parámetros de listado: filtros + orden
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

// Response genérica de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

// Resultado por item dentro de un lote, con su índice de entrada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

// Response agregada de una creación por lotes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    pub success: bool,
    pub results: Vec<BatchItemResult>,
    pub success_count: usize,
    pub failure_count: usize,
}
