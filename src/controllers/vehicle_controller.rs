//! Controller de vehículos
//!
//! Orquesta cada operación como load → validar → mutar → save sobre el
//! store inyectado. Toda la lógica de reglas vive en los services; aquí
//! solo se coordina el ciclo read-modify-write.

use std::sync::Arc;

use chrono::Utc;

use crate::dto::vehicle_dto::{
    BatchCreateRequest, BatchCreateResponse, BatchItemResult, NewVehicle, UpdateVehicleRequest,
    VehicleQuery,
};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleStore;
use crate::services::vehicle_query;
use crate::services::vehicle_validation::{self, ValidationError};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Listar la flota aplicando filtros y orden
    pub async fn list(&self, query: VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.store.load().await;
        Ok(vehicle_query::apply_query(&vehicles, &query))
    }

    /// Crear un vehículo suelto
    pub async fn create(&self, request: NewVehicle) -> AppResult<Vehicle> {
        let status = request.status.unwrap_or(VehicleStatus::Available);
        let mut vehicles = self.store.load().await;

        vehicle_validation::validate_create_vehicle(&request.license_plate, status, &vehicles)
            .map_err(AppError::Validation)?;

        let id = self
            .store
            .next_ids(&vehicles, 1)
            .pop()
            .ok_or_else(|| AppError::Internal("id generator returned no ids".to_string()))?;

        let vehicle = Vehicle {
            id,
            license_plate: request.license_plate.trim().to_string(),
            status,
            created_at: Utc::now(),
        };

        vehicles.push(vehicle.clone());
        self.store.save(&vehicles).await?;

        Ok(vehicle)
    }

    /// Crear un lote de vehículos con fallos parciales por item
    ///
    /// Cada item se acepta o rechaza por separado; los aceptados reciben
    /// ids secuenciales en su orden de entrada y se persisten todos en una
    /// sola escritura. Un item rechazado nunca aborta a sus hermanos.
    pub async fn create_batch(&self, request: BatchCreateRequest) -> AppResult<BatchCreateResponse> {
        if request.vehicles.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let mut vehicles = self.store.load().await;
        let outcomes = vehicle_validation::validate_create_batch(&request.vehicles, &vehicles);

        let accepted_count = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let mut ids = self.store.next_ids(&vehicles, accepted_count).into_iter();

        let mut results = Vec::with_capacity(request.vehicles.len());
        let mut accepted = Vec::with_capacity(accepted_count);

        for (index, (item, outcome)) in request.vehicles.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(()) => {
                    let id = ids
                        .next()
                        .ok_or_else(|| AppError::Internal("id generator ran dry".to_string()))?;

                    let vehicle = Vehicle {
                        id,
                        license_plate: item.license_plate.trim().to_string(),
                        status: item.status.unwrap_or(VehicleStatus::Available),
                        created_at: Utc::now(),
                    };

                    accepted.push(vehicle.clone());
                    results.push(BatchItemResult {
                        index,
                        success: true,
                        vehicle: Some(vehicle),
                        error: None,
                    });
                }
                Err(error) => {
                    results.push(BatchItemResult {
                        index,
                        success: false,
                        vehicle: None,
                        error: Some(error),
                    });
                }
            }
        }

        // Solo se toca el store si al menos un item fue aceptado
        if !accepted.is_empty() {
            vehicles.extend(accepted);
            self.store.save(&vehicles).await?;
        }

        let success_count = accepted_count;
        let failure_count = results.len() - success_count;

        Ok(BatchCreateResponse {
            success: success_count > 0,
            results,
            success_count,
            failure_count,
        })
    }

    /// Actualizar matrícula y/o estado de un vehículo existente
    pub async fn update(&self, id: &str, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let mut vehicles = self.store.load().await;

        let position = vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let current = vehicles[position].clone();

        vehicle_validation::validate_update_vehicle(
            id,
            &current,
            request.license_plate.as_deref(),
            request.status,
            &vehicles,
        )
        .map_err(AppError::Validation)?;

        let vehicle = &mut vehicles[position];
        if let Some(license_plate) = request.license_plate {
            vehicle.license_plate = license_plate.trim().to_string();
        }
        if let Some(status) = request.status {
            vehicle.status = status;
        }
        let updated = vehicle.clone();

        self.store.save(&vehicles).await?;

        Ok(updated)
    }

    /// Eliminar un vehículo si su estado lo permite
    pub async fn delete(&self, id: &str) -> AppResult<String> {
        let mut vehicles = self.store.load().await;

        let position = vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        vehicle_validation::can_delete_vehicle(vehicles[position].status)
            .map_err(|msg| AppError::Validation(ValidationError::message_only(msg)))?;

        vehicles.remove(position);
        self.store.save(&vehicles).await?;

        Ok(id.to_string())
    }
}
