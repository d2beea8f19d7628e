//! Reglas de negocio de la flota
//!
//! Este módulo contiene las validaciones puras que gobiernan la creación,
//! actualización y eliminación de vehículos: formato de matrícula, unicidad,
//! transiciones de estado y el límite de mantenimiento de la flota.
//! Ninguna función toca el store; todas operan sobre el snapshot que reciben.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::dto::vehicle_dto::NewVehicle;
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Fracción máxima de la flota que puede estar en mantenimiento a la vez
pub const MAINTENANCE_LIMIT_PERCENTAGE: f64 = 0.05;

lazy_static! {
    // Formato XXX-NNN: 3 letras mayúsculas, guión, 3 dígitos
    static ref LICENSE_PLATE_RE: Regex = Regex::new(r"^[A-Z]{3}-[0-9]{3}$").unwrap();
}

/// Error de validación con el campo que lo disparó
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validar el formato de una matrícula
pub fn validate_license_plate(license_plate: &str) -> Result<(), String> {
    if license_plate.trim().is_empty() {
        return Err("License plate is required".to_string());
    }

    if !LICENSE_PLATE_RE.is_match(license_plate) {
        return Err(
            "License plate must be in format XXX-NNN (3 capital letters, dash, 3 numbers)"
                .to_string(),
        );
    }

    Ok(())
}

/// Verificar que la matrícula no exista ya en la flota
///
/// La comparación es case-insensitive. Con `exclude_id` se ignora el propio
/// vehículo durante una actualización.
pub fn is_license_plate_unique(
    license_plate: &str,
    vehicles: &[Vehicle],
    exclude_id: Option<&str>,
) -> Result<(), String> {
    let plate_lower = license_plate.to_lowercase();
    let duplicate = vehicles
        .iter()
        .any(|v| v.license_plate.to_lowercase() == plate_lower && exclude_id != Some(v.id.as_str()));

    if duplicate {
        return Err("License plate already exists".to_string());
    }

    Ok(())
}

/// Verificar el cupo de mantenimiento de la flota
///
/// El denominador es el tamaño de la flota tal como se recibe: en una
/// creación el vehículo nuevo todavía no cuenta, en una actualización el
/// propio vehículo sí. El conteo de mantenimiento excluye `exclude_id`.
pub fn can_set_to_maintenance(vehicles: &[Vehicle], exclude_id: Option<&str>) -> Result<(), String> {
    let total_vehicles = vehicles.len();
    let maintenance_count = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Maintenance && exclude_id != Some(v.id.as_str()))
        .count();

    let max_maintenance = max_maintenance_for(total_vehicles);

    if maintenance_count >= max_maintenance {
        return Err(maintenance_limit_message(
            maintenance_count,
            total_vehicles,
            max_maintenance,
        ));
    }

    Ok(())
}

/// Cupo de mantenimiento para una flota de `total` vehículos
pub fn max_maintenance_for(total: usize) -> usize {
    (total as f64 * MAINTENANCE_LIMIT_PERCENTAGE).floor() as usize
}

fn maintenance_limit_message(count: usize, total: usize, max: usize) -> String {
    format!(
        "Cannot exceed 5% maintenance limit ({} of {} vehicles already in maintenance, max allowed: {})",
        count, total, max
    )
}

/// Validar una transición de estado
///
/// Quedarse en el mismo estado siempre es válido. Un vehículo en Maintenance
/// solo puede pasar a Available; el resto de transiciones son libres.
pub fn can_transition_status(current: VehicleStatus, new: VehicleStatus) -> Result<(), String> {
    if current == new {
        return Ok(());
    }

    if current == VehicleStatus::Maintenance && new != VehicleStatus::Available {
        return Err("A vehicle in Maintenance can only be set to Available".to_string());
    }

    Ok(())
}

/// Validar que un vehículo se pueda eliminar
///
/// Los vehículos InUse o Maintenance no se pueden eliminar.
pub fn can_delete_vehicle(status: VehicleStatus) -> Result<(), String> {
    match status {
        VehicleStatus::InUse | VehicleStatus::Maintenance => {
            Err(format!("Cannot delete a vehicle that is {}", status))
        }
        VehicleStatus::Available => Ok(()),
    }
}

/// Validación completa para crear un vehículo suelto
///
/// Orden de chequeos: formato, unicidad y, si el estado pedido es
/// Maintenance, el cupo de flota. Se devuelve el primer error.
pub fn validate_create_vehicle(
    license_plate: &str,
    status: VehicleStatus,
    existing: &[Vehicle],
) -> Result<(), ValidationError> {
    validate_license_plate(license_plate)
        .map_err(|msg| ValidationError::new("licensePlate", msg))?;

    is_license_plate_unique(license_plate, existing, None)
        .map_err(|msg| ValidationError::new("licensePlate", msg))?;

    if status == VehicleStatus::Maintenance {
        can_set_to_maintenance(existing, None).map_err(|msg| ValidationError::new("status", msg))?;
    }

    Ok(())
}

/// Validación completa para actualizar un vehículo
///
/// Matrícula y estado se validan de forma independiente; la matrícula va
/// primero si vienen ambos. La unicidad y el cupo excluyen al propio vehículo.
pub fn validate_update_vehicle(
    vehicle_id: &str,
    current: &Vehicle,
    new_license_plate: Option<&str>,
    new_status: Option<VehicleStatus>,
    all_vehicles: &[Vehicle],
) -> Result<(), ValidationError> {
    if let Some(license_plate) = new_license_plate {
        validate_license_plate(license_plate)
            .map_err(|msg| ValidationError::new("licensePlate", msg))?;

        is_license_plate_unique(license_plate, all_vehicles, Some(vehicle_id))
            .map_err(|msg| ValidationError::new("licensePlate", msg))?;
    }

    if let Some(status) = new_status {
        can_transition_status(current.status, status)
            .map_err(|msg| ValidationError::new("status", msg))?;

        if status == VehicleStatus::Maintenance {
            can_set_to_maintenance(all_vehicles, Some(vehicle_id))
                .map_err(|msg| ValidationError::new("status", msg))?;
        }
    }

    Ok(())
}

/// Validación por lotes con estado compartido entre items
///
/// Los duplicados se comprueban contra la flota existente y contra las
/// matrículas ya aceptadas del propio lote (mensajes distintos). El cupo de
/// mantenimiento se calcula sobre la flota resultante (existentes + lote
/// completo) y se consume item a item en orden de entrada. Un item inválido
/// nunca corta el lote: se registra su error y se sigue con el siguiente.
pub fn validate_create_batch(
    items: &[NewVehicle],
    existing: &[Vehicle],
) -> Vec<Result<(), ValidationError>> {
    let mut results = Vec::with_capacity(items.len());

    let existing_plates: HashSet<String> = existing
        .iter()
        .map(|v| v.license_plate.to_lowercase())
        .collect();
    let mut batch_plates: HashSet<String> = HashSet::new();

    let mut maintenance_count = existing
        .iter()
        .filter(|v| v.status == VehicleStatus::Maintenance)
        .count();

    let total_vehicles = existing.len() + items.len();
    let max_maintenance = max_maintenance_for(total_vehicles);

    for item in items {
        let status = item.status.unwrap_or(VehicleStatus::Available);
        let license_plate = item.license_plate.trim();

        if let Err(msg) = validate_license_plate(license_plate) {
            results.push(Err(ValidationError::new("licensePlate", msg)));
            continue;
        }

        let plate_lower = license_plate.to_lowercase();

        if existing_plates.contains(&plate_lower) {
            results.push(Err(ValidationError::new(
                "licensePlate",
                format!("License plate {} already exists", license_plate),
            )));
            continue;
        }

        if batch_plates.contains(&plate_lower) {
            results.push(Err(ValidationError::new(
                "licensePlate",
                format!("Duplicate license plate {} in batch", license_plate),
            )));
            continue;
        }

        if status == VehicleStatus::Maintenance {
            if maintenance_count >= max_maintenance {
                results.push(Err(ValidationError::new(
                    "status",
                    maintenance_limit_message(maintenance_count, total_vehicles, max_maintenance),
                )));
                continue;
            }
            maintenance_count += 1;
        }

        batch_plates.insert(plate_lower);
        results.push(Ok(()));
    }

    results
}
