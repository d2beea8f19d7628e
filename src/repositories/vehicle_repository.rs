//! Repositorio de vehículos
//!
//! Este módulo abstrae el almacenamiento de la flota. El contrato es de
//! colección completa: `load` trae todos los registros y `save` reescribe
//! el conjunto entero en una sola operación.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

/// Contrato del almacén de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Cargar la flota completa. Un store ilegible o inexistente equivale
    /// a una flota vacía; este método nunca falla.
    async fn load(&self) -> Vec<Vehicle>;

    /// Persistir la flota completa en una sola escritura atómica.
    async fn save(&self, vehicles: &[Vehicle]) -> AppResult<()>;

    /// Generar `count` ids secuenciales estrictamente mayores que el máximo
    /// id numérico presente. Los ids malformados cuentan como 0.
    fn next_ids(&self, existing: &[Vehicle], count: usize) -> Vec<String> {
        let max_id = existing
            .iter()
            .map(|v| v.id.parse::<u64>().unwrap_or(0))
            .max()
            .unwrap_or(0);

        (1..=count as u64)
            .map(|offset| (max_id + offset).to_string())
            .collect()
    }
}

/// Store respaldado por un archivo JSON en disco
///
/// El archivo es un array de vehículos pretty-printed, compatible con
/// edición manual durante desarrollo.
pub struct JsonVehicleStore {
    path: PathBuf,
}

impl JsonVehicleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl VehicleStore for JsonVehicleStore {
    async fn load(&self) -> Vec<Vehicle> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Error reading vehicles file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(vehicles) => vehicles,
            Err(e) => {
                warn!("Error parsing vehicles file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn save(&self, vehicles: &[Vehicle]) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(vehicles)
            .map_err(|e| AppError::Persistence(format!("Error serializing vehicles: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Persistence(format!("Error creating data directory: {}", e))
                })?;
            }
        }

        // Escritura en dos pasos para no dejar nunca el archivo a medias
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .await
            .map_err(|e| AppError::Persistence(format!("Error writing vehicles file: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| AppError::Persistence(format!("Error writing vehicles file: {}", e)))?;

        Ok(())
    }
}

/// Store en memoria para tests
///
/// Sustituye al store JSON en los tests de integración; `failing()` produce
/// un store que rechaza todas las escrituras para ejercitar la ruta de
/// error de persistencia.
pub struct MemoryVehicleStore {
    vehicles: RwLock<Vec<Vehicle>>,
    fail_saves: bool,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::with_vehicles(Vec::new())
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: RwLock::new(vehicles),
            fail_saves: false,
        }
    }

    /// Store que rechaza todas las escrituras
    pub fn failing() -> Self {
        Self {
            vehicles: RwLock::new(Vec::new()),
            fail_saves: true,
        }
    }

    /// Copia del contenido actual, para asserts en tests
    pub async fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }
}

impl Default for MemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn load(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }

    async fn save(&self, vehicles: &[Vehicle]) -> AppResult<()> {
        if self.fail_saves {
            return Err(AppError::Persistence("Failed to save vehicles".to_string()));
        }

        *self.vehicles.write().await = vehicles.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;
    use chrono::{TimeZone, Utc};

    fn vehicle(id: &str, plate: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            license_plate: plate.to_string(),
            status: VehicleStatus::Available,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_next_ids_are_sequential_after_max() {
        let store = MemoryVehicleStore::new();
        let existing = vec![vehicle("3", "AAA-001"), vehicle("7", "AAA-002")];

        assert_eq!(store.next_ids(&existing, 3), vec!["8", "9", "10"]);
    }

    #[test]
    fn test_next_ids_ignores_malformed_ids() {
        let store = MemoryVehicleStore::new();
        let existing = vec![vehicle("abc", "AAA-001"), vehicle("2", "AAA-002")];

        assert_eq!(store.next_ids(&existing, 1), vec!["3"]);
    }

    #[test]
    fn test_next_ids_on_empty_fleet_start_at_one() {
        let store = MemoryVehicleStore::new();
        assert_eq!(store.next_ids(&[], 2), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_empty_fleet() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVehicleStore::new(dir.path().join("vehicles.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVehicleStore::new(dir.path().join("data").join("vehicles.json"));

        let fleet = vec![vehicle("1", "ABC-123"), vehicle("2", "XYZ-789")];
        store.save(&fleet).await.unwrap();

        assert_eq!(store.load().await, fleet);
    }

    #[tokio::test]
    async fn test_json_store_corrupt_file_is_empty_fleet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vehicles.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonVehicleStore::new(path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_memory_store_rejects_saves() {
        let store = MemoryVehicleStore::failing();
        let err = store.save(&[vehicle("1", "ABC-123")]).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
