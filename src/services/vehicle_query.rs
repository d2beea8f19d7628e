//! Filtrado y ordenación del listado de vehículos
//!
//! El filtro se aplica antes que el orden y todo opera sobre una copia:
//! la colección de origen nunca se muta.

use std::cmp::Ordering;

use crate::dto::vehicle_dto::VehicleQuery;
use crate::models::vehicle::Vehicle;

/// Aplicar filtros y orden de un listado sobre una copia de la flota
pub fn apply_query(vehicles: &[Vehicle], query: &VehicleQuery) -> Vec<Vehicle> {
    let mut result: Vec<Vehicle> = vehicles
        .iter()
        .filter(|v| matches_status(v, query.status.as_deref()))
        .filter(|v| matches_search(v, query.search.as_deref()))
        .cloned()
        .collect();

    let sort_by = query.sort_by.as_deref().unwrap_or("createdAt");
    // Cualquier valor distinto de "asc" ordena descendente
    let descending = query.sort_order.as_deref().unwrap_or("desc") != "asc";

    result.sort_by(|a, b| {
        let cmp = compare_by(a, b, sort_by);
        if descending {
            cmp.reverse()
        } else {
            cmp
        }
    });

    result
}

// Filtro por estado exacto; ausente o el centinela "all" no filtran
fn matches_status(vehicle: &Vehicle, status: Option<&str>) -> bool {
    match status {
        None | Some("all") => true,
        Some(status) => vehicle.status.as_str() == status,
    }
}

// Búsqueda por substring case-insensitive, solo sobre la matrícula
fn matches_search(vehicle: &Vehicle, search: Option<&str>) -> bool {
    match search {
        None | Some("") => true,
        Some(search) => vehicle
            .license_plate
            .to_lowercase()
            .contains(&search.to_lowercase()),
    }
}

fn compare_by(a: &Vehicle, b: &Vehicle, sort_by: &str) -> Ordering {
    match sort_by {
        "id" => numeric_id(&a.id).cmp(&numeric_id(&b.id)),
        "licensePlate" => a.license_plate.cmp(&b.license_plate),
        "status" => a.status.as_str().cmp(b.status.as_str()),
        // createdAt y cualquier clave desconocida
        _ => a.created_at.cmp(&b.created_at),
    }
}

// Ids malformados cuentan como 0 para la comparación numérica
fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;
    use chrono::{TimeZone, Utc};

    fn vehicle(id: &str, plate: &str, status: VehicleStatus, day: u32) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            license_plate: plate.to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
        }
    }

    fn sample_fleet() -> Vec<Vehicle> {
        vec![
            vehicle("1", "ABC-123", VehicleStatus::Available, 1),
            vehicle("2", "XYZ-789", VehicleStatus::InUse, 2),
            vehicle("3", "DEF-456", VehicleStatus::Maintenance, 3),
        ]
    }

    fn query(
        status: Option<&str>,
        search: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> VehicleQuery {
        VehicleQuery {
            status: status.map(String::from),
            search: search.map(String::from),
            sort_by: sort_by.map(String::from),
            sort_order: sort_order.map(String::from),
        }
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_status() {
        let fleet = sample_fleet();
        let result = apply_query(&fleet, &query(Some("InUse"), None, None, None));
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_status_all_is_a_noop_filter() {
        let fleet = sample_fleet();
        let filtered = apply_query(&fleet, &query(Some("all"), None, Some("id"), Some("asc")));
        let unfiltered = apply_query(&fleet, &query(None, None, Some("id"), Some("asc")));
        assert_eq!(filtered, unfiltered);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let fleet = sample_fleet();
        let result = apply_query(&fleet, &query(None, Some("abc"), None, None));
        assert_eq!(ids(&result), vec!["1"]);

        let result = apply_query(&fleet, &query(None, Some("-7"), None, None));
        assert_eq!(ids(&result), vec!["2"]);

        // La búsqueda vacía no filtra
        let result = apply_query(&fleet, &query(None, Some(""), Some("id"), Some("asc")));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_default_sort_is_created_at_desc() {
        let fleet = sample_fleet();
        let result = apply_query(&fleet, &VehicleQuery::default());
        assert_eq!(ids(&result), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_sort_created_at_asc() {
        let fleet = sample_fleet();
        let result = apply_query(&fleet, &query(None, None, Some("createdAt"), Some("asc")));
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_by_id_is_numeric() {
        let fleet = vec![
            vehicle("9", "AAA-001", VehicleStatus::Available, 1),
            vehicle("10", "AAA-002", VehicleStatus::Available, 2),
            vehicle("2", "AAA-003", VehicleStatus::Available, 3),
        ];

        // Lexicográficamente "10" < "2" < "9"; numéricamente 2 < 9 < 10
        let result = apply_query(&fleet, &query(None, None, Some("id"), Some("asc")));
        assert_eq!(ids(&result), vec!["2", "9", "10"]);
    }

    #[test]
    fn test_sort_by_license_plate_is_lexicographic() {
        let fleet = sample_fleet();
        let result = apply_query(&fleet, &query(None, None, Some("licensePlate"), Some("asc")));
        assert_eq!(ids(&result), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_source_is_never_mutated() {
        let fleet = sample_fleet();
        let before = fleet.clone();
        let _ = apply_query(&fleet, &query(Some("InUse"), Some("x"), Some("id"), Some("desc")));
        assert_eq!(fleet, before);
    }
}
