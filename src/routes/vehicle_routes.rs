use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    ApiResponse, CreateVehicleRequest, UpdateVehicleRequest, VehicleQuery,
};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicles))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let vehicles = controller.list(query).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

// El body decide la variante: un objeto suelto crea un vehículo (201 o 400),
// `{"vehicles": [...]}` procesa un lote (201 todos / 207 mixto / 400 ninguno)
async fn create_vehicles(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(state.store.clone());

    match request {
        CreateVehicleRequest::Single(item) => {
            let vehicle = controller.create(item).await?;
            Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle))).into_response())
        }
        CreateVehicleRequest::Batch(batch) => {
            let response = controller.create_batch(batch).await?;

            let status = if response.failure_count == 0 {
                StatusCode::CREATED
            } else if response.success_count > 0 {
                StatusCode::MULTI_STATUS
            } else {
                StatusCode::BAD_REQUEST
            };

            Ok((status, Json(response)).into_response())
        }
    }
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let vehicle = controller.update(&id, request).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let id = controller.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "id": id }
    })))
}
