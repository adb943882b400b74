use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{LookupResponse, RemoveResponse, VinPath};
use crate::services::export_service::{EXPORT_FILE_NAME, PARQUET_CONTENT_TYPE};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/lookup/:vin", get(lookup_vehicle))
        .route("/remove/:vin", delete(remove_vehicle))
        .route("/export", post(export_cache))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.store.clone(), state.upstream.clone())
}

async fn lookup_vehicle(
    State(state): State<AppState>,
    Path(request): Path<VinPath>,
) -> Result<Json<LookupResponse>, AppError> {
    let response = controller(&state).lookup(request).await?;
    Ok(Json(response))
}

async fn remove_vehicle(
    State(state): State<AppState>,
    Path(request): Path<VinPath>,
) -> Result<Json<RemoveResponse>, AppError> {
    let response = controller(&state).remove(request).await?;
    Ok(Json(response))
}

async fn export_cache(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = controller(&state).export(&state.config.export_path).await?;
    Ok((
        [
            (header::CONTENT_TYPE, PARQUET_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        bytes,
    ))
}
