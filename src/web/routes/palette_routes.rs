use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{DbErr, SqlErr};
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::{entities::palette, services::palette_service};
use crate::web::error::require_rows_affected;
use crate::web::extract::{JsonBody, parse_json_body};
use crate::web::models::{MessageResponse, PalettePayload};
use crate::web::{AppError, AppState};

/// Classifies a failed palette write. `project_id` is the id the write tried
/// to reference, if it set one.
fn palette_write_error(db_err: DbErr, palette_name: Option<&str>, project_id: Option<i32>) -> AppError {
    match db_err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => match palette_name {
            Some(name) => AppError::Conflict(format!("A palette named {name} already exists.")),
            None => AppError::from(db_err),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => match project_id {
            Some(id) => AppError::Validation(format!("No existing project with id {id}")),
            None => AppError::from(db_err),
        },
        _ => AppError::from(db_err),
    }
}

// --- Route Handlers ---

async fn get_palettes_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<palette::Model>>, AppError> {
    let palettes = palette_service::find_all(&app_state.db_pool).await?;
    Ok(Json(palettes))
}

async fn get_palette_handler(
    State(app_state): State<Arc<AppState>>,
    Path(palette_name): Path<String>,
) -> Result<Json<palette::Model>, AppError> {
    palette_service::find_by_name(&app_state.db_pool, &palette_name)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("Could not find palette with name {palette_name}"))
        })
}

async fn create_palette_handler(
    State(app_state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<PalettePayload>,
) -> Result<(StatusCode, Json<palette::Model>), AppError> {
    let new_palette = payload.into_new_palette().inspect_err(|e| {
        warn!(error = %e, "Rejected palette creation.");
    })?;
    let palette_name = new_palette.palette_name.clone();
    let project_id = new_palette.project_id;

    let palette = palette_service::insert(&app_state.db_pool, new_palette)
        .await
        .map_err(|db_err| palette_write_error(db_err, Some(&palette_name), Some(project_id)))?;

    info!(
        palette_id = palette.id,
        palette_name = %palette.palette_name,
        project_id = palette.project_id,
        "Palette created."
    );
    Ok((StatusCode::CREATED, Json(palette)))
}

async fn update_palette_handler(
    State(app_state): State<Arc<AppState>>,
    Path(palette_name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if palette_service::find_by_name(&app_state.db_pool, &palette_name)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "No existing palette with name of {palette_name}"
        )));
    }

    let changes = parse_json_body::<PalettePayload>(&body)?.into_changes()?;
    let new_name = changes.palette_name.clone();
    let project_id = changes.project_id;

    let rows_affected = palette_service::update_by_name(&app_state.db_pool, &palette_name, changes)
        .await
        .map_err(|db_err| palette_write_error(db_err, new_name.as_deref(), project_id))?;
    require_rows_affected(rows_affected, || {
        format!("No existing palette with name of {palette_name}")
    })?;

    info!(palette_name = %palette_name, "Palette updated.");
    Ok((StatusCode::ACCEPTED, Json(MessageResponse::new("Color updated"))))
}

async fn delete_palette_handler(
    State(app_state): State<Arc<AppState>>,
    Path(palette_name): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let rows_affected = palette_service::delete_by_name(&app_state.db_pool, &palette_name).await?;

    info!(palette_name = %palette_name, rows_affected, "Palette delete requested.");
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!(
            "Successfully deleted palette {palette_name}"
        ))),
    ))
}

// --- Router ---

pub fn create_palettes_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_palettes_handler).post(create_palette_handler))
        .route(
            "/{palette_name}",
            get(get_palette_handler)
                .patch(update_palette_handler)
                .delete(delete_palette_handler),
        )
}
