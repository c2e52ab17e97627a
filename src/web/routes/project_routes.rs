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

use crate::db::{entities::project, services::project_service};
use crate::web::error::{require_rows_affected, unique_violation_as};
use crate::web::extract::{JsonBody, parse_json_body};
use crate::web::models::{MessageResponse, ProjectPayload};
use crate::web::{AppError, AppState};

// --- Route Handlers ---

async fn get_projects_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<project::Model>>, AppError> {
    let projects = project_service::find_all(&app_state.db_pool).await?;
    Ok(Json(projects))
}

async fn get_project_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<project::Model>, AppError> {
    project_service::find_by_name(&app_state.db_pool, &name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Could not find project named {name}!")))
}

async fn create_project_handler(
    State(app_state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<ProjectPayload>,
) -> Result<(StatusCode, Json<project::Model>), AppError> {
    let name = payload.into_name().inspect_err(|e| {
        warn!(error = %e, "Rejected project creation.");
    })?;

    let project = project_service::insert(&app_state.db_pool, name.clone())
        .await
        .map_err(unique_violation_as(|| {
            format!("A project named {name} already exists.")
        }))?;

    info!(project_id = project.id, name = %project.name, "Project created.");
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if project_service::find_by_name(&app_state.db_pool, &name)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "No existing project with name of {name}"
        )));
    }

    let new_name = parse_json_body::<ProjectPayload>(&body)?.into_name()?;
    let rows_affected = project_service::update_by_name(&app_state.db_pool, &name, new_name.clone())
        .await
        .map_err(unique_violation_as(|| {
            format!("A project named {new_name} already exists.")
        }))?;
    require_rows_affected(rows_affected, || {
        format!("No existing project with name of {name}")
    })?;

    info!(old_name = %name, new_name = %new_name, "Project renamed.");
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!(
            "Project name changed to {new_name}"
        ))),
    ))
}

async fn delete_project_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let rows_affected = project_service::delete_by_name(&app_state.db_pool, &name)
        .await
        .map_err(|db_err: DbErr| match db_err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::Conflict(format!(
                "Cannot delete {name} while palettes still belong to it."
            )),
            _ => AppError::from(db_err),
        })?;

    info!(name = %name, rows_affected, "Project delete requested.");
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("Successfully deleted {name}"))),
    ))
}

// --- Router ---

pub fn create_projects_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_projects_handler).post(create_project_handler))
        .route(
            "/{name}",
            get(get_project_handler)
                .patch(update_project_handler)
                .delete(delete_project_handler),
        )
}

#[cfg(test)]
mod tests {
    use crate::db::services::project_service;
    use crate::db::test_support::SEED_PROJECT_NAME;
    use crate::web::test_client::{TestApp, encode_path};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_all_projects() {
        let app = TestApp::seeded().await;
        let (status, body) = app.get("/api/v1/projects").await;

        assert_eq!(status, StatusCode::OK);
        let projects = body.as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["name"], SEED_PROJECT_NAME);
        assert_eq!(projects[0]["id"], 1);
        assert!(projects[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_get_project_by_name() {
        let app = TestApp::seeded().await;
        let (status, body) = app
            .get(&format!("/api/v1/projects/{}", encode_path(SEED_PROJECT_NAME)))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], SEED_PROJECT_NAME);
    }

    #[tokio::test]
    async fn test_get_missing_project_is_404() {
        let app = TestApp::seeded().await;
        let (status, text) = app.get_text("/api/v1/projects/invalid%20project").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            text,
            json!({ "error": "Could not find project named invalid project!" }).to_string()
        );
    }

    #[tokio::test]
    async fn test_create_project() {
        let app = TestApp::seeded().await;
        let (status, body) = app
            .send("POST", "/api/v1/projects", Some(json!({ "name": "Cool new project" })))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Cool new project");
        let stored = project_service::find_by_name(&app.db, "Cool new project")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body["id"], stored.id);
    }

    #[tokio::test]
    async fn test_create_project_without_name_is_422() {
        let app = TestApp::seeded().await;
        let (status, body) = app
            .send("POST", "/api/v1/projects", Some(json!({ "color": "red" })))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "error": "Expected format { name: <string> }, missing name!" })
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_project_is_409() {
        let app = TestApp::seeded().await;
        let (status, body) = app
            .send("POST", "/api/v1/projects", Some(json!({ "name": SEED_PROJECT_NAME })))
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains(SEED_PROJECT_NAME));
    }

    #[tokio::test]
    async fn test_rename_project() {
        let app = TestApp::seeded().await;
        let path = format!("/api/v1/projects/{}", encode_path(SEED_PROJECT_NAME));
        let (status, body) = app.send("PATCH", &path, Some(json!({ "name": "hi" }))).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["message"], "Project name changed to hi");

        let (status, _) = app.get(&path).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = app.get("/api/v1/projects/hi").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "hi");
    }

    #[tokio::test]
    async fn test_patch_missing_project_without_body_is_404() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send("PATCH", "/api/v1/projects/invalid", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No existing project with name of invalid");
    }

    #[tokio::test]
    async fn test_patch_existing_project_without_name_is_422() {
        let app = TestApp::seeded().await;
        let path = format!("/api/v1/projects/{}", encode_path(SEED_PROJECT_NAME));
        let (status, body) = app.send("PATCH", &path, Some(json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Expected format { name: <string> }, missing name!");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let app = TestApp::seeded().await;
        app.send("POST", "/api/v1/projects", Some(json!({ "name": "Cool new project" })))
            .await;

        let (status, body) = app
            .send("DELETE", "/api/v1/projects/Cool%20new%20project", None)
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, json!({ "message": "Successfully deleted Cool new project" }));
        assert!(
            project_service::find_by_name(&app.db, "Cool new project")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_project_still_acknowledges() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send("DELETE", "/api/v1/projects/nothing", None).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["message"], "Successfully deleted nothing");
    }

    #[tokio::test]
    async fn test_delete_project_with_palettes_is_409() {
        let app = TestApp::seeded().await;
        let path = format!("/api/v1/projects/{}", encode_path(SEED_PROJECT_NAME));
        let (status, _) = app.send("DELETE", &path, None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(
            project_service::find_by_name(&app.db, SEED_PROJECT_NAME)
                .await
                .unwrap()
                .is_some()
        );
    }
}
