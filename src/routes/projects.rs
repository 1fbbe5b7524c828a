//! Project CRUD and palette routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::ComponentDefinition;
use crate::element::{Component, Section};
use crate::loader::ComponentModule;
use crate::services::project::{self, ProjectMeta, ProjectRecord};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProjectBody {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// `GET /api/project` — list projects.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectMeta>>, StatusCode> {
    let rows = project::list_projects(&state.pool)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/project` — create an empty project.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<Json<ProjectRecord>, StatusCode> {
    if body.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let record = project::create_project(&state.pool, body.name.trim())
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(record))
}

/// `GET /api/project/:id` — full project payload.
pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRecord>, StatusCode> {
    let record = project::load_project(&state.pool, id)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(record))
}

/// `PUT /api/project/:id` — upsert name and layout.
pub async fn save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SaveProjectBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let record = ProjectRecord {
        id,
        name: body.name,
        sections: body.sections,
        components: body.components,
    };
    project::save_project(&state.pool, &record)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /api/project/:id` — delete a project.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    project::delete_project(&state.pool, id)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/palette` — the registry's component definitions.
pub async fn palette(State(state): State<AppState>) -> Json<Vec<ComponentDefinition>> {
    Json(state.registry.definitions().to_vec())
}

/// `GET /api/module/:path` — a renderable module manifest. Unknown paths
/// resolve to the placeholder module rather than an error.
pub async fn module(State(state): State<AppState>, Path(path): Path<String>) -> Json<ComponentModule> {
    Json(state.loaders.resolve(&path).await)
}

pub(crate) fn project_error_to_status(err: project::ProjectError) -> StatusCode {
    match err {
        project::ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
        project::ProjectError::Database(_) | project::ProjectError::Corrupt(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
