//! Project service — load, save, and CRUD over persisted page layouts.
//!
//! DESIGN
//! ======
//! A project is one row: name plus the `sections` and `components`
//! collections persisted as JSONB. Save is an upsert, so the debounced
//! autosave path and the HTTP PUT path share one write shape. The
//! [`ProjectRepository`] trait is the seam the editor engine consumes;
//! [`PgProjectRepository`] is the Postgres implementation used by the
//! service binary, and tests substitute in-memory fakes.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::element::{Component, Section};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt project payload: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A full project payload: what `load_project` returns, what `save_project`
/// writes, and what the autosave task snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub sections: Vec<Section>,
    pub components: Vec<Component>,
}

/// Lightweight listing row.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMeta {
    pub id: Uuid,
    pub name: String,
}

/// The persistence seam consumed by the editor engine and the autosave
/// task.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetch a full project payload.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id, `Database` on query failure,
    /// `Corrupt` when the stored layout JSON no longer deserializes.
    async fn load_project(&self, id: Uuid) -> Result<ProjectRecord, ProjectError>;

    /// Upsert a full project payload.
    ///
    /// # Errors
    ///
    /// Returns `Database` on write failure, `Corrupt` when the layout cannot
    /// be serialized.
    async fn save_project(&self, record: &ProjectRecord) -> Result<(), ProjectError>;
}

// =============================================================================
// POSTGRES QUERIES
// =============================================================================

/// Fetch a full project payload from Postgres.
///
/// # Errors
///
/// See [`ProjectRepository::load_project`].
pub async fn load_project(pool: &PgPool, id: Uuid) -> Result<ProjectRecord, ProjectError> {
    let row = sqlx::query_as::<_, (Uuid, String, serde_json::Value, serde_json::Value)>(
        "SELECT id, name, sections, components FROM projects WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some((id, name, sections, components)) = row else {
        return Err(ProjectError::NotFound(id));
    };

    Ok(ProjectRecord {
        id,
        name,
        sections: serde_json::from_value(sections)?,
        components: serde_json::from_value(components)?,
    })
}

/// Upsert a full project payload.
///
/// # Errors
///
/// See [`ProjectRepository::save_project`].
pub async fn save_project(pool: &PgPool, record: &ProjectRecord) -> Result<(), ProjectError> {
    sqlx::query(
        "INSERT INTO projects (id, name, sections, components, updated_at) \
         VALUES ($1, $2, $3, $4, now()) \
         ON CONFLICT (id) DO UPDATE SET \
             name = EXCLUDED.name, sections = EXCLUDED.sections, \
             components = EXCLUDED.components, updated_at = now()",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(serde_json::to_value(&record.sections)?)
    .bind(serde_json::to_value(&record.components)?)
    .execute(pool)
    .await?;

    Ok(())
}

/// Create an empty project and return its payload.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_project(pool: &PgPool, name: &str) -> Result<ProjectRecord, ProjectError> {
    let record = ProjectRecord {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        sections: Vec::new(),
        components: Vec::new(),
    };
    save_project(pool, &record).await?;
    Ok(record)
}

/// List all projects, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_projects(pool: &PgPool) -> Result<Vec<ProjectMeta>, ProjectError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, name FROM projects ORDER BY updated_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| ProjectMeta { id, name }).collect())
}

/// Delete a project by id.
///
/// # Errors
///
/// Returns `NotFound` if no row was deleted.
pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<(), ProjectError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ProjectError::NotFound(id));
    }
    Ok(())
}

// =============================================================================
// REPOSITORY
// =============================================================================

/// Postgres-backed [`ProjectRepository`].
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn load_project(&self, id: Uuid) -> Result<ProjectRecord, ProjectError> {
        load_project(&self.pool, id).await
    }

    async fn save_project(&self, record: &ProjectRecord) -> Result<(), ProjectError> {
        save_project(&self.pool, record).await
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

// =============================================================================
// TEST SUPPORT
// =============================================================================
