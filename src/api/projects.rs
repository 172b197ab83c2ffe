//! Project API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::Confirmation;
use crate::errors::AppError;
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::AppState;

/// GET /api/project - List all projects.
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.repo.list_projects().await?))
}

/// GET /api/project/:id - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    match state.repo.get_project(&id).await? {
        Some(project) => Ok(Json(project)),
        None => Err(AppError::NotFound(format!(
            "Project {} does not exist.",
            id
        ))),
    }
}

/// POST /api/project - Create a new project.
pub async fn add_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    Ok(Json(state.repo.create_project(&request).await?))
}

/// PUT /api/project/:id - Update a project.
pub async fn edit_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<Confirmation>, AppError> {
    state.repo.update_project(&id, &request).await?;

    Ok(Json(Confirmation {
        result: format!("Project {} has been updated.", id),
    }))
}

/// DELETE /api/project/:id - Delete a project.
pub async fn remove_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Confirmation>, AppError> {
    state.repo.delete_project(&id).await?;

    Ok(Json(Confirmation {
        result: format!("Project {} has been removed.", id),
    }))
}
