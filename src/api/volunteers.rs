//! Volunteer API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{Confirmation, RegisterAck};
use crate::errors::AppError;
use crate::models::{
    AssignVolunteerRequest, CreateVolunteerRequest, UpdateVolunteerRequest, Volunteer,
};
use crate::AppState;

/// GET /api/volunteer - List all volunteers with their relations loaded.
pub async fn list_volunteers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Volunteer>>, AppError> {
    Ok(Json(state.repo.list_volunteers().await?))
}

/// GET /api/volunteer/:id - Get a single volunteer.
pub async fn get_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Volunteer>, AppError> {
    match state.repo.get_volunteer(&id).await? {
        Some(volunteer) => Ok(Json(volunteer)),
        None => Err(AppError::NotFound(format!(
            "Volunteer {} does not exist.",
            id
        ))),
    }
}

/// POST /api/volunteer - Register a volunteer (upsert keyed by email).
pub async fn add_volunteer(
    State(state): State<AppState>,
    Json(request): Json<CreateVolunteerRequest>,
) -> Result<Json<RegisterAck>, AppError> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    state.repo.register_volunteer(&request).await?;

    Ok(Json(RegisterAck { success: true }))
}

/// PUT/PATCH /api/volunteer/:id - Edit a volunteer.
pub async fn edit_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVolunteerRequest>,
) -> Result<Json<Confirmation>, AppError> {
    state.repo.update_volunteer(&id, &request).await?;

    Ok(Json(Confirmation {
        result: format!("Volunteer {} has been updated.", id),
    }))
}

/// DELETE /api/volunteer/:id - Remove a volunteer.
pub async fn remove_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Confirmation>, AppError> {
    state.repo.delete_volunteer(&id).await?;

    Ok(Json(Confirmation {
        result: format!("Volunteer {} has been removed.", id),
    }))
}

/// POST /api/volunteer/assign - Assign a volunteer to a project.
///
/// Both entities are looked up before anything is written; a missing
/// volunteer is reported before a missing project, and the association
/// write only happens once both lookups succeed.
pub async fn assign_volunteer(
    State(state): State<AppState>,
    Json(request): Json<AssignVolunteerRequest>,
) -> Result<Json<Confirmation>, AppError> {
    let volunteer = state.repo.get_volunteer(&request.volunteer_id).await?;
    let project = state.repo.get_project(&request.project_id).await?;

    if volunteer.is_none() {
        return Err(AppError::NotFound(format!(
            "Volunteer {} could not be found.",
            request.volunteer_id
        )));
    }
    if project.is_none() {
        return Err(AppError::NotFound(format!(
            "Project {} could not be found.",
            request.project_id
        )));
    }

    state
        .repo
        .assign_project(&request.volunteer_id, &request.project_id)
        .await?;

    Ok(Json(Confirmation {
        result: format!(
            "Volunteer {} has been added to project {}.",
            request.volunteer_id, request.project_id
        ),
    }))
}
