use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::profile_dto::EmployerProfilePayload,
    error::Result,
    models::document::{DocumentKind, DocumentRef},
    models::user::Actor,
    AppState,
};

#[axum::debug_handler]
pub async fn list_employers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse> {
    let employers = state.profile_service.list_employers(&actor).await?;
    Ok(Json(employers))
}

#[axum::debug_handler]
pub async fn create_employer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<EmployerProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employer = state.profile_service.create_employer(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(employer)))
}

#[axum::debug_handler]
pub async fn get_employer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let employer = state.profile_service.employer(&actor, id).await?;
    Ok(Json(employer))
}

#[axum::debug_handler]
pub async fn update_employer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployerProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employer = state.profile_service.update_employer(&actor, id, payload).await?;
    Ok(Json(employer))
}

#[axum::debug_handler]
pub async fn delete_employer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .document_service
        .delete(&actor, DocumentRef::new(DocumentKind::Employer, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
