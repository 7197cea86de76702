use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::cv_dto::CvPayload,
    error::Result,
    models::document::{DocumentKind, DocumentRef},
    models::user::Actor,
    AppState,
};

#[axum::debug_handler]
pub async fn list_cvs(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse> {
    let cvs = state.cv_service.list(&actor).await?;
    Ok(Json(cvs))
}

#[axum::debug_handler]
pub async fn create_cv(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CvPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let cv = state.cv_service.create(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(cv)))
}

#[axum::debug_handler]
pub async fn get_cv(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let cv = state.cv_service.get(&actor, id).await?;
    Ok(Json(cv))
}

#[axum::debug_handler]
pub async fn update_cv(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CvPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let cv = state.cv_service.update(&actor, id, payload).await?;
    Ok(Json(cv))
}

#[axum::debug_handler]
pub async fn delete_cv(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .document_service
        .delete(&actor, DocumentRef::new(DocumentKind::Cv, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
