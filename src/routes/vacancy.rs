use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::vacancy_dto::VacancyPayload,
    error::Result,
    models::document::{DocumentKind, DocumentRef},
    models::user::Actor,
    AppState,
};

#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.list(&actor).await?;
    Ok(Json(vacancies))
}

#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<VacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancy = state.vacancy_service.create(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get(&actor, id).await?;
    Ok(Json(vacancy))
}

#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancy = state.vacancy_service.update(&actor, id, payload).await?;
    Ok(Json(vacancy))
}

#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .document_service
        .delete(&actor, DocumentRef::new(DocumentKind::Vacancy, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
