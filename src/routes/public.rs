//! Unauthenticated directory of approved employers and vacancies.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn list_public_employers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let employers = state.profile_service.public_employers().await?;
    Ok(Json(employers))
}

#[axum::debug_handler]
pub async fn get_public_employer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let employer = state.profile_service.public_employer(id).await?;
    Ok(Json(employer))
}

#[axum::debug_handler]
pub async fn list_public_vacancies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.public_list().await?;
    Ok(Json(vacancies))
}

#[axum::debug_handler]
pub async fn get_public_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.public_get(id).await?;
    Ok(Json(vacancy))
}
