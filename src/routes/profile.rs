use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{EmployeeProfilePayload, EmployerProfilePayload},
    error::Result,
    models::user::Actor,
    AppState,
};

#[axum::debug_handler]
pub async fn get_employee_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse> {
    let employee = state.profile_service.own_employee(&actor).await?;
    Ok(Json(employee))
}

#[axum::debug_handler]
pub async fn create_employee_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<EmployeeProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employee = state.profile_service.create_employee(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[axum::debug_handler]
pub async fn update_employee_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<EmployeeProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employee = state.profile_service.update_employee(&actor, payload).await?;
    Ok(Json(employee))
}

#[axum::debug_handler]
pub async fn get_employer_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse> {
    let employer = state.profile_service.own_employer(&actor).await?;
    Ok(Json(employer))
}

#[axum::debug_handler]
pub async fn update_employer_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<EmployerProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employer = state
        .profile_service
        .update_own_employer(&actor, payload)
        .await?;
    Ok(Json(employer))
}
