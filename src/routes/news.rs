//! Public news feed and staff management of posts and tags.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::news_dto::{NewsPostPayload, NewsQuery, NewsTagPayload},
    error::Result,
    models::user::Actor,
    AppState,
};

#[axum::debug_handler]
pub async fn list_public_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse> {
    let page = state.news_service.public_list(query).await?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_public_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = state.news_service.public_get(id).await?;
    Ok(Json(post))
}

#[axum::debug_handler]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse> {
    let page = state.news_service.list_posts(query).await?;
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewsPostPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let post = state.news_service.create_post(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = state.news_service.get_post(id).await?;
    Ok(Json(post))
}

#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsPostPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let post = state.news_service.update_post(&actor, id, payload).await?;
    Ok(Json(post))
}

#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.news_service.delete_post(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tags = state.news_service.list_tags().await?;
    Ok(Json(tags))
}

#[axum::debug_handler]
pub async fn create_tag(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewsTagPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let tag = state.news_service.create_tag(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[axum::debug_handler]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let tag = state.news_service.get_tag(id).await?;
    Ok(Json(tag))
}

#[axum::debug_handler]
pub async fn update_tag(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsTagPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let tag = state.news_service.update_tag(&actor, id, payload).await?;
    Ok(Json(tag))
}

#[axum::debug_handler]
pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.news_service.delete_tag(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
