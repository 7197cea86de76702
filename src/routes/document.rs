//! Handlers shared by every document kind, built per kind.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{post, MethodRouter},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::document_dto::StatusChangePayload,
    error::Result,
    models::document::{DocumentKind, DocumentRef, ListingKind},
    models::user::Actor,
    AppState,
};

/// `POST /{kind}/:id/status`
pub fn status_route(kind: DocumentKind) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>,
              Extension(actor): Extension<Actor>,
              Path(id): Path<Uuid>,
              Json(payload): Json<StatusChangePayload>| async move {
            payload.validate()?;
            let meta = state
                .document_service
                .change_status(&actor, DocumentRef::new(kind, id), payload)
                .await?;
            Result::Ok(Json(meta))
        },
    )
}

/// `POST` and `DELETE /{kind}/:id/favorite`
pub fn favorite_route(kind: ListingKind) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>,
              Extension(actor): Extension<Actor>,
              Path(id): Path<Uuid>| async move {
            let created = state.favorite_service.add(&actor, kind, id).await?;
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            Result::Ok(status)
        },
    )
    .delete(
        move |State(state): State<AppState>,
              Extension(actor): Extension<Actor>,
              Path(id): Path<Uuid>| async move {
            state.favorite_service.remove(&actor, kind, id).await?;
            Result::Ok(StatusCode::NO_CONTENT)
        },
    )
}

#[axum::debug_handler]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse> {
    let kind: ListingKind = kind.parse()?;
    let listing = state.favorite_service.list(&actor, kind).await?;
    Ok(Json(listing))
}
