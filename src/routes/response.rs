//! `/cv-responses` and `/vacancy-responses` share one handler set,
//! instantiated per [`ResponseKind`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{document_dto::MessagePayload, response_dto::ResponsePayload},
    error::Result,
    models::document::{DocumentRef, ResponseKind},
    models::user::Actor,
    routes::document::status_route,
    AppState,
};

pub fn routes(kind: ResponseKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(
                move |State(state): State<AppState>, Extension(actor): Extension<Actor>| async move {
                    let responses = state.response_service.list(&actor, kind).await?;
                    Result::Ok(Json(responses))
                },
            )
            .post(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Json(payload): Json<ResponsePayload>| async move {
                    payload.validate()?;
                    let response = state.response_service.create(&actor, kind, payload).await?;
                    Result::Ok((StatusCode::CREATED, Json(response)))
                },
            ),
        )
        .route(
            "/:id",
            get(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Path(id): Path<Uuid>| async move {
                    let response = state.response_service.get(&actor, kind, id).await?;
                    Result::Ok(Json(response))
                },
            )
            .put(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Path(id): Path<Uuid>,
                      Json(payload): Json<ResponsePayload>| async move {
                    payload.validate()?;
                    let response = state
                        .response_service
                        .update(&actor, kind, id, payload)
                        .await?;
                    Result::Ok(Json(response))
                },
            )
            .delete(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Path(id): Path<Uuid>| async move {
                    state
                        .document_service
                        .delete(&actor, DocumentRef::new(kind, id))
                        .await?;
                    Result::Ok(StatusCode::NO_CONTENT)
                },
            ),
        )
        .route("/:id/status", status_route(kind.into()))
        .route(
            "/:id/messages",
            get(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Path(id): Path<Uuid>| async move {
                    let messages = state.response_service.messages(&actor, kind, id).await?;
                    Result::Ok(Json(messages))
                },
            )
            .post(
                move |State(state): State<AppState>,
                      Extension(actor): Extension<Actor>,
                      Path(id): Path<Uuid>,
                      Json(payload): Json<MessagePayload>| async move {
                    payload.validate()?;
                    let message = state
                        .response_service
                        .append_message(&actor, kind, id, payload)
                        .await?;
                    Result::Ok((StatusCode::CREATED, Json(message)))
                },
            ),
        )
}
