//! CV responses and vacancy responses: creation rules, re-pointing, and the
//! message thread each response carries.

use std::sync::Arc;

use uuid::Uuid;

use crate::dto::document_dto::MessagePayload;
use crate::dto::response_dto::ResponsePayload;
use crate::engine::{PolicyTable, Verb};
use crate::error::{Error, Result};
use crate::models::cv::Cv;
use crate::models::document::{Document, DocumentKind, DocumentMeta, ResponseKind};
use crate::models::message::DocumentMessage;
use crate::models::response::ResponseDocument;
use crate::models::status::DocumentStatus;
use crate::models::user::{Actor, Role};
use crate::models::vacancy::Vacancy;
use crate::services::document_service::edit_conflict;
use crate::services::notification_service::{notify_message_posted, Notifier};
use crate::store::Store;
use crate::utils::time;

#[derive(Clone)]
pub struct ResponseService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
    notifier: Arc<dyn Notifier>,
}

fn initiator_role(kind: ResponseKind) -> Role {
    match kind {
        ResponseKind::Cv => Role::Employer,
        ResponseKind::Vacancy => Role::Employee,
    }
}

fn duplicate(kind: ResponseKind) -> Error {
    Error::Conflict(format!(
        "{} for this CV and vacancy already exists",
        DocumentKind::from(kind)
    ))
}

impl ResponseService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            policy,
            notifier,
        }
    }

    async fn load(&self, kind: ResponseKind, id: Uuid) -> Result<ResponseDocument> {
        self.store
            .response(kind, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} not found", DocumentKind::from(kind))))
    }

    /// Checks the linked documents: the initiator's side must be their own and
    /// approved, the other side approved.
    async fn linked_documents(
        &self,
        actor: &Actor,
        kind: ResponseKind,
        cv_id: Uuid,
        vacancy_id: Uuid,
    ) -> Result<(Cv, Vacancy)> {
        let approved = |meta: &DocumentMeta| meta.status == DocumentStatus::Approved;
        let own = |meta: &DocumentMeta| meta.owner_id == actor.user_id;

        let cv = self.store.cv(cv_id).await?;
        let vacancy = self.store.vacancy(vacancy_id).await?;

        match kind {
            ResponseKind::Cv => {
                let cv = cv
                    .filter(|cv| approved(&cv.meta))
                    .ok_or_else(|| Error::validation("cv", "Approved CV required"))?;
                let vacancy = vacancy
                    .filter(|v| approved(&v.meta) && own(&v.meta))
                    .ok_or_else(|| Error::validation("vacancy", "Own approved vacancy required"))?;
                Ok((cv, vacancy))
            }
            ResponseKind::Vacancy => {
                let vacancy = vacancy
                    .filter(|v| approved(&v.meta))
                    .ok_or_else(|| Error::validation("vacancy", "Approved vacancy required"))?;
                let cv = cv
                    .filter(|cv| approved(&cv.meta) && own(&cv.meta))
                    .ok_or_else(|| Error::validation("cv", "Own approved CV required"))?;
                Ok((cv, vacancy))
            }
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        kind: ResponseKind,
        payload: ResponsePayload,
    ) -> Result<ResponseDocument> {
        actor.require_role(initiator_role(kind))?;
        let (cv, vacancy) = self
            .linked_documents(actor, kind, payload.cv_id, payload.vacancy_id)
            .await?;

        if self
            .store
            .response_exists(kind, cv.meta.id, vacancy.meta.id)
            .await?
        {
            return Err(duplicate(kind));
        }

        // The store enforces uniqueness again for concurrent creators.
        let response = self
            .store
            .insert_response(ResponseDocument {
                meta: DocumentMeta::new_draft(actor.user_id, time::now()),
                kind,
                cv_id: cv.meta.id,
                vacancy_id: vacancy.meta.id,
                cv_owner_id: cv.meta.owner_id,
                vacancy_owner_id: vacancy.meta.owner_id,
            })
            .await
            .map_err(|err| match err {
                Error::Conflict(_) => duplicate(kind),
                other => other,
            })?;

        tracing::info!(
            doc_kind = %response.kind(),
            doc_id = %response.meta.id,
            actor = %actor.user_id,
            cv_id = %response.cv_id,
            vacancy_id = %response.vacancy_id,
            "document created"
        );
        Ok(response)
    }

    pub async fn get(&self, actor: &Actor, kind: ResponseKind, id: Uuid) -> Result<ResponseDocument> {
        let response = self.load(kind, id).await?;
        self.policy.authorize(actor, Verb::Read, &response.subject())?;
        Ok(response)
    }

    /// Re-points the response at another `(cv, vacancy)` pair. Moving it to a
    /// different counterpart sends it back to draft.
    pub async fn update(
        &self,
        actor: &Actor,
        kind: ResponseKind,
        id: Uuid,
        payload: ResponsePayload,
    ) -> Result<ResponseDocument> {
        let mut response = self.load(kind, id).await?;
        self.policy.authorize(actor, Verb::Write, &response.subject())?;
        let (cv, vacancy) = self
            .linked_documents(actor, kind, payload.cv_id, payload.vacancy_id)
            .await?;

        let moved = (cv.meta.id, vacancy.meta.id) != (response.cv_id, response.vacancy_id);
        if moved && self.store.response_exists(kind, cv.meta.id, vacancy.meta.id).await? {
            return Err(duplicate(kind));
        }

        let expected = response.meta.status;
        let previous_counterpart = response.counterpart_id();
        response.cv_id = cv.meta.id;
        response.vacancy_id = vacancy.meta.id;
        response.cv_owner_id = cv.meta.owner_id;
        response.vacancy_owner_id = vacancy.meta.owner_id;
        // Approval never carries over to a different counterpart.
        if response.counterpart_id() != previous_counterpart && expected != DocumentStatus::Draft {
            response.meta.status = DocumentStatus::Draft;
            response.meta.status_info.clear();
        }
        response.meta.touch(actor.user_id, time::now());

        let updated = self
            .store
            .update_response(&response, expected)
            .await
            .map_err(|err| match err {
                Error::Conflict(_) => duplicate(kind),
                other => other,
            })?;
        if !updated {
            return Err(edit_conflict(response.doc_ref()));
        }
        if response.meta.status != expected {
            tracing::info!(
                doc_kind = %response.kind(),
                doc_id = %response.meta.id,
                actor = %actor.user_id,
                from = %expected,
                to = %response.meta.status,
                "counterpart changed, response reset"
            );
        }
        Ok(response)
    }

    pub async fn list(&self, actor: &Actor, kind: ResponseKind) -> Result<Vec<ResponseDocument>> {
        let scope = self.policy.visible_scope(actor, kind.into());
        self.store.list_responses(kind, scope).await
    }

    pub async fn append_message(
        &self,
        actor: &Actor,
        kind: ResponseKind,
        id: Uuid,
        payload: MessagePayload,
    ) -> Result<DocumentMessage> {
        let response = self.load(kind, id).await?;
        self.policy.authorize(actor, Verb::Message, &response.subject())?;

        if !response.is_participant(actor.user_id) {
            return Err(Error::Forbidden(
                "only the two parties of a response can post messages".to_string(),
            ));
        }
        if response.meta.status != DocumentStatus::Approved {
            return Err(Error::Forbidden(format!(
                "messages require an approved {}, current status is {}",
                response.kind(),
                response.meta.status
            )));
        }

        let message = DocumentMessage {
            id: Uuid::new_v4(),
            doc_kind: response.kind(),
            doc_id: response.meta.id,
            sender_id: actor.user_id,
            content: payload.content,
            created_at: time::now(),
        };
        let message = self
            .store
            .append_message(message, DocumentStatus::Approved)
            .await?
            .ok_or_else(|| {
                Error::Forbidden(format!("{} is no longer approved", response.kind()))
            })?;

        tracing::info!(
            doc_kind = %message.doc_kind,
            doc_id = %message.doc_id,
            actor = %actor.user_id,
            "message posted"
        );
        notify_message_posted(self.notifier.as_ref(), &message).await;
        Ok(message)
    }

    /// Thread of a response, oldest first.
    pub async fn messages(
        &self,
        actor: &Actor,
        kind: ResponseKind,
        id: Uuid,
    ) -> Result<Vec<DocumentMessage>> {
        let response = self.get(actor, kind, id).await?;
        self.store.messages(response.doc_ref()).await
    }
}
