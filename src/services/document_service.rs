//! Kind-agnostic operations: status transitions, deletion, and the
//! load-then-authorize step every per-kind service starts with.

use std::sync::Arc;

use crate::dto::document_dto::StatusChangePayload;
use crate::engine::{PolicyTable, Scope, StatusChange, Subject, Verb};
use crate::error::{Error, Result};
use crate::models::document::{DocumentKind, DocumentMeta, DocumentRef};
use crate::models::status::DocumentStatus;
use crate::models::user::Actor;
use crate::services::notification_service::{notify_status_changed, Notifier};
use crate::store::Store;
use crate::utils::time;

#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
    notifier: Arc<dyn Notifier>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            policy,
            notifier,
        }
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    pub fn scope(&self, actor: &Actor, kind: DocumentKind) -> Scope {
        self.policy.visible_scope(actor, kind)
    }

    pub async fn subject(&self, doc: DocumentRef) -> Result<Subject> {
        self.store
            .subject(doc)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} not found", doc.kind)))
    }

    /// Loads the document's policy view and checks `verb` against it.
    pub async fn authorize(&self, actor: &Actor, verb: Verb, doc: DocumentRef) -> Result<Subject> {
        let subject = self.subject(doc).await?;
        self.policy.authorize(actor, verb, &subject)?;
        Ok(subject)
    }

    pub async fn change_status(
        &self,
        actor: &Actor,
        doc: DocumentRef,
        payload: StatusChangePayload,
    ) -> Result<DocumentMeta> {
        let to: DocumentStatus = payload.status.parse()?;
        let subject = self.subject(doc).await?;
        self.policy.authorize_transition(actor, &subject, to)?;

        let change = StatusChange {
            doc,
            from: subject.status,
            to,
            info: payload.info,
            actor: actor.user_id,
            at: time::now(),
        };

        // None means another writer moved the document first.
        let meta = self
            .store
            .transition(&change)
            .await?
            .ok_or(Error::IllegalTransition {
                from: subject.status,
                to,
            })?;

        tracing::info!(
            doc_kind = %doc.kind,
            doc_id = %doc.id,
            actor = %actor.user_id,
            from = %change.from,
            to = %change.to,
            "status transition"
        );
        notify_status_changed(self.notifier.as_ref(), &change).await;

        Ok(meta)
    }

    pub async fn delete(&self, actor: &Actor, doc: DocumentRef) -> Result<()> {
        let subject = self.authorize(actor, Verb::Delete, doc).await?;
        if !self.store.delete_document(doc, subject.status).await? {
            return Err(edit_conflict(doc));
        }
        tracing::info!(doc_kind = %doc.kind, doc_id = %doc.id, actor = %actor.user_id, "document deleted");
        Ok(())
    }
}

/// A compare-and-swap on `(id, status)` found the row changed underneath it.
pub(crate) fn edit_conflict(doc: DocumentRef) -> Error {
    Error::Conflict(format!("{} was modified concurrently", doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::Cv;
    use crate::models::user::Role;
    use crate::services::notification_service::MockNotifier;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn cv(owner: Uuid, status: DocumentStatus) -> Cv {
        let mut meta = DocumentMeta::new_draft(owner, Utc::now());
        meta.status = status;
        Cv {
            meta,
            employee_id: Uuid::new_v4(),
            title: "Backend".into(),
            position: "Engineer".into(),
            salary: 1000,
            description: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
        }
    }

    fn payload(status: &str) -> StatusChangePayload {
        StatusChangePayload {
            status: status.into(),
            info: String::new(),
        }
    }

    #[tokio::test]
    async fn notifies_once_per_committed_transition() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Draft)).await.unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_status_changed()
            .withf(|change| change.to == DocumentStatus::Pending)
            .times(1)
            .returning(|_| Ok(()));

        let service = DocumentService::new(store, Arc::new(PolicyTable::default()), Arc::new(notifier));
        let meta = service
            .change_status(&owner, DocumentRef::new(DocumentKind::Cv, doc.meta.id), payload("p"))
            .await
            .unwrap();
        assert_eq!(meta.status, DocumentStatus::Pending);
        assert_eq!(meta.updated_by, owner.user_id);
    }

    #[tokio::test]
    async fn rejected_transitions_do_not_notify() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Draft)).await.unwrap();

        let mut notifier = MockNotifier::new();
        notifier.expect_status_changed().never();

        let service = DocumentService::new(store, Arc::new(PolicyTable::default()), Arc::new(notifier));
        let doc = DocumentRef::new(DocumentKind::Cv, doc.meta.id);

        let err = service.change_status(&owner, doc, payload("approved")).await.unwrap_err();
        assert!(matches!(err, Error::IllegalTransition { .. }));

        let err = service.change_status(&owner, doc, payload("archived")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_the_transition() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Draft)).await.unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_status_changed()
            .returning(|_| Err(Error::Internal("smtp down".into())));

        let service = DocumentService::new(store, Arc::new(PolicyTable::default()), Arc::new(notifier));
        let meta = service
            .change_status(&owner, DocumentRef::new(DocumentKind::Cv, doc.meta.id), payload("pending"))
            .await
            .unwrap();
        assert_eq!(meta.status, DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn settled_documents_reject_a_second_decision() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Approved)).await.unwrap();

        let service = DocumentService::new(
            store,
            Arc::new(PolicyTable::default()),
            Arc::new(MockNotifier::new()),
        );
        let moderator = Actor::new(Uuid::new_v4(), Role::Moderator);
        let err = service
            .change_status(&moderator, DocumentRef::new(DocumentKind::Cv, doc.meta.id), payload("rejected"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IllegalTransition {
                from: DocumentStatus::Approved,
                to: DocumentStatus::Rejected
            }
        ));
    }

    #[tokio::test]
    async fn consumers_cannot_change_status() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Approved)).await.unwrap();

        let service = DocumentService::new(
            store,
            Arc::new(PolicyTable::default()),
            Arc::new(MockNotifier::new()),
        );
        let employer = Actor::new(Uuid::new_v4(), Role::Employer);
        let err = service
            .change_status(&employer, DocumentRef::new(DocumentKind::Cv, doc.meta.id), payload("draft"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn pending_documents_cannot_be_deleted_by_owner() {
        let store = Arc::new(MemoryStore::new());
        let owner = Actor::new(Uuid::new_v4(), Role::Employee);
        let doc = store.insert_cv(cv(owner.user_id, DocumentStatus::Pending)).await.unwrap();

        let service = DocumentService::new(
            store.clone(),
            Arc::new(PolicyTable::default()),
            Arc::new(MockNotifier::new()),
        );
        let doc = DocumentRef::new(DocumentKind::Cv, doc.meta.id);
        let err = service.delete(&owner, doc).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert!(store.subject(doc).await.unwrap().is_some());
    }
}
