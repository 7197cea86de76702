use std::sync::Arc;

use uuid::Uuid;

use crate::dto::cv_dto::CvPayload;
use crate::engine::{PolicyTable, Verb};
use crate::error::{Error, Result};
use crate::models::cv::Cv;
use crate::models::document::{Document, DocumentKind, DocumentMeta, ListingKind, Listed};
use crate::models::user::{Actor, Role};
use crate::services::document_service::edit_conflict;
use crate::services::favorite_service::annotate;
use crate::store::Store;
use crate::utils::{time, validation::ensure_non_negative};

#[derive(Clone)]
pub struct CvService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
}

impl CvService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>) -> Self {
        Self { store, policy }
    }

    async fn load(&self, id: Uuid) -> Result<Cv> {
        self.store
            .cv(id)
            .await?
            .ok_or_else(|| Error::NotFound("cv not found".to_string()))
    }

    pub async fn create(&self, actor: &Actor, payload: CvPayload) -> Result<Cv> {
        actor.require_role(Role::Employee)?;
        ensure_non_negative("salary", payload.salary)?;
        let employee = self
            .store
            .employee_by_owner(actor.user_id)
            .await?
            .ok_or_else(|| Error::validation("employee", "No profile exists!"))?;

        let cv = self
            .store
            .insert_cv(Cv {
                meta: DocumentMeta::new_draft(actor.user_id, time::now()),
                employee_id: employee.id,
                title: payload.title,
                position: payload.position,
                salary: payload.salary,
                description: payload.description,
                experience: payload.experience.into_iter().map(Into::into).collect(),
                education: payload.education.into_iter().map(Into::into).collect(),
            })
            .await?;

        tracing::info!(
            doc_kind = %DocumentKind::Cv,
            doc_id = %cv.meta.id,
            actor = %actor.user_id,
            "document created"
        );
        Ok(cv)
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> Result<Listed<Cv>> {
        let cv = self.load(id).await?;
        self.policy.authorize(actor, Verb::Read, &cv.subject())?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Cv).await?;
        let is_favorite = favorites.contains(&cv.meta.id);
        Ok(Listed { item: cv, is_favorite })
    }

    /// Replaces every field, including both nested collections.
    pub async fn update(&self, actor: &Actor, id: Uuid, payload: CvPayload) -> Result<Cv> {
        let mut cv = self.load(id).await?;
        self.policy.authorize(actor, Verb::Write, &cv.subject())?;
        ensure_non_negative("salary", payload.salary)?;

        let expected = cv.meta.status;
        cv.title = payload.title;
        cv.position = payload.position;
        cv.salary = payload.salary;
        cv.description = payload.description;
        cv.experience = payload.experience.into_iter().map(Into::into).collect();
        cv.education = payload.education.into_iter().map(Into::into).collect();
        cv.meta.touch(actor.user_id, time::now());

        if !self.store.update_cv(&cv, expected).await? {
            return Err(edit_conflict(cv.doc_ref()));
        }
        Ok(cv)
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<Listed<Cv>>> {
        let scope = self.policy.visible_scope(actor, DocumentKind::Cv);
        let cvs = self.store.list_cvs(scope).await?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Cv).await?;
        Ok(annotate(cvs, &favorites))
    }
}
