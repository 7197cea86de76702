use std::sync::Arc;

use uuid::Uuid;

use crate::dto::vacancy_dto::VacancyPayload;
use crate::engine::{PolicyTable, Scope, Verb};
use crate::error::{Error, Result};
use crate::models::document::{Document, DocumentKind, DocumentMeta, ListingKind, Listed};
use crate::models::status::DocumentStatus;
use crate::models::user::{Actor, Role};
use crate::models::vacancy::Vacancy;
use crate::services::document_service::edit_conflict;
use crate::services::favorite_service::annotate;
use crate::store::Store;
use crate::utils::{time, validation::ensure_non_negative};

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
}

impl VacancyService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>) -> Self {
        Self { store, policy }
    }

    async fn load(&self, id: Uuid) -> Result<Vacancy> {
        self.store
            .vacancy(id)
            .await?
            .ok_or_else(|| Error::NotFound("vacancy not found".to_string()))
    }

    pub async fn create(&self, actor: &Actor, payload: VacancyPayload) -> Result<Vacancy> {
        actor.require_role(Role::Employer)?;
        ensure_non_negative("salary", payload.salary)?;
        let employer = self
            .store
            .employer_by_owner(actor.user_id)
            .await?
            .ok_or_else(|| Error::validation("employer", "No profile exists!"))?;

        let vacancy = self
            .store
            .insert_vacancy(Vacancy {
                meta: DocumentMeta::new_draft(actor.user_id, time::now()),
                employer_id: employer.meta.id,
                title: payload.title,
                city: payload.city,
                position: payload.position,
                salary: payload.salary,
                description: payload.description,
            })
            .await?;

        tracing::info!(
            doc_kind = %DocumentKind::Vacancy,
            doc_id = %vacancy.meta.id,
            actor = %actor.user_id,
            "document created"
        );
        Ok(vacancy)
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> Result<Listed<Vacancy>> {
        let vacancy = self.load(id).await?;
        self.policy.authorize(actor, Verb::Read, &vacancy.subject())?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Vacancy).await?;
        let is_favorite = favorites.contains(&vacancy.meta.id);
        Ok(Listed {
            item: vacancy,
            is_favorite,
        })
    }

    pub async fn update(&self, actor: &Actor, id: Uuid, payload: VacancyPayload) -> Result<Vacancy> {
        let mut vacancy = self.load(id).await?;
        self.policy.authorize(actor, Verb::Write, &vacancy.subject())?;
        ensure_non_negative("salary", payload.salary)?;

        let expected = vacancy.meta.status;
        vacancy.title = payload.title;
        vacancy.city = payload.city;
        vacancy.position = payload.position;
        vacancy.salary = payload.salary;
        vacancy.description = payload.description;
        vacancy.meta.touch(actor.user_id, time::now());

        if !self.store.update_vacancy(&vacancy, expected).await? {
            return Err(edit_conflict(vacancy.doc_ref()));
        }
        Ok(vacancy)
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<Listed<Vacancy>>> {
        let scope = self.policy.visible_scope(actor, DocumentKind::Vacancy);
        let vacancies = self.store.list_vacancies(scope).await?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Vacancy).await?;
        Ok(annotate(vacancies, &favorites))
    }

    pub async fn public_list(&self) -> Result<Vec<Vacancy>> {
        self.store
            .list_vacancies(Scope::WithStatus(DocumentStatus::Approved))
            .await
    }

    pub async fn public_get(&self, id: Uuid) -> Result<Vacancy> {
        let vacancy = self.load(id).await?;
        if vacancy.meta.status != DocumentStatus::Approved {
            return Err(Error::NotFound("vacancy not found".to_string()));
        }
        Ok(vacancy)
    }
}
