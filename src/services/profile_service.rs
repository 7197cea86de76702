use std::sync::Arc;

use uuid::Uuid;

use crate::dto::profile_dto::{EmployeeProfilePayload, EmployerProfilePayload};
use crate::engine::{PolicyTable, Scope, Verb};
use crate::error::{Error, Result};
use crate::models::document::{Document, DocumentKind, DocumentMeta, ListingKind, Listed};
use crate::models::employee::Employee;
use crate::models::employer::Employer;
use crate::models::status::DocumentStatus;
use crate::models::user::{Actor, Role};
use crate::services::document_service::edit_conflict;
use crate::services::favorite_service::annotate;
use crate::store::Store;
use crate::utils::{time, validation::ensure_historic_date};

/// Employee and employer profiles. Employee profiles are plain records;
/// employer profiles are moderated documents.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>) -> Self {
        Self { store, policy }
    }

    pub async fn own_employee(&self, actor: &Actor) -> Result<Employee> {
        actor.require_role(Role::Employee)?;
        self.store
            .employee_by_owner(actor.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("employee profile not found".to_string()))
    }

    pub async fn create_employee(&self, actor: &Actor, payload: EmployeeProfilePayload) -> Result<Employee> {
        actor.require_role(Role::Employee)?;
        ensure_historic_date("birthday", payload.birthday, time::today())?;
        if self.store.employee_by_owner(actor.user_id).await?.is_some() {
            return Err(Error::Conflict("employee profile already exists".to_string()));
        }

        let now = time::now();
        let employee = self
            .store
            .insert_employee(Employee {
                id: Uuid::new_v4(),
                owner_id: actor.user_id,
                name: payload.name,
                birthday: payload.birthday,
                gender: payload.gender,
                email: payload.email,
                city: payload.city,
                description: payload.description,
                skills: payload.skills,
                created_at: now,
                updated_at: now,
                updated_by: actor.user_id,
            })
            .await?;

        tracing::info!(employee_id = %employee.id, actor = %actor.user_id, "employee profile created");
        Ok(employee)
    }

    pub async fn update_employee(&self, actor: &Actor, payload: EmployeeProfilePayload) -> Result<Employee> {
        let mut employee = self.own_employee(actor).await?;
        ensure_historic_date("birthday", payload.birthday, time::today())?;

        employee.name = payload.name;
        employee.birthday = payload.birthday;
        employee.gender = payload.gender;
        employee.email = payload.email;
        employee.city = payload.city;
        employee.description = payload.description;
        employee.skills = payload.skills;
        employee.updated_at = time::now();
        employee.updated_by = actor.user_id;

        self.store.update_employee(&employee).await?;
        Ok(employee)
    }

    pub async fn own_employer(&self, actor: &Actor) -> Result<Employer> {
        actor.require_role(Role::Employer)?;
        self.store
            .employer_by_owner(actor.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("employer profile not found".to_string()))
    }

    pub async fn create_employer(&self, actor: &Actor, payload: EmployerProfilePayload) -> Result<Employer> {
        actor.require_role(Role::Employer)?;
        ensure_historic_date("established", payload.established, time::today())?;
        if self.store.employer_by_owner(actor.user_id).await?.is_some() {
            return Err(Error::Conflict("employer profile already exists".to_string()));
        }

        let employer = self
            .store
            .insert_employer(Employer {
                meta: DocumentMeta::new_draft(actor.user_id, time::now()),
                name: payload.name,
                established: payload.established,
                email: payload.email,
                city: payload.city,
                description: payload.description,
                welcome_letter: payload.welcome_letter,
            })
            .await?;

        tracing::info!(
            doc_kind = %DocumentKind::Employer,
            doc_id = %employer.meta.id,
            actor = %actor.user_id,
            "document created"
        );
        Ok(employer)
    }

    pub async fn update_own_employer(&self, actor: &Actor, payload: EmployerProfilePayload) -> Result<Employer> {
        let employer = self.own_employer(actor).await?;
        self.update_employer(actor, employer.meta.id, payload).await
    }

    async fn load_employer(&self, id: Uuid) -> Result<Employer> {
        self.store
            .employer(id)
            .await?
            .ok_or_else(|| Error::NotFound("employer not found".to_string()))
    }

    pub async fn update_employer(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: EmployerProfilePayload,
    ) -> Result<Employer> {
        let mut employer = self.load_employer(id).await?;
        self.policy.authorize(actor, Verb::Write, &employer.subject())?;
        ensure_historic_date("established", payload.established, time::today())?;

        let expected = employer.meta.status;
        employer.name = payload.name;
        employer.established = payload.established;
        employer.email = payload.email;
        employer.city = payload.city;
        employer.description = payload.description;
        employer.welcome_letter = payload.welcome_letter;
        employer.meta.touch(actor.user_id, time::now());

        if !self.store.update_employer(&employer, expected).await? {
            return Err(edit_conflict(employer.doc_ref()));
        }
        Ok(employer)
    }

    pub async fn employer(&self, actor: &Actor, id: Uuid) -> Result<Listed<Employer>> {
        let employer = self.load_employer(id).await?;
        self.policy.authorize(actor, Verb::Read, &employer.subject())?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Employer).await?;
        let is_favorite = favorites.contains(&employer.meta.id);
        Ok(Listed {
            item: employer,
            is_favorite,
        })
    }

    pub async fn list_employers(&self, actor: &Actor) -> Result<Vec<Listed<Employer>>> {
        let scope = self.policy.visible_scope(actor, DocumentKind::Employer);
        let employers = self.store.list_employers(scope).await?;
        let favorites = self.store.favorite_ids(actor.user_id, ListingKind::Employer).await?;
        Ok(annotate(employers, &favorites))
    }

    pub async fn public_employers(&self) -> Result<Vec<Employer>> {
        self.store
            .list_employers(Scope::WithStatus(DocumentStatus::Approved))
            .await
    }

    pub async fn public_employer(&self, id: Uuid) -> Result<Employer> {
        let employer = self.load_employer(id).await?;
        if employer.meta.status != DocumentStatus::Approved {
            return Err(Error::NotFound("employer not found".to_string()));
        }
        Ok(employer)
    }
}
