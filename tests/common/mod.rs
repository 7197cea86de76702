#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use recruiting_backend::{
    dto::{
        cv_dto::{CvEducationPayload, CvExperiencePayload, CvPayload},
        document_dto::StatusChangePayload,
        profile_dto::{EmployeeProfilePayload, EmployerProfilePayload},
        vacancy_dto::VacancyPayload,
    },
    engine::PolicyTable,
    models::{
        cv::Cv,
        document::{DocumentKind, DocumentRef},
        user::{Actor, Role},
        vacancy::Vacancy,
    },
    services::notification_service::LogNotifier,
    store::MemoryStore,
    AppState,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn state() -> AppState {
    state_with_policy(PolicyTable::default())
}

pub fn state_with_policy(policy: PolicyTable) -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        policy,
        Arc::new(LogNotifier),
        JWT_SECRET,
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn moderator() -> Actor {
    Actor::new(Uuid::new_v4(), Role::Moderator)
}

pub fn employee_profile(name: &str) -> EmployeeProfilePayload {
    EmployeeProfilePayload {
        name: name.to_string(),
        birthday: date(1990, 4, 12),
        gender: "female".into(),
        email: format!("{}@example.com", Uuid::new_v4()),
        city: "Dushanbe".into(),
        description: String::new(),
        skills: vec!["rust".into(), "sql".into()],
    }
}

pub fn employer_profile(name: &str) -> EmployerProfilePayload {
    EmployerProfilePayload {
        name: name.to_string(),
        established: date(2004, 9, 1),
        email: format!("{}@example.com", Uuid::new_v4()),
        city: "Khujand".into(),
        description: "Logistics".into(),
        welcome_letter: String::new(),
    }
}

pub fn cv_payload(title: &str) -> CvPayload {
    CvPayload {
        title: title.to_string(),
        position: "Backend engineer".into(),
        salary: 2500,
        description: "Services and storage".into(),
        experience: vec![CvExperiencePayload {
            date_from: date(2018, 1, 1),
            date_to: None,
            is_current: true,
            city: "Dushanbe".into(),
            company: "Acme".into(),
            position: "Engineer".into(),
            content: String::new(),
        }],
        education: vec![CvEducationPayload {
            date: date(2017, 6, 30),
            institution: "TNU".into(),
            specialty: "Applied mathematics".into(),
            content: String::new(),
        }],
    }
}

pub fn vacancy_payload(title: &str) -> VacancyPayload {
    VacancyPayload {
        title: title.to_string(),
        city: "Khujand".into(),
        position: "Dispatcher".into(),
        salary: 1800,
        description: String::new(),
    }
}

pub fn status(code: &str) -> StatusChangePayload {
    StatusChangePayload {
        status: code.to_string(),
        info: String::new(),
    }
}

pub fn status_with_info(code: &str, info: &str) -> StatusChangePayload {
    StatusChangePayload {
        status: code.to_string(),
        info: info.to_string(),
    }
}

/// Employee user with a profile.
pub async fn employee(state: &AppState) -> Actor {
    let actor = Actor::new(Uuid::new_v4(), Role::Employee);
    state
        .profile_service
        .create_employee(&actor, employee_profile("Nigora"))
        .await
        .unwrap();
    actor
}

/// Employer user with a (draft) employer profile.
pub async fn employer(state: &AppState) -> Actor {
    let actor = Actor::new(Uuid::new_v4(), Role::Employer);
    state
        .profile_service
        .create_employer(&actor, employer_profile("Acme Logistics"))
        .await
        .unwrap();
    actor
}

/// Submits and approves a document through the regular transitions.
pub async fn publish(state: &AppState, owner: &Actor, reviewer: &Actor, doc: DocumentRef) {
    state
        .document_service
        .change_status(owner, doc, status("pending"))
        .await
        .unwrap();
    state
        .document_service
        .change_status(reviewer, doc, status("approved"))
        .await
        .unwrap();
}

pub async fn approved_cv(state: &AppState, owner: &Actor) -> Cv {
    let cv = state.cv_service.create(owner, cv_payload("Backend CV")).await.unwrap();
    publish(state, owner, &moderator(), DocumentRef::new(DocumentKind::Cv, cv.meta.id)).await;
    state.cv_service.get(owner, cv.meta.id).await.unwrap().item
}

pub async fn approved_vacancy(state: &AppState, owner: &Actor) -> Vacancy {
    let vacancy = state
        .vacancy_service
        .create(owner, vacancy_payload("Night dispatcher"))
        .await
        .unwrap();
    publish(
        state,
        owner,
        &moderator(),
        DocumentRef::new(DocumentKind::Vacancy, vacancy.meta.id),
    )
    .await;
    state.vacancy_service.get(owner, vacancy.meta.id).await.unwrap().item
}
