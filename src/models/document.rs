use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::engine::policy::Subject;
use crate::error::Error;
use crate::models::status::DocumentStatus;

/// Closed set of status-bearing document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Employer,
    Cv,
    Vacancy,
    CvResponse,
    VacancyResponse,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Employer,
        DocumentKind::Cv,
        DocumentKind::Vacancy,
        DocumentKind::CvResponse,
        DocumentKind::VacancyResponse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Employer => "employer",
            DocumentKind::Cv => "cv",
            DocumentKind::Vacancy => "vacancy",
            DocumentKind::CvResponse => "cv_response",
            DocumentKind::VacancyResponse => "vacancy_response",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            DocumentKind::Employer => "employers",
            DocumentKind::Cv => "cvs",
            DocumentKind::Vacancy => "vacancies",
            DocumentKind::CvResponse => "cv_responses",
            DocumentKind::VacancyResponse => "vacancy_responses",
        }
    }

    pub fn as_listing(self) -> Option<ListingKind> {
        match self {
            DocumentKind::Employer => Some(ListingKind::Employer),
            DocumentKind::Cv => Some(ListingKind::Cv),
            DocumentKind::Vacancy => Some(ListingKind::Vacancy),
            _ => None,
        }
    }

    pub fn as_response(self) -> Option<ResponseKind> {
        match self {
            DocumentKind::CvResponse => Some(ResponseKind::Cv),
            DocumentKind::VacancyResponse => Some(ResponseKind::Vacancy),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| Error::NotFound(format!("unknown document kind '{}'", raw)))
    }
}

impl TryFrom<String> for DocumentKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Published listings that can be favorited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Employer,
    Cv,
    Vacancy,
}

impl From<ListingKind> for DocumentKind {
    fn from(kind: ListingKind) -> Self {
        match kind {
            ListingKind::Employer => DocumentKind::Employer,
            ListingKind::Cv => DocumentKind::Cv,
            ListingKind::Vacancy => DocumentKind::Vacancy,
        }
    }
}

impl FromStr for ListingKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let kind: DocumentKind = match raw {
            "employers" => DocumentKind::Employer,
            "cvs" => DocumentKind::Cv,
            "vacancies" => DocumentKind::Vacancy,
            other => other.parse()?,
        };
        kind.as_listing()
            .ok_or_else(|| Error::NotFound(format!("'{}' cannot be favorited", raw)))
    }
}

/// Bilateral response documents carrying a message thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Employer offers a vacancy to the holder of a CV.
    Cv,
    /// Employee applies to a vacancy with one of their CVs.
    Vacancy,
}

impl From<ResponseKind> for DocumentKind {
    fn from(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Cv => DocumentKind::CvResponse,
            ResponseKind::Vacancy => DocumentKind::VacancyResponse,
        }
    }
}

/// Typed `(kind, id)` key used by the generic message and favorite relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: Uuid,
}

impl DocumentRef {
    pub fn new(kind: impl Into<DocumentKind>, id: Uuid) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Columns every moderated document shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DocumentMeta {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub status_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl DocumentMeta {
    pub fn new_draft(owner_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            status: DocumentStatus::Draft,
            status_info: String::new(),
            created_at: now,
            updated_at: now,
            updated_by: owner_id,
        }
    }

    pub fn touch(&mut self, actor: Uuid, now: DateTime<Utc>) {
        self.updated_by = actor;
        self.updated_at = now;
    }
}

pub trait Document {
    fn kind(&self) -> DocumentKind;
    fn meta(&self) -> &DocumentMeta;

    /// Counterpart user for bilateral documents.
    fn counterpart(&self) -> Option<Uuid> {
        None
    }

    fn doc_ref(&self) -> DocumentRef {
        DocumentRef::new(self.kind(), self.meta().id)
    }

    fn subject(&self) -> Subject {
        let meta = self.meta();
        Subject {
            kind: self.kind(),
            owner: meta.owner_id,
            status: meta.status,
            counterpart: self.counterpart(),
        }
    }
}

/// Listing row annotated with the caller's favorite flag.
#[derive(Debug, Clone, Serialize)]
pub struct Listed<T> {
    #[serde(flatten)]
    pub item: T,
    pub is_favorite: bool,
}
