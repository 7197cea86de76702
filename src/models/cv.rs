use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::document::{Document, DocumentKind, DocumentMeta};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Cv {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: DocumentMeta,
    pub employee_id: Uuid,
    pub title: String,
    pub position: String,
    pub salary: i64,
    pub description: String,
    #[sqlx(skip)]
    pub experience: Vec<CvExperience>,
    #[sqlx(skip)]
    pub education: Vec<CvEducation>,
}

impl Document for Cv {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Cv
    }

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CvExperience {
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
    pub is_current: bool,
    pub city: String,
    pub company: String,
    pub position: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CvEducation {
    pub date: NaiveDate,
    pub institution: String,
    pub specialty: String,
    pub content: String,
}
