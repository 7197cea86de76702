use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::document::{Document, DocumentKind, DocumentMeta};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: DocumentMeta,
    pub employer_id: Uuid,
    pub title: String,
    pub city: String,
    pub position: String,
    pub salary: i64,
    pub description: String,
}

impl Document for Vacancy {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Vacancy
    }

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }
}
