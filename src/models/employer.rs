use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::document::{Document, DocumentKind, DocumentMeta};

/// Company profile. One per user, published through moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employer {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: DocumentMeta,
    pub name: String,
    pub established: NaiveDate,
    pub email: String,
    pub city: String,
    pub description: String,
    pub welcome_letter: String,
}

impl Document for Employer {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Employer
    }

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }
}
