use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::{Document, DocumentKind, DocumentMeta, ResponseKind};

/// CV response or vacancy response linking one CV with one vacancy.
///
/// `cv_owner_id` and `vacancy_owner_id` are resolved from the linked documents
/// when the row is loaded; the initiator is always `meta.owner_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDocument {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub kind: ResponseKind,
    pub cv_id: Uuid,
    pub vacancy_id: Uuid,
    pub cv_owner_id: Uuid,
    pub vacancy_owner_id: Uuid,
}

impl ResponseDocument {
    pub fn initiator(&self) -> Uuid {
        self.meta.owner_id
    }

    pub fn counterpart_id(&self) -> Uuid {
        match self.kind {
            ResponseKind::Cv => self.cv_owner_id,
            ResponseKind::Vacancy => self.vacancy_owner_id,
        }
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.initiator() == user_id || self.counterpart_id() == user_id
    }
}

impl Document for ResponseDocument {
    fn kind(&self) -> DocumentKind {
        self.kind.into()
    }

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn counterpart(&self) -> Option<Uuid> {
        Some(self.counterpart_id())
    }
}
