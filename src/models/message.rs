use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::document::DocumentKind;

/// Append-only chat entry attached to a response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DocumentMessage {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub doc_kind: DocumentKind,
    pub doc_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
