use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::ListingKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: Uuid,
    pub target_kind: ListingKind,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}
