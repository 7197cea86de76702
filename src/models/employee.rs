use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Job seeker profile. One per user and never moderated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub birthday: NaiveDate,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub description: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}
