use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Links one CV with one vacancy; used for create and re-pointing updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResponsePayload {
    pub cv_id: Uuid,
    pub vacancy_id: Uuid,
}
