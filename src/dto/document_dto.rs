use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST .../:id/status`. `status` takes a full name or a one-letter code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusChangePayload {
    #[validate(length(min = 1))]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MessagePayload {
    #[validate(length(min = 1, max = 1024))]
    pub content: String,
}
