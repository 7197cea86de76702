use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeProfilePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub birthday: NaiveDate,
    #[validate(length(min = 1, max = 25))]
    pub gender: String,
    #[validate(email, length(max = 256))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployerProfilePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub established: NaiveDate,
    #[validate(email, length(max = 256))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub welcome_letter: String,
}
