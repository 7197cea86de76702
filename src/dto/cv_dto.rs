use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::cv::{CvEducation, CvExperience};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CvExperiencePayload {
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub company: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[serde(default)]
    pub content: String,
}

impl From<CvExperiencePayload> for CvExperience {
    fn from(p: CvExperiencePayload) -> Self {
        Self {
            date_from: p.date_from,
            date_to: p.date_to,
            is_current: p.is_current,
            city: p.city,
            company: p.company,
            position: p.position,
            content: p.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CvEducationPayload {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub institution: String,
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub content: String,
}

impl From<CvEducationPayload> for CvEducation {
    fn from(p: CvEducationPayload) -> Self {
        Self {
            date: p.date,
            institution: p.institution,
            specialty: p.specialty,
            content: p.content,
        }
    }
}

/// Create and full-replace body for a CV.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CvPayload {
    #[validate(length(min = 1, max = 60))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[validate(range(min = 0))]
    pub salary: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<CvExperiencePayload>,
    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<CvEducationPayload>,
}
