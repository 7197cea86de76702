use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::news::{ContentType, NewsFilter, NewsPost};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsTagPayload {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
}

/// Staff body for creating or replacing a post. Tags are referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsPostPayload {
    #[validate(length(min = 1, max = 60))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub body: String,
    pub content_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query string of the news listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NewsQuery {
    pub title: Option<String>,
    #[serde(rename = "created_at_after")]
    pub created_after: Option<NaiveDate>,
    #[serde(rename = "created_at_before")]
    pub created_before: Option<NaiveDate>,
    #[serde(rename = "tags__name")]
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

impl From<NewsQuery> for NewsFilter {
    /// Date bounds cover whole days on both ends.
    fn from(query: NewsQuery) -> Self {
        Self {
            title: query.title.filter(|t| !t.is_empty()),
            created_after: query.created_after.map(start_of),
            created_before: query
                .created_before
                .and_then(|day| day.succ_opt())
                .map(start_of),
            tag: query.tag.filter(|t| !t.is_empty()),
            limit: query
                .limit
                .unwrap_or(NewsFilter::DEFAULT_LIMIT)
                .clamp(1, NewsFilter::MAX_LIMIT),
            offset: query.offset.unwrap_or(0).max(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Public list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSummary {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl From<NewsPost> for NewsSummary {
    fn from(post: NewsPost) -> Self {
        let tags = post.tag_names();
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDetail {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub content_type: ContentType,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl From<NewsPost> for NewsDetail {
    fn from(post: NewsPost) -> Self {
        let tags = post.tag_names();
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            content_type: post.content_type,
            content: post.content,
            created_at: post.created_at,
            tags,
        }
    }
}

/// Staff view of a post, with audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub content_type: ContentType,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
    pub tags: Vec<String>,
}

impl From<NewsPost> for NewsPostResponse {
    fn from(post: NewsPost) -> Self {
        let tags = post.tag_names();
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            content_type: post.content_type,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            updated_by: post.updated_by,
            tags,
        }
    }
}
