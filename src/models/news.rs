use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::Error;

/// How a post's `content` is to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "MD")]
    Markdown,
    #[serde(rename = "HT")]
    Html,
    #[serde(rename = "TX")]
    Text,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Markdown, ContentType::Html, ContentType::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Markdown => "MD",
            ContentType::Html => "HT",
            ContentType::Text => "TX",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                Error::validation("content_type", format!("\"{}\" is not a valid choice.", raw))
            })
    }
}

impl TryFrom<String> for ContentType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NewsTag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NewsPost {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub content_type: ContentType,
    pub content: String,
    /// Sorted by name.
    #[sqlx(skip)]
    pub tags: Vec<NewsTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl NewsPost {
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }
}

/// Resolved news listing filter. `created_before` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsFilter {
    pub title: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub tag: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for NewsFilter {
    fn default() -> Self {
        Self {
            title: None,
            created_after: None,
            created_before: None,
            tag: None,
            limit: NewsFilter::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl NewsFilter {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Every predicate except paging.
    pub fn matches(&self, post: &NewsPost) -> bool {
        self.title.as_deref().map_or(true, |title| post.title.contains(title))
            && self.created_after.map_or(true, |from| post.created_at >= from)
            && self.created_before.map_or(true, |until| post.created_at < until)
            && self
                .tag
                .as_deref()
                .map_or(true, |tag| post.tags.iter().any(|t| t.name == tag))
    }
}

/// One page of posts plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsSlice {
    pub items: Vec<NewsPost>,
    pub total: i64,
}
