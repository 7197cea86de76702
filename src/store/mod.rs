//! Persistence seam for documents, threads, favorites, and news.
//!
//! Every mutation of a status-bearing row is a compare-and-swap on
//! `(id, status)`: the caller passes the status it authorized against and the
//! store reports whether the row still held it.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::engine::{Scope, StatusChange, Subject};
use crate::error::Result;
use crate::models::cv::Cv;
use crate::models::document::{DocumentMeta, DocumentRef, ListingKind, ResponseKind};
use crate::models::employee::Employee;
use crate::models::employer::Employer;
use crate::models::favorite::Favorite;
use crate::models::message::DocumentMessage;
use crate::models::news::{NewsFilter, NewsPost, NewsSlice, NewsTag};
use crate::models::response::ResponseDocument;
use crate::models::status::DocumentStatus;
use crate::models::vacancy::Vacancy;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Policy view of any document, `None` when the row does not exist.
    async fn subject(&self, doc: DocumentRef) -> Result<Option<Subject>>;

    /// Applies `change` if the document is still in `change.from`.
    async fn transition(&self, change: &StatusChange) -> Result<Option<DocumentMeta>>;

    /// Deletes the document if it is still in `expected`.
    async fn delete_document(&self, doc: DocumentRef, expected: DocumentStatus) -> Result<bool>;

    async fn insert_employee(&self, employee: Employee) -> Result<Employee>;
    async fn employee_by_owner(&self, owner: Uuid) -> Result<Option<Employee>>;
    async fn update_employee(&self, employee: &Employee) -> Result<()>;

    async fn insert_employer(&self, employer: Employer) -> Result<Employer>;
    async fn employer(&self, id: Uuid) -> Result<Option<Employer>>;
    async fn employer_by_owner(&self, owner: Uuid) -> Result<Option<Employer>>;
    async fn update_employer(&self, employer: &Employer, expected: DocumentStatus) -> Result<bool>;
    async fn list_employers(&self, scope: Scope) -> Result<Vec<Employer>>;

    async fn insert_cv(&self, cv: Cv) -> Result<Cv>;
    async fn cv(&self, id: Uuid) -> Result<Option<Cv>>;
    /// Replaces scalar fields and both nested collections.
    async fn update_cv(&self, cv: &Cv, expected: DocumentStatus) -> Result<bool>;
    async fn list_cvs(&self, scope: Scope) -> Result<Vec<Cv>>;

    async fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy>;
    async fn vacancy(&self, id: Uuid) -> Result<Option<Vacancy>>;
    async fn update_vacancy(&self, vacancy: &Vacancy, expected: DocumentStatus) -> Result<bool>;
    async fn list_vacancies(&self, scope: Scope) -> Result<Vec<Vacancy>>;

    /// Fails with `Conflict` when the `(cv, vacancy)` pair already exists for the kind.
    async fn insert_response(&self, response: ResponseDocument) -> Result<ResponseDocument>;
    async fn response(&self, kind: ResponseKind, id: Uuid) -> Result<Option<ResponseDocument>>;
    async fn response_exists(&self, kind: ResponseKind, cv_id: Uuid, vacancy_id: Uuid) -> Result<bool>;
    async fn update_response(&self, response: &ResponseDocument, expected: DocumentStatus) -> Result<bool>;
    async fn list_responses(&self, kind: ResponseKind, scope: Scope) -> Result<Vec<ResponseDocument>>;

    /// Appends `message` only while the owning document is in `required`.
    async fn append_message(
        &self,
        message: DocumentMessage,
        required: DocumentStatus,
    ) -> Result<Option<DocumentMessage>>;
    /// Thread of one document, oldest first.
    async fn messages(&self, doc: DocumentRef) -> Result<Vec<DocumentMessage>>;

    /// Returns `false` when the favorite already existed.
    async fn add_favorite(&self, favorite: Favorite) -> Result<bool>;
    async fn remove_favorite(&self, user: Uuid, kind: ListingKind, id: Uuid) -> Result<bool>;
    async fn favorite_ids(&self, user: Uuid, kind: ListingKind) -> Result<HashSet<Uuid>>;

    /// Fails with `Conflict` when the name is taken.
    async fn insert_news_tag(&self, tag: NewsTag) -> Result<NewsTag>;
    async fn news_tag(&self, id: Uuid) -> Result<Option<NewsTag>>;
    /// Tags whose name is in `names`; unknown names are skipped.
    async fn news_tags_named(&self, names: &[String]) -> Result<Vec<NewsTag>>;
    async fn update_news_tag(&self, tag: &NewsTag) -> Result<bool>;
    /// Also detaches the tag from every post.
    async fn delete_news_tag(&self, id: Uuid) -> Result<bool>;
    async fn list_news_tags(&self) -> Result<Vec<NewsTag>>;

    async fn insert_news_post(&self, post: NewsPost) -> Result<NewsPost>;
    async fn news_post(&self, id: Uuid) -> Result<Option<NewsPost>>;
    /// Replaces scalar fields and the tag set.
    async fn update_news_post(&self, post: &NewsPost) -> Result<bool>;
    async fn delete_news_post(&self, id: Uuid) -> Result<bool>;
    /// Newest first, paged by `filter.limit` and `filter.offset`.
    async fn list_news_posts(&self, filter: &NewsFilter) -> Result<NewsSlice>;
}
