use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::engine::{Scope, StatusChange, Subject};
use crate::error::{Error, Result};
use crate::models::cv::Cv;
use crate::models::document::{
    Document, DocumentKind, DocumentMeta, DocumentRef, ListingKind, ResponseKind,
};
use crate::models::employee::Employee;
use crate::models::employer::Employer;
use crate::models::favorite::Favorite;
use crate::models::message::DocumentMessage;
use crate::models::news::{NewsFilter, NewsPost, NewsSlice, NewsTag};
use crate::models::response::ResponseDocument;
use crate::models::status::DocumentStatus;
use crate::models::vacancy::Vacancy;
use crate::store::Store;

#[derive(Default)]
struct Tables {
    employees: HashMap<Uuid, Employee>,
    employers: HashMap<Uuid, Employer>,
    cvs: HashMap<Uuid, Cv>,
    vacancies: HashMap<Uuid, Vacancy>,
    responses: HashMap<Uuid, ResponseDocument>,
    messages: Vec<DocumentMessage>,
    favorites: Vec<Favorite>,
    news_tags: HashMap<Uuid, NewsTag>,
    news_posts: HashMap<Uuid, NewsPost>,
}

impl Tables {
    fn meta_mut(&mut self, doc: DocumentRef) -> Option<&mut DocumentMeta> {
        match doc.kind {
            DocumentKind::Employer => self.employers.get_mut(&doc.id).map(|e| &mut e.meta),
            DocumentKind::Cv => self.cvs.get_mut(&doc.id).map(|c| &mut c.meta),
            DocumentKind::Vacancy => self.vacancies.get_mut(&doc.id).map(|v| &mut v.meta),
            DocumentKind::CvResponse | DocumentKind::VacancyResponse => self
                .responses
                .get_mut(&doc.id)
                .filter(|r| DocumentKind::from(r.kind) == doc.kind)
                .map(|r| &mut r.meta),
        }
    }

    fn subject(&self, doc: DocumentRef) -> Option<Subject> {
        match doc.kind {
            DocumentKind::Employer => self.employers.get(&doc.id).map(Document::subject),
            DocumentKind::Cv => self.cvs.get(&doc.id).map(Document::subject),
            DocumentKind::Vacancy => self.vacancies.get(&doc.id).map(Document::subject),
            DocumentKind::CvResponse | DocumentKind::VacancyResponse => self
                .responses
                .get(&doc.id)
                .filter(|r| DocumentKind::from(r.kind) == doc.kind)
                .map(Document::subject),
        }
    }

    fn pair_taken(&self, kind: ResponseKind, cv_id: Uuid, vacancy_id: Uuid, except: Option<Uuid>) -> bool {
        self.responses.values().any(|r| {
            r.kind == kind
                && r.cv_id == cv_id
                && r.vacancy_id == vacancy_id
                && Some(r.meta.id) != except
        })
    }

    fn tag_name_taken(&self, name: &str, except: Uuid) -> bool {
        self.news_tags.values().any(|t| t.name == name && t.id != except)
    }

    /// Post with its tags re-read from the tag table.
    fn news_post(&self, post: &NewsPost) -> NewsPost {
        let mut tags: Vec<NewsTag> = post
            .tags
            .iter()
            .filter_map(|tag| self.news_tags.get(&tag.id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        NewsPost {
            tags,
            ..post.clone()
        }
    }

    fn employee_email_taken(&self, email: &str, except: Uuid) -> bool {
        self.employees.values().any(|e| e.email == email && e.id != except)
    }

    fn employer_email_taken(&self, email: &str, except: Uuid) -> bool {
        self.employers
            .values()
            .any(|e| e.email == email && e.meta.id != except)
    }

    /// Drops responses linked to a removed CV or vacancy, with their threads.
    fn cascade_responses(&mut self, removed: impl Fn(&ResponseDocument) -> bool) {
        let gone: HashSet<Uuid> = self
            .responses
            .values()
            .filter(|r| removed(r))
            .map(|r| r.meta.id)
            .collect();
        self.responses.retain(|id, _| !gone.contains(id));
        self.messages.retain(|m| !gone.contains(&m.doc_id));
    }
}

/// Process-local [`Store`] used by tests and by local runs without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

fn tag_taken() -> Error {
    Error::Conflict("Tag already exists!".to_string())
}

fn email_taken() -> Error {
    Error::Conflict("email is already in use".to_string())
}

fn listed<T: Document + Clone>(rows: &HashMap<Uuid, T>, scope: Scope) -> Vec<T> {
    let mut out: Vec<T> = rows
        .values()
        .filter(|row| scope.admits(&row.subject()))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.meta().created_at.cmp(&a.meta().created_at));
    out
}

#[async_trait]
impl Store for MemoryStore {
    async fn subject(&self, doc: DocumentRef) -> Result<Option<Subject>> {
        Ok(self.lock()?.subject(doc))
    }

    async fn transition(&self, change: &StatusChange) -> Result<Option<DocumentMeta>> {
        let mut tables = self.lock()?;
        Ok(tables
            .meta_mut(change.doc)
            .and_then(|meta| change.apply(meta).then(|| meta.clone())))
    }

    async fn delete_document(&self, doc: DocumentRef, expected: DocumentStatus) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables.meta_mut(doc) {
            Some(meta) if meta.status == expected => {}
            _ => return Ok(false),
        }
        match doc.kind {
            DocumentKind::Employer => {
                tables.employers.remove(&doc.id);
                let vacancies: HashSet<Uuid> = tables
                    .vacancies
                    .values()
                    .filter(|v| v.employer_id == doc.id)
                    .map(|v| v.meta.id)
                    .collect();
                tables.vacancies.retain(|id, _| !vacancies.contains(id));
                tables.cascade_responses(|r| vacancies.contains(&r.vacancy_id));
                tables.favorites.retain(|f| {
                    !(f.target_kind == ListingKind::Vacancy && vacancies.contains(&f.target_id))
                });
            }
            DocumentKind::Cv => {
                tables.cvs.remove(&doc.id);
                tables.cascade_responses(|r| r.cv_id == doc.id);
            }
            DocumentKind::Vacancy => {
                tables.vacancies.remove(&doc.id);
                tables.cascade_responses(|r| r.vacancy_id == doc.id);
            }
            DocumentKind::CvResponse | DocumentKind::VacancyResponse => {
                tables.cascade_responses(|r| r.meta.id == doc.id);
            }
        }
        tables.favorites.retain(|f| {
            !(DocumentKind::from(f.target_kind) == doc.kind && f.target_id == doc.id)
        });
        Ok(true)
    }

    async fn insert_employee(&self, employee: Employee) -> Result<Employee> {
        let mut tables = self.lock()?;
        if tables.employees.values().any(|e| e.owner_id == employee.owner_id) {
            return Err(Error::Conflict("employee profile already exists".to_string()));
        }
        if tables.employee_email_taken(&employee.email, employee.id) {
            return Err(email_taken());
        }
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn employee_by_owner(&self, owner: Uuid) -> Result<Option<Employee>> {
        Ok(self
            .lock()?
            .employees
            .values()
            .find(|e| e.owner_id == owner)
            .cloned())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<()> {
        let mut tables = self.lock()?;
        if tables.employee_email_taken(&employee.email, employee.id) {
            return Err(email_taken());
        }
        match tables.employees.get_mut(&employee.id) {
            Some(row) => {
                *row = employee.clone();
                Ok(())
            }
            None => Err(Error::NotFound("employee not found".to_string())),
        }
    }

    async fn insert_employer(&self, employer: Employer) -> Result<Employer> {
        let mut tables = self.lock()?;
        if tables.employers.values().any(|e| e.meta.owner_id == employer.meta.owner_id) {
            return Err(Error::Conflict("employer profile already exists".to_string()));
        }
        if tables.employer_email_taken(&employer.email, employer.meta.id) {
            return Err(email_taken());
        }
        tables.employers.insert(employer.meta.id, employer.clone());
        Ok(employer)
    }

    async fn employer(&self, id: Uuid) -> Result<Option<Employer>> {
        Ok(self.lock()?.employers.get(&id).cloned())
    }

    async fn employer_by_owner(&self, owner: Uuid) -> Result<Option<Employer>> {
        Ok(self
            .lock()?
            .employers
            .values()
            .find(|e| e.meta.owner_id == owner)
            .cloned())
    }

    async fn update_employer(&self, employer: &Employer, expected: DocumentStatus) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.employer_email_taken(&employer.email, employer.meta.id) {
            return Err(email_taken());
        }
        match tables.employers.get_mut(&employer.meta.id) {
            Some(row) if row.meta.status == expected => {
                *row = employer.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_employers(&self, scope: Scope) -> Result<Vec<Employer>> {
        Ok(listed(&self.lock()?.employers, scope))
    }

    async fn insert_cv(&self, cv: Cv) -> Result<Cv> {
        self.lock()?.cvs.insert(cv.meta.id, cv.clone());
        Ok(cv)
    }

    async fn cv(&self, id: Uuid) -> Result<Option<Cv>> {
        Ok(self.lock()?.cvs.get(&id).cloned())
    }

    async fn update_cv(&self, cv: &Cv, expected: DocumentStatus) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables.cvs.get_mut(&cv.meta.id) {
            Some(row) if row.meta.status == expected => {
                *row = cv.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_cvs(&self, scope: Scope) -> Result<Vec<Cv>> {
        Ok(listed(&self.lock()?.cvs, scope))
    }

    async fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy> {
        self.lock()?.vacancies.insert(vacancy.meta.id, vacancy.clone());
        Ok(vacancy)
    }

    async fn vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        Ok(self.lock()?.vacancies.get(&id).cloned())
    }

    async fn update_vacancy(&self, vacancy: &Vacancy, expected: DocumentStatus) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables.vacancies.get_mut(&vacancy.meta.id) {
            Some(row) if row.meta.status == expected => {
                *row = vacancy.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_vacancies(&self, scope: Scope) -> Result<Vec<Vacancy>> {
        Ok(listed(&self.lock()?.vacancies, scope))
    }

    async fn insert_response(&self, response: ResponseDocument) -> Result<ResponseDocument> {
        let mut tables = self.lock()?;
        if tables.pair_taken(response.kind, response.cv_id, response.vacancy_id, None) {
            return Err(Error::Conflict(
                "a response for this CV and vacancy already exists".to_string(),
            ));
        }
        tables.responses.insert(response.meta.id, response.clone());
        Ok(response)
    }

    async fn response(&self, kind: ResponseKind, id: Uuid) -> Result<Option<ResponseDocument>> {
        Ok(self
            .lock()?
            .responses
            .get(&id)
            .filter(|r| r.kind == kind)
            .cloned())
    }

    async fn response_exists(&self, kind: ResponseKind, cv_id: Uuid, vacancy_id: Uuid) -> Result<bool> {
        Ok(self.lock()?.pair_taken(kind, cv_id, vacancy_id, None))
    }

    async fn update_response(&self, response: &ResponseDocument, expected: DocumentStatus) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.pair_taken(
            response.kind,
            response.cv_id,
            response.vacancy_id,
            Some(response.meta.id),
        ) {
            return Err(Error::Conflict(
                "a response for this CV and vacancy already exists".to_string(),
            ));
        }
        match tables.responses.get_mut(&response.meta.id) {
            Some(row) if row.kind == response.kind && row.meta.status == expected => {
                *row = response.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_responses(&self, kind: ResponseKind, scope: Scope) -> Result<Vec<ResponseDocument>> {
        let tables = self.lock()?;
        let mut out: Vec<ResponseDocument> = tables
            .responses
            .values()
            .filter(|r| r.kind == kind && scope.admits(&r.subject()))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));
        Ok(out)
    }

    async fn append_message(
        &self,
        message: DocumentMessage,
        required: DocumentStatus,
    ) -> Result<Option<DocumentMessage>> {
        let mut tables = self.lock()?;
        let doc = DocumentRef::new(message.doc_kind, message.doc_id);
        match tables.subject(doc) {
            Some(subject) if subject.status == required => {
                tables.messages.push(message.clone());
                Ok(Some(message))
            }
            _ => Ok(None),
        }
    }

    async fn messages(&self, doc: DocumentRef) -> Result<Vec<DocumentMessage>> {
        let tables = self.lock()?;
        let mut out: Vec<DocumentMessage> = tables
            .messages
            .iter()
            .filter(|m| m.doc_kind == doc.kind && m.doc_id == doc.id)
            .cloned()
            .collect();
        // stable sort keeps insertion order for equal timestamps
        out.sort_by_key(|m| m.created_at);
        Ok(out)
    }

    async fn add_favorite(&self, favorite: Favorite) -> Result<bool> {
        let mut tables = self.lock()?;
        let exists = tables.favorites.iter().any(|f| {
            f.user_id == favorite.user_id
                && f.target_kind == favorite.target_kind
                && f.target_id == favorite.target_id
        });
        if !exists {
            tables.favorites.push(favorite);
        }
        Ok(!exists)
    }

    async fn remove_favorite(&self, user: Uuid, kind: ListingKind, id: Uuid) -> Result<bool> {
        let mut tables = self.lock()?;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.user_id == user && f.target_kind == kind && f.target_id == id));
        Ok(tables.favorites.len() != before)
    }

    async fn favorite_ids(&self, user: Uuid, kind: ListingKind) -> Result<HashSet<Uuid>> {
        Ok(self
            .lock()?
            .favorites
            .iter()
            .filter(|f| f.user_id == user && f.target_kind == kind)
            .map(|f| f.target_id)
            .collect())
    }

    async fn insert_news_tag(&self, tag: NewsTag) -> Result<NewsTag> {
        let mut tables = self.lock()?;
        if tables.tag_name_taken(&tag.name, tag.id) {
            return Err(tag_taken());
        }
        tables.news_tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn news_tag(&self, id: Uuid) -> Result<Option<NewsTag>> {
        Ok(self.lock()?.news_tags.get(&id).cloned())
    }

    async fn news_tags_named(&self, names: &[String]) -> Result<Vec<NewsTag>> {
        Ok(self
            .lock()?
            .news_tags
            .values()
            .filter(|tag| names.contains(&tag.name))
            .cloned()
            .collect())
    }

    async fn update_news_tag(&self, tag: &NewsTag) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.tag_name_taken(&tag.name, tag.id) {
            return Err(tag_taken());
        }
        match tables.news_tags.get_mut(&tag.id) {
            Some(row) => {
                *row = tag.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_news_tag(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.news_tags.remove(&id).is_none() {
            return Ok(false);
        }
        for post in tables.news_posts.values_mut() {
            post.tags.retain(|tag| tag.id != id);
        }
        Ok(true)
    }

    async fn list_news_tags(&self) -> Result<Vec<NewsTag>> {
        let mut tags: Vec<NewsTag> = self.lock()?.news_tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn insert_news_post(&self, post: NewsPost) -> Result<NewsPost> {
        let mut tables = self.lock()?;
        let stored = tables.news_post(&post);
        tables.news_posts.insert(post.id, stored.clone());
        Ok(stored)
    }

    async fn news_post(&self, id: Uuid) -> Result<Option<NewsPost>> {
        let tables = self.lock()?;
        Ok(tables.news_posts.get(&id).map(|post| tables.news_post(post)))
    }

    async fn update_news_post(&self, post: &NewsPost) -> Result<bool> {
        let mut tables = self.lock()?;
        let stored = tables.news_post(post);
        match tables.news_posts.get_mut(&post.id) {
            Some(row) => {
                *row = stored;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_news_post(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock()?.news_posts.remove(&id).is_some())
    }

    async fn list_news_posts(&self, filter: &NewsFilter) -> Result<NewsSlice> {
        let tables = self.lock()?;
        let mut matched: Vec<NewsPost> = tables
            .news_posts
            .values()
            .map(|post| tables.news_post(post))
            .filter(|post| filter.matches(post))
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as i64;
        let items = matched
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect();
        Ok(NewsSlice { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio_test::block_on;

    fn vacancy(owner: Uuid, status: DocumentStatus) -> Vacancy {
        let mut meta = DocumentMeta::new_draft(owner, Utc::now());
        meta.status = status;
        Vacancy {
            meta,
            employer_id: Uuid::new_v4(),
            title: "Dispatcher".into(),
            city: "Khujand".into(),
            position: "Dispatcher".into(),
            salary: 900,
            description: String::new(),
        }
    }

    fn response(vacancy: &Vacancy, initiator: Uuid) -> ResponseDocument {
        ResponseDocument {
            meta: DocumentMeta::new_draft(initiator, Utc::now()),
            kind: ResponseKind::Vacancy,
            cv_id: Uuid::new_v4(),
            vacancy_id: vacancy.meta.id,
            cv_owner_id: initiator,
            vacancy_owner_id: vacancy.meta.owner_id,
        }
    }

    fn employee(email: &str) -> Employee {
        let owner_id = Uuid::new_v4();
        Employee {
            id: Uuid::new_v4(),
            owner_id,
            name: "Nigora".into(),
            birthday: chrono::NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            gender: "female".into(),
            email: email.into(),
            city: "Dushanbe".into(),
            description: String::new(),
            skills: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            updated_by: owner_id,
        }
    }

    #[test]
    fn employee_emails_are_unique_on_insert_and_update() {
        let store = MemoryStore::new();
        let first = block_on(store.insert_employee(employee("a@example.com"))).unwrap();
        let mut second = block_on(store.insert_employee(employee("b@example.com"))).unwrap();

        let err = block_on(store.insert_employee(employee("a@example.com"))).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref msg) if msg == "email is already in use"));

        let mut again = employee("c@example.com");
        again.owner_id = first.owner_id;
        let err = block_on(store.insert_employee(again)).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref msg) if msg == "employee profile already exists"));

        second.email = first.email.clone();
        let err = block_on(store.update_employee(&second)).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref msg) if msg == "email is already in use"));
        let stored = block_on(store.employee_by_owner(second.owner_id)).unwrap().unwrap();
        assert_eq!(stored.email, "b@example.com");

        let mut renamed = first.clone();
        renamed.name = "Nigora R.".into();
        block_on(store.update_employee(&renamed)).unwrap();
    }

    #[test]
    fn transition_is_a_compare_and_swap() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let row = block_on(store.insert_vacancy(vacancy(owner, DocumentStatus::Pending))).unwrap();
        let change = |to| StatusChange {
            doc: DocumentRef::new(DocumentKind::Vacancy, row.meta.id),
            from: DocumentStatus::Pending,
            to,
            info: String::new(),
            actor: Uuid::new_v4(),
            at: Utc::now(),
        };

        let first = block_on(store.transition(&change(DocumentStatus::Approved))).unwrap();
        assert_eq!(first.map(|m| m.status), Some(DocumentStatus::Approved));
        let second = block_on(store.transition(&change(DocumentStatus::Rejected))).unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn deleting_a_vacancy_drops_its_responses_and_threads() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let row = block_on(store.insert_vacancy(vacancy(owner, DocumentStatus::Draft))).unwrap();
        let mut linked = response(&row, Uuid::new_v4());
        linked.meta.status = DocumentStatus::Approved;
        let linked = block_on(store.insert_response(linked)).unwrap();
        let posted = block_on(store.append_message(
            DocumentMessage {
                id: Uuid::new_v4(),
                doc_kind: DocumentKind::VacancyResponse,
                doc_id: linked.meta.id,
                sender_id: owner,
                content: "hello".into(),
                created_at: Utc::now(),
            },
            DocumentStatus::Approved,
        ))
        .unwrap();
        assert!(posted.is_some());

        let doc = DocumentRef::new(DocumentKind::Vacancy, row.meta.id);
        assert!(!block_on(store.delete_document(doc, DocumentStatus::Pending)).unwrap());
        assert!(block_on(store.delete_document(doc, DocumentStatus::Draft)).unwrap());

        assert!(block_on(store.response(ResponseKind::Vacancy, linked.meta.id))
            .unwrap()
            .is_none());
        assert!(block_on(store.messages(linked.doc_ref())).unwrap().is_empty());
    }

    #[test]
    fn duplicate_pairs_conflict() {
        let store = MemoryStore::new();
        let row = block_on(store.insert_vacancy(vacancy(Uuid::new_v4(), DocumentStatus::Approved))).unwrap();
        let first = response(&row, Uuid::new_v4());
        let mut second = response(&row, Uuid::new_v4());
        second.cv_id = first.cv_id;

        tokio_test::assert_ok!(block_on(store.insert_response(first)));
        let err = block_on(store.insert_response(second)).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn messages_need_the_required_status() {
        let store = MemoryStore::new();
        let row = block_on(store.insert_vacancy(vacancy(Uuid::new_v4(), DocumentStatus::Approved))).unwrap();
        let pending = block_on(store.insert_response(response(&row, Uuid::new_v4()))).unwrap();

        let appended = block_on(store.append_message(
            DocumentMessage {
                id: Uuid::new_v4(),
                doc_kind: DocumentKind::VacancyResponse,
                doc_id: pending.meta.id,
                sender_id: pending.meta.owner_id,
                content: "too early".into(),
                created_at: Utc::now(),
            },
            DocumentStatus::Approved,
        ))
        .unwrap();
        assert!(appended.is_none());
    }
}
