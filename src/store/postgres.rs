use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::engine::{Scope, StatusChange, Subject};
use crate::error::Result;
use crate::models::cv::{Cv, CvEducation, CvExperience};
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

const META_COLUMNS: &str = "id, owner_id, status, status_info, created_at, updated_at, updated_by";

#[derive(FromRow)]
struct ResponseRow {
    #[sqlx(flatten)]
    meta: DocumentMeta,
    cv_id: Uuid,
    vacancy_id: Uuid,
    cv_owner_id: Uuid,
    vacancy_owner_id: Uuid,
}

impl ResponseRow {
    fn into_document(self, kind: ResponseKind) -> ResponseDocument {
        ResponseDocument {
            meta: self.meta,
            kind,
            cv_id: self.cv_id,
            vacancy_id: self.vacancy_id,
            cv_owner_id: self.cv_owner_id,
            vacancy_owner_id: self.vacancy_owner_id,
        }
    }
}

#[derive(FromRow)]
struct ExperienceRow {
    cv_id: Uuid,
    #[sqlx(flatten)]
    item: CvExperience,
}

#[derive(FromRow)]
struct EducationRow {
    cv_id: Uuid,
    #[sqlx(flatten)]
    item: CvEducation,
}

#[derive(FromRow)]
struct PostTagRow {
    post_id: Uuid,
    #[sqlx(flatten)]
    tag: NewsTag,
}

const NEWS_POST_COLUMNS: &str =
    "p.id, p.title, p.body, p.content_type, p.content, p.created_at, p.updated_at, p.updated_by";

/// `LIKE` pattern matching `raw` anywhere, with wildcards in `raw` escaped.
fn contains_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_news_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &NewsFilter) {
    qb.push(" WHERE TRUE");
    if let Some(title) = &filter.title {
        qb.push(" AND p.title LIKE ").push_bind(contains_pattern(title));
    }
    if let Some(from) = filter.created_after {
        qb.push(" AND p.created_at >= ").push_bind(from);
    }
    if let Some(until) = filter.created_before {
        qb.push(" AND p.created_at < ").push_bind(until);
    }
    if let Some(tag) = &filter.tag {
        qb.push(
            " AND EXISTS (SELECT 1 FROM news_post_tags pt JOIN news_tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id AND t.name = ",
        )
        .push_bind(tag.clone())
        .push(")");
    }
}

/// Columns a [`Scope`] filters on for one table.
struct ScopeColumns {
    owner: &'static str,
    status: &'static str,
    counterpart: Option<&'static str>,
}

const LISTING_COLUMNS: ScopeColumns = ScopeColumns {
    owner: "owner_id",
    status: "status",
    counterpart: None,
};

fn response_select(kind: ResponseKind) -> String {
    format!(
        "SELECT r.id, r.owner_id, r.status, r.status_info, r.created_at, r.updated_at, \
         r.updated_by, r.cv_id, r.vacancy_id, c.owner_id AS cv_owner_id, \
         v.owner_id AS vacancy_owner_id \
         FROM {} r \
         JOIN cvs c ON c.id = r.cv_id \
         JOIN vacancies v ON v.id = r.vacancy_id",
        DocumentKind::from(kind).table()
    )
}

fn response_columns(kind: ResponseKind) -> ScopeColumns {
    ScopeColumns {
        owner: "r.owner_id",
        status: "r.status",
        counterpart: Some(match kind {
            ResponseKind::Cv => "c.owner_id",
            ResponseKind::Vacancy => "v.owner_id",
        }),
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: Scope, columns: &ScopeColumns) {
    match scope {
        Scope::All => {
            qb.push(" WHERE TRUE");
        }
        Scope::OwnedBy(user) => {
            qb.push(" WHERE ")
                .push(columns.owner)
                .push(" = ")
                .push_bind(user);
        }
        Scope::WithStatus(status) => {
            qb.push(" WHERE ")
                .push(columns.status)
                .push(" = ")
                .push_bind(status.as_str());
        }
        Scope::OwnedOrWithStatus(user, status) => {
            qb.push(" WHERE (")
                .push(columns.owner)
                .push(" = ")
                .push_bind(user)
                .push(" OR ")
                .push(columns.status)
                .push(" = ")
                .push_bind(status.as_str())
                .push(")");
        }
        Scope::CounterpartOf(user) => match columns.counterpart {
            Some(column) => {
                qb.push(" WHERE ")
                    .push(column)
                    .push(" = ")
                    .push_bind(user)
                    .push(" AND ")
                    .push(columns.status)
                    .push(" <> 'draft'");
            }
            None => {
                qb.push(" WHERE FALSE");
            }
        },
        Scope::Nothing => {
            qb.push(" WHERE FALSE");
        }
    }
}

/// Messages and favorites have no foreign key to their document, so they are
/// removed explicitly along with everything the delete cascades to.
fn orphan_cleanup(kind: DocumentKind) -> (&'static str, Option<&'static str>) {
    match kind {
        DocumentKind::Employer => (
            "DELETE FROM document_messages WHERE \
             (doc_kind = 'cv_response' AND doc_id IN (SELECT r.id FROM cv_responses r \
                JOIN vacancies v ON v.id = r.vacancy_id WHERE v.employer_id = $1)) \
             OR (doc_kind = 'vacancy_response' AND doc_id IN (SELECT r.id FROM vacancy_responses r \
                JOIN vacancies v ON v.id = r.vacancy_id WHERE v.employer_id = $1))",
            Some(
                "DELETE FROM favorites WHERE (target_kind = 'employer' AND target_id = $1) \
                 OR (target_kind = 'vacancy' AND target_id IN \
                    (SELECT id FROM vacancies WHERE employer_id = $1))",
            ),
        ),
        DocumentKind::Cv => (
            "DELETE FROM document_messages WHERE \
             (doc_kind = 'cv_response' AND doc_id IN (SELECT id FROM cv_responses WHERE cv_id = $1)) \
             OR (doc_kind = 'vacancy_response' AND doc_id IN \
                (SELECT id FROM vacancy_responses WHERE cv_id = $1))",
            Some("DELETE FROM favorites WHERE target_kind = 'cv' AND target_id = $1"),
        ),
        DocumentKind::Vacancy => (
            "DELETE FROM document_messages WHERE \
             (doc_kind = 'cv_response' AND doc_id IN \
                (SELECT id FROM cv_responses WHERE vacancy_id = $1)) \
             OR (doc_kind = 'vacancy_response' AND doc_id IN \
                (SELECT id FROM vacancy_responses WHERE vacancy_id = $1))",
            Some("DELETE FROM favorites WHERE target_kind = 'vacancy' AND target_id = $1"),
        ),
        DocumentKind::CvResponse => (
            "DELETE FROM document_messages WHERE doc_kind = 'cv_response' AND doc_id = $1",
            None,
        ),
        DocumentKind::VacancyResponse => (
            "DELETE FROM document_messages WHERE doc_kind = 'vacancy_response' AND doc_id = $1",
            None,
        ),
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write_cv_sections(tx: &mut Transaction<'_, Postgres>, cv: &Cv) -> Result<()> {
        sqlx::query("DELETE FROM cv_experience WHERE cv_id = $1")
            .bind(cv.meta.id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM cv_education WHERE cv_id = $1")
            .bind(cv.meta.id)
            .execute(&mut **tx)
            .await?;

        for (ordinal, item) in cv.experience.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cv_experience (
                    cv_id, ordinal, date_from, date_to, is_current, city, company, position, content
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(cv.meta.id)
            .bind(ordinal as i32)
            .bind(item.date_from)
            .bind(item.date_to)
            .bind(item.is_current)
            .bind(&item.city)
            .bind(&item.company)
            .bind(&item.position)
            .bind(&item.content)
            .execute(&mut **tx)
            .await?;
        }

        for (ordinal, item) in cv.education.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cv_education (cv_id, ordinal, date, institution, specialty, content)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(cv.meta.id)
            .bind(ordinal as i32)
            .bind(item.date)
            .bind(&item.institution)
            .bind(&item.specialty)
            .bind(&item.content)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Fills the nested experience and education lists of `cvs` in two queries.
    async fn write_post_tags(tx: &mut Transaction<'_, Postgres>, post: &NewsPost) -> Result<()> {
        sqlx::query("DELETE FROM news_post_tags WHERE post_id = $1")
            .bind(post.id)
            .execute(&mut **tx)
            .await?;
        let tag_ids: Vec<Uuid> = post.tags.iter().map(|tag| tag.id).collect();
        sqlx::query(
            r#"
            INSERT INTO news_post_tags (post_id, tag_id)
            SELECT $1, id FROM news_tags WHERE id = ANY($2)
            "#,
        )
        .bind(post.id)
        .bind(&tag_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn load_post_tags(&self, posts: &mut [NewsPost]) -> Result<()> {
        if posts.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();
        let rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT pt.post_id, t.id, t.name
            FROM news_post_tags pt
            JOIN news_tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_post: HashMap<Uuid, Vec<NewsTag>> = HashMap::new();
        for row in rows {
            tags_by_post.entry(row.post_id).or_default().push(row.tag);
        }
        for post in posts.iter_mut() {
            post.tags = tags_by_post.remove(&post.id).unwrap_or_default();
        }
        Ok(())
    }

    async fn load_cv_sections(&self, cvs: &mut [Cv]) -> Result<()> {
        if cvs.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = cvs.iter().map(|cv| cv.meta.id).collect();

        let experience = sqlx::query_as::<_, ExperienceRow>(
            "SELECT * FROM cv_experience WHERE cv_id = ANY($1) ORDER BY cv_id, ordinal",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let education = sqlx::query_as::<_, EducationRow>(
            "SELECT * FROM cv_education WHERE cv_id = ANY($1) ORDER BY cv_id, ordinal",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut experience_by_cv: HashMap<Uuid, Vec<CvExperience>> = HashMap::new();
        for row in experience {
            experience_by_cv.entry(row.cv_id).or_default().push(row.item);
        }
        let mut education_by_cv: HashMap<Uuid, Vec<CvEducation>> = HashMap::new();
        for row in education {
            education_by_cv.entry(row.cv_id).or_default().push(row.item);
        }

        for cv in cvs.iter_mut() {
            cv.experience = experience_by_cv.remove(&cv.meta.id).unwrap_or_default();
            cv.education = education_by_cv.remove(&cv.meta.id).unwrap_or_default();
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn subject(&self, doc: DocumentRef) -> Result<Option<Subject>> {
        if let Some(kind) = doc.kind.as_response() {
            return Ok(self.response(kind, doc.id).await?.map(|r| r.subject()));
        }

        let meta = sqlx::query_as::<_, DocumentMeta>(&format!(
            "SELECT {} FROM {} WHERE id = $1",
            META_COLUMNS,
            doc.kind.table()
        ))
        .bind(doc.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meta.map(|meta| Subject {
            kind: doc.kind,
            owner: meta.owner_id,
            status: meta.status,
            counterpart: None,
        }))
    }

    async fn transition(&self, change: &StatusChange) -> Result<Option<DocumentMeta>> {
        let meta = sqlx::query_as::<_, DocumentMeta>(&format!(
            r#"
            UPDATE {}
            SET status = $3, status_info = $4, updated_at = $5, updated_by = $6
            WHERE id = $1 AND status = $2
            RETURNING {}
            "#,
            change.doc.kind.table(),
            META_COLUMNS
        ))
        .bind(change.doc.id)
        .bind(change.from.as_str())
        .bind(change.to.as_str())
        .bind(&change.info)
        .bind(change.at)
        .bind(change.actor)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meta)
    }

    async fn delete_document(&self, doc: DocumentRef, expected: DocumentStatus) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let (messages_sql, favorites_sql) = orphan_cleanup(doc.kind);

        sqlx::query(messages_sql)
            .bind(doc.id)
            .execute(&mut *tx)
            .await?;
        if let Some(favorites_sql) = favorites_sql {
            sqlx::query(favorites_sql)
                .bind(doc.id)
                .execute(&mut *tx)
                .await?;
        }

        let deleted = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND status = $2",
            doc.kind.table()
        ))
        .bind(doc.id)
        .bind(expected.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn insert_employee(&self, employee: Employee) -> Result<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                id, owner_id, name, birthday, gender, email, city, description, skills,
                created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(employee.id)
        .bind(employee.owner_id)
        .bind(&employee.name)
        .bind(employee.birthday)
        .bind(&employee.gender)
        .bind(&employee.email)
        .bind(&employee.city)
        .bind(&employee.description)
        .bind(&employee.skills)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .bind(employee.updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn employee_by_owner(&self, owner: Uuid) -> Result<Option<Employee>> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE owner_id = $1")
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employee)
    }

    async fn update_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET name = $2, birthday = $3, gender = $4, email = $5, city = $6,
                description = $7, skills = $8, updated_at = $9, updated_by = $10
            WHERE id = $1
            "#,
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.birthday)
        .bind(&employee.gender)
        .bind(&employee.email)
        .bind(&employee.city)
        .bind(&employee.description)
        .bind(&employee.skills)
        .bind(employee.updated_at)
        .bind(employee.updated_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_employer(&self, employer: Employer) -> Result<Employer> {
        let employer = sqlx::query_as::<_, Employer>(
            r#"
            INSERT INTO employers (
                id, owner_id, status, status_info, name, established, email, city,
                description, welcome_letter, created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(employer.meta.id)
        .bind(employer.meta.owner_id)
        .bind(employer.meta.status.as_str())
        .bind(&employer.meta.status_info)
        .bind(&employer.name)
        .bind(employer.established)
        .bind(&employer.email)
        .bind(&employer.city)
        .bind(&employer.description)
        .bind(&employer.welcome_letter)
        .bind(employer.meta.created_at)
        .bind(employer.meta.updated_at)
        .bind(employer.meta.updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(employer)
    }

    async fn employer(&self, id: Uuid) -> Result<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>("SELECT * FROM employers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employer)
    }

    async fn employer_by_owner(&self, owner: Uuid) -> Result<Option<Employer>> {
        let employer =
            sqlx::query_as::<_, Employer>("SELECT * FROM employers WHERE owner_id = $1")
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employer)
    }

    async fn update_employer(&self, employer: &Employer, expected: DocumentStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employers
            SET name = $3, established = $4, email = $5, city = $6, description = $7,
                welcome_letter = $8, status = $9, status_info = $10,
                updated_at = $11, updated_by = $12
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(employer.meta.id)
        .bind(expected.as_str())
        .bind(&employer.name)
        .bind(employer.established)
        .bind(&employer.email)
        .bind(&employer.city)
        .bind(&employer.description)
        .bind(&employer.welcome_letter)
        .bind(employer.meta.status.as_str())
        .bind(&employer.meta.status_info)
        .bind(employer.meta.updated_at)
        .bind(employer.meta.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_employers(&self, scope: Scope) -> Result<Vec<Employer>> {
        let mut qb = QueryBuilder::new("SELECT * FROM employers");
        push_scope(&mut qb, scope, &LISTING_COLUMNS);
        qb.push(" ORDER BY created_at DESC");

        let employers = qb.build_query_as::<Employer>().fetch_all(&self.pool).await?;
        Ok(employers)
    }

    async fn insert_cv(&self, cv: Cv) -> Result<Cv> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cvs (
                id, owner_id, status, status_info, employee_id, title, position, salary,
                description, created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(cv.meta.id)
        .bind(cv.meta.owner_id)
        .bind(cv.meta.status.as_str())
        .bind(&cv.meta.status_info)
        .bind(cv.employee_id)
        .bind(&cv.title)
        .bind(&cv.position)
        .bind(cv.salary)
        .bind(&cv.description)
        .bind(cv.meta.created_at)
        .bind(cv.meta.updated_at)
        .bind(cv.meta.updated_by)
        .execute(&mut *tx)
        .await?;

        Self::write_cv_sections(&mut tx, &cv).await?;
        tx.commit().await?;

        Ok(cv)
    }

    async fn cv(&self, id: Uuid) -> Result<Option<Cv>> {
        let cv = sqlx::query_as::<_, Cv>("SELECT * FROM cvs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match cv {
            Some(cv) => {
                let mut found = [cv];
                self.load_cv_sections(&mut found).await?;
                let [cv] = found;
                Ok(Some(cv))
            }
            None => Ok(None),
        }
    }

    async fn update_cv(&self, cv: &Cv, expected: DocumentStatus) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE cvs
            SET title = $3, position = $4, salary = $5, description = $6,
                status = $7, status_info = $8, updated_at = $9, updated_by = $10
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(cv.meta.id)
        .bind(expected.as_str())
        .bind(&cv.title)
        .bind(&cv.position)
        .bind(cv.salary)
        .bind(&cv.description)
        .bind(cv.meta.status.as_str())
        .bind(&cv.meta.status_info)
        .bind(cv.meta.updated_at)
        .bind(cv.meta.updated_by)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        Self::write_cv_sections(&mut tx, cv).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn list_cvs(&self, scope: Scope) -> Result<Vec<Cv>> {
        let mut qb = QueryBuilder::new("SELECT * FROM cvs");
        push_scope(&mut qb, scope, &LISTING_COLUMNS);
        qb.push(" ORDER BY created_at DESC");

        let mut cvs = qb.build_query_as::<Cv>().fetch_all(&self.pool).await?;
        self.load_cv_sections(&mut cvs).await?;
        Ok(cvs)
    }

    async fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy> {
        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (
                id, owner_id, status, status_info, employer_id, title, city, position,
                salary, description, created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(vacancy.meta.id)
        .bind(vacancy.meta.owner_id)
        .bind(vacancy.meta.status.as_str())
        .bind(&vacancy.meta.status_info)
        .bind(vacancy.employer_id)
        .bind(&vacancy.title)
        .bind(&vacancy.city)
        .bind(&vacancy.position)
        .bind(vacancy.salary)
        .bind(&vacancy.description)
        .bind(vacancy.meta.created_at)
        .bind(vacancy.meta.updated_at)
        .bind(vacancy.meta.updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(vacancy)
    }

    async fn vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let vacancy = sqlx::query_as::<_, Vacancy>("SELECT * FROM vacancies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn update_vacancy(&self, vacancy: &Vacancy, expected: DocumentStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vacancies
            SET title = $3, city = $4, position = $5, salary = $6, description = $7,
                status = $8, status_info = $9, updated_at = $10, updated_by = $11
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(vacancy.meta.id)
        .bind(expected.as_str())
        .bind(&vacancy.title)
        .bind(&vacancy.city)
        .bind(&vacancy.position)
        .bind(vacancy.salary)
        .bind(&vacancy.description)
        .bind(vacancy.meta.status.as_str())
        .bind(&vacancy.meta.status_info)
        .bind(vacancy.meta.updated_at)
        .bind(vacancy.meta.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_vacancies(&self, scope: Scope) -> Result<Vec<Vacancy>> {
        let mut qb = QueryBuilder::new("SELECT * FROM vacancies");
        push_scope(&mut qb, scope, &LISTING_COLUMNS);
        qb.push(" ORDER BY created_at DESC");

        let vacancies = qb.build_query_as::<Vacancy>().fetch_all(&self.pool).await?;
        Ok(vacancies)
    }

    async fn insert_response(&self, response: ResponseDocument) -> Result<ResponseDocument> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (
                id, owner_id, status, status_info, cv_id, vacancy_id,
                created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
            response.kind().table()
        ))
        .bind(response.meta.id)
        .bind(response.meta.owner_id)
        .bind(response.meta.status.as_str())
        .bind(&response.meta.status_info)
        .bind(response.cv_id)
        .bind(response.vacancy_id)
        .bind(response.meta.created_at)
        .bind(response.meta.updated_at)
        .bind(response.meta.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(response)
    }

    async fn response(&self, kind: ResponseKind, id: Uuid) -> Result<Option<ResponseDocument>> {
        let row = sqlx::query_as::<_, ResponseRow>(&format!(
            "{} WHERE r.id = $1",
            response_select(kind)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.into_document(kind)))
    }

    async fn response_exists(&self, kind: ResponseKind, cv_id: Uuid, vacancy_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE cv_id = $1 AND vacancy_id = $2)",
            DocumentKind::from(kind).table()
        ))
        .bind(cv_id)
        .bind(vacancy_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update_response(&self, response: &ResponseDocument, expected: DocumentStatus) -> Result<bool> {
        let result = sqlx::query(&format!(
            r#"
            UPDATE {}
            SET cv_id = $3, vacancy_id = $4, status = $5, status_info = $6,
                updated_at = $7, updated_by = $8
            WHERE id = $1 AND status = $2
            "#,
            response.kind().table()
        ))
        .bind(response.meta.id)
        .bind(expected.as_str())
        .bind(response.cv_id)
        .bind(response.vacancy_id)
        .bind(response.meta.status.as_str())
        .bind(&response.meta.status_info)
        .bind(response.meta.updated_at)
        .bind(response.meta.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_responses(&self, kind: ResponseKind, scope: Scope) -> Result<Vec<ResponseDocument>> {
        let mut qb = QueryBuilder::new(response_select(kind));
        push_scope(&mut qb, scope, &response_columns(kind));
        qb.push(" ORDER BY r.created_at DESC");

        let rows = qb.build_query_as::<ResponseRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|row| row.into_document(kind)).collect())
    }

    async fn append_message(
        &self,
        message: DocumentMessage,
        required: DocumentStatus,
    ) -> Result<Option<DocumentMessage>> {
        // status guard and insert in one statement
        let stored = sqlx::query_as::<_, DocumentMessage>(&format!(
            r#"
            INSERT INTO document_messages (id, doc_kind, doc_id, sender_id, content, created_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS (SELECT 1 FROM {} WHERE id = $3 AND status = $7)
            RETURNING *
            "#,
            message.doc_kind.table()
        ))
        .bind(message.id)
        .bind(message.doc_kind.as_str())
        .bind(message.doc_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .bind(message.created_at)
        .bind(required.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn messages(&self, doc: DocumentRef) -> Result<Vec<DocumentMessage>> {
        let messages = sqlx::query_as::<_, DocumentMessage>(
            r#"
            SELECT * FROM document_messages
            WHERE doc_kind = $1 AND doc_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(doc.kind.as_str())
        .bind(doc.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn add_favorite(&self, favorite: Favorite) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, target_kind, target_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT unique_user_target DO NOTHING
            "#,
        )
        .bind(favorite.user_id)
        .bind(DocumentKind::from(favorite.target_kind).as_str())
        .bind(favorite.target_id)
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_favorite(&self, user: Uuid, kind: ListingKind, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND target_kind = $2 AND target_id = $3",
        )
        .bind(user)
        .bind(DocumentKind::from(kind).as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn favorite_ids(&self, user: Uuid, kind: ListingKind) -> Result<HashSet<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT target_id FROM favorites WHERE user_id = $1 AND target_kind = $2",
        )
        .bind(user)
        .bind(DocumentKind::from(kind).as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn insert_news_tag(&self, tag: NewsTag) -> Result<NewsTag> {
        let tag = sqlx::query_as::<_, NewsTag>(
            "INSERT INTO news_tags (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }

    async fn news_tag(&self, id: Uuid) -> Result<Option<NewsTag>> {
        let tag = sqlx::query_as::<_, NewsTag>("SELECT id, name FROM news_tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tag)
    }

    async fn news_tags_named(&self, names: &[String]) -> Result<Vec<NewsTag>> {
        let tags = sqlx::query_as::<_, NewsTag>(
            "SELECT id, name FROM news_tags WHERE name = ANY($1) ORDER BY name",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    async fn update_news_tag(&self, tag: &NewsTag) -> Result<bool> {
        let result = sqlx::query("UPDATE news_tags SET name = $2 WHERE id = $1")
            .bind(tag.id)
            .bind(&tag.name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_news_tag(&self, id: Uuid) -> Result<bool> {
        // news_post_tags rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM news_tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_news_tags(&self) -> Result<Vec<NewsTag>> {
        let tags = sqlx::query_as::<_, NewsTag>("SELECT id, name FROM news_tags ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    async fn insert_news_post(&self, post: NewsPost) -> Result<NewsPost> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO news_posts (
                id, title, body, content_type, content, created_at, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.content_type.as_str())
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(post.updated_by)
        .execute(&mut *tx)
        .await?;
        Self::write_post_tags(&mut tx, &post).await?;
        tx.commit().await?;

        let mut stored = [post];
        self.load_post_tags(&mut stored).await?;
        let [post] = stored;
        Ok(post)
    }

    async fn news_post(&self, id: Uuid) -> Result<Option<NewsPost>> {
        let post = sqlx::query_as::<_, NewsPost>(&format!(
            "SELECT {} FROM news_posts p WHERE p.id = $1",
            NEWS_POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match post {
            Some(post) => {
                let mut found = [post];
                self.load_post_tags(&mut found).await?;
                let [post] = found;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    async fn update_news_post(&self, post: &NewsPost) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE news_posts
            SET title = $2, body = $3, content_type = $4, content = $5,
                updated_at = $6, updated_by = $7
            WHERE id = $1
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.content_type.as_str())
        .bind(&post.content)
        .bind(post.updated_at)
        .bind(post.updated_by)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if updated {
            Self::write_post_tags(&mut tx, post).await?;
        }
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_news_post(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_news_posts(&self, filter: &NewsFilter) -> Result<NewsSlice> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM news_posts p");
        push_news_filter(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {} FROM news_posts p", NEWS_POST_COLUMNS));
        push_news_filter(&mut qb, filter);
        qb.push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let mut items = qb.build_query_as::<NewsPost>().fetch_all(&self.pool).await?;
        self.load_post_tags(&mut items).await?;
        Ok(NewsSlice { items, total })
    }
}
