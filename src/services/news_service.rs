//! Staff-managed news feed: tags, posts, and the public listing.

use std::sync::Arc;

use uuid::Uuid;

use crate::dto::news_dto::{
    NewsDetail, NewsPage, NewsPostPayload, NewsPostResponse, NewsQuery, NewsSummary, NewsTagPayload,
};
use crate::error::{Error, Result};
use crate::models::news::{ContentType, NewsFilter, NewsPost, NewsSlice, NewsTag};
use crate::models::user::{Actor, Role};
use crate::store::Store;
use crate::utils::time;

#[derive(Clone)]
pub struct NewsService {
    store: Arc<dyn Store>,
}

fn require_staff(actor: &Actor) -> Result<()> {
    if actor.is_superuser || actor.role == Role::Moderator {
        Ok(())
    } else {
        Err(Error::Forbidden("news is managed by staff".to_string()))
    }
}

fn tag_taken(err: Error) -> Error {
    match err {
        Error::Conflict(_) => Error::validation("name", "Tag already exists!"),
        other => other,
    }
}

fn page<T: From<NewsPost>>(slice: NewsSlice, filter: &NewsFilter) -> NewsPage<T> {
    NewsPage {
        items: slice.items.into_iter().map(T::from).collect(),
        total: slice.total,
        limit: filter.limit,
        offset: filter.offset,
    }
}

impl NewsService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn load_post(&self, id: Uuid) -> Result<NewsPost> {
        self.store
            .news_post(id)
            .await?
            .ok_or_else(|| Error::NotFound("news post not found".to_string()))
    }

    async fn load_tag(&self, id: Uuid) -> Result<NewsTag> {
        self.store
            .news_tag(id)
            .await?
            .ok_or_else(|| Error::NotFound("news tag not found".to_string()))
    }

    /// Resolves tag names, failing on the first unknown one.
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<NewsTag>> {
        let tags = self.store.news_tags_named(names).await?;
        match names.iter().find(|name| !tags.iter().any(|tag| &tag.name == *name)) {
            Some(missing) => Err(Error::validation(
                "tags",
                format!("Object with name={} does not exist.", missing),
            )),
            None => Ok(tags),
        }
    }

    pub async fn public_list(&self, query: NewsQuery) -> Result<NewsPage<NewsSummary>> {
        let filter = NewsFilter::from(query);
        let slice = self.store.list_news_posts(&filter).await?;
        Ok(page(slice, &filter))
    }

    pub async fn public_get(&self, id: Uuid) -> Result<NewsDetail> {
        Ok(self.load_post(id).await?.into())
    }

    /// Staff view of the listing, readable by any signed-in user.
    pub async fn list_posts(&self, query: NewsQuery) -> Result<NewsPage<NewsPostResponse>> {
        let filter = NewsFilter::from(query);
        let slice = self.store.list_news_posts(&filter).await?;
        Ok(page(slice, &filter))
    }

    pub async fn get_post(&self, id: Uuid) -> Result<NewsPostResponse> {
        Ok(self.load_post(id).await?.into())
    }

    pub async fn create_post(&self, actor: &Actor, payload: NewsPostPayload) -> Result<NewsPostResponse> {
        require_staff(actor)?;
        let content_type: ContentType = payload.content_type.parse()?;
        let tags = self.resolve_tags(&payload.tags).await?;

        let now = time::now();
        let post = self
            .store
            .insert_news_post(NewsPost {
                id: Uuid::new_v4(),
                title: payload.title,
                body: payload.body,
                content_type,
                content: payload.content,
                tags,
                created_at: now,
                updated_at: now,
                updated_by: actor.user_id,
            })
            .await?;

        tracing::info!(post_id = %post.id, actor = %actor.user_id, "news post created");
        Ok(post.into())
    }

    pub async fn update_post(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: NewsPostPayload,
    ) -> Result<NewsPostResponse> {
        require_staff(actor)?;
        let mut post = self.load_post(id).await?;
        post.content_type = payload.content_type.parse()?;
        post.tags = self.resolve_tags(&payload.tags).await?;
        post.title = payload.title;
        post.body = payload.body;
        post.content = payload.content;
        post.updated_at = time::now();
        post.updated_by = actor.user_id;

        if !self.store.update_news_post(&post).await? {
            return Err(Error::NotFound("news post not found".to_string()));
        }
        tracing::info!(post_id = %post.id, actor = %actor.user_id, "news post updated");
        Ok(self.load_post(id).await?.into())
    }

    pub async fn delete_post(&self, actor: &Actor, id: Uuid) -> Result<()> {
        require_staff(actor)?;
        if !self.store.delete_news_post(id).await? {
            return Err(Error::NotFound("news post not found".to_string()));
        }
        tracing::info!(post_id = %id, actor = %actor.user_id, "news post deleted");
        Ok(())
    }

    pub async fn list_tags(&self) -> Result<Vec<NewsTag>> {
        self.store.list_news_tags().await
    }

    pub async fn get_tag(&self, id: Uuid) -> Result<NewsTag> {
        self.load_tag(id).await
    }

    pub async fn create_tag(&self, actor: &Actor, payload: NewsTagPayload) -> Result<NewsTag> {
        require_staff(actor)?;
        let tag = self
            .store
            .insert_news_tag(NewsTag {
                id: Uuid::new_v4(),
                name: payload.name,
            })
            .await
            .map_err(tag_taken)?;
        tracing::info!(tag_id = %tag.id, actor = %actor.user_id, "news tag created");
        Ok(tag)
    }

    pub async fn update_tag(&self, actor: &Actor, id: Uuid, payload: NewsTagPayload) -> Result<NewsTag> {
        require_staff(actor)?;
        let mut tag = self.load_tag(id).await?;
        tag.name = payload.name;
        if !self.store.update_news_tag(&tag).await.map_err(tag_taken)? {
            return Err(Error::NotFound("news tag not found".to_string()));
        }
        Ok(tag)
    }

    pub async fn delete_tag(&self, actor: &Actor, id: Uuid) -> Result<()> {
        require_staff(actor)?;
        if !self.store.delete_news_tag(id).await? {
            return Err(Error::NotFound("news tag not found".to_string()));
        }
        tracing::info!(tag_id = %id, actor = %actor.user_id, "news tag deleted");
        Ok(())
    }
}
