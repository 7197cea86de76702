use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{PolicyTable, Verb};
use crate::error::{Error, Result};
use crate::models::cv::Cv;
use crate::models::document::{Document, DocumentRef, ListingKind, Listed};
use crate::models::employer::Employer;
use crate::models::favorite::Favorite;
use crate::models::user::Actor;
use crate::models::vacancy::Vacancy;
use crate::store::Store;
use crate::utils::time;

/// Favorites of one kind, restricted to what the caller can currently see.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FavoriteListing {
    Employers(Vec<Listed<Employer>>),
    Cvs(Vec<Listed<Cv>>),
    Vacancies(Vec<Listed<Vacancy>>),
}

pub(crate) fn annotate<T: Document>(items: Vec<T>, favorites: &HashSet<Uuid>) -> Vec<Listed<T>> {
    items
        .into_iter()
        .map(|item| {
            let is_favorite = favorites.contains(&item.meta().id);
            Listed { item, is_favorite }
        })
        .collect()
}

fn only_favorites<T: Document>(items: Vec<T>, favorites: &HashSet<Uuid>) -> Vec<Listed<T>> {
    annotate(items, favorites)
        .into_iter()
        .filter(|listed| listed.is_favorite)
        .collect()
}

#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn Store>,
    policy: Arc<PolicyTable>,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn Store>, policy: Arc<PolicyTable>) -> Self {
        Self { store, policy }
    }

    async fn ensure_readable(&self, actor: &Actor, kind: ListingKind, id: Uuid) -> Result<()> {
        let doc = DocumentRef::new(kind, id);
        let subject = self
            .store
            .subject(doc)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} not found", doc.kind)))?;
        self.policy.authorize(actor, Verb::Read, &subject)
    }

    /// Returns `true` when the favorite was newly added.
    pub async fn add(&self, actor: &Actor, kind: ListingKind, id: Uuid) -> Result<bool> {
        self.ensure_readable(actor, kind, id).await?;
        let created = self
            .store
            .add_favorite(Favorite {
                user_id: actor.user_id,
                target_kind: kind,
                target_id: id,
                created_at: time::now(),
            })
            .await?;
        if created {
            tracing::debug!(user = %actor.user_id, ?kind, target = %id, "favorite added");
        }
        Ok(created)
    }

    pub async fn remove(&self, actor: &Actor, kind: ListingKind, id: Uuid) -> Result<bool> {
        self.ensure_readable(actor, kind, id).await?;
        self.store.remove_favorite(actor.user_id, kind, id).await
    }

    pub async fn ids(&self, actor: &Actor, kind: ListingKind) -> Result<HashSet<Uuid>> {
        self.store.favorite_ids(actor.user_id, kind).await
    }

    pub async fn list(&self, actor: &Actor, kind: ListingKind) -> Result<FavoriteListing> {
        let favorites = self.ids(actor, kind).await?;
        let scope = self.policy.visible_scope(actor, kind.into());

        let listing = match kind {
            ListingKind::Employer => FavoriteListing::Employers(only_favorites(
                self.store.list_employers(scope).await?,
                &favorites,
            )),
            ListingKind::Cv => {
                FavoriteListing::Cvs(only_favorites(self.store.list_cvs(scope).await?, &favorites))
            }
            ListingKind::Vacancy => FavoriteListing::Vacancies(only_favorites(
                self.store.list_vacancies(scope).await?,
                &favorites,
            )),
        };
        Ok(listing)
    }
}
