pub mod config;
pub mod database;
pub mod dto;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::engine::PolicyTable;
use crate::middleware::{auth::require_actor, rate_limit};
use crate::models::document::{DocumentKind, ListingKind, ResponseKind};
use crate::services::{
    cv_service::CvService, document_service::DocumentService, favorite_service::FavoriteService,
    news_service::NewsService, notification_service::Notifier, profile_service::ProfileService,
    response_service::ResponseService, vacancy_service::VacancyService,
};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: Arc<str>,
    pub document_service: DocumentService,
    pub profile_service: ProfileService,
    pub cv_service: CvService,
    pub vacancy_service: VacancyService,
    pub response_service: ResponseService,
    pub favorite_service: FavoriteService,
    pub news_service: NewsService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        policy: PolicyTable,
        notifier: Arc<dyn Notifier>,
        jwt_secret: &str,
    ) -> Self {
        let policy = Arc::new(policy);

        Self {
            jwt_secret: Arc::from(jwt_secret),
            document_service: DocumentService::new(store.clone(), policy.clone(), notifier.clone()),
            profile_service: ProfileService::new(store.clone(), policy.clone()),
            cv_service: CvService::new(store.clone(), policy.clone()),
            vacancy_service: VacancyService::new(store.clone(), policy.clone()),
            response_service: ResponseService::new(store.clone(), policy.clone(), notifier),
            favorite_service: FavoriteService::new(store.clone(), policy),
            news_service: NewsService::new(store),
        }
    }
}

/// Requests per second allowed through each router.
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub api_rps: u32,
    pub public_rps: u32,
}

pub fn build_router(state: AppState, limits: RateLimits) -> Router {
    use crate::routes::{cv, document, employer, health, news, profile, public, response, vacancy};

    let api = Router::new()
        .route(
            "/employee/profile",
            get(profile::get_employee_profile)
                .post(profile::create_employee_profile)
                .put(profile::update_employee_profile),
        )
        .route(
            "/employer/profile",
            get(profile::get_employer_profile)
                .post(employer::create_employer)
                .put(profile::update_employer_profile),
        )
        .route(
            "/employers",
            get(employer::list_employers).post(employer::create_employer),
        )
        .route(
            "/employers/:id",
            get(employer::get_employer)
                .put(employer::update_employer)
                .delete(employer::delete_employer),
        )
        .route("/employers/:id/status", document::status_route(DocumentKind::Employer))
        .route("/employers/:id/favorite", document::favorite_route(ListingKind::Employer))
        .route("/cvs", get(cv::list_cvs).post(cv::create_cv))
        .route(
            "/cvs/:id",
            get(cv::get_cv).put(cv::update_cv).delete(cv::delete_cv),
        )
        .route("/cvs/:id/status", document::status_route(DocumentKind::Cv))
        .route("/cvs/:id/favorite", document::favorite_route(ListingKind::Cv))
        .route(
            "/vacancies",
            get(vacancy::list_vacancies).post(vacancy::create_vacancy),
        )
        .route(
            "/vacancies/:id",
            get(vacancy::get_vacancy)
                .put(vacancy::update_vacancy)
                .delete(vacancy::delete_vacancy),
        )
        .route("/vacancies/:id/status", document::status_route(DocumentKind::Vacancy))
        .route("/vacancies/:id/favorite", document::favorite_route(ListingKind::Vacancy))
        .route("/favorites/:kind", get(document::list_favorites))
        .nest("/cv-responses", response::routes(ResponseKind::Cv))
        .nest("/vacancy-responses", response::routes(ResponseKind::Vacancy))
        .route("/news/tags", get(news::list_tags).post(news::create_tag))
        .route(
            "/news/tags/:id",
            get(news::get_tag).put(news::update_tag).delete(news::delete_tag),
        )
        .route("/news/posts", get(news::list_posts).post(news::create_post))
        .route(
            "/news/posts/:id",
            get(news::get_post).put(news::update_post).delete(news::delete_post),
        )
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_actor))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(limits.api_rps),
            rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route("/public/employers", get(public::list_public_employers))
        .route("/public/employers/:id", get(public::get_public_employer))
        .route("/public/vacancies", get(public::list_public_vacancies))
        .route("/public/vacancies/:id", get(public::get_public_vacancy))
        .route("/public/news", get(news::list_public_news))
        .route("/public/news/:id", get(news::get_public_news))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(limits.public_rps),
            rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api.merge(public_api))
        .with_state(state)
}
