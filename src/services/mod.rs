pub mod cv_service;
pub mod document_service;
pub mod favorite_service;
pub mod news_service;
pub mod notification_service;
pub mod profile_service;
pub mod response_service;
pub mod vacancy_service;
