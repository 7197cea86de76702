pub mod cv_dto;
pub mod document_dto;
pub mod news_dto;
pub mod profile_dto;
pub mod response_dto;
pub mod vacancy_dto;
