pub mod cv;
pub mod document;
pub mod employee;
pub mod employer;
pub mod favorite;
pub mod message;
pub mod news;
pub mod response;
pub mod status;
pub mod user;
pub mod vacancy;
