pub mod cv;
pub mod document;
pub mod employer;
pub mod health;
pub mod news;
pub mod profile;
pub mod public;
pub mod response;
pub mod vacancy;
