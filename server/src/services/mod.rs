//! Persistence-backed services for the portal

mod course_store;
mod credential_store;

pub use course_store::CourseStore;
pub use credential_store::CredentialStore;
