pub mod auth;
pub mod bulk;
pub mod usecase;
