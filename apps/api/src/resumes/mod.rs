//! Resume upload, review and optimization API.

pub mod handlers;
pub mod scoring;
pub mod store;
