//! Server-only models: shared application state and token authentication.

pub mod app;
pub mod auth;
