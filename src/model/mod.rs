//! Shared data-transfer objects for the HTTP API.

pub mod api;
pub mod apartment;
pub mod auth;
pub mod chore;
pub mod event;
pub mod shopping;
