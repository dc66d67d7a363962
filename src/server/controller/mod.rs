pub mod apartment;
pub mod auth;
pub mod chore;
pub mod event;
pub mod shopping;
