//! Data access layer repositories.
//!
//! One repository per table-ish domain, each generic over [`sea_orm::ConnectionTrait`]
//! so the same methods run against a plain connection or inside a transaction. All
//! values are parameterized by sea-orm; table and column identifiers are entity
//! constants and never derived from request input.

pub mod apartment;
pub mod chore;
pub mod event;
pub mod membership;
pub mod resident;
pub mod shopping;
