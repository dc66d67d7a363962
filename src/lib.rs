//! Hearth: a REST backend for shared-apartment household management.
//!
//! Manages apartments and their residents, calendar events, a shared shopping
//! list, and a rotating chore-assignment scheduler, backed by a relational
//! database through sea-orm.

pub mod model;
pub mod server;
