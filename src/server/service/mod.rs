//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and wrap every multi-step mutation in a
//! database transaction so no half-applied state is ever observable: chore
//! creation and roster replacement in [`rotation`], and the two-table
//! shopping-ledger operations in [`shopping`].

pub mod apartment;
pub mod auth;
pub mod rotation;
pub mod shopping;
