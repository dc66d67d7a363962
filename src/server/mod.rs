//! Server application core modules.
//!
//! This module contains all server-side functionality for the Hearth application, including
//! HTTP routing, token authentication, database repositories, and the business services for
//! apartments, events, the shared shopping ledger, and the chore rotation engine.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
