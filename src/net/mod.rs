//! Networking modules for the portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls with per-request credentials and `types` defines
//! the shared wire schema.

pub mod api;
pub mod types;
