//! Route table and navigation guard.
//!
//! ARCHITECTURE
//! ============
//! `routes` is the static description of every navigable path; `guard` is a
//! pure function over that description and the session. Leptos components
//! call the guard while rendering, so it runs on every navigation, including
//! the first.

pub mod guard;
pub mod routes;
