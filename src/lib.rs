//! # campus-portal
//!
//! Leptos + WASM frontend for the student / teacher / admin education portal.
//!
//! This crate contains the session store (bearer token + identity persisted to
//! `localStorage`), the static route table and its navigation guard, the REST
//! client for the backend, and the bootstrap sequence that mounts the root
//! component. Browser glue is gated behind the `csr` feature so the session and
//! routing logic builds and tests natively.

pub mod app;
pub mod bootstrap;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// WASM entry point: compose the client and mount it to `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    bootstrap::run();
}
