//! Startup sequence: restore the session, build shared services, mount.
//!
//! SYSTEM CONTEXT
//! ==============
//! `prepare` is the storage-agnostic part and runs natively in tests. `run`
//! is the browser entry point; it installs logging, prepares the context over
//! `localStorage` and mounts [`App`](crate::app::App) on the document body.
//!
//! Order matters: the session store must be restored and its credentials
//! applied before the API client is handed to any component, so the first
//! request after a reload is already authenticated.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use crate::components::icons::IconRegistry;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::state::session::SessionStore;
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// Everything the root component needs, built once before mounting.
#[derive(Clone, Debug)]
pub struct AppContext<S = BrowserStorage> {
    pub config: ClientConfig,
    pub session: SessionStore<S>,
    pub icons: IconRegistry,
    pub api: ApiClient,
}

/// Build the application context over `storage`.
pub fn prepare<S: KeyValueStore>(config: ClientConfig, storage: S) -> AppContext<S> {
    let mut session = SessionStore::restore(storage);
    let icons = IconRegistry::standard();
    let api = ApiClient::from_config(&config);
    session.init_from_storage();

    if !session.is_authenticated() {
        log::debug!("no stored session");
    }
    log::debug!("registered {} icons; api base {:?}", icons.len(), config.api_base_url);

    AppContext { config, session, icons, api }
}

/// Browser entry point.
#[cfg(feature = "csr")]
pub fn run() {
    use leptos::prelude::*;

    use crate::app::App;

    console_error_panic_hook::set_once();

    let config = ClientConfig::from_build_env().unwrap_or_else(|err| {
        leptos::logging::warn!("invalid build configuration, using defaults: {err}");
        ClientConfig::default()
    });
    if let Err(err) = console_log::init_with_level(config.log_level) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }

    let context = prepare(config, BrowserStorage);

    let probe = context.api.clone();
    leptos::task::spawn_local(async move {
        match probe.health().await {
            Ok(status) => log::info!("backend health: {status}"),
            Err(err) => log::warn!("backend health check failed: {err}"),
        }
    });

    leptos::mount::mount_to_body(move || view! { <App context=context.clone()/> });
}
