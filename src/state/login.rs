//! Async session operations: login and identity refresh.
//!
//! The store is never borrowed across an await. Each flow takes one short
//! mutable borrow before its request and another after it, through
//! [`SessionHandle`], which is implemented for the Leptos signal provided at
//! bootstrap and for a plain `RefCell`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::cell::RefCell;

use leptos::prelude::{RwSignal, Update};

use super::session::{SessionError, SessionStore};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{Identity, LoginRequest};
use crate::util::storage::KeyValueStore;

/// Shared access to a session store.
pub trait SessionHandle<S> {
    /// Run `f` against the store. `None` when the handle has been disposed.
    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> Option<R>;
}

impl<S> SessionHandle<S> for RefCell<SessionStore<S>> {
    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<S: Send + Sync + 'static> SessionHandle<S> for RwSignal<SessionStore<S>> {
    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Sign in with the auth collaborator and store the resulting session.
///
/// # Errors
///
/// - [`SessionError::LoginInProgress`] if another login is in flight
/// - [`SessionError::Authentication`] if the credentials are rejected
/// - [`SessionError::Transport`] if no usable response arrives
pub async fn login<S, H, A>(handle: &H, api: &A, request: LoginRequest) -> Result<Identity, SessionError>
where
    S: KeyValueStore,
    H: SessionHandle<S>,
    A: AuthApi,
{
    handle
        .with_store(SessionStore::begin_login)
        .ok_or(SessionError::Unavailable)??;

    match api.login(&request).await {
        Ok(response) => handle
            .with_store(|store| store.finish_login(response))
            .ok_or(SessionError::Unavailable),
        Err(err) => {
            handle.with_store(SessionStore::abort_login);
            log::warn!("login for {} as {} failed: {err}", request.username, request.role);
            Err(SessionError::from_login_failure(err))
        }
    }
}

/// Re-read the identity from `/api/auth/me` with the current credentials.
///
/// Returns `Ok(None)` when there is no session, when the backend rejects
/// the token (the session is then logged out), or when the session changed
/// while the request was in flight (the answer is discarded).
///
/// # Errors
///
/// Returns [`SessionError::Transport`] for other failures; the session is kept.
pub async fn refresh_identity<S, H, A>(handle: &H, api: &A) -> Result<Option<Identity>, SessionError>
where
    S: KeyValueStore,
    H: SessionHandle<S>,
    A: AuthApi,
{
    let pending = handle
        .with_store(|store| Some((store.token()?.to_owned(), store.credentials()?.clone())))
        .ok_or(SessionError::Unavailable)?;
    let Some((token, credentials)) = pending else {
        return Ok(None);
    };

    // The answer only applies to the session the request was sent for.
    match api.current_user(&credentials).await {
        Ok(current) => handle
            .with_store(|store| store.apply_current_user(&token, current))
            .ok_or(SessionError::Unavailable),
        Err(ApiError::Status { status: 401, .. }) => {
            if handle.with_store(|store| store.logout_if_token(&token)) == Some(true) {
                log::info!("stored session was rejected; signing out");
            }
            Ok(None)
        }
        Err(err) => {
            log::warn!("identity refresh failed: {err}");
            Err(SessionError::Transport(err))
        }
    }
}
