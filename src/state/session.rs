//! Session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once at bootstrap and provided through context to the route
//! guard, the login page and API callers. The token and identity travel as one
//! `Option<Session>`, so one is never present without the other.
//!
//! ERROR HANDLING
//! ==============
//! A corrupt or half-written persisted session is treated as logged out: both
//! storage entries are purged and a warning is logged. Login failures are
//! returned to the caller unchanged and leave the store as it was.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::ApiError;
use crate::net::types::{CurrentUser, Identity, LoginResponse, Role};
use crate::util::storage::KeyValueStore;

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-serialized identity.
pub const USER_KEY: &str = "user";

/// Bearer token paired with the identity it authenticates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Authorization attached to one outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    header_value: String,
}

impl Credentials {
    pub fn bearer(token: &str) -> Self {
        Self { header_value: format!("Bearer {token}") }
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

/// Persisted session entries that cannot be restored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageParseError {
    /// The `user` entry is not a valid identity (bad JSON or unknown role).
    #[error("stored user is not a valid identity: {0}")]
    InvalidUser(String),

    /// Only one of `token` / `user` is present.
    #[error("stored {present} has no matching {missing}")]
    Unpaired { present: &'static str, missing: &'static str },
}

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The auth collaborator rejected the request (bad credentials, role
    /// mismatch, inactive account, expired token).
    #[error("authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    /// A login is already in flight; the new attempt was not sent.
    #[error("a login request is already in progress")]
    LoginInProgress,

    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(ApiError),

    /// The session context was disposed mid-operation.
    #[error("session is no longer available")]
    Unavailable,
}

impl SessionError {
    /// Map a failed login request. HTTP rejections become `Authentication`,
    /// everything else stays a transport failure.
    pub fn from_login_failure(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => Self::Authentication {
                status,
                message: message.unwrap_or_else(|| default_rejection_message(status).to_owned()),
            },
            other => Self::Transport(other),
        }
    }

    /// Text shown to the user under the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message, .. } => message.clone(),
            Self::LoginInProgress => "Signing in, please wait.".to_owned(),
            Self::Transport(err) => format!("Could not reach the server: {err}"),
            Self::Unavailable => "Session closed, reload the page.".to_owned(),
        }
    }
}

fn default_rejection_message(status: u16) -> &'static str {
    match status {
        401 => "Incorrect username, password or role.",
        403 => "Account is not active yet.",
        _ => "Sign-in was rejected.",
    }
}

/// Read the persisted session without modifying storage.
///
/// # Errors
///
/// Returns [`StorageParseError`] when the entries are unpaired or the identity
/// does not parse.
pub fn load_persisted<S: KeyValueStore>(storage: &S) -> Result<Option<Session>, StorageParseError> {
    let token = storage.get(TOKEN_KEY).filter(|token| !token.is_empty());
    match (token, storage.get(USER_KEY)) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(StorageParseError::Unpaired { present: TOKEN_KEY, missing: USER_KEY }),
        (None, Some(_)) => Err(StorageParseError::Unpaired { present: USER_KEY, missing: TOKEN_KEY }),
        (Some(token), Some(raw)) => {
            let identity = serde_json::from_str::<Identity>(&raw)
                .map_err(|e| StorageParseError::InvalidUser(e.to_string()))?;
            Ok(Some(Session { token, identity }))
        }
    }
}

/// Credentials and identity of the current user, backed by durable storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStore<S> {
    session: Option<Session>,
    /// Applied to outbound requests once set by login or `init_from_storage`.
    credentials: Option<Credentials>,
    login_pending: bool,
    storage: S,
}

impl<S> SessionStore<S> {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    /// Credentials for outbound requests, if applied.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_login_pending(&self) -> bool {
        self.login_pending
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Construct from durable storage. Unreadable entries are purged and the
    /// store starts logged out. Credentials are not applied until
    /// [`init_from_storage`](Self::init_from_storage).
    pub fn restore(mut storage: S) -> Self {
        let session = match load_persisted(&storage) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("discarding persisted session: {err}");
                storage.remove(TOKEN_KEY);
                storage.remove(USER_KEY);
                None
            }
        };
        Self { session, credentials: None, login_pending: false, storage }
    }

    /// Re-apply credentials for a restored session. Idempotent; no-op when logged out.
    pub fn init_from_storage(&mut self) {
        if let Some(session) = &self.session {
            self.credentials = Some(Credentials::bearer(&session.token));
            log::info!("restored session for {} ({})", session.identity.username, session.identity.role);
        }
    }

    /// Mark a login as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LoginInProgress`] if another login has not finished.
    pub fn begin_login(&mut self) -> Result<(), SessionError> {
        if self.login_pending {
            return Err(SessionError::LoginInProgress);
        }
        self.login_pending = true;
        Ok(())
    }

    /// Apply a successful login response: session, credentials and storage
    /// change together.
    pub fn finish_login(&mut self, response: LoginResponse) -> Identity {
        self.login_pending = false;
        let LoginResponse { access_token, user } = response;
        self.persist(&access_token, &user);
        self.credentials = Some(Credentials::bearer(&access_token));
        log::info!("signed in as {} ({})", user.username, user.role);
        self.session = Some(Session { token: access_token, identity: user.clone() });
        user
    }

    /// Clear the in-flight marker after a failed login. Session state is untouched.
    pub fn abort_login(&mut self) {
        self.login_pending = false;
    }

    /// Drop the session, credentials and both storage entries.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("signed out {}", session.identity.username);
        }
        self.credentials = None;
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Drop the session only if it is still the one holding `token`.
    /// Returns whether a logout happened.
    pub fn logout_if_token(&mut self, token: &str) -> bool {
        if self.token() != Some(token) {
            return false;
        }
        self.logout();
        true
    }

    /// Refresh profile fields from `/api/auth/me` answered for `token`.
    /// Returns `None` when logged out or when the session has since changed.
    pub fn apply_current_user(&mut self, token: &str, current: CurrentUser) -> Option<Identity> {
        let session = self.session.as_mut().filter(|session| session.token == token)?;
        let identity = &mut session.identity;
        identity.id = current.id;
        identity.username = current.username;
        identity.role = current.role;
        identity.display_name = current.display_name;

        let (token, identity) = (session.token.clone(), identity.clone());
        self.persist(&token, &identity);
        Some(identity)
    }

    fn persist(&mut self, token: &str, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(raw) => {
                self.storage.set(TOKEN_KEY, token);
                self.storage.set(USER_KEY, &raw);
            }
            Err(err) => log::warn!("session not persisted: {err}"),
        }
    }
}
