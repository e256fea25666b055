//! Shared auth navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard sends unauthenticated users to `/login?redirect=<path>`;
//! the login page uses these helpers to resume that navigation once signed in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Role;
use crate::router::routes;

/// Query parameter carrying the originally requested path.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// True for same-origin absolute paths. Rejects scheme-relative (`//host`)
/// and backslash tricks that browsers normalize into another origin.
pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

/// Where to go after a successful login: the resumed `redirect` target when it
/// is local, otherwise the role's dashboard.
pub fn post_login_destination(redirect: Option<&str>, role: Role) -> String {
    match redirect.map(str::trim) {
        Some(target) if is_local_path(target) => target.to_owned(),
        _ => routes::dashboard_for(role).path.to_owned(),
    }
}
