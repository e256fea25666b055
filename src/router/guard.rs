//! Navigation guard evaluated before every route renders.
//!
//! Rules, in order:
//! 1. routes without `requires_auth` are always allowed;
//! 2. no session redirects to `login?redirect=<attempted path>`;
//! 3. a portal of another role redirects to the session role's dashboard;
//! 4. anything else is allowed.
//!
//! A mismatch never dead-ends: every outcome is either the requested route or
//! a route the current session can open.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{self, RouteDef, RouteMeta};
use crate::state::session::{Session, SessionStore};
use crate::util::auth::REDIRECT_QUERY_KEY;

/// Outcome of a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Redirect),
}

/// Replacement navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Target route name.
    pub name: &'static str,
    pub path: &'static str,
    /// Originally requested path, resumed after login.
    pub resume: Option<String>,
}

impl Redirect {
    fn to(route: &RouteDef) -> Self {
        Self { name: route.name, path: route.path, resume: None }
    }

    fn to_login(attempted: &str) -> Self {
        Self { resume: Some(attempted.to_owned()), ..Self::to(&routes::LOGIN) }
    }

    /// Href including the `redirect` query when resuming.
    pub fn href(&self) -> String {
        match &self.resume {
            Some(target) => format!("{}?{REDIRECT_QUERY_KEY}={}", self.path, urlencoding::encode(target)),
            None => self.path.to_owned(),
        }
    }
}

/// Decide a navigation to `full_path` given its metadata and the current session.
pub fn evaluate(meta: RouteMeta, full_path: &str, session: Option<&Session>) -> Navigation {
    if !meta.requires_auth {
        return Navigation::Allow;
    }

    let Some(session) = session else {
        log::debug!("guard: {full_path} requires a session; redirecting to login");
        return Navigation::Redirect(Redirect::to_login(full_path));
    };

    match meta.role {
        Some(required) if required != session.identity.role => {
            let home = routes::dashboard_for(session.identity.role);
            log::debug!(
                "guard: {full_path} is for {required}, session is {}; redirecting to {}",
                session.identity.role,
                home.name
            );
            Navigation::Redirect(Redirect::to(home))
        }
        _ => Navigation::Allow,
    }
}

/// Guard a navigation against the session store, resolving metadata from the route table.
pub fn guard<S>(store: &SessionStore<S>, full_path: &str) -> Navigation {
    evaluate(routes::meta_for(full_path), full_path, store.session())
}

/// Join a router location's path and search into the full path the guard sees.
pub fn full_path(pathname: &str, search: &str) -> String {
    match search {
        "" | "?" => pathname.to_owned(),
        s if s.starts_with('?') => format!("{pathname}{s}"),
        s => format!("{pathname}?{s}"),
    }
}
