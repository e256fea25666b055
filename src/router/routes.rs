//! Static route table for the three portals.
//!
//! Every portal child inherits its parent's metadata: authentication is
//! required and the portal's role must match. Paths under a portal prefix that
//! name no child still carry the portal metadata, so the guard protects them
//! before the not-found view renders.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::Role;

/// Path `/` redirects here.
pub const ROOT_REDIRECT: &str = "/login";

/// Navigation requirements attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, role: None };

    pub const fn portal(role: Role) -> Self {
        Self { requires_auth: true, role: Some(role) }
    }
}

/// A named, navigable route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

impl RouteDef {
    /// Last path segment, e.g. `"dashboard"` for `/student/dashboard`.
    pub fn segment(&self) -> &'static str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }

    /// Navigation label.
    pub fn title(&self) -> &'static str {
        match self.segment() {
            "login" => "Sign in",
            "dashboard" => "Dashboard",
            "projects" => "Projects",
            "cooperation" => "Cooperation",
            "profile" => "Profile",
            "resources" => "Resources",
            "forum" => "Forum",
            "teamup" => "Team up",
            "messages" => "Messages",
            "posts" => "Posts",
            "students" => "Students",
            "analytics" => "Analytics",
            "users" => "Users",
            other => other,
        }
    }
}

const fn portal(role: Role, path: &'static str, name: &'static str) -> RouteDef {
    RouteDef { path, name, meta: RouteMeta::portal(role) }
}

pub const LOGIN: RouteDef = RouteDef { path: "/login", name: "login", meta: RouteMeta::PUBLIC };

pub const STUDENT_DASHBOARD: RouteDef = portal(Role::Student, "/student/dashboard", "student-dashboard");
pub const TEACHER_DASHBOARD: RouteDef = portal(Role::Teacher, "/teacher/dashboard", "teacher-dashboard");
pub const ADMIN_DASHBOARD: RouteDef = portal(Role::Admin, "/admin/dashboard", "admin-dashboard");

pub static ROUTES: &[RouteDef] = &[
    LOGIN,
    STUDENT_DASHBOARD,
    portal(Role::Student, "/student/projects", "student-projects"),
    portal(Role::Student, "/student/cooperation", "student-cooperation"),
    portal(Role::Student, "/student/profile", "student-profile"),
    portal(Role::Student, "/student/resources", "student-resources"),
    portal(Role::Student, "/student/forum", "student-forum"),
    portal(Role::Student, "/student/teamup", "student-teamup"),
    portal(Role::Student, "/student/messages", "student-messages"),
    TEACHER_DASHBOARD,
    portal(Role::Teacher, "/teacher/posts", "teacher-posts"),
    portal(Role::Teacher, "/teacher/students", "teacher-students"),
    portal(Role::Teacher, "/teacher/projects", "teacher-projects"),
    portal(Role::Teacher, "/teacher/resources", "teacher-resources"),
    portal(Role::Teacher, "/teacher/forum", "teacher-forum"),
    portal(Role::Teacher, "/teacher/teamup", "teacher-teamup"),
    portal(Role::Teacher, "/teacher/messages", "teacher-messages"),
    ADMIN_DASHBOARD,
    portal(Role::Admin, "/admin/analytics", "admin-analytics"),
    portal(Role::Admin, "/admin/users", "admin-users"),
    portal(Role::Admin, "/admin/projects", "admin-projects"),
];

/// Landing route for a role.
pub fn dashboard_for(role: Role) -> &'static RouteDef {
    match role {
        Role::Student => &STUDENT_DASHBOARD,
        Role::Teacher => &TEACHER_DASHBOARD,
        Role::Admin => &ADMIN_DASHBOARD,
    }
}

/// Path prefix of a role's portal.
pub fn portal_prefix(role: Role) -> &'static str {
    match role {
        Role::Student => "/student",
        Role::Teacher => "/teacher",
        Role::Admin => "/admin",
    }
}

/// Routes nested under a role's portal, in navigation order.
pub fn portal_routes(role: Role) -> impl Iterator<Item = &'static RouteDef> {
    ROUTES.iter().filter(move |route| route.meta.role == Some(role))
}

pub fn by_name(name: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|route| route.name == name)
}

/// Strip query and fragment, and a trailing slash on non-root paths.
pub fn normalize_path(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    let path = &full_path[..end];
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

/// Exact route match for a path that may carry a query string.
pub fn resolve(full_path: &str) -> Option<&'static RouteDef> {
    let path = normalize_path(full_path);
    ROUTES.iter().find(|route| route.path == path)
}

/// Metadata the guard applies to `full_path`.
pub fn meta_for(full_path: &str) -> RouteMeta {
    if let Some(route) = resolve(full_path) {
        return route.meta;
    }
    let path = normalize_path(full_path);
    Role::ALL
        .into_iter()
        .find(|role| within_prefix(path, portal_prefix(*role)))
        .map_or(RouteMeta::PUBLIC, RouteMeta::portal)
}

fn within_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
