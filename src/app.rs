//! Root application component with routing and context providers.
//!
//! ARCHITECTURE
//! ============
//! `App` turns the prepared [`AppContext`] into Leptos context: the session
//! store becomes a shared signal, and the icon registry, API client and config
//! are provided as plain values. Route declarations mirror
//! [`router::routes::ROUTES`](crate::router::routes::ROUTES); each portal tree
//! is wrapped in [`PortalLayout`], which runs the navigation guard.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{StaticSegment, WildcardSegment};
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};

use crate::bootstrap::AppContext;
use crate::components::portal_layout::PortalLayout;
use crate::net::types::Role;
use crate::pages::login::LoginPage;
use crate::pages::section::{NotFoundPage, SectionPage};
use crate::router::routes;
use crate::state::login::refresh_identity;
use crate::state::session::SessionStore;
use crate::util::storage::BrowserStorage;

/// Session store shared through Leptos context.
pub type SessionContext = RwSignal<SessionStore<BrowserStorage>>;

#[component]
pub fn App(context: AppContext) -> impl IntoView {
    provide_meta_context();

    let AppContext { config, session, icons, api } = context;
    let restored = session.is_authenticated();
    let session: SessionContext = RwSignal::new(session);
    provide_context(session);
    provide_context(icons);
    provide_context(api.clone());
    provide_context(config);

    if restored {
        leptos::task::spawn_local(async move {
            if let Err(err) = refresh_identity(&session, &api).await {
                log::warn!("keeping stored identity: {err}");
            }
        });
    }

    view! {
        <Title text="Campus Portal"/>
        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::ROOT_REDIRECT/> }/>

                <ParentRoute path=StaticSegment("student") view=|| view! { <PortalLayout role=Role::Student/> }>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::STUDENT_DASHBOARD.path/> }/>
                    <Route path=StaticSegment("dashboard") view=|| view! { <SectionPage name="student-dashboard"/> }/>
                    <Route path=StaticSegment("projects") view=|| view! { <SectionPage name="student-projects"/> }/>
                    <Route path=StaticSegment("cooperation") view=|| view! { <SectionPage name="student-cooperation"/> }/>
                    <Route path=StaticSegment("profile") view=|| view! { <SectionPage name="student-profile"/> }/>
                    <Route path=StaticSegment("resources") view=|| view! { <SectionPage name="student-resources"/> }/>
                    <Route path=StaticSegment("forum") view=|| view! { <SectionPage name="student-forum"/> }/>
                    <Route path=StaticSegment("teamup") view=|| view! { <SectionPage name="student-teamup"/> }/>
                    <Route path=StaticSegment("messages") view=|| view! { <SectionPage name="student-messages"/> }/>
                    <Route path=WildcardSegment("rest") view=NotFoundPage/>
                </ParentRoute>

                <ParentRoute path=StaticSegment("teacher") view=|| view! { <PortalLayout role=Role::Teacher/> }>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::TEACHER_DASHBOARD.path/> }/>
                    <Route path=StaticSegment("dashboard") view=|| view! { <SectionPage name="teacher-dashboard"/> }/>
                    <Route path=StaticSegment("posts") view=|| view! { <SectionPage name="teacher-posts"/> }/>
                    <Route path=StaticSegment("students") view=|| view! { <SectionPage name="teacher-students"/> }/>
                    <Route path=StaticSegment("projects") view=|| view! { <SectionPage name="teacher-projects"/> }/>
                    <Route path=StaticSegment("resources") view=|| view! { <SectionPage name="teacher-resources"/> }/>
                    <Route path=StaticSegment("forum") view=|| view! { <SectionPage name="teacher-forum"/> }/>
                    <Route path=StaticSegment("teamup") view=|| view! { <SectionPage name="teacher-teamup"/> }/>
                    <Route path=StaticSegment("messages") view=|| view! { <SectionPage name="teacher-messages"/> }/>
                    <Route path=WildcardSegment("rest") view=NotFoundPage/>
                </ParentRoute>

                <ParentRoute path=StaticSegment("admin") view=|| view! { <PortalLayout role=Role::Admin/> }>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::ADMIN_DASHBOARD.path/> }/>
                    <Route path=StaticSegment("dashboard") view=|| view! { <SectionPage name="admin-dashboard"/> }/>
                    <Route path=StaticSegment("analytics") view=|| view! { <SectionPage name="admin-analytics"/> }/>
                    <Route path=StaticSegment("users") view=|| view! { <SectionPage name="admin-users"/> }/>
                    <Route path=StaticSegment("projects") view=|| view! { <SectionPage name="admin-projects"/> }/>
                    <Route path=WildcardSegment("rest") view=NotFoundPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
