//! Portal chrome shared by the student, teacher and admin route trees.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every portal route renders inside this layout, so the navigation guard runs
//! here before any child view. The guard decision is a memo over the router
//! location and the session signal: it re-evaluates on each navigation and
//! whenever the session changes.

#[cfg(test)]
#[path = "portal_layout_test.rs"]
mod portal_layout_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::{A, Outlet, Redirect};
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::SessionContext;
use crate::components::icons::{Icon, icon_for_segment};
use crate::components::notification_bell::NotificationBell;
use crate::net::types::Role;
use crate::router::guard::{Navigation, full_path, guard};
use crate::router::routes;
use crate::state::login::SessionHandle;
use crate::state::session::SessionStore;
use crate::util::storage::KeyValueStore;

/// Layout for one role's portal; redirects instead of rendering when the guard refuses.
#[component]
pub fn PortalLayout(role: Role) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let location = use_location();
    let leaving = RwSignal::new(false);

    let navigation = Memo::new(move |_| {
        let path = full_path(&location.pathname.get(), &location.search.get());
        session.with(|store| guard(store, &path))
    });

    let display_name = move || {
        session.with(|store| store.identity().map(|identity| identity.display_name.clone()).unwrap_or_default())
    };
    let must_change_password = move || {
        session.with(|store| store.identity().and_then(|identity| identity.must_change_password).unwrap_or(false))
    };

    move || match navigation.get() {
        // Signing out navigates itself; a guard redirect here would add a resume query.
        _ if leaving.get() => ().into_any(),
        Navigation::Redirect(redirect) => view! { <Redirect path=redirect.href()/> }.into_any(),
        Navigation::Allow => view! {
            <div class="portal" data-role=role.as_str()>
                <aside class="portal-nav">
                    <h1 class="portal-nav__title">{role.label()}" portal"</h1>
                    <nav class="portal-nav__links">
                        {routes::portal_routes(role)
                            .map(|route| {
                                view! {
                                    <A href=route.path>
                                        <Icon name=icon_for_segment(route.segment())/>
                                        <span>{route.title()}</span>
                                    </A>
                                }
                            })
                            .collect_view()}
                    </nav>
                </aside>
                <div class="portal-main">
                    <header class="portal-header">
                        <span class="portal-header__user">{display_name}</span>
                        <NotificationBell/>
                        <LogoutButton leaving=leaving/>
                    </header>
                    <Show when=must_change_password>
                        <p class="portal-notice">
                            <Icon name="Warning"/>
                            "Your account still uses its initial password. Change it from your profile."
                        </p>
                    </Show>
                    <main class="portal-content">
                        <Outlet/>
                    </main>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Leave for the login page, then clear the session.
///
/// Navigating first means no portal guard ever evaluates a logged-out store
/// for the page being left, so `/login` is reached without a `redirect` query.
pub(crate) fn sign_out<S, H>(session: &H, leave: impl FnOnce(&str))
where
    S: KeyValueStore,
    H: SessionHandle<S>,
{
    leave(routes::LOGIN.path);
    session.with_store(SessionStore::logout);
}

#[component]
fn LogoutButton(leaving: RwSignal<bool>) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        leaving.set(true);
        sign_out(&session, |path| navigate(path, NavigateOptions::default()));
    };

    view! {
        <button class="portal-header__logout" type="button" on:click=on_logout>
            <Icon name="SwitchButton"/>
            "Sign out"
        </button>
    }
}
