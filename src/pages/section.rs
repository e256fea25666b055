//! Placeholder views for portal sections and unknown paths.

use leptos::prelude::*;

use crate::components::icons::{Icon, icon_for_segment};
use crate::router::routes;

/// Heading for a named portal route; section content is served by its own views.
#[component]
pub fn SectionPage(name: &'static str) -> impl IntoView {
    let route = routes::by_name(name);
    let title = route.map_or(name, |route| route.title());
    let icon = route.map_or("Document", |route| icon_for_segment(route.segment()));

    view! {
        <section class="portal-section" data-route=name>
            <h2 class="portal-section__title">
                <Icon name=icon/>
                {title}
            </h2>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h2>"Page not found."</h2>
            <a href=routes::LOGIN.path>"Back to sign in"</a>
        </section>
    }
}
