//! Notification bell in the portal header: unread badge and a dropdown list.

#[cfg(test)]
#[path = "notification_bell_test.rs"]
mod notification_bell_test;

use leptos::prelude::*;

use crate::app::SessionContext;
use crate::components::icons::Icon;
use crate::net::api::ApiClient;
use crate::net::types::Notification;

pub(crate) fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|item| !item.is_read).count()
}

/// Badge text; large counts collapse to `99+`.
pub(crate) fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=99 => Some(unread.to_string()),
        _ => Some("99+".to_owned()),
    }
}

/// Flag one notification as read in place. Returns whether anything changed.
pub(crate) fn mark_read_local(items: &mut [Notification], id: i64) -> bool {
    match items.iter_mut().find(|item| item.id == id && !item.is_read) {
        Some(item) => {
            item.is_read = true;
            true
        }
        None => false,
    }
}

#[component]
pub fn NotificationBell() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = expect_context::<ApiClient>();
    let items = RwSignal::new(Vec::<Notification>::new());
    let open = RwSignal::new(false);

    // Load once on mount.
    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        if let Some(credentials) = session.with_untracked(|store| store.credentials().cloned()) {
            leptos::task::spawn_local(async move {
                match api.notifications(&credentials).await {
                    Ok(list) => items.set(list),
                    Err(err) => log::warn!("notifications unavailable: {err}"),
                }
            });
        }
    }

    let on_read = Callback::new(move |id: i64| {
        if !items.try_update(|list| mark_read_local(list, id)).unwrap_or(false) {
            return;
        }
        let Some(credentials) = session.with_untracked(|store| store.credentials().cloned()) else {
            return;
        };
        let api = api.clone();
        leptos::task::spawn_local(async move {
            if let Err(err) = api.mark_notification_read(&credentials, id).await {
                log::warn!("could not mark notification {id} read: {err}");
            }
        });
    });

    view! {
        <div class="notification-bell">
            <button class="notification-bell__toggle" type="button" on:click=move |_| open.update(|o| *o = !*o)>
                <Icon name="Bell"/>
                {move || {
                    items
                        .with(|list| badge_label(unread_count(list)))
                        .map(|label| view! { <span class="notification-bell__badge">{label}</span> })
                }}
            </button>
            <Show when=move || open.get()>
                <ul class="notification-bell__list">
                    <For
                        each=move || items.get()
                        key=|item| (item.id, item.is_read)
                        children=move |item| {
                            let id = item.id;
                            view! {
                                <li class="notification-bell__item" class:unread=!item.is_read>
                                    <button type="button" on:click=move |_| on_read.run(id)>
                                        {item.title}
                                    </button>
                                    <time>{item.created_at}</time>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
