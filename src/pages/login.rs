//! Login page: username, password and portal role.
//!
//! On success navigation resumes at the `redirect` query the guard attached,
//! or lands on the role's dashboard. On failure the user stays here with the
//! backend's message and no session change. New users can switch to the
//! registration form from here.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::SessionContext;
use crate::net::api::ApiClient;
use crate::net::types::{LoginRequest, Role};
use crate::pages::register::RegisterForm;
use crate::state::login::login;
use crate::util::auth::{REDIRECT_QUERY_KEY, post_login_destination};

/// Trim the username and require both fields. Passwords are sent as typed.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<String, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(username.to_owned())
}

/// Role picked in the form; unknown values keep the current choice.
pub(crate) fn parse_role_choice(raw: &str, current: Role) -> Role {
    raw.parse().unwrap_or(current)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();
    let query = use_query_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let registering = RwSignal::new(false);

    let on_registered = Callback::new(move |message: String| {
        registering.set(false);
        info.set(message);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(name) => LoginRequest { username: name, password: password.get_untracked(), role: role.get_untracked() },
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let redirect = query.with_untracked(|params| params.get(REDIRECT_QUERY_KEY));
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match login(&session, &api, request).await {
                Ok(identity) => {
                    info.set(String::new());
                    password.set(String::new());
                    let destination = post_login_destination(redirect.as_deref(), identity.role);
                    navigate(&destination, NavigateOptions::default());
                }
                Err(err) => info.set(err.user_message()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Campus Portal"</h1>
                <p class="login-card__subtitle">"Sign in to your portal"</p>
                <Show when=move || registering.get()>
                    <RegisterForm on_registered=on_registered/>
                </Show>
                <form class="login-form" class:hidden=move || registering.get() on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <select
                        class="login-input"
                        on:change=move |ev| {
                            let choice = parse_role_choice(&event_target_value(&ev), role.get_untracked());
                            role.set(choice);
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|choice| {
                                view! {
                                    <option value=choice.as_str() selected=move || role.get() == choice>
                                        {choice.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty() && !registering.get()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <button class="login-switch" type="button" on:click=move |_| registering.update(|r| *r = !*r)>
                    {move || if registering.get() { "Back to sign in" } else { "Create an account" }}
                </button>
            </div>
        </div>
    }
}
