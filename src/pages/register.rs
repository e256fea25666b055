//! Account registration form, shown from the login page.
//!
//! Registration never signs in. A created account may still await
//! administrator approval, in which case the user is told so and returned to
//! the sign-in form once approved.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{RegisterRequest, RegisterResponse, Role};
use crate::pages::login::parse_role_choice;

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterInput {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub role: Option<Role>,
    pub display_name: String,
    pub email: String,
    pub phone: String,
}

fn optional(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

/// Check the form and build the request body. Blank optional fields are omitted.
pub(crate) fn build_register_request(input: &RegisterInput) -> Result<RegisterRequest, &'static str> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err("Enter both username and password.");
    }
    if input.password != input.confirm {
        return Err("Passwords do not match.");
    }
    let Some(role) = input.role else {
        return Err("Choose a portal.");
    };
    Ok(RegisterRequest {
        username: username.to_owned(),
        password: input.password.clone(),
        role,
        display_name: optional(&input.display_name),
        email: optional(&input.email),
        phone: optional(&input.phone),
    })
}

pub(crate) fn registration_message(response: RegisterResponse) -> &'static str {
    if response.is_active {
        "Account created. You can sign in now."
    } else {
        "Account created and awaiting administrator approval."
    }
}

pub(crate) fn registration_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message: Some(message), .. } => message.clone(),
        ApiError::Status { status: 409, message: None } => "That username is already taken.".to_owned(),
        ApiError::Status { status: 400, message: None } => "Some required fields are missing.".to_owned(),
        _ => "Registration failed. Try again later.".to_owned(),
    }
}

#[component]
pub fn RegisterForm(on_registered: Callback<String>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let input = RwSignal::new(RegisterInput { role: Some(Role::Student), ..RegisterInput::default() });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match input.with_untracked(build_register_request) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.register(&request).await {
                Ok(response) => {
                    log::info!("registered {} as {} (id {})", request.username, request.role, response.id);
                    info.set(String::new());
                    input.set(RegisterInput { role: Some(request.role), ..RegisterInput::default() });
                    on_registered.run(registration_message(response).to_owned());
                }
                Err(err) => {
                    log::warn!("registration for {} failed: {err}", request.username);
                    info.set(registration_error_message(&err));
                }
            }
            busy.set(false);
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, read: fn(&RegisterInput) -> String, write: fn(&mut RegisterInput, String)| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || input.with(read)
                on:input=move |ev| input.update(|form| write(form, event_target_value(&ev)))
            />
        }
    };

    view! {
        <form class="login-form register-form" on:submit=on_submit>
            {field("Username", "text", |f| f.username.clone(), |f, v| f.username = v)}
            {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
            {field("Confirm password", "password", |f| f.confirm.clone(), |f, v| f.confirm = v)}
            {field("Display name (optional)", "text", |f| f.display_name.clone(), |f, v| f.display_name = v)}
            {field("Email (optional)", "email", |f| f.email.clone(), |f, v| f.email = v)}
            {field("Phone (optional)", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            <select
                class="login-input"
                on:change=move |ev| {
                    input.update(|form| {
                        let current = form.role.unwrap_or(Role::Student);
                        form.role = Some(parse_role_choice(&event_target_value(&ev), current));
                    });
                }
            >
                {Role::ALL
                    .into_iter()
                    .map(|choice| {
                        view! {
                            <option value=choice.as_str() selected=move || input.with(|form| form.role == Some(choice))>
                                {choice.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <button class="login-button" type="submit" disabled=move || busy.get()>
                "Create account"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}
