//! Auth Page Components
//!
//! Login / register tabs with inline error messages. A successful submit
//! navigates to the same-site `redirect_url` from the response, else `/`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::auth::{redirect_target, AuthTab, LoginForm, RegisterForm};
use storefront_state::text;

use crate::api;
use crate::context::use_app_context;
use crate::dom;
use crate::models::AuthProps;

/// Labelled input bound to a string signal
#[component]
pub(crate) fn Field(
    value: RwSignal<String>,
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <input
                id=name
                name=name
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn LoginPanel(error: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let body = LoginForm {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(e) = body.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::login(&ep, &body).await {
                Ok(resp) => {
                    let target = redirect_target(resp.as_ref());
                    log::info!("[Auth] logged in, redirecting to {}", target);
                    dom::navigate(&target);
                }
                Err(err) => {
                    log::warn!("[Auth] login failed: {}", err);
                    error.set(Some(err.inline_message(text::LOGIN_FAILED)));
                    set_busy.set(false);
                }
            }
        });
    };

    view! {
        <form class="auth-form login-form" on:submit=on_submit>
            <Field value=email label="Email" name="login-email" kind="email" />
            <Field value=password label="Пароль" name="login-password" kind="password" />
            <button type="submit" class="auth-submit" disabled=move || busy.get()>
                "Войти"
            </button>
        </form>
    }
}

#[component]
fn RegisterPanel(error: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let body = RegisterForm {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(e) = body.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::register(&ep, &body).await {
                Ok(resp) => {
                    let target = redirect_target(resp.as_ref());
                    log::info!("[Auth] registered, redirecting to {}", target);
                    dom::navigate(&target);
                }
                Err(err) => {
                    log::warn!("[Auth] registration failed: {}", err);
                    error.set(Some(err.inline_message(text::REGISTER_FAILED)));
                    set_busy.set(false);
                }
            }
        });
    };

    view! {
        <form class="auth-form register-form" on:submit=on_submit>
            <Field value=first_name label="Имя" name="reg-first-name" />
            <Field value=last_name label="Фамилия" name="reg-last-name" />
            <Field value=username label="Имя пользователя" name="reg-username" />
            <Field value=email label="Email" name="reg-email" kind="email" />
            <Field value=password label="Пароль" name="reg-password" kind="password" />
            <Field value=confirm_password label="Подтвердите пароль" name="reg-confirm-password" kind="password" />
            <button type="submit" class="auth-submit" disabled=move || busy.get()>
                "Зарегистрироваться"
            </button>
        </form>
    }
}

#[component]
pub fn AuthForms(props: AuthProps) -> impl IntoView {
    let initial = props.tab.as_deref().map(AuthTab::parse).unwrap_or_default();
    let tab = RwSignal::new(initial);
    let error = RwSignal::new(None::<String>);

    let switch = move |next: AuthTab| {
        if tab.get_untracked() != next {
            tab.set(next);
            error.set(None);
        }
    };

    view! {
        <div class="auth-tabs">
            <button
                class="auth-tab"
                class:active=move || tab.get() == AuthTab::Login
                on:click=move |_| switch(AuthTab::Login)
            >
                "Вход"
            </button>
            <button
                class="auth-tab"
                class:active=move || tab.get() == AuthTab::Register
                on:click=move |_| switch(AuthTab::Register)
            >
                "Регистрация"
            </button>
        </div>
        {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}
        {move || match tab.get() {
            AuthTab::Login => view! { <LoginPanel error=error /> }.into_any(),
            AuthTab::Register => view! { <RegisterPanel error=error /> }.into_any(),
        }}
    }
}
