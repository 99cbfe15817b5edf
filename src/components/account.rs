//! Account Page Components
//!
//! Section tabs over the server-rendered panels, the profile and password
//! forms, and account deletion.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::auth::{PasswordChange, ProfileUpdate};
use storefront_state::profile::AccountSection;
use storefront_state::text;

use crate::api;
use crate::components::{ConfirmButton, Field};
use crate::context::use_app_context;
use crate::dom;
use crate::models::ProfileProps;

/// Id of the server-rendered panel of a section, e.g. `section-orders`
fn panel_id(section: AccountSection) -> String {
    format!("section-{}", section.as_str())
}

fn show_section(section: AccountSection) {
    for other in AccountSection::ALL {
        dom::set_element_visible(&panel_id(other), other == section);
    }
}

#[component]
pub fn AccountTabs() -> impl IntoView {
    let active = RwSignal::new(AccountSection::from_query(&dom::location_search()));
    show_section(active.get_untracked());

    let select = move |section: AccountSection| {
        active.set(section);
        show_section(section);
        dom::replace_query(&section.merge_into_query(&dom::location_search()));
    };

    view! {
        <nav class="account-tabs">
            {AccountSection::ALL
                .into_iter()
                .map(|section| view! {
                    <button
                        class="account-tab"
                        class:active=move || active.get() == section
                        data-section=section.as_str()
                        on:click=move |_| select(section)
                    >
                        {section.label()}
                    </button>
                })
                .collect_view()}
        </nav>
    }
}

#[component]
pub fn ProfileForm(props: ProfileProps) -> impl IntoView {
    let ctx = use_app_context();
    let first_name = RwSignal::new(props.first_name);
    let last_name = RwSignal::new(props.last_name);
    let email = RwSignal::new(props.email);
    let (saving, set_saving) = signal(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let update = ProfileUpdate::from_fields(
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &email.get_untracked(),
        );
        if let Err(e) = update.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::update_profile(&ep, &update).await {
                Ok(()) => {
                    log::info!("[Account] profile updated");
                    dom::alert(text::PROFILE_UPDATED);
                    dom::reload();
                }
                Err(err) => {
                    log::error!("[Account] profile update failed: {}", err);
                    ctx.report(&err, text::PROFILE_UPDATE_FAILED);
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
            <Field value=first_name label="Имя" name="profile-first-name" />
            <Field value=last_name label="Фамилия" name="profile-last-name" />
            <Field value=email label="Email" name="profile-email" kind="email" />
            <button type="submit" class="save-profile-btn" disabled=move || saving.get()>
                {move || if saving.get() { text::SAVING } else { "Сохранить" }}
            </button>
        </form>
    }
}

#[component]
pub fn PasswordForm() -> impl IntoView {
    let ctx = use_app_context();
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let repeat = RwSignal::new(String::new());
    let (saving, set_saving) = signal(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let change = PasswordChange {
            old_password: old_password.get_untracked(),
            new_password: new_password.get_untracked(),
            new_password_one_more_time: repeat.get_untracked(),
        };
        if let Err(e) = change.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::update_password(&ep, &change).await {
                Ok(()) => {
                    log::info!("[Account] password changed");
                    old_password.set(String::new());
                    new_password.set(String::new());
                    repeat.set(String::new());
                    ctx.show_toast(text::PASSWORD_CHANGED);
                }
                Err(err) if err.is_unauthorized() => ctx.report(&err, text::PASSWORD_CHANGE_FAILED),
                Err(err) => {
                    log::warn!("[Account] password change failed: {}", err);
                    error.set(Some(err.inline_message(text::PASSWORD_CHANGE_FAILED)));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="password-form" on:submit=on_submit>
            {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
            <Field value=old_password label="Текущий пароль" name="old-password" kind="password" />
            <Field value=new_password label="Новый пароль" name="new-password" kind="password" />
            <Field value=repeat label="Повторите новый пароль" name="new-password-repeat" kind="password" />
            <button type="submit" class="change-password-btn" disabled=move || saving.get()>
                {move || if saving.get() { text::SAVING } else { "Изменить пароль" }}
            </button>
        </form>
    }
}

#[component]
pub fn DeleteAccount() -> impl IntoView {
    let ctx = use_app_context();
    let (deleting, set_deleting) = signal(false);

    let delete = move |_| {
        set_deleting.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::delete_account(&ep).await {
                Ok(()) => {
                    log::info!("[Account] account deleted");
                    dom::navigate(&ctx.login_url());
                }
                Err(err) => {
                    log::error!("[Account] deletion failed: {}", err);
                    ctx.report(&err, text::ACCOUNT_DELETE_FAILED);
                    set_deleting.set(false);
                }
            }
        });
    };

    view! {
        <div class="danger-zone">
            <ConfirmButton
                label="Удалить аккаунт"
                prompt=text::ACCOUNT_DELETE_CONFIRM
                button_class="delete-account-btn"
                disabled=deleting
                on_confirm=delete
            />
        </div>
    }
}
