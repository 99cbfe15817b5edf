//! Review Form Component
//!
//! Comment, grade and up to the configured number of photo URL inputs. The
//! draft is validated before the single POST; success reloads the page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::review::{parse_grade, PhotoSlot, ReviewDraft};
use storefront_state::text;

use crate::api;
use crate::context::use_app_context;
use crate::dom;
use crate::models::ReviewFormProps as ReviewFormData;

#[component]
pub fn ReviewForm(props: ReviewFormData) -> impl IntoView {
    let ctx = use_app_context();
    let max_photos = ctx.config.with_value(|c| c.review.max_photos);
    let draft = RwSignal::new(ReviewDraft::new(max_photos));
    let (submitting, set_submitting) = signal(false);
    let product_id = props.product_id;

    let add_slot = move |_| {
        if let Some(Err(err)) = draft.try_update(|d| d.add_slot()) {
            dom::alert(&err.to_string());
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let payload = match draft.with_untracked(|d| d.validate()) {
            Ok(payload) => payload,
            Err(err) => {
                dom::alert(&err.to_string());
                return;
            }
        };
        set_submitting.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::create_review(&ep, product_id, &payload).await {
                Ok(()) => {
                    log::info!("[Review] posted for product {}", product_id);
                    dom::alert(text::REVIEW_SUCCESS);
                    dom::reload();
                }
                Err(err) => {
                    log::error!("[Review] post for product {} failed: {}", product_id, err);
                    ctx.report(&err, text::REVIEW_FAILED);
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <form class="review-form" on:submit=on_submit>
            <div class="form-group">
                <label>"Оценка"</label>
                <select
                    class="review-grade"
                    required
                    on:change=move |ev| {
                        let grade = parse_grade(&event_target_value(&ev));
                        draft.update(|d| d.grade = grade);
                    }
                >
                    <option value="" selected>"Выберите оценку"</option>
                    {(1..=5u8)
                        .rev()
                        .map(|g| view! { <option value=g.to_string()>{"★".repeat(g as usize)}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Комментарий"</label>
                <textarea
                    class="review-comment"
                    rows="4"
                    prop:value=move || draft.with(|d| d.comment.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.comment = value);
                    }
                ></textarea>
            </div>
            <div class="form-group photo-urls">
                <label>"Ссылки на фото"</label>
                <For
                    each=move || draft.with(|d| d.slots().to_vec())
                    key=|slot| slot.id
                    children=move |slot: PhotoSlot| {
                        let id = slot.id;
                        view! {
                            <div class="photo-url-row">
                                <input
                                    type="url"
                                    class="photo-url-input"
                                    placeholder="https://..."
                                    prop:value=move || {
                                        draft.with(|d| {
                                            d.slots().iter().find(|s| s.id == id).map(|s| s.url.clone()).unwrap_or_default()
                                        })
                                    }
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        draft.update(|d| d.set_url(id, &value));
                                    }
                                />
                                <button
                                    type="button"
                                    class="remove-photo-btn"
                                    on:click=move |_| draft.update(|d| d.remove_slot(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
                <button
                    type="button"
                    class="add-photo-btn"
                    disabled=move || !draft.with(|d| d.can_add_slot())
                    on:click=add_slot
                >
                    "+ Добавить фото"
                </button>
            </div>
            <button type="submit" class="submit-review-btn" disabled=move || submitting.get()>
                {move || if submitting.get() { text::SAVING } else { "Отправить отзыв" }}
            </button>
        </form>
    }
}
