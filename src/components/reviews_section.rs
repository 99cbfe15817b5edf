//! Reviews List

use leptos::prelude::*;
use storefront_state::models::{format_local, Review};
use storefront_state::review::{needs_toggle, visible_count};
use storefront_state::text;

use crate::components::MiniGallery;
use crate::dom;
use crate::models::ReviewsProps;

#[component]
fn ReviewItem(review: Review, offset: i32) -> impl IntoView {
    let author = review.author.clone().unwrap_or_else(|| "Покупатель".to_string());
    let date = review.created_at.as_ref().map(|ts| format_local(ts, offset));

    view! {
        <div class="review">
            <div class="review-header">
                <span class="review-author">{author}</span>
                <span class="review-stars" title=format!("{} / 5", review.grade)>{review.stars()}</span>
                {date.map(|d| view! { <span class="review-date">{d}</span> })}
            </div>
            {review.comment.clone().map(|c| view! { <p class="review-comment">{c}</p> })}
            {(!review.photo_urls.is_empty()).then(|| view! { <MiniGallery images=review.photo_urls.clone() /> })}
        </div>
    }
}

#[component]
pub fn ReviewsSection(props: ReviewsProps) -> impl IntoView {
    let reviews = StoredValue::new(props.reviews);
    let total = reviews.with_value(Vec::len);
    let expanded = RwSignal::new(false);
    let offset = dom::timezone_offset_minutes();

    view! {
        <div class="reviews-list">
            {move || {
                let shown = visible_count(total, expanded.get());
                reviews.with_value(|all| {
                    all.iter()
                        .take(shown)
                        .cloned()
                        .map(|review| view! { <ReviewItem review=review offset=offset /> })
                        .collect_view()
                })
            }}
        </div>
        {needs_toggle(total).then(|| view! {
            <button class="reviews-toggle" on:click=move |_| expanded.update(|e| *e = !*e)>
                {move || if expanded.get() { text::REVIEWS_HIDE } else { text::REVIEWS_SHOW_ALL }}
            </button>
        })}
    }
}
