//! Product Gallery Components
//!
//! `ProductGallery` is the product page viewer with a fullscreen overlay;
//! `MiniGallery` is the thumbnail strip under each review.

use leptos::ev;
use leptos::prelude::*;
use storefront_state::gallery::{Gallery, KeyAction};
use storefront_state::text;

use crate::dom;
use crate::models::GalleryProps;

fn image_or_default(src: Option<&str>) -> String {
    src.unwrap_or(text::DEFAULT_PRODUCT_IMAGE).to_string()
}

#[component]
pub fn ProductGallery(props: GalleryProps) -> impl IntoView {
    let gallery = RwSignal::new(Gallery::new(props.images));
    let alt = props.alt;

    let fullscreen = move || gallery.with(Gallery::is_fullscreen);
    let current = move || gallery.with(|g| image_or_default(g.current()));

    let open = move |index: usize| {
        gallery.update(|g| g.open(index));
        dom::set_body_scroll_locked(true);
    };
    let close = move || {
        gallery.update(Gallery::close);
        dom::set_body_scroll_locked(false);
    };

    let handle = window_event_listener(ev::keydown, move |ev| {
        let key = ev.key();
        if let Some(KeyAction::Closed) = gallery.try_update(|g| g.handle_key(&key)) {
            dom::set_body_scroll_locked(false);
        }
    });
    on_cleanup(move || {
        handle.remove();
        dom::set_body_scroll_locked(false);
    });

    let multiple = gallery.with_untracked(|g| g.len() > 1);
    let thumbnails = gallery.with_untracked(|g| g.images().to_vec());
    let main_alt = alt.clone();
    let overlay_alt = alt.clone();

    view! {
        <div class="product-gallery">
            <div class="main-image-container">
                <img
                    class="main-image"
                    src=current
                    alt=main_alt
                    on:click=move |_| open(gallery.with_untracked(Gallery::index))
                />
                {multiple.then(|| view! {
                    <button class="gallery-nav prev" on:click=move |_| gallery.update(Gallery::prev)>"‹"</button>
                    <button class="gallery-nav next" on:click=move |_| gallery.update(Gallery::next)>"›"</button>
                })}
            </div>
            <div class="thumbnails">
                {thumbnails
                    .into_iter()
                    .enumerate()
                    .map(|(index, src)| {
                        let alt = alt.clone();
                        view! {
                            <img
                                class="thumbnail"
                                class:active=move || gallery.with(|g| g.index() == index)
                                src=src
                                alt=alt
                                on:click=move |_| open(index)
                            />
                        }
                    })
                    .collect_view()}
            </div>
        </div>
        <Show when=fullscreen>
            <div class="fullscreen-overlay" on:click=move |_| close()>
                <img
                    class="fullscreen-image"
                    src=current
                    alt=overlay_alt.clone()
                    on:click=|ev| ev.stop_propagation()
                />
                <button class="fullscreen-close" on:click=move |_| close()>"×"</button>
                <button
                    class="fullscreen-nav prev"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        gallery.update(Gallery::prev);
                    }
                >
                    "‹"
                </button>
                <button
                    class="fullscreen-nav next"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        gallery.update(Gallery::next);
                    }
                >
                    "›"
                </button>
                <div class="fullscreen-counter">{move || gallery.with(Gallery::counter)}</div>
            </div>
        </Show>
    }
}

#[component]
pub fn MiniGallery(images: Vec<String>) -> impl IntoView {
    let gallery = RwSignal::new(Gallery::new(images));
    let thumbnails = gallery.with_untracked(|g| g.images().to_vec());

    view! {
        <div class="review-gallery">
            <img class="review-main-image" src=move || gallery.with(|g| image_or_default(g.current())) alt="Фото отзыва" />
            <div class="review-thumbnails">
                {thumbnails
                    .into_iter()
                    .enumerate()
                    .map(|(index, src)| view! {
                        <img
                            class="review-thumbnail"
                            class:active=move || gallery.with(|g| g.index() == index)
                            src=src
                            on:click=move |_| gallery.update(|g| g.select(index))
                        />
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
