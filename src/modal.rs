use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use belly_diary_core::{map_search_url, Restaurant};

use crate::scroll_lock;

#[derive(Properties, PartialEq)]
pub(crate) struct RestaurantModalProps {
    pub(crate) restaurant: Option<Restaurant>,
    pub(crate) is_open: bool,
    pub(crate) on_close: Callback<()>,
}

/// Detail overlay for one diary entry. While open it holds the page
/// scroll lock and a window Escape listener; both are released through
/// the effect cleanup on close and on unmount.
#[function_component(RestaurantModal)]
pub(crate) fn restaurant_modal(props: &RestaurantModalProps) -> Html {
    let showing = props.is_open && props.restaurant.is_some();
    use_effect_with(
        (showing, props.on_close.clone()),
        move |(showing, on_close)| {
            let mut held = None;
            if *showing {
                let guard = scroll_lock::acquire();
                let on_close = on_close.clone();
                let window = web_sys::window().expect("window available");
                let listener = EventListener::new(&window, "keydown", move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        if event.key() == "Escape" {
                            on_close.emit(());
                        }
                    }
                });
                held = Some((guard, listener));
            }
            move || drop(held)
        },
    );

    if !props.is_open {
        return Html::default();
    }
    let Some(restaurant) = props.restaurant else {
        return Html::default();
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_card_click = Callback::from(|event: MouseEvent| event.stop_propagation());
    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay" onclick={on_backdrop_click}>
            <div class="modal-card" onclick={on_card_click}>
                <button
                    class="modal-close"
                    aria-label="Close modal"
                    onclick={on_close_button}
                >
                    { "\u{2715}" }
                </button>
                <div class="modal-hero">
                    <img
                        class="modal-photo"
                        src={restaurant.image}
                        alt={restaurant.name}
                    />
                    <div class="modal-hero-caption">
                        <span class="modal-kind">{ restaurant.kind }</span>
                        <h2 class="modal-name">{ restaurant.name }</h2>
                    </div>
                </div>
                <div class="modal-body">
                    <p class="modal-description">{ restaurant.description }</p>
                    <a
                        class="modal-address"
                        href={map_search_url(restaurant.address)}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        { restaurant.address }
                    </a>
                    if let Some(date) = restaurant.date {
                        <p class="modal-date">{ date }</p>
                    }
                    <div class="modal-reviews">
                        <h3 class="modal-reviews-title">{ "Reviews" }</h3>
                        <div class="modal-review">
                            <p class="modal-review-author">{ "Coral" }</p>
                            <p class="modal-review-text">{ restaurant.coral_review }</p>
                        </div>
                        <div class="modal-review">
                            <p class="modal-review-author">{ "Gabi" }</p>
                            <p class="modal-review-text">{ restaurant.gabi_review }</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
