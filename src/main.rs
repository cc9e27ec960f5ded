mod calendar;
mod gallery;
mod modal;
mod scroll_lock;
mod settings;

use yew::prelude::*;

use belly_diary_core::calendar::invalid_dates;
use belly_diary_core::gallery::GalleryTuning;
use belly_diary_core::RESTAURANTS;

use crate::calendar::CalendarView;
use crate::gallery::{GalleryImage, InfiniteGallery};
use crate::modal::RestaurantModal;
use crate::settings::ViewMode;

fn gallery_images() -> Vec<GalleryImage> {
    RESTAURANTS
        .iter()
        .enumerate()
        .map(|(id, record)| GalleryImage {
            src: record.image.to_string(),
            alt: record.name.to_string(),
            id,
        })
        .collect()
}

/// Page composition root. Owns the selection, the modal flag, and the
/// view mode; the gallery and the calendar only report clicks upward.
#[function_component(App)]
fn app() -> Html {
    let selected = use_state(|| None::<usize>);
    let modal_open = use_state(|| false);
    let view_mode = use_state(settings::load_view_mode);
    let view_mode_value = *view_mode;

    // stable callback identities keep the gallery mounted across
    // unrelated re-renders, so its offset survives modal open/close
    let on_select = use_callback((), {
        let selected = selected.clone();
        let modal_open = modal_open.clone();
        move |index: usize, _| {
            let Some(record) = RESTAURANTS.get(index) else {
                gloo::console::warn!("selection out of range", index);
                return;
            };
            gloo::console::log!("open", record.name);
            selected.set(Some(index));
            modal_open.set(true);
        }
    });

    // closing always clears the selection together with the flag, so a
    // re-open can never show a stale record
    let on_close = use_callback((), {
        let selected = selected.clone();
        let modal_open = modal_open.clone();
        move |_: (), _| {
            modal_open.set(false);
            selected.set(None);
        }
    });

    let on_toggle_view = {
        let view_mode = view_mode.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*view_mode).toggled();
            gloo::console::log!("view mode", next.label());
            settings::persist_view_mode(next);
            view_mode.set(next);
        })
    };

    let selected_record = (*selected).and_then(|index| RESTAURANTS.get(index).copied());
    let in_calendar = view_mode_value == ViewMode::Calendar;
    let toggle_label = match view_mode_value {
        ViewMode::Gallery => "Calendar",
        ViewMode::Calendar => "Gallery",
    };

    html! {
        <main class="diary">
            {
                match view_mode_value {
                    ViewMode::Gallery => html! {
                        <InfiniteGallery
                            images={gallery_images()}
                            tuning={GalleryTuning::default()}
                            on_image_click={on_select.clone()}
                            class="diary-gallery"
                        />
                    },
                    ViewMode::Calendar => html! {
                        <CalendarView
                            records={RESTAURANTS}
                            on_restaurant_click={on_select.clone()}
                        />
                    },
                }
            }
            <div class={classes!(
                "title-overlay",
                in_calendar.then_some("title-overlay-compact"),
            )}>
                <h1 class="title">
                    { "Dear " }
                    <span class="title-emphasis">{ "Belly" }</span>
                    { " Diary," }
                </h1>
            </div>
            if !in_calendar {
                <div class="hint-footer">
                    <p>{ "Click on any photo to view restaurant details" }</p>
                    <p class="hint-secondary">
                        { "Use mouse wheel, arrow keys, or touch to navigate" }
                    </p>
                </div>
            }
            <button class="view-toggle" onclick={on_toggle_view}>
                { toggle_label }
            </button>
            <RestaurantModal
                restaurant={selected_record}
                is_open={*modal_open}
                on_close={on_close}
            />
        </main>
    }
}

fn report_catalog_date_issues() {
    for (index, raw, err) in invalid_dates(RESTAURANTS) {
        gloo::console::warn!("invalid catalog date", index, raw, err.to_string());
    }
}

fn main() {
    report_catalog_date_issues();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document available")
    }

    fn mount_root() -> Element {
        let root = document().create_element("div").expect("create root");
        document()
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append root");
        root
    }

    fn clear_saved_settings() {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if let Some(storage) = storage {
            let _ = storage.remove_item("bd.settings.v1");
        }
    }

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .expect("query")
            .unwrap_or_else(|| panic!("{selector} missing"))
            .dyn_ref::<HtmlElement>()
            .expect("html element")
            .click();
    }

    fn dispatch_escape() {
        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        init.set_bubbles(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .expect("construct keyboard event");
        web_sys::window()
            .expect("window available")
            .dispatch_event(&event)
            .expect("dispatch keydown");
    }

    #[wasm_bindgen_test]
    async fn starts_in_gallery_mode() {
        set_panic_hook();
        clear_saved_settings();
        let root = mount_root();
        let handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(20).await;
        assert!(root.query_selector(".gallery").expect("query").is_some());
        assert!(root
            .query_selector(".calendar-view")
            .expect("query")
            .is_none());
        assert!(root.query_selector(".hint-footer").expect("query").is_some());
        handle.destroy();
        clear_saved_settings();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn toggle_switches_view_and_persists_the_choice() {
        set_panic_hook();
        clear_saved_settings();
        let root = mount_root();
        let handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(20).await;
        click(&root, ".view-toggle");
        TimeoutFuture::new(20).await;
        assert!(root
            .query_selector(".calendar-view")
            .expect("query")
            .is_some());
        assert!(root.query_selector(".gallery").expect("query").is_none());
        assert_eq!(settings::load_view_mode(), ViewMode::Calendar);
        handle.destroy();
        clear_saved_settings();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn gallery_click_opens_modal_and_escape_clears_it() {
        set_panic_hook();
        clear_saved_settings();
        let root = mount_root();
        let handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(20).await;

        // the front card shows catalog index 0
        click(&root, ".gallery-card");
        TimeoutFuture::new(20).await;
        let name = root
            .query_selector(".modal-name")
            .expect("query")
            .expect("modal rendered");
        assert_eq!(name.text_content().as_deref(), Some(RESTAURANTS[0].name));

        dispatch_escape();
        TimeoutFuture::new(20).await;
        assert!(root
            .query_selector(".modal-overlay")
            .expect("query")
            .is_none());

        handle.destroy();
        clear_saved_settings();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn reopening_from_calendar_never_shows_stale_data() {
        set_panic_hook();
        clear_saved_settings();
        let root = mount_root();
        let handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(20).await;

        click(&root, ".gallery-card");
        TimeoutFuture::new(20).await;
        assert_eq!(
            root.query_selector(".modal-name")
                .expect("query")
                .expect("modal rendered")
                .text_content()
                .as_deref(),
            Some("The Garden Table")
        );
        dispatch_escape();
        TimeoutFuture::new(20).await;

        click(&root, ".view-toggle");
        TimeoutFuture::new(20).await;
        // first timeline entry is Spice Market (February 2025)
        click(&root, ".timeline-entry");
        TimeoutFuture::new(20).await;
        assert_eq!(
            root.query_selector(".modal-name")
                .expect("query")
                .expect("modal rendered")
                .text_content()
                .as_deref(),
            Some("Spice Market")
        );

        handle.destroy();
        clear_saved_settings();
        root.remove();
    }
}
