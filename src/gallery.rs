use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlImageElement, KeyboardEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use belly_diary_core::gallery::{
    key_step_offset, layout_slots, touch_pixels_to_offset, wheel_delta_to_pixels,
    wheel_pixels_to_offset, GalleryTuning,
};

/// Screen pixels per world depth unit when projecting slots into CSS
/// `translateZ`.
const DEPTH_PX_PER_UNIT: f32 = 40.0;
/// Per-frame easing gain toward the target offset.
const OFFSET_EASE: f32 = 0.18;
const OFFSET_SETTLE_EPSILON: f32 = 0.0005;
/// Touch movement past this many pixels is a drag, not a tap.
const TAP_SLOP_PX: f32 = 6.0;
const TAP_MAX_DURATION_MS: f64 = 240.0;

#[derive(Clone, PartialEq)]
pub(crate) struct GalleryImage {
    pub(crate) src: String,
    pub(crate) alt: String,
    /// Original list index; reported on click regardless of which slot
    /// the image currently occupies.
    pub(crate) id: usize,
}

#[derive(Properties, PartialEq)]
pub(crate) struct InfiniteGalleryProps {
    pub(crate) images: Vec<GalleryImage>,
    #[prop_or_default]
    pub(crate) tuning: GalleryTuning,
    pub(crate) on_image_click: Callback<usize>,
    #[prop_or_default]
    pub(crate) class: Classes,
}

/// Looping depth-axis photo strip. A fixed pool of `visible_count` card
/// elements is laid out directly in the DOM once per animation frame;
/// wheel, arrow-key, and touch input only accumulate into a target
/// offset in between.
#[function_component(InfiniteGallery)]
pub(crate) fn infinite_gallery(props: &InfiniteGalleryProps) -> Html {
    let root_ref = use_node_ref();
    {
        let root_ref = root_ref.clone();
        use_effect_with(
            (
                props.images.clone(),
                props.tuning,
                props.on_image_click.clone(),
            ),
            move |(images, tuning, on_image_click)| {
                let handle = root_ref.cast::<Element>().map(|root| {
                    GalleryStrip::mount(root, images.clone(), *tuning, on_image_click.clone())
                });
                move || drop(handle)
            },
        );
    }
    html! {
        <div
            ref={root_ref}
            class={classes!("gallery", props.class.clone())}
            tabindex="0"
            aria-label="restaurant photo gallery"
        />
    }
}

struct CardNodes {
    element: Element,
    image: HtmlImageElement,
    shown: Cell<usize>,
}

struct TouchState {
    id: i32,
    last_x: f32,
    last_y: f32,
    start_x: f32,
    start_y: f32,
    start_ms: f64,
}

struct GalleryStrip {
    root: Element,
    cards: Vec<CardNodes>,
    images: Vec<GalleryImage>,
    tuning: GalleryTuning,
    on_image_click: Callback<usize>,
    offset: Cell<f32>,
    target_offset: Cell<f32>,
    frame_handle: RefCell<Option<AnimationFrame>>,
    touch: RefCell<Option<TouchState>>,
    drag_moved: Cell<bool>,
}

/// Owns the listeners so dropping the handle detaches every input hook
/// before the strip itself is torn down.
struct GalleryHandle {
    strip: Rc<GalleryStrip>,
    _listeners: Vec<EventListener>,
}

impl Drop for GalleryHandle {
    fn drop(&mut self) {
        self.strip.frame_handle.borrow_mut().take();
        self.strip.remove_cards();
    }
}

impl GalleryStrip {
    fn mount(
        root: Element,
        images: Vec<GalleryImage>,
        tuning: GalleryTuning,
        on_image_click: Callback<usize>,
    ) -> GalleryHandle {
        let document = root.owner_document().expect("element in a document");
        let cards = build_cards(&document, &root, tuning.visible_count);
        let strip = Rc::new(GalleryStrip {
            root,
            cards,
            images,
            tuning,
            on_image_click,
            offset: Cell::new(0.0),
            target_offset: Cell::new(0.0),
            frame_handle: RefCell::new(None),
            touch: RefCell::new(None),
            drag_moved: Cell::new(false),
        });
        let listeners = strip.install_listeners();
        strip.apply_layout(0.0);
        GalleryHandle {
            strip,
            _listeners: listeners,
        }
    }

    fn install_listeners(self: &Rc<Self>) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };

        let strip = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.root,
            "wheel",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let rect = strip.root.get_bounding_client_rect();
                let pixels = wheel_delta_to_pixels(
                    event.delta_y() as f32,
                    event.delta_mode(),
                    rect.height() as f32,
                );
                strip.advance(wheel_pixels_to_offset(pixels, strip.tuning.speed));
                event.prevent_default();
            },
        ));

        for index in 0..self.cards.len() {
            let strip = Rc::clone(self);
            listeners.push(EventListener::new(
                &self.cards[index].element,
                "click",
                move |_event: &Event| {
                    // the flag swallows exactly one click, so a touch
                    // drag cannot mute later mouse clicks
                    if strip.drag_moved.replace(false) {
                        return;
                    }
                    let shown = strip.cards[index].shown.get();
                    if let Some(image) = strip.images.get(shown) {
                        strip.on_image_click.emit(image.id);
                    }
                },
            ));
        }

        let window = web_sys::window().expect("window available");
        let strip = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let forward = match event.key().as_str() {
                    "ArrowDown" | "ArrowRight" | "PageDown" => true,
                    "ArrowUp" | "ArrowLeft" | "PageUp" => false,
                    _ => return,
                };
                strip.advance(key_step_offset(forward, strip.tuning.speed));
                event.prevent_default();
            },
        ));

        let strip = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.root,
            "touchstart",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                strip.drag_moved.set(false);
                *strip.touch.borrow_mut() = Some(TouchState {
                    id: touch.identifier(),
                    last_x: touch.client_x() as f32,
                    last_y: touch.client_y() as f32,
                    start_x: touch.client_x() as f32,
                    start_y: touch.client_y() as f32,
                    start_ms: Date::now(),
                });
            },
        ));

        let strip = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.root,
            "touchmove",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let mut state = strip.touch.borrow_mut();
                let Some(state) = state.as_mut() else {
                    return;
                };
                let Some(touch) = find_touch(event, state.id) else {
                    return;
                };
                let x = touch.client_x() as f32;
                let y = touch.client_y() as f32;
                let delta = state.last_y - y;
                state.last_x = x;
                state.last_y = y;
                let total_dx = x - state.start_x;
                let total_dy = y - state.start_y;
                if total_dx * total_dx + total_dy * total_dy > TAP_SLOP_PX * TAP_SLOP_PX {
                    strip.drag_moved.set(true);
                }
                strip.advance(touch_pixels_to_offset(delta, strip.tuning.speed));
                event.prevent_default();
            },
        ));

        for kind in ["touchend", "touchcancel"] {
            let strip = Rc::clone(self);
            listeners.push(EventListener::new(&self.root, kind, move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let finished = {
                    let state = strip.touch.borrow();
                    state
                        .as_ref()
                        .map(|state| find_touch(event, state.id).is_some())
                        .unwrap_or(false)
                };
                if !finished {
                    return;
                }
                let held_too_long = {
                    let state = strip.touch.borrow();
                    state
                        .as_ref()
                        .map(|state| Date::now() - state.start_ms > TAP_MAX_DURATION_MS)
                        .unwrap_or(true)
                };
                if held_too_long {
                    // a long press is not a tap even without movement
                    strip.drag_moved.set(true);
                }
                strip.touch.borrow_mut().take();
            }));
        }

        listeners
    }

    /// Accumulates an input burst and makes sure a frame is scheduled.
    /// Raw event rate never forces extra layout work.
    fn advance(self: &Rc<Self>, delta: f32) {
        if self.images.is_empty() || delta == 0.0 {
            return;
        }
        self.target_offset.set(self.target_offset.get() + delta);
        self.queue_frame();
    }

    fn queue_frame(self: &Rc<Self>) {
        if self.frame_handle.borrow().is_some() {
            return;
        }
        let strip = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            strip.frame_handle.borrow_mut().take();
            let current = strip.offset.get();
            let target = strip.target_offset.get();
            let mut next = current + (target - current) * OFFSET_EASE;
            if (target - next).abs() < OFFSET_SETTLE_EPSILON {
                next = target;
            }
            strip.offset.set(next);
            strip.apply_layout(next);
            if next != target {
                strip.queue_frame();
            }
        });
        *self.frame_handle.borrow_mut() = Some(handle);
    }

    fn apply_layout(&self, offset: f32) {
        let placements = layout_slots(offset, self.images.len(), &self.tuning);
        let count = self.cards.len();
        for (slot, card) in self.cards.iter().enumerate() {
            let Some(placement) = placements.get(slot) else {
                let _ = card.element.set_attribute("style", "visibility:hidden");
                continue;
            };
            if card.shown.get() != placement.image_index {
                card.shown.set(placement.image_index);
                if let Some(image) = self.images.get(placement.image_index) {
                    card.image.set_src(&image.src);
                    card.image.set_alt(&image.alt);
                }
            }
            let depth_px = placement.depth * DEPTH_PX_PER_UNIT;
            let scale = 0.6 + 0.4 * placement.weight;
            let style = if placement.weight <= 0.001 {
                "visibility:hidden".to_string()
            } else {
                format!(
                    "opacity:{:.4};transform:translate(-50%,-50%) translateZ({:.1}px) scale({:.4});z-index:{}",
                    placement.weight,
                    -depth_px,
                    scale,
                    count - slot,
                )
            };
            let _ = card.element.set_attribute("style", &style);
        }
    }

    fn remove_cards(&self) {
        for card in &self.cards {
            card.element.remove();
        }
    }
}

fn build_cards(document: &Document, root: &Element, count: usize) -> Vec<CardNodes> {
    let mut cards = Vec::with_capacity(count);
    for _ in 0..count {
        let Ok(element) = document.create_element("div") else {
            continue;
        };
        element.set_class_name("gallery-card");
        let _ = element.set_attribute("style", "visibility:hidden");
        let Ok(image) = document
            .create_element("img")
            .map(|img| img.unchecked_into::<HtmlImageElement>())
        else {
            continue;
        };
        image.set_class_name("gallery-card-photo");
        let _ = element.append_child(&image);
        let _ = root.append_child(&element);
        cards.push(CardNodes {
            element,
            image,
            shown: Cell::new(usize::MAX),
        });
    }
    cards
}

fn find_touch(event: &TouchEvent, id: i32) -> Option<web_sys::Touch> {
    let touches = event.changed_touches();
    for index in 0..touches.length() {
        if let Some(touch) = touches.get(index) {
            if touch.identifier() == id {
                return Some(touch);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::WheelEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_images(count: usize) -> Vec<GalleryImage> {
        (0..count)
            .map(|id| GalleryImage {
                src: format!("/{}.webp", id + 1),
                alt: format!("image {id}"),
                id,
            })
            .collect()
    }

    fn mount_root() -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append root");
        root
    }

    #[wasm_bindgen_test]
    fn strip_renders_full_card_pool_from_short_list() {
        set_panic_hook();
        let root = mount_root();
        let handle = GalleryStrip::mount(
            root.clone(),
            test_images(8),
            GalleryTuning::default(),
            Callback::noop(),
        );
        assert_eq!(root.children().length(), 12);
        for card in &handle.strip.cards {
            assert!(card.shown.get() < 8);
        }
        drop(handle);
        assert_eq!(root.children().length(), 0);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn empty_list_renders_hidden_cards_without_panicking() {
        set_panic_hook();
        let root = mount_root();
        let handle = GalleryStrip::mount(
            root.clone(),
            Vec::new(),
            GalleryTuning::default(),
            Callback::noop(),
        );
        for card in &handle.strip.cards {
            assert_eq!(
                card.element.get_attribute("style").as_deref(),
                Some("visibility:hidden")
            );
        }
        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn card_click_reports_original_image_id() {
        set_panic_hook();
        let root = mount_root();
        let clicked = Rc::new(Cell::new(None::<usize>));
        let clicked_hook = clicked.clone();
        let handle = GalleryStrip::mount(
            root.clone(),
            test_images(8),
            GalleryTuning::default(),
            Callback::from(move |id| clicked_hook.set(Some(id))),
        );
        // Slot 9 shows image 1 again because the 8-image strip loops.
        let card = &handle.strip.cards[9];
        assert_eq!(card.shown.get(), 1);
        card.element
            .dyn_ref::<web_sys::HtmlElement>()
            .expect("card is an html element")
            .click();
        assert_eq!(clicked.get(), Some(1));
        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn drag_suppresses_the_following_click() {
        set_panic_hook();
        let root = mount_root();
        let clicked = Rc::new(Cell::new(None::<usize>));
        let clicked_hook = clicked.clone();
        let handle = GalleryStrip::mount(
            root.clone(),
            test_images(8),
            GalleryTuning::default(),
            Callback::from(move |id| clicked_hook.set(Some(id))),
        );
        handle.strip.drag_moved.set(true);
        let card = handle.strip.cards[0]
            .element
            .dyn_ref::<web_sys::HtmlElement>()
            .expect("card is an html element");
        card.click();
        assert_eq!(clicked.get(), None, "the click finishing a drag is swallowed");
        // the flag is consumed, so a later mouse click goes through
        card.click();
        assert_eq!(clicked.get(), Some(0));
        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn wheel_input_advances_the_offset_per_frame() {
        set_panic_hook();
        let root = mount_root();
        let handle = GalleryStrip::mount(
            root.clone(),
            test_images(8),
            GalleryTuning::default(),
            Callback::noop(),
        );
        let init = WheelEventInit::new();
        init.set_delta_y(320.0);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event =
            WheelEvent::new_with_event_init_dict("wheel", &init).expect("construct wheel event");
        root.dispatch_event(&event).expect("dispatch wheel");
        assert!(handle.strip.target_offset.get() > 0.0);
        // let the eased frame loop run a few frames
        for _ in 0..10 {
            TimeoutFuture::new(20).await;
            if handle.strip.offset.get() > 0.0 {
                break;
            }
        }
        assert!(handle.strip.offset.get() > 0.0);
        drop(handle);
        root.remove();
    }
}
