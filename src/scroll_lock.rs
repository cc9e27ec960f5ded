use std::cell::Cell;

thread_local! {
    static LOCK_COUNT: Cell<u32> = Cell::new(0);
}

/// Page-scroll lock over `body.style.overflow`. The document-level flag
/// is a single shared switch, so it is reference counted: the first
/// guard disables scrolling, the last one to drop restores it. Every
/// exit path (close, escape, unmount) releases through `Drop`.
pub(crate) struct ScrollLockGuard {
    released: Cell<bool>,
}

pub(crate) fn acquire() -> ScrollLockGuard {
    let previous = LOCK_COUNT.with(|count| {
        let value = count.get();
        count.set(value + 1);
        value
    });
    if previous == 0 {
        set_body_overflow(Some("hidden"));
    }
    ScrollLockGuard {
        released: Cell::new(false),
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        if self.released.replace(true) {
            return;
        }
        let remaining = LOCK_COUNT.with(|count| {
            let value = count.get().saturating_sub(1);
            count.set(value);
            value
        });
        if remaining == 0 {
            set_body_overflow(None);
        }
    }
}

fn set_body_overflow(value: Option<&str>) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let style = body.style();
    match value {
        Some(value) => {
            let _ = style.set_property("overflow", value);
        }
        None => {
            let _ = style.remove_property("overflow");
        }
    }
}
