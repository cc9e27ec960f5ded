use serde::{Deserialize, Serialize};

/// Depths (in world units, along the strip axis) where cards are at
/// full strength and fully faded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Falloff {
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryTuning {
    /// Gain from normalized input to offset movement.
    pub speed: f32,
    /// Distance between consecutive slots along the depth axis.
    pub z_spacing: f32,
    /// Upper bound on simultaneously laid-out cards.
    pub visible_count: usize,
    pub falloff: Falloff,
}

impl Default for GalleryTuning {
    fn default() -> Self {
        Self {
            speed: 1.2,
            z_spacing: 3.0,
            visible_count: 12,
            falloff: Falloff {
                near: 0.8,
                far: 14.0,
            },
        }
    }
}

/// Screen pixels of wheel scroll per slot step, before `speed`.
pub const WHEEL_PIXELS_PER_SLOT: f32 = 160.0;
/// Screen pixels of touch drag per slot step, before `speed`.
pub const TOUCH_PIXELS_PER_SLOT: f32 = 220.0;
/// Line-mode wheel deltas arrive in lines, not pixels.
pub const WHEEL_LINE_HEIGHT_PX: f32 = 16.0;

/// Maps a logical slot (any integer, the strip is unbounded both ways)
/// onto a source image index. Euclidean remainder keeps the result in
/// `[0, len)` for negative slots too. `None` only when the list is empty.
pub fn wrap_index(slot: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    Some(slot.rem_euclid(len) as usize)
}

/// Visual weight of a card at `depth`. 1.0 at or inside `near`, 0.0 at
/// or beyond `far`, smoothstep between. Cards that have passed the
/// viewer (negative depth) fade over a mirrored `near` span so nothing
/// pops when crossing the camera plane.
pub fn falloff_weight(depth: f32, falloff: Falloff) -> f32 {
    let near = falloff.near.max(0.0);
    let far = falloff.far;
    if depth < 0.0 {
        if near <= 0.0 {
            return 0.0;
        }
        let t = (1.0 + depth / near).clamp(0.0, 1.0);
        return smoothstep(t);
    }
    if depth <= near {
        return 1.0;
    }
    if far <= near || depth >= far {
        return 0.0;
    }
    let t = (depth - near) / (far - near);
    smoothstep(1.0 - t)
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// One laid-out card: which image it shows and where it sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotPlacement {
    /// Index into the source image list; the click path reports this,
    /// never the slot position.
    pub image_index: usize,
    pub depth: f32,
    pub weight: f32,
}

/// Lays out the `visible_count` slots nearest the continuous `offset`.
/// The front card sits at depth `-fract(offset) * z_spacing`, so it
/// eases past the viewer instead of jumping. Cost is O(visible_count)
/// regardless of `image_count`; with fewer images than slots the same
/// image occupies several slots.
pub fn layout_slots(
    offset: f32,
    image_count: usize,
    tuning: &GalleryTuning,
) -> Vec<SlotPlacement> {
    if image_count == 0 || tuning.visible_count == 0 {
        return Vec::new();
    }
    let base = offset.floor();
    let fract = offset - base;
    let base_slot = base as i64;
    let mut placements = Vec::with_capacity(tuning.visible_count);
    for slot in 0..tuning.visible_count {
        let Some(image_index) = wrap_index(base_slot + slot as i64, image_count) else {
            break;
        };
        let depth = (slot as f32 - fract) * tuning.z_spacing;
        placements.push(SlotPlacement {
            image_index,
            depth,
            weight: falloff_weight(depth, tuning.falloff),
        });
    }
    placements
}

/// Converts a raw wheel delta to screen pixels. Mode 1 is lines, mode 2
/// is pages (scaled by the viewport extent).
pub fn wheel_delta_to_pixels(delta: f32, delta_mode: u32, viewport_px: f32) -> f32 {
    match delta_mode {
        1 => delta * WHEEL_LINE_HEIGHT_PX,
        2 => delta * viewport_px.max(1.0),
        _ => delta,
    }
}

/// Offset movement for a wheel burst already normalized to pixels.
pub fn wheel_pixels_to_offset(pixels: f32, speed: f32) -> f32 {
    pixels / WHEEL_PIXELS_PER_SLOT * speed
}

/// Offset movement for a touch drag delta in pixels. Dragging up or
/// left advances the strip, matching the wheel direction.
pub fn touch_pixels_to_offset(pixels: f32, speed: f32) -> f32 {
    pixels / TOUCH_PIXELS_PER_SLOT * speed
}

/// Arrow keys step exactly one slot, scaled by `speed`.
pub fn key_step_offset(forward: bool, speed: f32) -> f32 {
    if forward {
        speed
    } else {
        -speed
    }
}
