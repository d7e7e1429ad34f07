//! Small pure helpers: pixel strings, random ranges, bounding-box overlap.

use rand::Rng;

use crate::entities::Rect;

/// Parse `"200px"` (or a bare `"200"`) into a pixel count.
pub fn px_to_number(val: &str) -> Option<i32> {
    let trimmed = val.trim();
    trimmed
        .strip_suffix("px")
        .unwrap_or(trimmed)
        .trim()
        .parse()
        .ok()
}

pub fn number_to_px(val: i32) -> String {
    format!("{}px", val)
}

/// Random integer in `[min, max)`; collapses to `min` when the range is empty.
pub fn random_between(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// True unless the rectangles are strictly separated on some axis.
/// Touching edges count as a collision.
pub fn has_collision(a: &Rect, b: &Rect) -> bool {
    !(a.top > b.bottom || a.bottom < b.top || a.right < b.left || a.left > b.right)
}
