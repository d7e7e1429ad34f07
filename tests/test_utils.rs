use wizard_game::entities::{Rect, Size};
use wizard_game::utils::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
    Rect::new(x, y, Size { width: w, height: h })
}

// ── pixel strings ─────────────────────────────────────────────────────────────

#[test]
fn px_to_number_parses_suffix_and_bare_numbers() {
    assert_eq!(px_to_number("200px"), Some(200));
    assert_eq!(px_to_number(" 15px "), Some(15));
    assert_eq!(px_to_number("-8px"), Some(-8));
    assert_eq!(px_to_number("42"), Some(42));
}

#[test]
fn px_to_number_rejects_garbage() {
    assert_eq!(px_to_number("px"), None);
    assert_eq!(px_to_number("12em"), None);
    assert_eq!(px_to_number(""), None);
}

#[test]
fn number_to_px_formats() {
    assert_eq!(number_to_px(200), "200px");
    assert_eq!(number_to_px(-5), "-5px");
    assert_eq!(px_to_number(&number_to_px(731)), Some(731));
}

// ── random_between ────────────────────────────────────────────────────────────

#[test]
fn random_between_stays_in_half_open_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen_min = false;
    for _ in 0..2000 {
        let v = random_between(&mut rng, 3, 7);
        assert!((3..7).contains(&v));
        seen_min |= v == 3;
    }
    assert!(seen_min);
}

#[test]
fn random_between_empty_range_returns_min() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(random_between(&mut rng, 10, 10), 10);
    assert_eq!(random_between(&mut rng, 10, -4), 10);
}

// ── has_collision ─────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_collide() {
    assert!(has_collision(&rect(0, 0, 10, 10), &rect(5, 5, 10, 10)));
}

#[test]
fn contained_rect_collides() {
    assert!(has_collision(&rect(0, 0, 100, 100), &rect(40, 40, 5, 5)));
    assert!(has_collision(&rect(40, 40, 5, 5), &rect(0, 0, 100, 100)));
}

#[test]
fn touching_edges_collide() {
    assert!(has_collision(&rect(0, 0, 10, 10), &rect(10, 0, 10, 10)));
    assert!(has_collision(&rect(0, 0, 10, 10), &rect(0, 10, 10, 10)));
}

#[test]
fn separated_on_one_axis_does_not_collide() {
    // Horizontal gap, vertical overlap
    assert!(!has_collision(&rect(0, 0, 10, 10), &rect(11, 0, 10, 10)));
    // Vertical gap, horizontal overlap
    assert!(!has_collision(&rect(0, 0, 10, 10), &rect(0, 11, 10, 10)));
    // Gap on the other side
    assert!(!has_collision(&rect(50, 50, 10, 10), &rect(0, 0, 10, 10)));
}
