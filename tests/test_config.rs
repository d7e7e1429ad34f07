use std::path::Path;

use wizard_game::config::{Config, ConfigError};
use wizard_game::entities::{EntityKind, Size};

#[test]
fn defaults_match_builtin_balance() {
    let c = Config::default();
    assert_eq!(c.speed, 2);
    assert_eq!(c.wizard_moving_multiplier, 4);
    assert_eq!(c.fireball_moving_multiplier, 5);
    assert_eq!(c.fire_interval, 1000);
    assert_eq!(c.cloud_spawn_interval, 3000);
    assert_eq!(c.bug_spawn_interval, 1000);
    assert_eq!(c.bug_kill_score, 2000);
    assert_eq!(c.area(), Size { width: 1000, height: 600 });
    assert!(c.validate().is_ok());
}

#[test]
fn size_of_each_kind() {
    let c = Config::default();
    assert_eq!(c.size_of(&EntityKind::Bug), Size { width: 60, height: 60 });
    assert_eq!(c.size_of(&EntityKind::Cloud).width, 200);
    assert_eq!(c.size_of(&EntityKind::Fireball).width, 40);
    assert_eq!(c.wizard_size(), Size { width: 64, height: 64 });
}

#[test]
fn json_overrides_subset_and_accepts_pixel_strings() {
    let c = Config::from_json(r#"{ "area_width": "1200px", "area_height": 700, "bug_kill_score": 50 }"#)
        .unwrap();
    assert_eq!(c.area_width, 1200);
    assert_eq!(c.area_height, 700);
    assert_eq!(c.bug_kill_score, 50);
    // Untouched fields keep their defaults
    assert_eq!(c.speed, 2);
    assert_eq!(c.fire_interval, 1000);
}

#[test]
fn serialized_defaults_load_back() {
    let text = serde_json::to_string(&Config::default()).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), Config::default());
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Parse(_))));
}

#[test]
fn bad_pixel_string_is_parse_error() {
    let err = Config::from_json(r#"{ "bug_width": "wide" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn non_positive_speed_is_invalid() {
    let err = Config::from_json(r#"{ "speed": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("speed"));
}

#[test]
fn area_smaller_than_wizard_is_invalid() {
    let err = Config::from_json(r#"{ "area_width": 50 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = Config::load(Path::new("/definitely/not/here/wizard.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

// ── upper bounds ──────────────────────────────────────────────────────────────

fn invalid(json: &str) -> String {
    match Config::from_json(json) {
        Err(ConfigError::Invalid(msg)) => msg,
        other => panic!("expected Invalid for {json}, got {other:?}"),
    }
}

#[test]
fn huge_area_is_invalid() {
    assert!(invalid(r#"{ "area_width": 2147483647 }"#).contains("area_width"));
    assert!(invalid(r#"{ "area_height": "100001px" }"#).contains("area_height"));
}

#[test]
fn huge_entity_sizes_are_invalid() {
    for field in [
        "wizard_width",
        "wizard_height",
        "fireball_width",
        "fireball_height",
        "cloud_width",
        "cloud_height",
        "bug_width",
        "bug_height",
    ] {
        let msg = invalid(&format!(r#"{{ "{field}": 100001 }}"#));
        assert!(msg.contains(field), "{msg}");
    }
}

#[test]
fn largest_lengths_are_accepted() {
    let c = Config::from_json(
        r#"{ "area_width": 100000, "area_height": 100000, "bug_width": 100000, "fireball_offset_x": -100000 }"#,
    )
    .unwrap();
    assert_eq!(c.area_width, 100_000);
    assert_eq!(c.fireball_offset_x, -100_000);
}

#[test]
fn out_of_range_positions_and_offsets_are_invalid() {
    assert!(invalid(r#"{ "wizard_start_x": 100001 }"#).contains("wizard_start_x"));
    assert!(invalid(r#"{ "wizard_start_y": -100001 }"#).contains("wizard_start_y"));
    assert!(invalid(r#"{ "fireball_offset_x": 2147483647 }"#).contains("fireball_offset_x"));
}

#[test]
fn huge_speed_is_invalid() {
    assert!(invalid(r#"{ "speed": 1000000000 }"#).contains("speed"));
}

#[test]
fn step_wider_than_area_is_invalid() {
    // 2 * 501 > 1000
    assert!(invalid(r#"{ "wizard_moving_multiplier": 501 }"#).contains("wizard step"));
    assert!(invalid(r#"{ "fireball_moving_multiplier": 501 }"#).contains("fireball step"));
    // 2 * 500 == 1000 is still fine
    assert!(Config::from_json(r#"{ "fireball_moving_multiplier": 500 }"#).is_ok());
}

#[test]
fn huge_intervals_and_bonus_are_invalid() {
    for field in [
        "fire_interval",
        "cloud_spawn_interval",
        "cloud_spawn_jitter",
        "bug_spawn_interval",
    ] {
        let msg = invalid(&format!(r#"{{ "{field}": 18446744073709551615 }}"#));
        assert!(msg.contains(field), "{msg}");
    }
    assert!(invalid(r#"{ "bug_kill_score": 1000001 }"#).contains("bug_kill_score"));
}

#[test]
fn zero_cloud_interval_is_accepted() {
    let c = Config::from_json(r#"{ "cloud_spawn_interval": 0 }"#).unwrap();
    assert_eq!(c.cloud_spawn_interval, 0);
}
