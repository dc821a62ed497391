use rstest::rstest;

use shmup_core::config::{fire_interval_scale, hearts_for, GameConfig, PlayerTuning};
use shmup_core::entities::{Bounds, Level};
use shmup_core::error::ConfigError;

// ── Difficulty tables ────────────────────────────────────────────────────────

#[rstest]
#[case::easy(Level::Easy, 5, 1.5)]
#[case::medium(Level::Medium, 3, 1.0)]
#[case::hard(Level::Hard, 2, 0.75)]
fn difficulty_tables(#[case] level: Level, #[case] hearts: u32, #[case] scale: f32) {
    assert_eq!(hearts_for(&level), hearts);
    assert_eq!(fire_interval_scale(&level), scale);
}

#[test]
fn player_health_follows_life_pool() {
    let config = GameConfig::for_level(Level::Easy);
    assert_eq!(config.player_tuning().health, 5);
}

// ── Tuning validation ─────────────────────────────────────────────────────────

#[test]
fn default_tuning_is_valid() {
    assert!(PlayerTuning::default().validate().is_ok());
}

#[rstest]
#[case::zero_step(PlayerTuning { acceleration_step: 0.0, ..PlayerTuning::default() })]
#[case::uneven_top_speed(PlayerTuning { top_speed: 450.5, ..PlayerTuning::default() })]
#[case::no_decay(PlayerTuning { decay_divisor: 1.0, ..PlayerTuning::default() })]
fn bad_tuning_is_rejected(#[case] tuning: PlayerTuning) {
    assert!(tuning.validate().is_err());
}

#[test]
fn uneven_top_speed_names_both_values() {
    let tuning = PlayerTuning {
        top_speed: 550.0,
        ..PlayerTuning::default()
    };
    let err = tuning.validate().expect_err("not a multiple");
    assert!(matches!(err, ConfigError::TopSpeedNotMultiple { .. }));
    assert_eq!(
        err.to_string(),
        "player top speed 550 is not a multiple of move step 100"
    );
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[test]
fn partial_json_overrides_only_listed_fields() {
    let config = GameConfig::from_json(
        r#"{"level": "Hard", "player": {"dodge_cooldown_ms": 2000}}"#,
    )
    .expect("parses");
    assert_eq!(config.level, Level::Hard);
    assert_eq!(config.player.dodge_cooldown_ms, 2000);
    assert_eq!(config.player.top_speed, 500.0);
    assert_eq!(config.world, Bounds::default());
}

#[test]
fn empty_json_is_the_default_config() {
    assert_eq!(GameConfig::from_json("{}").expect("parses"), GameConfig::default());
}

#[test]
fn malformed_json_reports_parse_error() {
    assert!(matches!(
        GameConfig::from_json("{\"level\": 3}"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn undersized_world_is_rejected_on_load() {
    let err = GameConfig::from_json(r#"{"world": {"min": [0, 0], "max": [100, 80]}}"#)
        .expect_err("world too small");
    assert!(matches!(
        err,
        ConfigError::WorldTooSmall {
            width,
            height,
            ..
        } if width == 100.0 && height == 80.0
    ));
}

#[test]
fn inverted_world_is_rejected_on_load() {
    let result = GameConfig::from_json(r#"{"world": {"min": [1280, 720], "max": [0, 0]}}"#);
    assert!(matches!(result, Err(ConfigError::WorldTooSmall { .. })));
}

#[test]
fn world_at_the_minimum_is_accepted() {
    let config = GameConfig::from_json(r#"{"world": {"min": [0, 0], "max": [320, 240]}}"#)
        .expect("minimum world fits");
    assert!(config.validate_world().is_ok());
}

#[test]
fn missing_file_reports_io_error() {
    let path = std::env::temp_dir().join("shmup-core-no-such-config.json");
    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Io(_))));
}
