use approx::assert_relative_eq;
use rstest::rstest;

use shmup_core::entities::*;

fn intent(up: bool, down: bool, left: bool, right: bool) -> Intent {
    Intent {
        up,
        down,
        left,
        right,
        ..Intent::default()
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[rstest]
#[case::nothing(intent(false, false, false, false), None)]
#[case::up(intent(true, false, false, false), Some(Direction::Up))]
#[case::up_wins_over_down(intent(true, true, false, false), Some(Direction::Up))]
#[case::left_wins_over_right(intent(false, false, true, true), Some(Direction::Left))]
#[case::down_right(intent(false, true, false, true), Some(Direction::DownRight))]
#[case::all_four(intent(true, true, true, true), Some(Direction::UpLeft))]
fn direction_follows_movement_precedence(#[case] held: Intent, #[case] expected: Option<Direction>) {
    assert_eq!(Direction::from_intent(&held), expected);
}

#[test]
fn only_mixed_axes_are_diagonal() {
    assert!(Direction::UpRight.is_diagonal());
    assert!(!Direction::Left.is_diagonal());
    assert_eq!(Direction::DownLeft.axes(), Vec2::new(-1.0, 1.0));
}

// ── Shots ─────────────────────────────────────────────────────────────────────

#[test]
fn shot_velocity_follows_screen_angles() {
    let mut shot = Shot {
        owner: EntityId(1),
        handle: Handle::Weak,
        origin: Vec2::ZERO,
        angle: 180.0,
        speed: 300.0,
        kill: KillCondition::WorldBounds,
        impact: Impact::Regular,
    };
    let v = shot.velocity();
    assert_relative_eq!(v.x, -300.0, epsilon = 1e-3);
    assert_relative_eq!(v.y, 0.0, epsilon = 1e-3);

    // +y is down
    shot.angle = 90.0;
    assert_relative_eq!(shot.velocity().y, 300.0, epsilon = 1e-3);
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn bounds_clamp_and_contain() {
    let b = Bounds::new(100.0, 50.0);
    assert_eq!(b.center(), Vec2::new(50.0, 25.0));
    assert!(b.contains(Vec2::new(100.0, 50.0)));
    assert!(!b.contains(Vec2::new(-1.0, 10.0)));
    assert_eq!(b.clamp(Vec2::new(150.0, -5.0)), Vec2::new(100.0, 0.0));
}

// ── Enemy specs ───────────────────────────────────────────────────────────────

#[test]
fn spec_json_fills_defaults() {
    let spec: EnemySpec = serde_json::from_str(
        r#"{"strategy": {"kind": "scatterer"}, "movement": {"kind": "centered", "speed": 60.0}}"#,
    )
    .expect("parses");
    assert_eq!(spec.strategy, StrategyKind::Scatterer { strong: false });
    assert_eq!(spec.mirror, None);
    assert_eq!(spec.health, 3);
}

#[test]
fn mirrored_presets_carry_their_side() {
    let upper = EnemySpec::slow_moving_spraying(MirrorSide::Upper);
    let lower = EnemySpec::slow_moving_spraying(MirrorSide::Lower);
    assert_eq!(upper.mirror, Some(MirrorSide::Upper));
    assert_eq!(lower.mirror, Some(MirrorSide::Lower));
    assert_eq!(upper.strategy, lower.strategy);
    assert_eq!(EnemySpec::slow_centered_strong_scatterer(None).mirror, None);
}

#[test]
fn presets_are_independent_copies() {
    let base = EnemySpec::dumb();
    let tougher = base.with_health(9);
    assert_eq!(base.health, 3);
    assert_eq!(tougher.health, 9);
    assert_eq!(base.strategy, tougher.strategy);
}
