use approx::assert_relative_eq;
use rstest::rstest;

use shmup_core::config::PlayerTuning;
use shmup_core::entities::{DamageOutcome, Direction, Intent, LifeState, Vec2, WeaponKind};
use shmup_core::error::ConfigError;
use shmup_core::player::{accelerate, decelerate, PlayerController, PlayerEvent};
use shmup_core::session::SessionContext;

fn make_player() -> PlayerController {
    PlayerController::new(PlayerTuning::default(), Vec2::new(500.0, 300.0))
}

fn held(f: impl FnOnce(&mut Intent)) -> Intent {
    let mut intent = Intent::default();
    f(&mut intent);
    intent
}

// ── Acceleration model ────────────────────────────────────────────────────────

#[rstest]
#[case::speeds_up(0.0, true, 100.0)]
#[case::clamps_at_top(450.0, true, 500.0)]
#[case::reverses_toward_negative(0.0, false, -100.0)]
#[case::clamps_at_negative_top(-500.0, false, -500.0)]
fn accelerate_steps_and_clamps(#[case] v: f32, #[case] positive: bool, #[case] expected: f32) {
    assert_eq!(accelerate(v, positive, 500.0, 100.0), expected);
}

#[rstest]
#[case::positive(500.0, 400.0)]
#[case::negative(-500.0, -400.0)]
#[case::above_threshold(3.0, 2.4)]
#[case::snaps_positive(2.4, 0.0)]
#[case::snaps_negative(-2.4, 0.0)]
#[case::at_rest(0.0, 0.0)]
fn decelerate_decays_and_snaps(#[case] v: f32, #[case] expected: f32) {
    assert_relative_eq!(decelerate(v, 5.0, 2.0), expected, epsilon = 1e-4);
}

#[test]
fn held_direction_never_exceeds_top_speed_or_step() {
    let mut p = make_player();
    let right = held(|i| i.right = true);
    let mut previous = 0.0;
    for _ in 0..10 {
        p.update_movement(&right);
        let vx = p.velocity().x;
        assert!(vx <= 500.0);
        assert!(vx - previous <= 100.0 + f32::EPSILON);
        previous = vx;
    }
    assert_eq!(p.velocity().x, 500.0);
}

#[test]
fn axes_accelerate_independently() {
    let mut p = make_player();
    let up_left = held(|i| {
        i.up = true;
        i.left = true;
    });
    p.update_movement(&up_left);
    assert_eq!(p.velocity(), Vec2::new(-100.0, -100.0));
}

#[test]
fn releasing_decays_to_exactly_zero() {
    let mut p = make_player();
    let right = held(|i| i.right = true);
    for _ in 0..5 {
        p.update_movement(&right);
    }

    let idle = Intent::default();
    let mut ticks = 0;
    while p.velocity().x != 0.0 {
        let before = p.velocity().x;
        p.update_movement(&idle);
        assert!(p.velocity().x < before);
        ticks += 1;
        assert!(ticks <= 25, "still moving after {ticks} ticks");
    }
    assert_eq!(p.velocity(), Vec2::ZERO);
}

#[test]
fn integrate_moves_by_velocity_over_time() {
    let mut p = make_player();
    p.update_movement(&held(|i| i.down = true));
    p.integrate(500);
    assert_relative_eq!(p.position().y, 350.0, epsilon = 1e-3);
}

#[test]
fn bad_tuning_is_reported_but_player_still_moves() {
    let tuning = PlayerTuning {
        top_speed: 550.0,
        ..PlayerTuning::default()
    };
    let mut p = PlayerController::new(tuning, Vec2::ZERO);
    assert!(matches!(
        p.diagnostics(),
        [ConfigError::TopSpeedNotMultiple { .. }]
    ));
    p.update_movement(&held(|i| i.right = true));
    assert_eq!(p.velocity().x, 100.0);
}

#[test]
fn debug_output_carries_diagnostics() {
    let tuning = PlayerTuning {
        decay_divisor: 1.0,
        ..PlayerTuning::default()
    };
    let p = PlayerController::new(tuning, Vec2::ZERO);
    let shown = format!("{p:?}");
    assert!(shown.starts_with("PlayerController"));
    assert!(shown.contains("diagnostics"));
}

// ── Dodge ─────────────────────────────────────────────────────────────────────

#[rstest]
#[case::up(Direction::Up)]
#[case::right(Direction::Right)]
#[case::down_left(Direction::DownLeft)]
#[case::up_left(Direction::UpLeft)]
fn dodge_displacement_has_fixed_magnitude(#[case] direction: Direction) {
    let mut p = make_player();
    let start = p.position();
    assert!(p.try_dodge(Some(direction)).is_some());
    assert_relative_eq!((p.position() - start).length(), 125.0, epsilon = 1e-3);
}

#[test]
fn dodge_without_direction_goes_forward() {
    let mut p = make_player();
    let event = p.try_dodge(None);
    assert!(matches!(
        event,
        Some(PlayerEvent::Dodged {
            direction: Direction::Right,
            ..
        })
    ));
    assert_relative_eq!(p.position().x, 625.0, epsilon = 1e-3);
}

#[test]
fn dodge_during_cooldown_does_nothing() {
    let mut p = make_player();
    p.try_dodge(Some(Direction::Up));
    let after_first = p.position();
    p.advance(1000);
    assert!(p.try_dodge(Some(Direction::Up)).is_none());
    assert_eq!(p.position(), after_first);
}

#[test]
fn cooldown_percent_climbs_and_hits_full_only_at_expiry() {
    let mut p = make_player();
    assert_eq!(p.dodge_cooldown_percent(), 100);
    p.try_dodge(None);
    assert_eq!(p.dodge_cooldown_percent(), 0);

    let mut previous = 0;
    for _ in 0..27 {
        p.advance(100);
        let percent = p.dodge_cooldown_percent();
        assert!(percent >= previous);
        assert!(percent < 100);
        previous = percent;
    }
    assert!(!p.dodge_ready());

    let events = p.advance(100);
    assert!(events.contains(&PlayerEvent::DodgeReady));
    assert_eq!(p.dodge_cooldown_percent(), 100);
    assert!(p.try_dodge(None).is_some());
}

#[test]
fn cooldown_percent_is_rounded() {
    let mut p = make_player();
    p.try_dodge(None);
    p.advance(1400);
    assert_eq!(p.dodge_cooldown_percent(), 50);
}

#[test]
fn dodge_grants_a_short_invulnerability() {
    let mut p = make_player();
    p.try_dodge(None);
    assert!(p.is_invulnerable());
    p.advance(199);
    assert!(p.is_invulnerable());
    let events = p.advance(1);
    assert!(events.contains(&PlayerEvent::InvulnerabilityOver));
    assert!(!p.is_invulnerable());
}

#[test]
fn dodge_does_not_extend_an_existing_window() {
    let mut p = make_player();
    p.make_invulnerable(1000);
    p.advance(900);
    assert!(p.try_dodge(None).is_some());
    p.advance(100);
    assert!(!p.is_invulnerable());
}

#[test]
fn update_dodges_in_the_held_direction() {
    let mut p = make_player();
    let intent = held(|i| {
        i.down = true;
        i.dodge = true;
    });
    let frame = p.update(&intent, 0);
    assert!(frame.events.iter().any(|e| matches!(
        e,
        PlayerEvent::Dodged {
            direction: Direction::Down,
            ..
        }
    )));
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn second_hit_inside_window_is_refused() {
    let mut p = make_player();
    let mut session = SessionContext::begin_level(3);

    assert_eq!(
        p.receive_damage(1, &mut session),
        DamageOutcome::Applied { health: 2 }
    );
    assert_eq!(p.receive_damage(1, &mut session), DamageOutcome::Refused);
    assert_eq!(session.hearts(), 2);
    assert_eq!(p.health(), 2);
}

#[test]
fn hit_after_window_applies_again() {
    let mut p = make_player();
    let mut session = SessionContext::begin_level(3);
    p.receive_damage(1, &mut session);
    p.advance(1000);
    assert_eq!(
        p.receive_damage(1, &mut session),
        DamageOutcome::Applied { health: 1 }
    );
    assert_eq!(session.hearts(), 1);
}

#[test]
fn lethal_hit_destroys_player_and_ends_game() {
    let mut p = make_player();
    let mut session = SessionContext::begin_level(3);
    for _ in 0..2 {
        p.receive_damage(1, &mut session);
        p.advance(1000);
    }
    assert_eq!(p.receive_damage(1, &mut session), DamageOutcome::Killed);
    assert_eq!(p.life(), LifeState::PendingRemoval);
    assert_eq!(session.hearts(), 0);
    assert!(session.is_game_over());
    assert!(!session.restart_ready());

    // dead players neither fire, dodge nor take damage
    assert!(p.fire().is_empty());
    assert!(p.try_dodge(None).is_none());
    p.advance(5000);
    assert_eq!(p.receive_damage(1, &mut session), DamageOutcome::Refused);

    session.advance(1500);
    assert!(session.restart_ready());
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[test]
fn fire_is_rate_gated_on_the_player_clock() {
    let mut p = make_player();
    assert_eq!(p.fire().len(), 1);
    assert!(p.fire().is_empty());
    p.advance(40);
    assert_eq!(p.fire().len(), 1);
}

#[test]
fn regular_shot_leaves_from_the_muzzle() {
    let mut p = make_player();
    let shots = p.fire();
    assert_eq!(shots[0].origin, Vec2::new(525.0, 300.0));
}

#[test]
fn power_weapon_expires_back_to_regular() {
    let mut p = make_player();
    p.set_active_weapon(WeaponKind::Scatterer, 1000);
    assert_eq!(p.active_weapon(), WeaponKind::Scatterer);
    assert_eq!(p.fire().len(), 5);

    let events = p.advance(1000);
    assert!(events.contains(&PlayerEvent::WeaponExpired(WeaponKind::Scatterer)));
    assert_eq!(p.active_weapon(), WeaponKind::Regular);
}

#[test]
fn heavy_shot_raises_launch_event() {
    let mut p = make_player();
    p.set_active_weapon(WeaponKind::Heavy, 8000);
    let frame = p.update(&held(|i| i.fire = true), 16);
    assert_eq!(frame.shots.len(), 1);
    assert!(frame
        .events
        .iter()
        .any(|e| matches!(e, PlayerEvent::HeavyLaunched(_))));
}
