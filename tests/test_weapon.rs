use shmup_core::entities::{EntityId, Handle, Impact, KillCondition, Vec2, WeaponKind};
use shmup_core::weapon::{WeaponSlot, WeaponSystem, HEAVY_LIFESPAN_MS, SCATTER_ANGLES};

fn slot(multi_fire: bool) -> WeaponSlot {
    let mut s = WeaponSlot::new(EntityId(7), Handle::Weak);
    s.speed = 300.0;
    s.fire_rate = 100;
    s.multi_fire = multi_fire;
    s
}

// ── WeaponSlot: rate gate ─────────────────────────────────────────────────────

#[test]
fn single_fire_refuses_until_rate_elapsed() {
    let mut s = slot(false);
    assert!(s.fire(Vec2::ZERO, 0).is_some());
    assert!(s.fire(Vec2::ZERO, 0).is_none());
    assert!(s.fire(Vec2::ZERO, 99).is_none());
    assert!(s.fire(Vec2::ZERO, 100).is_some());
    assert_eq!(s.shots_fired(), 2);
}

#[test]
fn multi_fire_allows_a_whole_volley_at_one_instant() {
    let mut s = slot(true);
    for angle in [0.0, 10.0, 20.0] {
        assert!(s.fire_at(angle, Vec2::ZERO, 50).is_some());
    }
    // next volley waits for the rate
    assert!(s.fire(Vec2::ZERO, 51).is_none());
    assert!(s.fire(Vec2::ZERO, 150).is_some());
}

#[test]
fn shot_carries_slot_parameters() {
    let mut s = slot(false);
    s.track_offset = Vec2::new(-20.0, 0.0);
    let shot = s.fire_at(180.0, Vec2::new(500.0, 300.0), 0).expect("gate open");
    assert_eq!(shot.owner, EntityId(7));
    assert_eq!(shot.handle, Handle::Weak);
    assert_eq!(shot.origin, Vec2::new(480.0, 300.0));
    assert_eq!(shot.angle, 180.0);
    assert_eq!(shot.speed, 300.0);
}

// ── WeaponSystem ──────────────────────────────────────────────────────────────

fn player_weapons() -> WeaponSystem {
    WeaponSystem::for_player(EntityId::PLAYER, Vec2::new(25.0, 0.0))
}

#[test]
fn default_weapon_is_regular() {
    let w = player_weapons();
    assert_eq!(w.active(), WeaponKind::Regular);
    assert_eq!(w.selection().remaining(), None);
}

#[test]
fn regular_weapon_fires_once_forward() {
    let mut w = player_weapons();
    let shots = w.fire(Vec2::new(100.0, 100.0), 0);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].angle, 0.0);
    assert_eq!(shots[0].origin, Vec2::new(125.0, 100.0));
    assert_eq!(shots[0].kill, KillCondition::WorldBounds);
}

#[test]
fn scatterer_fires_the_five_angle_fan() {
    let mut w = player_weapons();
    w.activate(WeaponKind::Scatterer, 5000);
    let shots = w.fire(Vec2::ZERO, 0);
    let angles: Vec<f32> = shots.iter().map(|s| s.angle).collect();
    assert_eq!(angles, SCATTER_ANGLES.to_vec());
}

#[test]
fn heavy_weapon_fires_one_heavy_round() {
    let mut w = player_weapons();
    w.activate(WeaponKind::Heavy, 5000);
    let shots = w.fire(Vec2::ZERO, 0);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].impact, Impact::Heavy);
    assert_eq!(shots[0].kill, KillCondition::Lifespan(HEAVY_LIFESPAN_MS));
    assert!(w.fire(Vec2::ZERO, 999).is_empty());
}

#[test]
fn activation_reverts_after_duration() {
    let mut w = player_weapons();
    w.activate(WeaponKind::Scatterer, 1000);
    assert_eq!(w.advance(999), None);
    assert_eq!(w.active(), WeaponKind::Scatterer);
    assert_eq!(w.advance(1), Some(WeaponKind::Scatterer));
    assert_eq!(w.active(), WeaponKind::Regular);
}

#[test]
fn second_activation_replaces_the_first_timer() {
    let mut w = player_weapons();
    w.activate(WeaponKind::Scatterer, 1000);
    w.advance(600);
    w.activate(WeaponKind::Heavy, 1000);

    // the original expiry point (t=1000) passes without a revert
    assert_eq!(w.advance(400), None);
    assert_eq!(w.active(), WeaponKind::Heavy);
    assert_eq!(w.advance(599), None);
    assert_eq!(w.advance(1), Some(WeaponKind::Heavy));
    assert_eq!(w.active(), WeaponKind::Regular);
}

#[test]
fn cancel_timers_keeps_current_weapon() {
    let mut w = player_weapons();
    w.activate(WeaponKind::Heavy, 100);
    w.cancel_timers();
    assert_eq!(w.advance(1000), None);
    assert_eq!(w.active(), WeaponKind::Heavy);
}
