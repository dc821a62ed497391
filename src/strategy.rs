//! Enemy attack strategies.
//!
//! A strategy never remembers who owns it.  Every call gets the two weapon
//! slots and a [`FireContext`], so the same strategy value can drive any
//! number of enemies and an `act` call is deterministic given its inputs.

use crate::entities::{EnemySpec, MirrorSide, Shot, StrategyKind, Vec2};
use crate::weapon::WeaponSlot;

/// Enemies face the player, who lives on the left.
pub const ENEMY_FORWARD: f32 = 180.0;

/// Offsets of the scatter fan from its forward angle, in firing order.
const SCATTER_FAN: [f32; 5] = [15.0, 7.5, 0.0, -7.5, -15.0];

const SPRAY_FROM: i32 = 180;
const SPRAY_TO: i32 = 120;
const SPRAY_STEP: i32 = 10;

const CRAZY_FROM: i32 = 240;
const CRAZY_TO: i32 = 120;
const CRAZY_STEP: i32 = 10;

/// Per-call inputs: the owner's clock, its position and the current target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireContext {
    pub now: u64,
    pub origin: Vec2,
    pub target: Option<Vec2>,
}

pub trait AttackStrategy {
    /// Set base speed, rate, multi-fire and angle on a fresh slot.
    fn configure_weapon(&self, slot: &mut WeaponSlot);

    /// Run one firing sequence, picking the weak or strong slot.
    fn act(&self, weak: &mut WeaponSlot, strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot>;
}

fn normalize(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Degrees from `from` toward `to`.
pub fn aim(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    normalize(d.y.atan2(d.x).to_degrees())
}

fn sweep(from: i32, to: i32, step: i32) -> impl Iterator<Item = f32> {
    (to..=from).rev().step_by(step as usize).map(|a| a as f32)
}

// ── Single ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Single {
    pub interval_ms: u64,
    pub angle: f32,
}

impl Single {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            angle: ENEMY_FORWARD,
        }
    }
}

impl AttackStrategy for Single {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        slot.speed = 400.0;
        slot.fire_rate = self.interval_ms;
        slot.multi_fire = false;
        slot.fire_angle = self.angle;
    }

    fn act(&self, weak: &mut WeaponSlot, _strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        weak.fire_at(self.angle, ctx.origin, ctx.now)
            .into_iter()
            .collect()
    }
}

// ── Tracking ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tracking {
    pub interval_ms: u64,
}

impl AttackStrategy for Tracking {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        slot.speed = 450.0;
        slot.fire_rate = self.interval_ms;
        slot.multi_fire = false;
        slot.fire_angle = ENEMY_FORWARD;
    }

    fn act(&self, weak: &mut WeaponSlot, _strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        let muzzle = ctx.origin + weak.track_offset;
        let angle = ctx
            .target
            .map(|target| aim(muzzle, target))
            .unwrap_or(ENEMY_FORWARD);
        weak.fire_at(angle, ctx.origin, ctx.now).into_iter().collect()
    }
}

// ── Scatterer ─────────────────────────────────────────────────────────────────

/// Five discrete shots fanned symmetrically around `forward`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scatterer {
    pub forward: f32,
    pub strong: bool,
}

impl Scatterer {
    pub fn angles(&self) -> [f32; 5] {
        SCATTER_FAN.map(|offset| normalize(self.forward + offset))
    }
}

impl AttackStrategy for Scatterer {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        slot.speed = 300.0;
        slot.fire_rate = 900;
        slot.multi_fire = true;
        slot.fire_angle = self.forward;
    }

    fn act(&self, weak: &mut WeaponSlot, strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        let slot = if self.strong { strong } else { weak };
        self.angles()
            .iter()
            .filter_map(|&angle| slot.fire_at(angle, ctx.origin, ctx.now))
            .collect()
    }
}

// ── Spraying ──────────────────────────────────────────────────────────────────

/// Sweeps 180° down to 120° in 10° steps; the mirrored variant reflects the
/// sweep across the horizontal axis (180° up to 240°).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spraying {
    pub mirrored: bool,
}

impl Spraying {
    pub fn angles(&self) -> Vec<f32> {
        sweep(SPRAY_FROM, SPRAY_TO, SPRAY_STEP)
            .map(|a| if self.mirrored { normalize(360.0 - a) } else { a })
            .collect()
    }
}

impl AttackStrategy for Spraying {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        slot.speed = 250.0;
        slot.fire_rate = 600;
        slot.multi_fire = true;
        slot.fire_angle = SPRAY_FROM as f32;
    }

    fn act(&self, weak: &mut WeaponSlot, _strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        self.angles()
            .into_iter()
            .filter_map(|angle| weak.fire_at(angle, ctx.origin, ctx.now))
            .collect()
    }
}

// ── Crazy scatter ─────────────────────────────────────────────────────────────

/// A dense 240°→120° burst, strong slot only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrazyScatter;

impl CrazyScatter {
    pub fn angles(&self) -> Vec<f32> {
        sweep(CRAZY_FROM, CRAZY_TO, CRAZY_STEP).collect()
    }
}

impl AttackStrategy for CrazyScatter {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        slot.speed = 300.0;
        slot.fire_rate = 350;
        slot.multi_fire = true;
    }

    fn act(&self, _weak: &mut WeaponSlot, strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        self.angles()
            .into_iter()
            .filter_map(|angle| strong.fire_at(angle, ctx.origin, ctx.now))
            .collect()
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// The closed set of strategies, dispatched by tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    Single(Single),
    Tracking(Tracking),
    Scatterer(Scatterer),
    Spraying(Spraying),
    CrazyScatter(CrazyScatter),
}

impl Strategy {
    pub fn from_spec(spec: &EnemySpec) -> Self {
        match spec.strategy {
            StrategyKind::Single { interval_ms } => Strategy::Single(Single::new(interval_ms)),
            StrategyKind::Tracking { interval_ms } => Strategy::Tracking(Tracking { interval_ms }),
            StrategyKind::Scatterer { strong } => Strategy::Scatterer(Scatterer {
                forward: ENEMY_FORWARD,
                strong,
            }),
            StrategyKind::Spraying => Strategy::Spraying(Spraying {
                mirrored: spec.mirror == Some(MirrorSide::Lower),
            }),
            StrategyKind::CrazyScatter => Strategy::CrazyScatter(CrazyScatter),
        }
    }

    fn inner(&self) -> &dyn AttackStrategy {
        match self {
            Strategy::Single(s) => s,
            Strategy::Tracking(s) => s,
            Strategy::Scatterer(s) => s,
            Strategy::Spraying(s) => s,
            Strategy::CrazyScatter(s) => s,
        }
    }
}

impl AttackStrategy for Strategy {
    fn configure_weapon(&self, slot: &mut WeaponSlot) {
        self.inner().configure_weapon(slot);
    }

    fn act(&self, weak: &mut WeaponSlot, strong: &mut WeaponSlot, ctx: &FireContext) -> Vec<Shot> {
        self.inner().act(weak, strong, ctx)
    }
}
