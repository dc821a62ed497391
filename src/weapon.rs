//! Weapon slots and the player's weapon selection.

use log::debug;

use crate::clock::Timer;
use crate::entities::{EntityId, Handle, Impact, KillCondition, Shot, Vec2, WeaponKind};

/// Angles of the player's scatter fan, fired in this order.
pub const SCATTER_ANGLES: [f32; 5] = [15.0, 7.5, 0.0, 352.5, 345.0];

/// Heavy rounds start at rest, so they expire by age rather than by leaving
/// the world.
pub const HEAVY_LIFESPAN_MS: u64 = 3000;

// ── Slot ──────────────────────────────────────────────────────────────────────

/// One logical gun, owned by exactly one entity.
///
/// A single-fire slot refuses until `fire_rate` ms have passed since its last
/// shot.  A multi-fire slot opens a volley instead: every shot requested at
/// the same clock value goes out, and the *next* volley waits for the rate.
#[derive(Clone, Debug)]
pub struct WeaponSlot {
    owner: EntityId,
    handle: Handle,
    pub speed: f32,
    /// Minimum ms between shots (or volleys).
    pub fire_rate: u64,
    /// Degrees, clockwise from +x.
    pub fire_angle: f32,
    pub multi_fire: bool,
    pub kill: KillCondition,
    pub track_offset: Vec2,
    pub impact: Impact,
    next_fire: u64,
    volley_at: Option<u64>,
    shots_fired: u32,
}

impl WeaponSlot {
    pub fn new(owner: EntityId, handle: Handle) -> Self {
        Self {
            owner,
            handle,
            speed: 0.0,
            fire_rate: 0,
            fire_angle: 0.0,
            multi_fire: false,
            kill: KillCondition::WorldBounds,
            track_offset: Vec2::ZERO,
            impact: Impact::Regular,
            next_fire: 0,
            volley_at: None,
            shots_fired: 0,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    fn in_open_volley(&self, now: u64) -> bool {
        self.multi_fire && self.volley_at == Some(now)
    }

    pub fn can_fire(&self, now: u64) -> bool {
        self.in_open_volley(now) || now >= self.next_fire
    }

    /// Fire at the current `fire_angle` from `origin` (the owner's position).
    /// `None` means the rate gate is still closed; that is not an error.
    pub fn fire(&mut self, origin: Vec2, now: u64) -> Option<Shot> {
        if !self.can_fire(now) {
            return None;
        }
        if !self.in_open_volley(now) {
            self.next_fire = now + self.fire_rate;
            self.volley_at = Some(now);
        }
        self.shots_fired += 1;

        Some(Shot {
            owner: self.owner,
            handle: self.handle,
            origin: origin + self.track_offset,
            angle: self.fire_angle,
            speed: self.speed,
            kill: self.kill,
            impact: self.impact,
        })
    }

    pub fn fire_at(&mut self, angle: f32, origin: Vec2, now: u64) -> Option<Shot> {
        self.fire_angle = angle;
        self.fire(origin, now)
    }
}

// ── Player weapon system ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Revert;

/// The selected weapon plus the timer that will put the default back.
#[derive(Clone, Debug, Default)]
pub struct ActiveWeaponSelection {
    current: WeaponKind,
    expiry: Timer<Revert>,
}

impl ActiveWeaponSelection {
    pub fn current(&self) -> WeaponKind {
        self.current
    }

    /// ms until the default weapon returns, if a power weapon is active.
    pub fn remaining(&self) -> Option<u64> {
        self.expiry.remaining_where(|_| true)
    }
}

#[derive(Clone, Debug)]
pub struct WeaponSystem {
    regular: WeaponSlot,
    scatterer: WeaponSlot,
    heavy: WeaponSlot,
    selection: ActiveWeaponSelection,
}

impl WeaponSystem {
    pub fn for_player(owner: EntityId, track_offset: Vec2) -> Self {
        let mut regular = WeaponSlot::new(owner, Handle::Player(WeaponKind::Regular));
        regular.speed = 1500.0;
        regular.fire_rate = 40;
        regular.track_offset = track_offset;

        let mut scatterer = WeaponSlot::new(owner, Handle::Player(WeaponKind::Scatterer));
        scatterer.speed = 1500.0;
        scatterer.fire_rate = 130;
        scatterer.multi_fire = true;
        scatterer.track_offset = track_offset;

        let mut heavy = WeaponSlot::new(owner, Handle::Player(WeaponKind::Heavy));
        heavy.speed = 0.0;
        heavy.fire_rate = 1000;
        heavy.impact = Impact::Heavy;
        heavy.kill = KillCondition::Lifespan(HEAVY_LIFESPAN_MS);
        heavy.track_offset = track_offset;

        Self {
            regular,
            scatterer,
            heavy,
            selection: ActiveWeaponSelection::default(),
        }
    }

    pub fn active(&self) -> WeaponKind {
        self.selection.current
    }

    pub fn selection(&self) -> &ActiveWeaponSelection {
        &self.selection
    }

    pub fn slot(&self, kind: WeaponKind) -> &WeaponSlot {
        match kind {
            WeaponKind::Regular => &self.regular,
            WeaponKind::Scatterer => &self.scatterer,
            WeaponKind::Heavy => &self.heavy,
        }
    }

    /// Switch now and revert to the default after `duration` ms.  Any pending
    /// reversion from an earlier activation is dropped, never stacked.
    pub fn activate(&mut self, kind: WeaponKind, duration: u64) {
        self.selection.expiry.cancel_all();
        self.selection.current = kind;
        if kind != WeaponKind::Regular {
            self.selection.expiry.add(duration, Revert);
        }
        debug!("weapon switched to {kind:?} for {duration}ms");
    }

    /// Advance the expiry timer; returns the weapon that just ran out.
    pub fn advance(&mut self, dt: u64) -> Option<WeaponKind> {
        if self.selection.expiry.advance(dt).is_empty() {
            return None;
        }
        let expired = self.selection.current;
        self.selection.current = WeaponKind::Regular;
        debug!("{expired:?} expired, back to regular weapon");
        Some(expired)
    }

    /// Run the active weapon's fire sequence.
    pub fn fire(&mut self, origin: Vec2, now: u64) -> Vec<Shot> {
        match self.selection.current {
            WeaponKind::Regular => self.regular.fire(origin, now).into_iter().collect(),
            WeaponKind::Scatterer => SCATTER_ANGLES
                .iter()
                .filter_map(|&angle| self.scatterer.fire_at(angle, origin, now))
                .collect(),
            WeaponKind::Heavy => self.heavy.fire(origin, now).into_iter().collect(),
        }
    }

    /// Drop any pending reversion, e.g. when the owner is destroyed.
    pub fn cancel_timers(&mut self) {
        self.selection.expiry.cancel_all();
    }
}
