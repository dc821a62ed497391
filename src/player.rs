//! The player ship: acceleration model, dodge, invulnerability and weapon
//! selection, all driven by the owner's own timer.

use std::f32::consts::FRAC_PI_4;

use log::{debug, error, info};

use crate::clock::{CooldownWindow, Timer};
use crate::config::PlayerTuning;
use crate::entities::{
    Bounds, DamageOutcome, Direction, EntityId, Impact, Intent, LifeState, Shot, Vec2, WeaponKind,
};
use crate::error::ConfigError;
use crate::session::SessionContext;
use crate::weapon::WeaponSystem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerAction {
    DodgeReady,
    InvulnerabilityOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    Dodged { direction: Direction, to: Vec2 },
    DodgeReady,
    InvulnerabilityOver,
    WeaponExpired(WeaponKind),
    /// The heavy launcher's on-fired hook.
    HeavyLaunched(Shot),
}

/// What one `update` call produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerFrame {
    pub shots: Vec<Shot>,
    pub events: Vec<PlayerEvent>,
}

// ── Acceleration model ───────────────────────────────────────────────────────

/// One frame of held input on an axis: a fixed step toward `±top`, clamped.
pub fn accelerate(velocity: f32, positive: bool, top: f32, step: f32) -> f32 {
    if positive {
        (velocity + step).min(top)
    } else {
        (velocity - step).max(-top)
    }
}

/// One frame of released input: lose `1/divisor` of the speed, snapping to
/// zero once within `threshold`.
pub fn decelerate(velocity: f32, divisor: f32, threshold: f32) -> f32 {
    if velocity > 0.0 {
        let v = velocity - velocity / divisor;
        if v <= threshold {
            0.0
        } else {
            v
        }
    } else if velocity < 0.0 {
        let v = velocity + (velocity / divisor).abs();
        if v >= -threshold {
            0.0
        } else {
            v
        }
    } else {
        0.0
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct PlayerController {
    id: EntityId,
    tuning: PlayerTuning,
    position: Vec2,
    velocity: Vec2,
    health: i32,
    life: LifeState,
    bounds: Option<Bounds>,
    invulnerable: bool,
    dodge: CooldownWindow,
    timer: Timer<PlayerAction>,
    weapons: WeaponSystem,
    diagnostics: Vec<ConfigError>,
}

impl PlayerController {
    /// Build a player at `spawn`.  A bad tuning is logged and kept in
    /// [`diagnostics`](Self::diagnostics); the player still works.
    pub fn new(tuning: PlayerTuning, spawn: Vec2) -> Self {
        let mut diagnostics = Vec::new();
        if let Err(e) = tuning.validate() {
            error!("player tuning: {e}");
            diagnostics.push(e);
        }

        Self {
            id: EntityId::PLAYER,
            position: spawn,
            velocity: Vec2::ZERO,
            health: tuning.health,
            life: LifeState::Alive,
            bounds: None,
            invulnerable: false,
            dodge: CooldownWindow::new(tuning.dodge_cooldown_ms),
            timer: Timer::new(),
            weapons: WeaponSystem::for_player(EntityId::PLAYER, tuning.track_offset),
            diagnostics,
            tuning,
        }
    }

    /// Keep the ship inside `bounds` after every move.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self.position = bounds.clamp(self.position);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn dodge_ready(&self) -> bool {
        self.dodge.is_ready()
    }

    pub fn active_weapon(&self) -> WeaponKind {
        self.weapons.active()
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn diagnostics(&self) -> &[ConfigError] {
        &self.diagnostics
    }

    /// The player's clock, in ms since spawn.
    pub fn now(&self) -> u64 {
        self.timer.now()
    }

    /// Advance owned timers by `dt` ms and apply whatever came due.
    pub fn advance(&mut self, dt: u64) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        for action in self.timer.advance(dt) {
            match action {
                PlayerAction::DodgeReady => {
                    self.dodge.expire();
                    events.push(PlayerEvent::DodgeReady);
                }
                PlayerAction::InvulnerabilityOver => {
                    self.invulnerable = false;
                    events.push(PlayerEvent::InvulnerabilityOver);
                }
            }
        }
        if let Some(expired) = self.weapons.advance(dt) {
            events.push(PlayerEvent::WeaponExpired(expired));
        }
        events
    }

    /// Apply one frame of the acceleration model.  Each axis is independent.
    pub fn update_movement(&mut self, intent: &Intent) {
        let PlayerTuning {
            top_speed,
            acceleration_step,
            decay_divisor,
            snap_threshold,
            ..
        } = self.tuning;
        let v = self.velocity;

        let vy = if intent.up {
            accelerate(v.y, false, top_speed, acceleration_step)
        } else if intent.down {
            accelerate(v.y, true, top_speed, acceleration_step)
        } else {
            decelerate(v.y, decay_divisor, snap_threshold)
        };

        let vx = if intent.left {
            accelerate(v.x, false, top_speed, acceleration_step)
        } else if intent.right {
            accelerate(v.x, true, top_speed, acceleration_step)
        } else {
            decelerate(v.x, decay_divisor, snap_threshold)
        };

        self.velocity = Vec2::new(vx, vy);
    }

    /// Move by the current velocity over `dt` ms.
    pub fn integrate(&mut self, dt: u64) {
        self.position += self.velocity * (dt as f32 / 1000.0);
        self.keep_in_bounds();
    }

    fn keep_in_bounds(&mut self) {
        if let Some(bounds) = self.bounds {
            self.position = bounds.clamp(self.position);
        }
    }

    /// Blink along `direction` (forward when `None`).  Does nothing while the
    /// cooldown runs.
    pub fn try_dodge(&mut self, direction: Option<Direction>) -> Option<PlayerEvent> {
        if !self.is_alive() || !self.dodge.is_ready() {
            return None;
        }

        let direction = direction.unwrap_or(Direction::Right);
        let distance = if direction.is_diagonal() {
            self.tuning.dodge_distance * FRAC_PI_4.sin()
        } else {
            self.tuning.dodge_distance
        };
        self.position += direction.axes() * distance;
        self.keep_in_bounds();

        let now = self.timer.now();
        self.dodge.trigger(now);
        self.timer.add(self.tuning.dodge_cooldown_ms, PlayerAction::DodgeReady);

        if !self.invulnerable {
            self.make_invulnerable(self.tuning.dodge_invulnerability_ms);
        }

        debug!("dodged {direction:?} to {:?}", self.position);
        Some(PlayerEvent::Dodged {
            direction,
            to: self.position,
        })
    }

    /// Refuse damage for `window` ms.
    pub fn make_invulnerable(&mut self, window: u64) {
        self.invulnerable = true;
        self.timer
            .cancel_where(|a| *a == PlayerAction::InvulnerabilityOver);
        self.timer.add(window, PlayerAction::InvulnerabilityOver);
    }

    pub fn set_active_weapon(&mut self, kind: WeaponKind, duration: u64) {
        self.weapons.activate(kind, duration);
    }

    pub fn fire(&mut self) -> Vec<Shot> {
        if !self.is_alive() {
            return Vec::new();
        }
        let now = self.timer.now();
        self.weapons.fire(self.position, now)
    }

    /// Take a hit.  While invulnerable (or dead) the hit is refused and no
    /// heart is lost.
    pub fn receive_damage(&mut self, amount: i32, session: &mut SessionContext) -> DamageOutcome {
        if !self.is_alive() || self.invulnerable {
            return DamageOutcome::Refused;
        }

        self.make_invulnerable(self.tuning.damage_invulnerability_ms);
        session.remove_heart();
        self.health -= amount;

        if self.health <= 0 {
            self.health = 0;
            self.destroy();
            session.enter_game_over();
            info!("player destroyed");
            return DamageOutcome::Killed;
        }
        debug!("player hit for {amount}, {} health left", self.health);
        DamageOutcome::Applied {
            health: self.health,
        }
    }

    pub fn dodge_cooldown_percent(&self) -> u8 {
        self.dodge.percent(self.timer.now())
    }

    /// Mark for removal and drop every pending timer entry.
    pub fn destroy(&mut self) {
        self.timer.cancel_all();
        self.weapons.cancel_timers();
        self.velocity = Vec2::ZERO;
        self.life = LifeState::PendingRemoval;
    }

    pub fn mark_removed(&mut self) {
        if self.life == LifeState::PendingRemoval {
            self.life = LifeState::Removed;
        }
    }

    /// One full frame in the required order: timers, movement, dodge, fire.
    pub fn update(&mut self, intent: &Intent, dt: u64) -> PlayerFrame {
        let mut frame = PlayerFrame {
            events: self.advance(dt),
            ..PlayerFrame::default()
        };
        if !self.is_alive() {
            return frame;
        }

        self.update_movement(intent);
        self.integrate(dt);

        if intent.dodge {
            if let Some(event) = self.try_dodge(Direction::from_intent(intent)) {
                frame.events.push(event);
            }
        }

        if intent.fire {
            let shots = self.fire();
            for shot in shots.iter().filter(|s| s.impact == Impact::Heavy) {
                frame.events.push(PlayerEvent::HeavyLaunched(shot.clone()));
            }
            frame.shots = shots;
        }

        frame
    }
}
