//! Enemy ships: movement behaviour, health and a delegated attack strategy.

use log::debug;

use crate::clock::Timer;
use crate::entities::{
    Bounds, DamageOutcome, EnemySpec, EntityId, Handle, LifeState, MirrorSide, MovementKind, Shot,
    Vec2,
};
use crate::strategy::{AttackStrategy, FireContext, Strategy};
use crate::weapon::WeaponSlot;

/// Time after spawning before an enemy starts shooting.
pub const ENTRY_DELAY_MS: u64 = 700;

/// Muzzle position relative to the ship (enemies shoot leftward).
const ENEMY_TRACK_OFFSET: Vec2 = Vec2::new(-20.0, 0.0);

/// Vertical margin kept by patrolling enemies.
const PATROL_MARGIN: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnemyAction {
    ArmWeapons,
}

#[derive(Clone, Debug)]
pub struct EnemyController {
    id: EntityId,
    spec: EnemySpec,
    strategy: Strategy,
    position: Vec2,
    velocity: Vec2,
    anchor: Vec2,
    bounds: Bounds,
    health: i32,
    life: LifeState,
    armed: bool,
    weak: WeaponSlot,
    strong: WeaponSlot,
    timer: Timer<EnemyAction>,
}

impl EnemyController {
    /// Spawn at `position`, heading for `anchor`.  `fire_scale` stretches or
    /// shrinks every weapon interval the strategy configures.
    pub fn spawn(
        id: EntityId,
        spec: EnemySpec,
        position: Vec2,
        anchor: Vec2,
        bounds: Bounds,
        fire_scale: f32,
    ) -> Self {
        let strategy = Strategy::from_spec(&spec);

        let mut weak = WeaponSlot::new(id, Handle::Weak);
        let mut strong = WeaponSlot::new(id, Handle::Strong);
        for slot in [&mut weak, &mut strong] {
            strategy.configure_weapon(slot);
            slot.track_offset = ENEMY_TRACK_OFFSET;
            slot.fire_rate = (slot.fire_rate as f32 * fire_scale).round() as u64;
        }

        let mut timer = Timer::new();
        timer.add(ENTRY_DELAY_MS, EnemyAction::ArmWeapons);

        debug!("spawned {id:?} as {:?} at {position:?}", spec.strategy);
        Self {
            id,
            spec,
            strategy,
            position,
            velocity: Vec2::ZERO,
            anchor,
            bounds,
            health: spec.health,
            life: LifeState::Alive,
            armed: false,
            weak,
            strong,
            timer,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn spec(&self) -> &EnemySpec {
        &self.spec
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
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

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn weak(&self) -> &WeaponSlot {
        &self.weak
    }

    pub fn strong(&self) -> &WeaponSlot {
        &self.strong
    }

    pub fn pending_timers(&self) -> usize {
        self.timer.len()
    }

    /// Anything but `Alive` counts as eliminated for wave purposes.
    pub fn is_eliminated(&self) -> bool {
        self.life != LifeState::Alive
    }

    pub fn advance(&mut self, dt: u64) {
        for action in self.timer.advance(dt) {
            match action {
                EnemyAction::ArmWeapons => self.armed = true,
            }
        }
    }

    /// Vertical band a patrolling enemy may use; mirrored pairs split it.
    fn patrol_band(&self) -> (f32, f32) {
        let top = self.bounds.min.y + PATROL_MARGIN;
        let bottom = self.bounds.max.y - PATROL_MARGIN;
        let mid = self.bounds.center().y;
        match self.spec.mirror {
            Some(MirrorSide::Upper) => (top, mid),
            Some(MirrorSide::Lower) => (mid, bottom),
            None => (top, bottom),
        }
    }

    pub fn step_movement(&mut self, dt: u64) {
        if self.is_eliminated() {
            return;
        }
        let secs = dt as f32 / 1000.0;

        match self.spec.movement {
            MovementKind::Hover => self.velocity = Vec2::ZERO,
            MovementKind::Centered { speed } => {
                let to_anchor = self.anchor - self.position;
                let reach = speed * secs;
                if to_anchor.length() <= reach {
                    self.position = self.anchor;
                    self.velocity = Vec2::ZERO;
                    return;
                }
                self.velocity = to_anchor.normalize() * speed;
            }
            MovementKind::Patrol { speed } => {
                let dx = self.anchor.x - self.position.x;
                if dx.abs() > speed * secs {
                    self.velocity = Vec2::new(dx.signum() * speed, 0.0);
                } else {
                    self.position.x = self.anchor.x;
                    let (top, bottom) = self.patrol_band();
                    let mut vy = if self.velocity.y == 0.0 {
                        speed
                    } else {
                        self.velocity.y
                    };
                    if self.position.y <= top {
                        vy = speed;
                    } else if self.position.y >= bottom {
                        vy = -speed;
                    }
                    self.velocity = Vec2::new(0.0, vy);
                }
            }
        }

        self.position += self.velocity * secs;
    }

    /// Let the strategy fire, if armed.
    pub fn act(&mut self, target: Option<Vec2>) -> Vec<Shot> {
        if !self.armed || self.is_eliminated() {
            return Vec::new();
        }
        let ctx = FireContext {
            now: self.timer.now(),
            origin: self.position,
            target,
        };
        self.strategy.act(&mut self.weak, &mut self.strong, &ctx)
    }

    pub fn update(&mut self, dt: u64, target: Option<Vec2>) -> Vec<Shot> {
        self.advance(dt);
        self.step_movement(dt);
        self.act(target)
    }

    pub fn receive_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_eliminated() {
            return DamageOutcome::Refused;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.destroy();
            return DamageOutcome::Killed;
        }
        DamageOutcome::Applied {
            health: self.health,
        }
    }

    /// Kill without damage.  Pending timer entries are dropped so nothing
    /// fires on a dead ship.
    pub fn destroy(&mut self) {
        self.timer.cancel_all();
        self.armed = false;
        self.velocity = Vec2::ZERO;
        if self.life == LifeState::Alive {
            self.life = LifeState::PendingRemoval;
        }
    }

    pub fn mark_removed(&mut self) {
        if self.life == LifeState::PendingRemoval {
            self.life = LifeState::Removed;
        }
    }
}
