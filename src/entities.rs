//! Shared value types for the combat core: ids, intents, shots, enemy specs.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

// ── Identity & lifecycle ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player always owns id 0; enemies are numbered from 1.
    pub const PLAYER: EntityId = EntityId(0);
}

/// Entities are never dropped from inside a callback.  Whoever kills an
/// entity moves it to `PendingRemoval`; the stage sweeps it to `Removed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    PendingRemoval,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Axis-aligned play area in world pixels (+y points down).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Abstract per-frame input, already decoupled from any key binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub dodge: bool,
}

/// Eight compass directions used by the dodge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Resolves held movement intents with the same precedence as movement:
    /// up before down, left before right.  `None` when nothing is held.
    pub fn from_intent(intent: &Intent) -> Option<Direction> {
        let vertical = if intent.up {
            -1
        } else if intent.down {
            1
        } else {
            0
        };
        let horizontal = if intent.left {
            -1
        } else if intent.right {
            1
        } else {
            0
        };

        match (horizontal, vertical) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (-1, -1) => Some(Direction::UpLeft),
            (1, -1) => Some(Direction::UpRight),
            (-1, 1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Sign of the displacement on each axis.
    pub fn axes(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::UpLeft => Vec2::new(-1.0, -1.0),
            Direction::UpRight => Vec2::new(1.0, -1.0),
            Direction::DownLeft => Vec2::new(-1.0, 1.0),
            Direction::DownRight => Vec2::new(1.0, 1.0),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }
}

// ── Weapons & projectiles ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WeaponKind {
    #[default]
    Regular,
    /// Five-angle fan per trigger pull.
    Scatterer,
    /// Single slow, high-impact projectile.
    Heavy,
}

/// Which slot of its owner a shot came out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    Player(WeaponKind),
    Weak,
    Strong,
}

/// When a projectile is discarded by whoever simulates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillCondition {
    WorldBounds,
    Lifespan(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    Regular,
    Heavy,
}

/// A fire event.  The core only decides that a shot happens and with which
/// parameters; moving it is the host's business.
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub owner: EntityId,
    pub handle: Handle,
    pub origin: Vec2,
    /// Degrees, clockwise from +x.
    pub angle: f32,
    pub speed: f32,
    pub kill: KillCondition,
    pub impact: Impact,
}

impl Shot {
    pub fn velocity(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        Vec2::new(rad.cos(), rad.sin()) * self.speed
    }
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead; nothing changed.
    Refused,
    Applied { health: i32 },
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Player,
    Enemy(EntityId),
}

/// An overlap reported by the collision layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub target: HitTarget,
    pub damage: i32,
}

// ── Enemy specifications ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Single { interval_ms: u64 },
    Tracking { interval_ms: u64 },
    Scatterer {
        #[serde(default)]
        strong: bool,
    },
    Spraying,
    CrazyScatter,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementKind {
    /// Stays where it was spawned.
    Hover,
    /// Slides to its anchor and holds there.
    Centered { speed: f32 },
    /// Slides to its anchor column, then bounces vertically.
    Patrol { speed: f32 },
}

/// Which half of the screen a mirrored-pair member occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorSide {
    Upper,
    Lower,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub strategy: StrategyKind,
    pub movement: MovementKind,
    #[serde(default)]
    pub mirror: Option<MirrorSide>,
    #[serde(default = "default_enemy_health")]
    pub health: i32,
}

fn default_enemy_health() -> i32 {
    3
}

const DUMB_SPEED: f32 = 120.0;
const SLOW_SPEED: f32 = 60.0;

impl EnemySpec {
    pub fn new(strategy: StrategyKind, movement: MovementKind) -> Self {
        Self {
            strategy,
            movement,
            mirror: None,
            health: default_enemy_health(),
        }
    }

    pub fn with_health(self, health: i32) -> Self {
        Self { health, ..self }
    }

    pub fn mirrored(self, side: MirrorSide) -> Self {
        Self {
            mirror: Some(side),
            ..self
        }
    }

    // Presets used by the built-in level tables.

    pub fn tutorial() -> Self {
        Self::new(StrategyKind::Single { interval_ms: 2400 }, MovementKind::Hover).with_health(2)
    }

    pub fn dumb() -> Self {
        Self::new(StrategyKind::Single { interval_ms: 1200 }, MovementKind::Hover)
    }

    pub fn dumb_moving_tracking() -> Self {
        Self::new(
            StrategyKind::Tracking { interval_ms: 1500 },
            MovementKind::Patrol { speed: DUMB_SPEED },
        )
    }

    pub fn dumb_moving_fast_shooting() -> Self {
        Self::new(
            StrategyKind::Single { interval_ms: 400 },
            MovementKind::Patrol { speed: DUMB_SPEED },
        )
    }

    pub fn dumb_moving_scatterer() -> Self {
        Self::new(
            StrategyKind::Scatterer { strong: false },
            MovementKind::Patrol { speed: DUMB_SPEED },
        )
        .with_health(5)
    }

    pub fn slow_centered_scatterer() -> Self {
        Self::new(
            StrategyKind::Scatterer { strong: false },
            MovementKind::Centered { speed: SLOW_SPEED },
        )
        .with_health(10)
    }

    pub fn slow_centered_strong_scatterer(side: Option<MirrorSide>) -> Self {
        Self {
            mirror: side,
            ..Self::new(
                StrategyKind::Scatterer { strong: true },
                MovementKind::Centered { speed: SLOW_SPEED },
            )
            .with_health(14)
        }
    }

    pub fn slow_moving_spraying(side: MirrorSide) -> Self {
        Self::new(StrategyKind::Spraying, MovementKind::Patrol { speed: SLOW_SPEED })
            .with_health(6)
            .mirrored(side)
    }

    pub fn slow_centered_crazy_scatterer() -> Self {
        Self::new(
            StrategyKind::CrazyScatter,
            MovementKind::Centered { speed: SLOW_SPEED },
        )
        .with_health(25)
    }

    pub fn dumb_moving_crazy_scatterer() -> Self {
        Self::new(
            StrategyKind::CrazyScatter,
            MovementKind::Patrol { speed: DUMB_SPEED },
        )
        .with_health(25)
    }
}
