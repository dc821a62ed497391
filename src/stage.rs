//! One level in play: the per-frame tick that composes player, enemies,
//! waves and the session.
//!
//! The host feeds a [`FrameInput`] (clock, intents, and the hits its
//! collision layer saw) and gets back a [`FrameReport`] of everything it has
//! to act on: shots to simulate, entities spawned and removed, level state.
//! Randomness only comes through the injected RNG, so a seeded RNG makes a
//! run reproducible.

use log::{debug, error, info, warn};
use rand::Rng;

use crate::config::{fire_interval_scale, hearts_for, GameConfig};
use crate::enemy::EnemyController;
use crate::entities::{
    DamageOutcome, EnemySpec, EntityId, Hit, HitTarget, Intent, MirrorSide, MovementKind, Shot,
    Vec2, WeaponKind,
};
use crate::player::{PlayerController, PlayerEvent};
use crate::session::SessionContext;
use crate::wave::{WaveEvent, WaveScheduler, WaveTable};

/// How long a power weapon awarded for clearing a wave lasts.
pub const POWER_UP_DURATION_MS: u64 = 8000;

/// Enemies enter this far past the right edge.
const SPAWN_MARGIN: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    Playing,
    GameOver,
    LevelComplete,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput<'a> {
    /// Monotonic host clock.
    pub now_ms: u64,
    pub intent: Intent,
    /// Overlaps found by the collision layer since the previous tick.
    pub hits: &'a [Hit],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub shots: Vec<Shot>,
    pub player_events: Vec<PlayerEvent>,
    pub player_damage: Vec<DamageOutcome>,
    pub spawned: Vec<EntityId>,
    /// Entities swept this tick; they sit in the graveyard until next tick.
    pub removed: Vec<EntityId>,
    /// Graveyard contents cleared at the start of this tick.
    pub cleared: Vec<EntityId>,
    pub wave_started: Option<u32>,
    pub power_up: Option<WeaponKind>,
    pub level_complete: bool,
}

pub struct Stage {
    config: GameConfig,
    player: PlayerController,
    enemies: Vec<EnemyController>,
    scheduler: WaveScheduler,
    session: SessionContext,
    status: StageStatus,
    next_id: u32,
    last_now: Option<u64>,
    /// What `new` did (the first wave); handed out by the first `tick`.
    opening: FrameReport,
}

impl Stage {
    /// Start a level: fresh session, player at the left, first wave spawned.
    /// A world below the minimum size is logged and laid out as well as it
    /// fits.
    pub fn new(config: GameConfig, table: WaveTable, rng: &mut impl Rng) -> Self {
        if let Err(e) = config.validate_world() {
            error!("stage config: {e}");
        }
        let world = config.world;
        let spawn = Vec2::new(world.min.x + 100.0, world.center().y);
        let player = PlayerController::new(config.player_tuning(), spawn).with_bounds(world);
        let session = SessionContext::begin_level(hearts_for(&config.level));

        let mut stage = Self {
            config,
            player,
            enemies: Vec::new(),
            scheduler: WaveScheduler::new(table),
            session,
            status: StageStatus::Playing,
            next_id: 1,
            last_now: None,
            opening: FrameReport::default(),
        };

        let mut report = FrameReport::default();
        let first = stage.scheduler.start();
        stage.apply_wave_event(first, false, &mut report, rng);
        stage.opening = report;
        stage
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn enemies(&self) -> &[EnemyController] {
        &self.enemies
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    /// True once every enemy of the active group is gone.
    pub fn group_eliminated(&self) -> bool {
        self.enemies.iter().all(|e| e.is_eliminated())
    }

    /// Advance one frame.  Order inside the tick is fixed: timers, player
    /// movement, dodge, fire, enemy fire, hits, sweep, wave evaluation.
    pub fn tick(&mut self, input: &FrameInput, rng: &mut impl Rng) -> FrameReport {
        let dt = match self.last_now {
            Some(last) => input.now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_now = Some(input.now_ms);

        let mut report = std::mem::take(&mut self.opening);
        report.cleared = self.session.clear_graveyard();
        self.session.advance(dt);

        if self.status != StageStatus::Playing {
            return report;
        }

        let frame = self.player.update(&input.intent, dt);
        report.shots.extend(frame.shots);
        report.player_events.extend(frame.events);

        let target = self.player.is_alive().then(|| self.player.position());
        for enemy in &mut self.enemies {
            report.shots.extend(enemy.update(dt, target));
        }

        for hit in input.hits {
            self.apply_hit(hit, &mut report);
        }

        self.sweep(&mut report);

        if self.status == StageStatus::Playing {
            let event = self.scheduler.evaluate(self.group_eliminated());
            self.apply_wave_event(event, true, &mut report, rng);
        }

        report
    }

    fn apply_hit(&mut self, hit: &Hit, report: &mut FrameReport) {
        match hit.target {
            HitTarget::Player => {
                let outcome = self.player.receive_damage(hit.damage, &mut self.session);
                report.player_damage.push(outcome);
            }
            HitTarget::Enemy(id) => match self.enemies.iter_mut().find(|e| e.id() == id) {
                Some(enemy) => {
                    if enemy.receive_damage(hit.damage) == DamageOutcome::Killed {
                        debug!("{id:?} destroyed");
                    }
                }
                None => warn!("hit on unknown enemy {id:?} dropped"),
            },
        }
    }

    /// Move dead entities from pending-removal into the graveyard.
    fn sweep(&mut self, report: &mut FrameReport) {
        for enemy in &mut self.enemies {
            if enemy.is_eliminated() {
                enemy.mark_removed();
                self.session.bury(enemy.id());
                report.removed.push(enemy.id());
            }
        }
        self.enemies.retain(|e| !e.is_eliminated());

        if !self.player.is_alive() && self.status == StageStatus::Playing {
            self.player.mark_removed();
            self.session.bury(self.player.id());
            report.removed.push(self.player.id());
            self.status = StageStatus::GameOver;
        }
    }

    fn apply_wave_event(
        &mut self,
        event: WaveEvent,
        award: bool,
        report: &mut FrameReport,
        rng: &mut impl Rng,
    ) {
        match event {
            WaveEvent::Spawn { index, enemies } => {
                report.spawned.extend(self.spawn_wave(&enemies, rng));
                report.wave_started = Some(index);
                if award {
                    let kind = if rng.gen_bool(0.5) {
                        WeaponKind::Scatterer
                    } else {
                        WeaponKind::Heavy
                    };
                    self.player.set_active_weapon(kind, POWER_UP_DURATION_MS);
                    report.power_up = Some(kind);
                }
            }
            WaveEvent::LevelComplete => {
                info!("level complete");
                self.status = StageStatus::LevelComplete;
                self.session.end_level();
                report.level_complete = true;
            }
            WaveEvent::Holding => {}
        }
    }

    fn spawn_wave(&mut self, specs: &[EnemySpec], rng: &mut impl Rng) -> Vec<EntityId> {
        let world = self.config.world;
        let scale = fire_interval_scale(&self.config.level);
        let mut ids = Vec::with_capacity(specs.len());

        for spec in specs {
            let id = EntityId(self.next_id);
            self.next_id += 1;

            let (top, bottom) = match spec.mirror {
                Some(MirrorSide::Upper) => (world.min.y, world.center().y),
                Some(MirrorSide::Lower) => (world.center().y, world.max.y),
                None => (world.min.y, world.max.y),
            };
            let band = (bottom - top) * 0.1;
            let y = sample_between(rng, top + band, bottom - band);

            let (position, anchor) = match spec.movement {
                MovementKind::Hover => {
                    let x = sample_between(
                        rng,
                        world.min.x + world.width() * 0.6,
                        world.max.x - 40.0,
                    );
                    (Vec2::new(x, y), Vec2::new(x, y))
                }
                MovementKind::Centered { .. } => (
                    Vec2::new(world.max.x + SPAWN_MARGIN, y),
                    Vec2::new(world.min.x + world.width() * 0.75, (top + bottom) * 0.5),
                ),
                MovementKind::Patrol { .. } => {
                    let x = sample_between(
                        rng,
                        world.min.x + world.width() * 0.55,
                        world.max.x - 60.0,
                    );
                    (Vec2::new(world.max.x + SPAWN_MARGIN, y), Vec2::new(x, y))
                }
            };

            self.enemies
                .push(EnemyController::spawn(id, *spec, position, anchor, world, scale));
            ids.push(id);
        }
        ids
    }
}

/// Uniform in `lo..hi`, or the midpoint when the range is empty.
fn sample_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        rng.gen_range(lo..hi)
    } else {
        (lo + hi) * 0.5
    }
}
