//! Projectile flight and overlap detection for the terminal host.
//!
//! The core only emits [`Shot`]s and consumes [`Hit`]s; this is the
//! collaborator in between.

use shmup_core::entities::{Bounds, EntityId, Hit, HitTarget, Impact, KillCondition, Shot, Vec2};
use shmup_core::stage::Stage;

const ENEMY_RADIUS: f32 = 28.0;
const PLAYER_RADIUS: f32 = 16.0;
/// Heavy rounds leave the launcher at rest and speed up on their own.
const HEAVY_ACCELERATION: f32 = 900.0;

#[derive(Clone, Debug)]
pub struct Projectile {
    pub shot: Shot,
    pub position: Vec2,
    pub velocity: Vec2,
    age_ms: u64,
}

impl Projectile {
    pub fn from_player(&self) -> bool {
        self.shot.owner == EntityId::PLAYER
    }

    fn damage(&self) -> i32 {
        match self.shot.impact {
            Impact::Regular => 1,
            Impact::Heavy => 5,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Arena {
    pub projectiles: Vec<Projectile>,
}

impl Arena {
    pub fn launch(&mut self, shots: Vec<Shot>) {
        self.projectiles.extend(shots.into_iter().map(|shot| Projectile {
            position: shot.origin,
            velocity: shot.velocity(),
            shot,
            age_ms: 0,
        }));
    }

    pub fn step(&mut self, dt: u64, bounds: &Bounds) {
        let secs = dt as f32 / 1000.0;
        for p in &mut self.projectiles {
            if p.shot.impact == Impact::Heavy {
                let heading = Vec2::new(
                    p.shot.angle.to_radians().cos(),
                    p.shot.angle.to_radians().sin(),
                );
                p.velocity += heading * HEAVY_ACCELERATION * secs;
            }
            p.position += p.velocity * secs;
            p.age_ms += dt;
        }
        self.projectiles.retain(|p| match p.shot.kill {
            KillCondition::WorldBounds => bounds.contains(p.position),
            KillCondition::Lifespan(ms) => p.age_ms < ms,
        });
    }

    /// Overlaps against the stage's current bodies.  Regular rounds are
    /// consumed on contact; heavy rounds pierce.
    pub fn collide(&mut self, stage: &Stage) -> Vec<Hit> {
        let mut hits = Vec::new();
        let player = stage.player();

        self.projectiles.retain(|p| {
            if p.from_player() {
                let struck = stage
                    .enemies()
                    .iter()
                    .find(|e| !e.is_eliminated() && e.position().distance(p.position) <= ENEMY_RADIUS);
                match struck {
                    Some(enemy) => {
                        hits.push(Hit {
                            target: HitTarget::Enemy(enemy.id()),
                            damage: p.damage(),
                        });
                        p.shot.impact == Impact::Heavy
                    }
                    None => true,
                }
            } else if player.is_alive() && player.position().distance(p.position) <= PLAYER_RADIUS {
                hits.push(Hit {
                    target: HitTarget::Player,
                    damage: p.damage(),
                });
                false
            } else {
                true
            }
        });

        hits
    }
}
