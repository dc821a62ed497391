//! Level-scoped shared state owned by the top-level loop.

use log::{debug, info};

use crate::clock::Timer;
use crate::entities::EntityId;

/// Delay after the player dies before a restart is accepted.
pub const RESTART_DELAY_MS: u64 = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionAction {
    RestartReady,
}

/// Life pool, graveyard and game-over state for one level.
///
/// The life pool is read by anyone but only lowered through the player's
/// damage path (`remove_heart` is crate-private).
#[derive(Clone, Debug)]
pub struct SessionContext {
    hearts: u32,
    max_hearts: u32,
    graveyard: Vec<EntityId>,
    game_over: bool,
    restart_ready: bool,
    level_active: bool,
    timer: Timer<SessionAction>,
}

impl SessionContext {
    pub fn begin_level(hearts: u32) -> Self {
        info!("level started with {hearts} hearts");
        Self {
            hearts,
            max_hearts: hearts,
            graveyard: Vec::new(),
            game_over: false,
            restart_ready: false,
            level_active: true,
            timer: Timer::new(),
        }
    }

    pub fn end_level(&mut self) {
        self.graveyard.clear();
        self.timer.cancel_all();
        self.level_active = false;
        info!("level ended with {} of {} hearts left", self.hearts, self.max_hearts);
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn max_hearts(&self) -> u32 {
        self.max_hearts
    }

    pub fn is_level_active(&self) -> bool {
        self.level_active
    }

    pub(crate) fn remove_heart(&mut self) {
        self.hearts = self.hearts.saturating_sub(1);
    }

    pub fn bury(&mut self, id: EntityId) {
        debug!("buried {id:?}");
        self.graveyard.push(id);
    }

    pub fn graveyard(&self) -> &[EntityId] {
        &self.graveyard
    }

    /// Empty the graveyard, returning what was in it.
    pub fn clear_graveyard(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.graveyard)
    }

    pub(crate) fn enter_game_over(&mut self) {
        if self.game_over {
            return;
        }
        info!("game over");
        self.game_over = true;
        self.timer.add(RESTART_DELAY_MS, SessionAction::RestartReady);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn restart_ready(&self) -> bool {
        self.restart_ready
    }

    pub fn advance(&mut self, dt: u64) {
        for action in self.timer.advance(dt) {
            match action {
                SessionAction::RestartReady => self.restart_ready = true,
            }
        }
    }
}
