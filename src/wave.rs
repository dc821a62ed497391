//! Wave tables and the scheduler that walks them.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::entities::{EnemySpec, MirrorSide};
use crate::error::ConfigError;

// ── Table ─────────────────────────────────────────────────────────────────────

/// Wave index → enemies.  Indices start at 1; gaps are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveTable {
    waves: BTreeMap<u32, Vec<EnemySpec>>,
}

impl WaveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, enemies: Vec<EnemySpec>) -> Result<(), ConfigError> {
        if index == 0 {
            return Err(ConfigError::WaveIndexZero);
        }
        self.waves.insert(index, enemies);
        Ok(())
    }

    pub fn from_waves(
        waves: impl IntoIterator<Item = (u32, Vec<EnemySpec>)>,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for (index, enemies) in waves {
            table.insert(index, enemies)?;
        }
        Ok(table)
    }

    /// Parse `{"1": [spec, ...], "2": [...]}`.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let waves: BTreeMap<u32, Vec<EnemySpec>> = serde_json::from_str(text)?;
        Self::from_waves(waves)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn get(&self, index: u32) -> Option<&[EnemySpec]> {
        self.waves.get(&index).map(Vec::as_slice)
    }

    /// First defined index strictly after `index`.
    pub fn next_index_after(&self, index: u32) -> Option<u32> {
        self.waves
            .range(index.saturating_add(1)..)
            .next()
            .map(|(&i, _)| i)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn last_index(&self) -> Option<u32> {
        self.waves.keys().next_back().copied()
    }
}

// ── Escalation ────────────────────────────────────────────────────────────────

/// Cosmetic difficulty knob raised on every wave transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Escalation {
    pub scroll_speed: f32,
    pub step: f32,
}

impl Default for Escalation {
    fn default() -> Self {
        Self {
            scroll_speed: 1.0,
            step: 0.25,
        }
    }
}

impl Escalation {
    fn raise(&mut self) {
        self.scroll_speed += self.step;
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    NotStarted,
    Active(u32),
    /// No later wave exists.  Terminal.
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WaveEvent {
    /// Instantiate these enemies as the new active group.
    Spawn { index: u32, enemies: Vec<EnemySpec> },
    /// Signalled once, on the transition into `Complete`.
    LevelComplete,
    /// Nothing to do this tick.
    Holding,
}

#[derive(Clone, Debug)]
pub struct WaveScheduler {
    table: WaveTable,
    state: WaveState,
    escalation: Escalation,
}

impl WaveScheduler {
    pub fn new(table: WaveTable) -> Self {
        Self {
            table,
            state: WaveState::NotStarted,
            escalation: Escalation::default(),
        }
    }

    pub fn table(&self) -> &WaveTable {
        &self.table
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn current_index(&self) -> Option<u32> {
        match self.state {
            WaveState::Active(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == WaveState::Complete
    }

    pub fn escalation(&self) -> Escalation {
        self.escalation
    }

    /// Spawn the first wave.  Only meaningful once.
    pub fn start(&mut self) -> WaveEvent {
        if self.state != WaveState::NotStarted {
            return WaveEvent::Holding;
        }
        self.advance_from(0)
    }

    /// Called every tick with the group tracker's verdict.
    pub fn evaluate(&mut self, group_eliminated: bool) -> WaveEvent {
        match self.state {
            WaveState::Active(index) if group_eliminated => {
                let event = self.advance_from(index);
                if matches!(event, WaveEvent::Spawn { .. }) {
                    self.escalation.raise();
                }
                event
            }
            _ => WaveEvent::Holding,
        }
    }

    fn advance_from(&mut self, mut index: u32) -> WaveEvent {
        while let Some(next) = self.table.next_index_after(index) {
            let enemies = self.table.get(next).map(<[_]>::to_vec).unwrap_or_default();
            if enemies.is_empty() {
                warn!("wave {next} is defined but empty, skipping");
                index = next;
                continue;
            }
            debug!("wave {next}: spawning {} enemies", enemies.len());
            self.state = WaveState::Active(next);
            return WaveEvent::Spawn {
                index: next,
                enemies,
            };
        }

        info!("all waves cleared");
        self.state = WaveState::Complete;
        WaveEvent::LevelComplete
    }
}

// ── Built-in levels ───────────────────────────────────────────────────────────

/// The seventeen waves of level one.
pub fn level_one() -> Result<WaveTable, ConfigError> {
    use MirrorSide::{Lower, Upper};

    let dumb = EnemySpec::dumb;
    let tracking = EnemySpec::dumb_moving_tracking;
    let fast = EnemySpec::dumb_moving_fast_shooting;
    let scatterer = EnemySpec::dumb_moving_scatterer;
    let spraying = EnemySpec::slow_moving_spraying;
    let strong = EnemySpec::slow_centered_strong_scatterer;

    let waves: Vec<(u32, Vec<EnemySpec>)> = vec![
        (1, vec![EnemySpec::tutorial()]),
        (2, vec![dumb(), dumb(), tracking()]),
        (3, vec![EnemySpec::slow_centered_scatterer()]),
        (4, vec![dumb(), dumb(), tracking(), tracking(), tracking()]),
        (5, vec![strong(None)]),
        (6, vec![scatterer(), scatterer(), scatterer()]),
        (7, vec![tracking(), tracking(), fast(), fast(), fast()]),
        (8, [vec![tracking(); 6], vec![scatterer()]].concat()),
        (9, [vec![tracking(); 7], vec![spraying(Upper), spraying(Lower)]].concat()),
        (10, vec![EnemySpec::slow_centered_crazy_scatterer()]),
        (
            11,
            [
                vec![tracking(); 4],
                vec![scatterer(); 2],
                vec![spraying(Upper), spraying(Lower), spraying(Upper), spraying(Lower)],
            ]
            .concat(),
        ),
        (12, [spraying(Upper), spraying(Lower)].repeat(5)),
        (13, vec![strong(Some(Upper)), strong(Some(Lower))]),
        (14, vec![EnemySpec::dumb_moving_crazy_scatterer()]),
        (
            15,
            vec![
                strong(Some(Upper)),
                strong(Some(Lower)),
                scatterer(),
                scatterer(),
                scatterer(),
            ],
        ),
        (16, vec![EnemySpec::dumb_moving_crazy_scatterer()]),
        (17, vec![scatterer(); 14]),
    ];

    WaveTable::from_waves(waves)
}
