//! Combat and progression core for a top-down arcade shooter.
//!
//! The host loop owns a [`stage::Stage`] and calls `tick` once per frame
//! with abstract intents, a monotonic clock and the hits its collision layer
//! found.  Rendering, input binding and collision live outside this crate.

pub mod clock;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod logging;
pub mod player;
pub mod session;
pub mod stage;
pub mod strategy;
pub mod wave;
pub mod weapon;
