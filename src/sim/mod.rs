//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Time is passed in, never read
//! - Randomness comes from a caller-supplied seeded RNG
//! - Transitions return new states instead of mutating
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod food;
pub mod grid;
pub mod particles;
pub mod scoring;
pub mod state;
pub mod tick;

pub use food::{Food, FoodKind, spawn_food};
pub use grid::{Direction, MovementRule, Position};
pub use particles::Particle;
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{TickOutcome, decay_visuals, restart, start, steer, tick, toggle_pause};
