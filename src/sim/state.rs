//! Game state and core simulation types
//!
//! `GameState` is a value: every transition builds a new one instead of
//! editing the old one in place.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::{Food, FoodKind, spawn_food};
use super::grid::{Direction, Position};
use super::particles::Particle;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh board, waiting for the first input
    Idle,
    /// Active gameplay
    Playing,
    /// Ticks frozen; cosmetic decay keeps running
    Paused,
    /// Run ended, waiting for restart
    Dead,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Dead => "dead",
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Head ran into the body
    SelfCollision,
    /// Head left a walled grid
    Wall,
    /// No free cell left for food
    BoardFilled,
}

/// Things that happened during a transition, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Food eaten at `cell`
    Ate {
        kind: FoodKind,
        cell: Position,
        points: u64,
        combo: u32,
    },
    /// Buffered heading changed
    Turned(Direction),
    /// Run ended
    Died {
        cause: DeathCause,
        score: u64,
        best: u64,
        new_best: bool,
    },
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Body cells, head first
    pub snake: Vec<Position>,
    /// Heading used by the last tick
    pub direction: Direction,
    /// Heading the next tick will use
    pub next_direction: Direction,
    pub food: Food,
    pub score: u64,
    pub best_score: u64,
    pub phase: GamePhase,
    /// Tick interval (ms); shrinks as food is eaten
    pub speed: u32,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Cell of the food eaten this frame, for a one-frame highlight
    pub grid_flash: Option<Position>,
    pub combo: u32,
    /// Timestamp (ms) of the last food eaten this session
    pub last_food_time: Option<f64>,
    /// Screen shake intensity, decays per frame
    pub shake: f32,
    /// Head pulse intensity, decays per frame
    pub eat_scale: f32,
}

impl GameState {
    /// Fresh idle board: a 3-cell snake in the middle heading right
    pub fn new<R: Rng + ?Sized>(rng: &mut R, best_score: u64) -> Self {
        let (cx, cy) = (COLS / 2, ROWS / 2);
        let snake: Vec<Position> = (0..START_LENGTH as i32)
            .map(|i| Position::new(cx - i, cy))
            .collect();
        // A fresh board always has room; the fallback only keeps this total.
        let food = spawn_food(rng, &snake).unwrap_or(Food {
            pos: Position::new(0, 0),
            kind: FoodKind::Apple,
        });

        Self {
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            best_score,
            phase: GamePhase::Idle,
            speed: BASE_SPEED_MS,
            particles: Vec::new(),
            grid_flash: None,
            combo: 0,
            last_food_time: None,
            shake: 0.0,
            eat_scale: 0.0,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Whether a cell is covered by the body
    pub fn occupies(&self, cell: Position) -> bool {
        self.snake.contains(&cell)
    }
}
