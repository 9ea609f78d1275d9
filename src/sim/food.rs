//! Food kinds and placement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::consts::{COLS, ROWS};

/// Random probes before falling back to a scan of free cells
const MAX_PROBES: usize = 256;

/// What the snake can eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Apple,
    Golden,
    Speed,
}

impl FoodKind {
    /// Weighted roll: 10% golden, 10% speed, 80% apple
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_draw(rng.random::<f64>())
    }

    /// Kind for a uniform draw in [0, 1)
    pub fn from_draw(r: f64) -> Self {
        if r < 0.1 {
            FoodKind::Golden
        } else if r < 0.2 {
            FoodKind::Speed
        } else {
            FoodKind::Apple
        }
    }

    /// Spark colours for the eat burst (0xRRGGBBAA)
    pub fn palette(self) -> &'static [u32] {
        match self {
            FoodKind::Apple => &[0xFF5252FF, 0xFF8A80FF, 0xFFFFFFFF, 0xFF1744FF],
            FoodKind::Golden => &[0xFFD700FF, 0xFFC107FF, 0xFFE082FF, 0xFFFFFFFF],
            FoodKind::Speed => &[0x64B5F6FF, 0x42A5F5FF, 0x90CAF9FF, 0xFFFFFFFF],
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

/// Pick a free cell uniformly at random, avoiding the snake.
///
/// Rejection sampling first; if that keeps hitting the body, choose among
/// the remaining free cells directly. Returns `None` only when the snake
/// covers the whole grid.
pub fn free_cell<R: Rng + ?Sized>(rng: &mut R, snake: &[Position]) -> Option<Position> {
    for _ in 0..MAX_PROBES {
        let pos = Position::new(rng.random_range(0..COLS), rng.random_range(0..ROWS));
        if !snake.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..ROWS)
        .flat_map(|y| (0..COLS).map(move |x| Position::new(x, y)))
        .filter(|p| !snake.contains(p))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

/// Spawn a new food item off the snake
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, snake: &[Position]) -> Option<Food> {
    let pos = free_cell(rng, snake)?;
    let kind = FoodKind::roll(rng);
    log::debug!("Food spawned: {:?} at ({}, {})", kind, pos.x, pos.y);
    Some(Food { pos, kind })
}
