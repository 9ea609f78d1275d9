//! Grid geometry: cells, headings and the movement rule

use serde::{Deserialize, Serialize};

use crate::consts::{COLS, ROWS};

/// A cell on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies inside the grid
    pub fn in_bounds(self) -> bool {
        (0..COLS).contains(&self.x) && (0..ROWS).contains(&self.y)
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit cell offset (screen coordinates, y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// How the head behaves at the edge of the grid.
///
/// Fixed for a whole session; only a restart picks up a new rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementRule {
    /// Toroidal grid: leaving one edge re-enters at the opposite one
    #[default]
    Wrap,
    /// Walled grid: leaving the grid is fatal
    Walls,
}

impl MovementRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementRule::Wrap => "Wrap",
            MovementRule::Walls => "Walls",
        }
    }

    /// Next head cell, or `None` if the move runs into a wall
    pub fn step(self, head: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let (x, y) = (head.x + dx, head.y + dy);
        match self {
            MovementRule::Wrap => Some(Position::new(x.rem_euclid(COLS), y.rem_euclid(ROWS))),
            MovementRule::Walls => {
                let next = Position::new(x, y);
                next.in_bounds().then_some(next)
            }
        }
    }
}
