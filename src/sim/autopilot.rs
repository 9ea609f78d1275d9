//! Demo-mode steering
//!
//! Greedy: head for the food along the shortest axis, never take a move
//! that is immediately fatal, and prefer moves that leave the head some
//! room. Goes through the same steering rules as a human player.

use super::grid::{Direction, MovementRule, Position};
use super::state::GameState;
use super::tick::preview_move;
use crate::consts::{COLS, ROWS};

/// Signed shortest offset along one axis
fn axis_delta(from: i32, to: i32, size: i32, rule: MovementRule) -> i32 {
    let d = to - from;
    match rule {
        MovementRule::Walls => d,
        MovementRule::Wrap => {
            if d > size / 2 {
                d - size
            } else if d < -size / 2 {
                d + size
            } else {
                d
            }
        }
    }
}

/// Free neighbours of a cell
fn breathing_room(state: &GameState, cell: Position, rule: MovementRule) -> usize {
    Direction::ALL
        .iter()
        .filter_map(|&d| rule.step(cell, d))
        .filter(|c| !state.occupies(*c))
        .count()
}

/// Pick the heading to request this frame, or `None` to keep going
pub fn choose_direction(state: &GameState, rule: MovementRule) -> Option<Direction> {
    let head = state.head();
    let food = state.food.pos;
    let dx = axis_delta(head.x, food.x, COLS, rule);
    let dy = axis_delta(head.y, food.y, ROWS, rule);

    let mut wanted = Vec::with_capacity(4);
    let horizontal = if dx > 0 { Direction::Right } else { Direction::Left };
    let vertical = if dy > 0 { Direction::Down } else { Direction::Up };
    if dx.abs() >= dy.abs() {
        if dx != 0 {
            wanted.push(horizontal);
        }
        if dy != 0 {
            wanted.push(vertical);
        }
    } else {
        if dy != 0 {
            wanted.push(vertical);
        }
        if dx != 0 {
            wanted.push(horizontal);
        }
    }
    if !wanted.contains(&state.direction) {
        wanted.push(state.direction);
    }
    for d in Direction::ALL {
        if !wanted.contains(&d) {
            wanted.push(d);
        }
    }

    let reverse = state.direction.opposite();
    let best = wanted
        .iter()
        .copied()
        .filter(|&d| d != reverse)
        .filter_map(|d| preview_move(state, d, rule).map(|cell| (d, cell)))
        .find(|&(_, cell)| breathing_room(state, cell, rule) > 0 || cell == food)
        .or_else(|| {
            wanted
                .iter()
                .copied()
                .filter(|&d| d != reverse)
                .find_map(|d| preview_move(state, d, rule).map(|cell| (d, cell)))
        })
        .map(|(d, _)| d)?;

    (best != state.next_direction).then_some(best)
}
