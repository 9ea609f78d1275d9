//! Input mapping
//!
//! Turns raw key names and pointer gestures into engine commands. Kept free
//! of any DOM types so the mapping can be tested natively.

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::{Direction, GamePhase};

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Restart,
    TogglePause,
    /// Hand the snake to the autopilot (or take it back)
    ToggleDemo,
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value to a command for the current phase
pub fn key_command(key: &str, phase: GamePhase) -> Option<Command> {
    let steer = match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    };
    if let Some(dir) = steer {
        return Some(Command::Steer(dir));
    }

    match key {
        " " => Some(match phase {
            GamePhase::Dead => Command::Restart,
            GamePhase::Idle => Command::Start,
            GamePhase::Playing | GamePhase::Paused => Command::TogglePause,
        }),
        "Enter" => match phase {
            GamePhase::Dead => Some(Command::Restart),
            GamePhase::Idle => Some(Command::Start),
            _ => None,
        },
        "Escape" | "p" | "P" => Some(Command::TogglePause),
        "i" | "I" => Some(Command::ToggleDemo),
        "m" | "M" => Some(Command::ToggleMute),
        _ => None,
    }
}

/// Whether the browser's default action for this key should be suppressed
/// (page scrolling on arrows and space)
pub fn captures_key(key: &str) -> bool {
    matches!(
        key,
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " "
    )
}

/// A short touch with no real travel
pub fn tap_command(phase: GamePhase) -> Command {
    match phase {
        GamePhase::Idle => Command::Start,
        GamePhase::Dead => Command::Restart,
        GamePhase::Playing | GamePhase::Paused => Command::TogglePause,
    }
}

/// Classify a completed touch by its travel (`dx`, `dy` in CSS pixels,
/// y growing downwards). Travel under the swipe threshold on both axes is
/// a tap; otherwise the dominant axis picks the heading.
pub fn gesture(dx: f32, dy: f32, phase: GamePhase) -> Command {
    if dx.abs() < SWIPE_THRESHOLD && dy.abs() < SWIPE_THRESHOLD {
        return tap_command(phase);
    }
    let dir = if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Command::Steer(dir)
}
