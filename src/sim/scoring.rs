//! Scoring, combo and speed policy

use super::food::FoodKind;
use crate::consts::{
    COMBO_WINDOW_MS, MAX_MULTIPLIER, MIN_SPEED_MS, SPEED_FOOD_FACTOR, SPEED_STEP_MS,
};

/// Points for a kind before the combo multiplier
pub fn base_points(kind: FoodKind) -> u64 {
    match kind {
        FoodKind::Apple => 10,
        FoodKind::Speed => 15,
        FoodKind::Golden => 30,
    }
}

/// Combo after eating at `now`
pub fn combo_on_eat(combo: u32, last_food_time: Option<f64>, now: f64) -> u32 {
    match last_food_time {
        Some(last) if now - last < COMBO_WINDOW_MS => combo + 1,
        _ => 1,
    }
}

/// Combo after a tick that ate nothing
pub fn combo_on_miss(combo: u32, last_food_time: Option<f64>, now: f64) -> u32 {
    match last_food_time {
        Some(last) if now - last <= COMBO_WINDOW_MS => combo,
        _ => 0,
    }
}

/// Effective multiplier for a combo value
pub fn multiplier(combo: u32) -> u32 {
    combo.clamp(1, MAX_MULTIPLIER)
}

/// Score gained for eating `kind` with the (already advanced) combo
pub fn points(kind: FoodKind, combo: u32) -> u64 {
    base_points(kind) * u64::from(multiplier(combo))
}

/// Tick interval after eating `kind`; never below the floor, never up
pub fn speed_after(speed: u32, kind: FoodKind) -> u32 {
    let mut speed = speed;
    if kind == FoodKind::Speed {
        speed = speed
            .saturating_sub(SPEED_STEP_MS * SPEED_FOOD_FACTOR)
            .max(MIN_SPEED_MS);
    }
    speed.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS).min(speed)
}
