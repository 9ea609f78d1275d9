//! Scene extraction
//!
//! Turns a read-only `GameState` snapshot into a flat draw list plus the
//! HUD and overlay models. Everything is a function of the snapshot, the
//! frame counter and the player's settings, so two identical runs produce
//! identical scenes.

use glam::Vec2;

use super::quad::{Quad, SHAPE_CIRCLE, SHAPE_RECT, SHAPE_ROUNDED, colors, fingerprint, mix, rgba};
use crate::cell_center;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{FoodKind, GamePhase, GameState, scoring};

/// Peak shake displacement (px)
const SHAKE_PX: f32 = 8.0;

/// Badges drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub length: usize,
    /// Only shown from a streak of two
    pub combo: Option<u32>,
    pub multiplier: u32,
    pub best: u64,
}

/// Phase-specific full-screen message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Title,
    Paused,
    GameOver { score: u64, best: u64, new_best: bool },
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Whole-board offset from screen shake
    pub offset: Vec2,
    pub quads: Vec<Quad>,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

impl Scene {
    pub fn build(state: &GameState, frame: u64, settings: &Settings) -> Self {
        let cell = CELL_SIZE as f32;
        let t = frame as f32;
        let mut quads = Vec::with_capacity((COLS * ROWS) as usize + state.len() + 64);

        // Checkerboard
        for y in 0..ROWS {
            for x in 0..COLS {
                let c = cell_center(x, y);
                let color = if (x + y) % 2 == 0 {
                    colors::BOARD_DARK
                } else {
                    colors::BOARD_LIGHT
                };
                quads.push(Quad::new(c.x, c.y, cell, cell, color, SHAPE_RECT));
            }
        }

        if let Some(flash) = state.grid_flash {
            let c = cell_center(flash.x, flash.y);
            quads.push(Quad::new(c.x, c.y, cell, cell, colors::GRID_FLASH, SHAPE_RECT));
        }

        // Food bobs and breathes
        let food = state.food;
        let c = cell_center(food.pos.x, food.pos.y);
        let bob = (t * 0.1).sin() * 2.0;
        let pulse = cell * (0.8 + 0.1 * (t * 0.15).sin());
        let food_color = match food.kind {
            FoodKind::Apple => colors::APPLE,
            FoodKind::Golden => colors::GOLDEN,
            FoodKind::Speed => colors::SPEED,
        };
        quads.push(Quad::new(c.x, c.y + bob, pulse, pulse, food_color, SHAPE_CIRCLE));

        // Snake, drawn tail first so the head ends up on top
        let dead = state.phase == GamePhase::Dead;
        let len = state.len().max(1) as f32;
        for (i, seg) in state.snake.iter().enumerate().rev() {
            let c = cell_center(seg.x, seg.y);
            let mut color = mix(colors::SNAKE_HEAD, colors::SNAKE_TAIL, i as f32 / len);
            if dead {
                color = mix(color, colors::SNAKE_DEAD, 0.6);
            }
            let mut size = cell - 2.0;
            if i == 0 && settings.effective_eat_pulse() {
                size *= 1.0 + state.eat_scale * 0.2;
            }
            quads.push(Quad::new(c.x, c.y, size, size, color, SHAPE_ROUNDED));
        }

        // Particles fade and shrink with remaining life
        for p in state.particles.iter().take(settings.max_particles()) {
            let f = p.life_fraction();
            let mut color = rgba(p.color);
            color[3] *= f;
            let size = p.size * f;
            quads.push(Quad::new(p.pos.x, p.pos.y, size, size, color, SHAPE_CIRCLE));
        }

        let offset = if settings.effective_screen_shake() && state.shake > 0.0 {
            Vec2::new((t * 12.9898).sin(), (t * 78.233).cos()) * state.shake * SHAKE_PX
        } else {
            Vec2::ZERO
        };

        let hud = Hud {
            score: state.score,
            length: state.len(),
            combo: (state.combo >= 2).then_some(state.combo),
            multiplier: scoring::multiplier(state.combo),
            best: state.best_score,
        };

        let overlay = match state.phase {
            GamePhase::Idle => Some(Overlay::Title),
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::Dead => Some(Overlay::GameOver {
                score: state.score,
                best: state.best_score,
                new_best: state.score > 0 && state.score >= state.best_score,
            }),
            GamePhase::Playing => None,
        };

        Self {
            offset,
            quads,
            hud,
            overlay,
        }
    }

    /// Hash of the draw list and shake offset
    pub fn fingerprint(&self) -> u64 {
        let offset = Quad::new(self.offset.x, self.offset.y, 0.0, 0.0, [0.0; 4], SHAPE_RECT);
        fingerprint(&self.quads) ^ fingerprint(&[offset]).rotate_left(1)
    }
}
