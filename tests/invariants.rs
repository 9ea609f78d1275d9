//! Property tests driving the engine with random input streams

use neon_snake::consts::*;
use neon_snake::sim::{Direction, GamePhase, GameState, MovementRule};
use neon_snake::{Engine, MemoryStore};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Wait,
    Steer(Direction),
    Pause,
    Restart,
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Wait),
        4 => arb_direction().prop_map(Op::Steer),
        1 => Just(Op::Pause),
        1 => Just(Op::Restart),
    ]
}

fn arb_rule() -> impl Strategy<Value = MovementRule> {
    prop_oneof![Just(MovementRule::Wrap), Just(MovementRule::Walls)]
}

/// Frame duration (ms) paired with the input seen that frame
fn arb_frames() -> impl Strategy<Value = Vec<(u8, Op)>> {
    prop::collection::vec((5u8..60, arb_op()), 1..400)
}

/// Run the engine and collect every post-frame state
fn play(seed: u64, rule: MovementRule, frames: &[(u8, Op)]) -> Vec<(bool, GameState)> {
    let mut engine = Engine::with_rule(rule, MemoryStore::new(), seed);
    let mut now = 0.0;
    let mut out = Vec::with_capacity(frames.len());
    for &(dt, op) in frames {
        now += f64::from(dt);
        match op {
            Op::Wait => {}
            Op::Steer(dir) => engine.set_direction(dir, now),
            Op::Pause => engine.toggle_pause(now),
            Op::Restart => engine.restart(),
        }
        let ticked = engine.advance(now);
        out.push((ticked, engine.state().clone()));
    }
    out
}

fn in_bounds(state: &GameState) -> bool {
    state
        .snake
        .iter()
        .all(|p| (0..COLS).contains(&p.x) && (0..ROWS).contains(&p.y))
}

fn has_duplicate_cells(state: &GameState) -> bool {
    let mut cells = state.snake.clone();
    cells.sort_by_key(|p| (p.x, p.y));
    cells.windows(2).any(|w| w[0] == w[1])
}

proptest! {
    #[test]
    fn prop_body_stays_on_grid_and_never_overlaps(
        seed in any::<u64>(),
        rule in arb_rule(),
        frames in arb_frames(),
    ) {
        for (_, state) in play(seed, rule, &frames) {
            prop_assert!(in_bounds(&state));
            prop_assert!(!has_duplicate_cells(&state));
            if state.phase != GamePhase::Dead {
                prop_assert!(!state.occupies(state.food.pos));
            }
        }
    }

    #[test]
    fn prop_best_covers_score_and_never_drops(
        seed in any::<u64>(),
        rule in arb_rule(),
        frames in arb_frames(),
    ) {
        let mut best = 0;
        for (_, state) in play(seed, rule, &frames) {
            prop_assert!(state.best_score >= state.score);
            prop_assert!(state.best_score >= best);
            best = state.best_score;
        }
    }

    #[test]
    fn prop_length_and_speed_laws(
        seed in any::<u64>(),
        rule in arb_rule(),
        frames in arb_frames(),
    ) {
        let history = play(seed, rule, &frames);
        let mut prev: Option<&GameState> = None;
        for (ticked, state) in &history {
            prop_assert!(state.len() >= START_LENGTH);
            prop_assert!((MIN_SPEED_MS..=BASE_SPEED_MS).contains(&state.speed));

            if let Some(before) = prev {
                let fresh = state.score == 0 && state.len() == START_LENGTH;
                if *ticked && !fresh {
                    let grew = state.len() == before.len() + 1;
                    let same = state.len() == before.len();
                    prop_assert!(grew || same);
                    // Growth and score move together
                    prop_assert_eq!(grew, state.score > before.score);
                    prop_assert_eq!(grew, state.grid_flash.is_some());
                    prop_assert!(state.speed <= before.speed);
                } else if !*ticked && !fresh {
                    prop_assert_eq!(&state.snake, &before.snake);
                    prop_assert_eq!(state.score, before.score);
                }
            }
            prev = Some(state);
        }
    }

    #[test]
    fn prop_same_seed_same_game(
        seed in any::<u64>(),
        rule in arb_rule(),
        frames in arb_frames(),
    ) {
        let a = play(seed, rule, &frames);
        let b = play(seed, rule, &frames);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_ticks_respect_interval(
        seed in any::<u64>(),
        frames in arb_frames(),
    ) {
        // Only steering, so the clock gate is the only thing stopping a tick
        let frames: Vec<(u8, Op)> = frames
            .into_iter()
            .map(|(dt, op)| (dt, if let Op::Steer(d) = op { Op::Steer(d) } else { Op::Wait }))
            .collect();
        let mut now = 0.0;
        let mut last_tick: Option<(f64, u32)> = None;
        let history = play(seed, MovementRule::Wrap, &frames);
        for ((dt, _), (ticked, state)) in frames.iter().zip(&history) {
            now += f64::from(*dt);
            if *ticked {
                if let Some((t, speed)) = last_tick {
                    prop_assert!(now - t >= f64::from(speed));
                }
                last_tick = Some((now, state.speed));
            }
        }
    }
}
