//! State transitions
//!
//! Every function here takes the current state by reference and returns the
//! next one. Rejected inputs come back as `None` so callers can tell a
//! no-op from a change without comparing states.

use rand::Rng;

use super::food::{FoodKind, spawn_food};
use super::grid::{Direction, MovementRule, Position};
use super::particles::{
    EAT_BURST, GOLDEN_BURST, append_capped, death_burst, eat_burst, update_particles,
};
use super::scoring;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Result of one gameplay tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the rules by one tick at time `now` (ms).
///
/// Only a `Playing` state moves; anything else comes back unchanged. The
/// self-collision test checks the whole pre-move body, including the tail
/// cell that would be vacated by this very move.
pub fn tick<R: Rng + ?Sized>(
    state: &GameState,
    now: f64,
    rule: MovementRule,
    rng: &mut R,
) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome {
            state: state.clone(),
            events: Vec::new(),
        };
    }

    let dir = state.next_direction;
    let new_head = match rule.step(state.head(), dir) {
        None => return die(steered(state, dir), DeathCause::Wall, rng),
        Some(cell) if state.occupies(cell) => {
            return die(steered(state, dir), DeathCause::SelfCollision, rng);
        }
        Some(cell) => cell,
    };

    let ate = new_head == state.food.pos;
    let keep = if ate {
        state.snake.len()
    } else {
        state.snake.len() - 1
    };
    let mut snake = Vec::with_capacity(keep + 1);
    snake.push(new_head);
    snake.extend_from_slice(&state.snake[..keep]);

    if !ate {
        let next = GameState {
            snake,
            direction: dir,
            next_direction: dir,
            combo: scoring::combo_on_miss(state.combo, state.last_food_time, now),
            ..state.clone()
        };
        return TickOutcome {
            state: next,
            events: Vec::new(),
        };
    }

    let eaten = state.food;
    let combo = scoring::combo_on_eat(state.combo, state.last_food_time, now);
    let points = scoring::points(eaten.kind, combo);
    let score = state.score + points;
    log::debug!(
        "Ate {:?}: +{} (base {} x{}), score {}",
        eaten.kind,
        points,
        scoring::base_points(eaten.kind),
        scoring::multiplier(combo),
        score
    );

    let burst_size = if eaten.kind == FoodKind::Golden {
        GOLDEN_BURST
    } else {
        EAT_BURST
    };
    let mut particles = state.particles.clone();
    append_capped(
        &mut particles,
        eat_burst(rng, eaten.pos, burst_size, eaten.kind.palette()),
    );

    let food = spawn_food(rng, &snake);
    let next = GameState {
        snake,
        direction: dir,
        next_direction: dir,
        food: food.unwrap_or(eaten),
        score,
        best_score: state.best_score.max(score),
        speed: scoring::speed_after(state.speed, eaten.kind),
        particles,
        grid_flash: Some(eaten.pos),
        combo,
        last_food_time: Some(now),
        shake: state.shake.max(EAT_SHAKE),
        eat_scale: 1.0,
        ..state.clone()
    };
    let ate_event = GameEvent::Ate {
        kind: eaten.kind,
        cell: eaten.pos,
        points,
        combo,
    };

    if food.is_none() {
        let mut outcome = die(next, DeathCause::BoardFilled, rng);
        outcome.events.insert(0, ate_event);
        return outcome;
    }

    TickOutcome {
        state: next,
        events: vec![ate_event],
    }
}

fn steered(state: &GameState, dir: Direction) -> GameState {
    GameState {
        direction: dir,
        next_direction: dir,
        ..state.clone()
    }
}

/// End the run: finalize the best score, burst the body, shake the screen
fn die<R: Rng + ?Sized>(state: GameState, cause: DeathCause, rng: &mut R) -> TickOutcome {
    let best = state.best_score.max(state.score);
    let mut particles = state.particles.clone();
    append_capped(&mut particles, death_burst(rng, &state.snake));

    let event = GameEvent::Died {
        cause,
        score: state.score,
        best,
        new_best: state.score > 0 && state.score >= best,
    };
    let next = GameState {
        phase: GamePhase::Dead,
        best_score: best,
        particles,
        shake: DEATH_SHAKE,
        ..state
    };
    TickOutcome {
        state: next,
        events: vec![event],
    }
}

/// Per-frame cosmetic decay; runs in every phase
pub fn decay_visuals(state: &GameState) -> GameState {
    let mut shake = state.shake * SHAKE_DECAY;
    if shake < 0.01 {
        shake = 0.0;
    }
    GameState {
        particles: update_particles(&state.particles),
        grid_flash: None,
        shake,
        eat_scale: (state.eat_scale - EAT_SCALE_DECAY).max(0.0),
        ..state.clone()
    }
}

/// Buffer a new heading.
///
/// Accepted in `Idle` and `Playing`. Reversing onto the committed heading
/// is rejected, and so is repeating the already buffered heading.
pub fn steer(state: &GameState, dir: Direction) -> Option<GameState> {
    if !matches!(state.phase, GamePhase::Idle | GamePhase::Playing) {
        return None;
    }
    if dir == state.direction.opposite() || dir == state.next_direction {
        return None;
    }
    Some(GameState {
        next_direction: dir,
        ..state.clone()
    })
}

/// `Idle -> Playing`
pub fn start(state: &GameState) -> Option<GameState> {
    (state.phase == GamePhase::Idle).then(|| GameState {
        phase: GamePhase::Playing,
        ..state.clone()
    })
}

/// `Playing <-> Paused`
pub fn toggle_pause(state: &GameState) -> Option<GameState> {
    let phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        _ => return None,
    };
    Some(GameState {
        phase,
        ..state.clone()
    })
}

/// `Dead | Idle -> Idle` on a fresh board, keeping only the best score
pub fn restart<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<GameState> {
    matches!(state.phase, GamePhase::Dead | GamePhase::Idle)
        .then(|| GameState::new(rng, state.best_score))
}

/// Head cell after one step in `dir`, or `None` if that step is fatal
pub fn preview_move(state: &GameState, dir: Direction, rule: MovementRule) -> Option<Position> {
    rule.step(state.head(), dir)
        .filter(|cell| !state.occupies(*cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::food::Food;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing(snake: &[(i32, i32)], dir: Direction, food: (i32, i32), kind: FoodKind) -> GameState {
        let mut rng = Pcg32::seed_from_u64(1);
        GameState {
            snake: snake.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction: dir,
            next_direction: dir,
            food: Food {
                pos: Position::new(food.0, food.1),
                kind,
            },
            phase: GamePhase::Playing,
            ..GameState::new(&mut rng, 0)
        }
    }

    #[test]
    fn test_tick_moves_without_growth() {
        let mut rng = Pcg32::seed_from_u64(10);
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0), FoodKind::Apple);
        let out = tick(&state, 200.0, MovementRule::Wrap, &mut rng);

        assert_eq!(
            out.state.snake,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(out.state.score, 0);
        assert_eq!(out.state.speed, BASE_SPEED_MS);
        assert!(out.events.is_empty());
        // Input state untouched
        assert_eq!(state.head(), Position::new(10, 10));
    }

    #[test]
    fn test_tick_eats_apple() {
        let mut rng = Pcg32::seed_from_u64(11);
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10), FoodKind::Apple);
        let out = tick(&state, 500.0, MovementRule::Wrap, &mut rng);
        let next = &out.state;

        assert_eq!(next.score, 10);
        assert_eq!(next.combo, 1);
        assert_eq!(next.len(), 4);
        assert_eq!(next.head(), Position::new(11, 10));
        assert_eq!(next.speed, BASE_SPEED_MS - SPEED_STEP_MS);
        assert!(!next.occupies(next.food.pos));
        assert_eq!(next.grid_flash, Some(Position::new(11, 10)));
        assert_eq!(next.eat_scale, 1.0);
        assert!(next.shake >= EAT_SHAKE);
        assert_eq!(next.particles.len(), EAT_BURST);
        assert_eq!(next.last_food_time, Some(500.0));
        assert_eq!(next.best_score, 10);
        assert!(matches!(
            out.events[..],
            [GameEvent::Ate {
                kind: FoodKind::Apple,
                points: 10,
                combo: 1,
                ..
            }]
        ));
    }

    #[test]
    fn test_combo_across_two_meals() {
        let mut rng = Pcg32::seed_from_u64(12);
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10), FoodKind::Apple);
        let first = tick(&state, 1000.0, MovementRule::Wrap, &mut rng).state;

        let second_in = GameState {
            food: Food {
                pos: Position::new(12, 10),
                kind: FoodKind::Golden,
            },
            ..first
        };
        let second = tick(&second_in, 2500.0, MovementRule::Wrap, &mut rng).state;
        assert_eq!(second.combo, 2);
        assert_eq!(second.score, 10 + 30 * 2);
    }

    #[test]
    fn test_combo_resets_after_gap() {
        let mut rng = Pcg32::seed_from_u64(13);
        let state = GameState {
            combo: 4,
            last_food_time: Some(1000.0),
            ..playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10), FoodKind::Speed)
        };
        let next = tick(&state, 4500.0, MovementRule::Wrap, &mut rng).state;
        assert_eq!(next.combo, 1);
        assert_eq!(next.score, 15);
        assert_eq!(next.speed, BASE_SPEED_MS - SPEED_STEP_MS * 4);
    }

    #[test]
    fn test_combo_decays_on_idle_tick() {
        let mut rng = Pcg32::seed_from_u64(14);
        let state = GameState {
            combo: 3,
            last_food_time: Some(1000.0),
            ..playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0), FoodKind::Apple)
        };
        let kept = tick(&state, 3000.0, MovementRule::Wrap, &mut rng).state;
        assert_eq!(kept.combo, 3);
        let decayed = tick(&state, 4001.0, MovementRule::Wrap, &mut rng).state;
        assert_eq!(decayed.combo, 0);
    }

    #[test]
    fn test_wall_death() {
        let mut rng = Pcg32::seed_from_u64(15);
        let state = GameState {
            score: 40,
            best_score: 25,
            ..playing(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (9, 9), FoodKind::Apple)
        };
        let out = tick(&state, 100.0, MovementRule::Walls, &mut rng);
        assert_eq!(out.state.phase, GamePhase::Dead);
        assert_eq!(out.state.best_score, 40);
        assert_eq!(out.state.snake, state.snake);
        assert_eq!(out.state.shake, DEATH_SHAKE);
        assert_eq!(out.state.particles.len(), 9);
        assert_eq!(
            out.events,
            vec![GameEvent::Died {
                cause: DeathCause::Wall,
                score: 40,
                best: 40,
                new_best: true,
            }]
        );
    }

    #[test]
    fn test_wrap_crosses_edge_alive() {
        let mut rng = Pcg32::seed_from_u64(16);
        let state = playing(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (9, 9), FoodKind::Apple);
        let next = tick(&state, 100.0, MovementRule::Wrap, &mut rng).state;
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.head(), Position::new(COLS - 1, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut rng = Pcg32::seed_from_u64(17);
        // Head at (5,5) heading down into (5,6), which is body
        let state = playing(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Down,
            (0, 0),
            FoodKind::Apple,
        );
        let out = tick(&state, 100.0, MovementRule::Wrap, &mut rng);
        assert_eq!(out.state.phase, GamePhase::Dead);
        assert!(matches!(
            out.events[..],
            [GameEvent::Died {
                cause: DeathCause::SelfCollision,
                new_best: false,
                ..
            }]
        ));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_fatal() {
        // 2x2 loop: the head steps onto the tail cell that would be freed
        // by this same move. Conservative rule: that still kills.
        for rule in [MovementRule::Wrap, MovementRule::Walls] {
            let mut rng = Pcg32::seed_from_u64(18);
            let state = playing(
                &[(5, 5), (6, 5), (6, 6), (5, 6)],
                Direction::Down,
                (0, 0),
                FoodKind::Apple,
            );
            let out = tick(&state, 100.0, rule, &mut rng);
            assert_eq!(out.state.phase, GamePhase::Dead, "{}", rule.as_str());
        }
    }

    #[test]
    fn test_tick_ignored_unless_playing() {
        let mut rng = Pcg32::seed_from_u64(19);
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::Dead] {
            let state = GameState {
                phase,
                ..playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10), FoodKind::Apple)
            };
            let out = tick(&state, 1000.0, MovementRule::Wrap, &mut rng);
            assert_eq!(out.state, state);
            assert!(out.events.is_empty());
        }
    }

    #[test]
    fn test_board_filled_ends_run() {
        let mut rng = Pcg32::seed_from_u64(20);
        // Snake covers everything but its next head cell, which holds the food
        let mut cells: Vec<(i32, i32)> = Vec::new();
        for y in 0..ROWS {
            let row: Vec<i32> = if y % 2 == 0 {
                (0..COLS).collect()
            } else {
                (0..COLS).rev().collect()
            };
            cells.extend(row.into_iter().map(|x| (x, y)));
        }
        let food = cells.pop().expect("non-empty grid");
        cells.reverse();
        // Head is the last cell of the serpentine, food is next to it
        let state = playing(&cells, Direction::Left, food, FoodKind::Apple);
        let out = tick(&state, 100.0, MovementRule::Walls, &mut rng);
        assert_eq!(out.state.phase, GamePhase::Dead);
        assert_eq!(out.state.len(), (COLS * ROWS) as usize);
        assert!(matches!(out.events[0], GameEvent::Ate { .. }));
        assert!(matches!(
            out.events[1],
            GameEvent::Died {
                cause: DeathCause::BoardFilled,
                ..
            }
        ));
    }

    #[test]
    fn test_decay_visuals() {
        let mut rng = Pcg32::seed_from_u64(21);
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10), FoodKind::Apple);
        let fed = tick(&state, 100.0, MovementRule::Wrap, &mut rng).state;
        let decayed = decay_visuals(&fed);
        assert_eq!(decayed.grid_flash, None);
        assert!((decayed.eat_scale - 0.9).abs() < 1e-6);
        assert!(decayed.shake < fed.shake);
        assert_eq!(decayed.snake, fed.snake);

        let mut s = decayed;
        for _ in 0..100 {
            s = decay_visuals(&s);
        }
        assert_eq!(s.shake, 0.0);
        assert_eq!(s.eat_scale, 0.0);
        assert!(s.particles.is_empty());
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0), FoodKind::Apple);
        assert!(steer(&state, Direction::Left).is_none());
        assert!(steer(&state, Direction::Right).is_none());
        let up = steer(&state, Direction::Up).expect("turn accepted");
        assert_eq!(up.next_direction, Direction::Up);
        assert_eq!(up.direction, Direction::Right);
        // Reversal is judged against the committed heading, not the buffer
        let down = steer(&up, Direction::Down).expect("still perpendicular to committed");
        assert_eq!(down.next_direction, Direction::Down);
    }

    #[test]
    fn test_steer_ignored_when_paused_or_dead() {
        for phase in [GamePhase::Paused, GamePhase::Dead] {
            let state = GameState {
                phase,
                ..playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0), FoodKind::Apple)
            };
            assert!(steer(&state, Direction::Up).is_none());
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut rng = Pcg32::seed_from_u64(22);
        let idle = GameState::new(&mut rng, 7);
        assert!(toggle_pause(&idle).is_none());
        let live = start(&idle).expect("idle starts");
        assert_eq!(live.phase, GamePhase::Playing);
        assert!(start(&live).is_none());
        assert!(restart(&live, &mut rng).is_none());

        let paused = toggle_pause(&live).expect("pause");
        assert_eq!(paused.phase, GamePhase::Paused);
        assert_eq!(toggle_pause(&paused).map(|s| s.phase), Some(GamePhase::Playing));

        let dead = GameState {
            phase: GamePhase::Dead,
            score: 90,
            best_score: 90,
            ..live
        };
        let fresh = restart(&dead, &mut rng).expect("restart");
        assert_eq!(fresh.phase, GamePhase::Idle);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.best_score, 90);
        assert_eq!(fresh.len(), START_LENGTH);
    }

    #[test]
    fn test_preview_move() {
        let state = playing(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0), FoodKind::Apple);
        assert_eq!(
            preview_move(&state, Direction::Up, MovementRule::Walls),
            Some(Position::new(10, 9))
        );
        assert_eq!(preview_move(&state, Direction::Left, MovementRule::Walls), None);
    }
}
