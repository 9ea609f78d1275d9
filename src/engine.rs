//! Frame-driven game engine
//!
//! The host calls [`Engine::advance`] once per animation frame. Cosmetic
//! decay runs on every frame; a gameplay tick runs only while playing and
//! only once `speed` milliseconds have passed since the last one. There is
//! no catch-up: a slow frame yields at most one tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundCue;
use crate::best_score::ScoreStore;
use crate::settings::Settings;
use crate::sim::{self, Direction, GameEvent, GamePhase, GameState, MovementRule};

/// Collaborators notified by the engine. All methods default to no-ops.
pub trait GameListener {
    /// Score or best may have changed
    fn on_score_change(&mut self, _score: u64, _best: u64) {}
    /// Every phase transition
    fn on_phase_change(&mut self, _phase: GamePhase) {}
    /// Audio/haptic cue
    fn on_cue(&mut self, _cue: SoundCue) {}
}

/// Owns the single live `GameState` and everything needed to advance it
pub struct Engine<S: ScoreStore> {
    state: GameState,
    rng: Pcg32,
    rule: MovementRule,
    next_rule: MovementRule,
    /// Timestamp (ms) of the last gameplay tick
    last_tick: f64,
    frame: u64,
    store: S,
    listeners: Vec<Box<dyn GameListener>>,
}

impl<S: ScoreStore> Engine<S> {
    /// Create an engine using the player's settings
    pub fn new(settings: &Settings, store: S, seed: u64) -> Self {
        Self::with_rule(settings.movement, store, seed)
    }

    /// Create an engine with an explicit movement rule
    pub fn with_rule(rule: MovementRule, store: S, seed: u64) -> Self {
        let best = match store.load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Best score unavailable, starting from 0: {}", e);
                0
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&mut rng, best);
        log::info!(
            "Engine ready (seed {}, rule {}, best {})",
            seed,
            rule.as_str(),
            best
        );

        Self {
            state,
            rng,
            rule,
            next_rule: rule,
            last_tick: 0.0,
            frame: 0,
            store,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rule(&self) -> MovementRule {
        self.rule
    }

    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Movement rule to use from the next restart on
    pub fn set_rule_for_next_game(&mut self, rule: MovementRule) {
        self.next_rule = rule;
    }

    /// One animation frame at time `now` (ms). Returns whether a gameplay
    /// tick ran.
    pub fn advance(&mut self, now: f64) -> bool {
        self.frame += 1;
        self.state = sim::decay_visuals(&self.state);

        if self.state.phase != GamePhase::Playing {
            return false;
        }
        if now - self.last_tick < f64::from(self.state.speed) {
            log::trace!("Frame {} gated ({:.1} ms)", self.frame, now - self.last_tick);
            return false;
        }
        self.last_tick = now;

        let outcome = sim::tick(&self.state, now, self.rule, &mut self.rng);
        self.state = outcome.state;

        let mut died = false;
        for event in &outcome.events {
            self.emit_cue(SoundCue::for_event(event));
            if let GameEvent::Died {
                cause,
                score,
                best,
                new_best,
            } = *event
            {
                died = true;
                log::info!(
                    "Game over ({:?}): score {}, best {}{}",
                    cause,
                    score,
                    best,
                    if new_best { " - new best!" } else { "" }
                );
                if let Err(e) = self.store.save_best(best) {
                    log::warn!("Could not save best score: {}", e);
                }
            }
        }

        let (score, best) = (self.state.score, self.state.best_score);
        for listener in &mut self.listeners {
            listener.on_score_change(score, best);
        }
        if died {
            self.emit_phase();
        }
        true
    }

    /// Buffer a heading. The first heading on an idle board starts the game.
    pub fn set_direction(&mut self, dir: Direction, now: f64) {
        if self.state.phase == GamePhase::Idle {
            self.start(now);
        }
        if let Some(next) = sim::steer(&self.state, dir) {
            self.state = next;
            self.emit_cue(SoundCue::for_event(&GameEvent::Turned(dir)));
        }
    }

    /// `Idle -> Playing`; the first tick comes one interval from `now`
    pub fn start(&mut self, now: f64) {
        if let Some(next) = sim::start(&self.state) {
            self.state = next;
            self.last_tick = now;
            self.emit_phase();
        }
    }

    /// `Playing <-> Paused`. Resuming restarts the tick gate so the game
    /// does not lurch forward.
    pub fn toggle_pause(&mut self, now: f64) {
        if let Some(next) = sim::toggle_pause(&self.state) {
            self.state = next;
            if self.state.phase == GamePhase::Playing {
                self.last_tick = now;
            }
            self.emit_phase();
        }
    }

    /// Fresh board after a death (or from idle), keeping the best score
    pub fn restart(&mut self) {
        if let Some(next) = sim::restart(&self.state, &mut self.rng) {
            self.state = next;
            self.rule = self.next_rule;
            self.last_tick = 0.0;
            self.emit_phase();
            let (score, best) = (self.state.score, self.state.best_score);
            for listener in &mut self.listeners {
                listener.on_score_change(score, best);
            }
        }
    }

    fn emit_phase(&mut self) {
        let phase = self.state.phase;
        log::info!("Phase -> {}", phase.as_str());
        for listener in &mut self.listeners {
            listener.on_phase_change(phase);
        }
    }

    fn emit_cue(&mut self, cue: SoundCue) {
        for listener in &mut self.listeners {
            listener.on_cue(cue);
        }
    }
}
