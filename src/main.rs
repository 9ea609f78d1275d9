//! Neon Snake entry point
//!
//! In the browser this wires DOM input, audio and a Canvas2D painter around
//! the engine and drives it from `requestAnimationFrame`. Natively it runs a
//! headless autopilot demo and checks that replays are deterministic.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_snake::audio::SoundCue;
    use neon_snake::audio::web::AudioManager;
    use neon_snake::best_score::LocalStorageStore;
    use neon_snake::input::{self, Command};
    use neon_snake::renderer::Scene;
    use neon_snake::renderer::canvas::CanvasRenderer;
    use neon_snake::sim::{GamePhase, autopilot};
    use neon_snake::{Engine, GameListener, Settings};

    /// Pause before the demo restarts a finished run (ms)
    const DEMO_RESTART_MS: f64 = 1500.0;

    /// Plays engine cues through Web Audio
    struct AudioListener(Rc<RefCell<AudioManager>>);

    impl GameListener for AudioListener {
        fn on_cue(&mut self, cue: SoundCue) {
            self.0.borrow().play(cue);
        }
    }

    /// Game instance holding all state
    struct Game {
        engine: Engine<LocalStorageStore>,
        renderer: CanvasRenderer,
        settings: Settings,
        audio: Rc<RefCell<AudioManager>>,
        /// Where the current touch began (CSS px)
        touch_start: Option<(f32, f32)>,
        /// Autopilot steering
        demo: bool,
        died_at: Option<f64>,
    }

    impl Game {
        fn command(&mut self, cmd: Command, now: f64) {
            // Any gesture is a chance to unlock audio
            self.audio.borrow_mut().ensure_ready();
            match cmd {
                Command::Steer(dir) => self.engine.set_direction(dir, now),
                Command::Start => self.engine.start(now),
                Command::Restart => self.engine.restart(),
                Command::TogglePause => self.engine.toggle_pause(now),
                Command::ToggleDemo => {
                    self.demo = !self.demo;
                    log::info!("Demo mode: {}", self.demo);
                }
                Command::ToggleMute => {
                    self.settings.muted = !self.settings.muted;
                    self.audio.borrow_mut().apply_settings(&self.settings);
                    if let Err(e) = self.settings.save() {
                        log::warn!("Could not save settings: {}", e);
                    }
                }
            }
        }

        fn phase(&self) -> GamePhase {
            self.engine.state().phase
        }

        fn drive_demo(&mut self, now: f64) {
            match self.phase() {
                GamePhase::Idle => self.engine.start(now),
                GamePhase::Playing => {
                    if let Some(dir) =
                        autopilot::choose_direction(self.engine.state(), self.engine.rule())
                    {
                        self.engine.set_direction(dir, now);
                    }
                }
                GamePhase::Dead => {
                    let since = *self.died_at.get_or_insert(now);
                    if now - since >= DEMO_RESTART_MS {
                        self.engine.restart();
                    }
                }
                GamePhase::Paused => {}
            }
        }

        fn frame(&mut self, now: f64) {
            if self.demo {
                self.drive_demo(now);
            }
            if self.phase() != GamePhase::Dead {
                self.died_at = None;
            }

            self.engine.advance(now);

            let scene = Scene::build(self.engine.state(), self.engine.frame(), &self.settings);
            if let Err(e) = self.renderer.paint(&scene) {
                log::warn!("Paint failed: {:?}", e);
            }
        }

        /// Pause a live game when the page loses attention
        fn auto_pause(&mut self, reason: &str) {
            if self.settings.auto_pause_on_blur && self.phase() == GamePhase::Playing {
                self.engine.toggle_pause(now());
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Neon Snake starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(&canvas)?;

        let settings = Settings::load();
        let audio = Rc::new(RefCell::new(AudioManager::new(&settings)));
        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(&settings, LocalStorageStore, seed);
        engine.add_listener(Box::new(AudioListener(audio.clone())));

        let game = Rc::new(RefCell::new(Game {
            engine,
            renderer,
            settings,
            audio,
            touch_start: None,
            demo: false,
            died_at: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_pointer(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game);

        log::info!("Neon Snake running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if input::captures_key(&key) {
                event.prevent_default();
            }
            let mut g = game.borrow_mut();
            if let Some(cmd) = input::key_command(&key, g.phase()) {
                g.command(cmd, now());
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Touch start: remember the anchor
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().touch_start =
                        Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end: swipe or tap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let (Some((x0, y0)), Some(touch)) =
                    (g.touch_start.take(), event.changed_touches().get(0))
                else {
                    return;
                };
                let dx = touch.client_x() as f32 - x0;
                let dy = touch.client_y() as f32 - y0;
                let cmd = input::gesture(dx, dy, g.phase());
                g.command(cmd, now());
            });
            canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click behaves like a tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let cmd = input::tap_command(g.phase());
                g.command(cmd, now());
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.auto_pause("window blur");
                if g.settings.mute_on_blur {
                    g.audio.borrow_mut().set_muted(true);
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus: unmute, but stay paused until the player resumes
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let g = game.borrow();
                if g.settings.mute_on_blur {
                    g.audio.borrow_mut().set_muted(false);
                }
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
            return;
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use neon_snake::audio::SoundCue;
    use neon_snake::renderer::Scene;
    use neon_snake::sim::{GamePhase, autopilot};
    use neon_snake::{Engine, GameListener, MemoryStore, Settings};

    /// Synthetic 60 Hz clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of play at most
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    struct LogListener;

    impl GameListener for LogListener {
        fn on_phase_change(&mut self, phase: GamePhase) {
            log::debug!("phase -> {}", phase.as_str());
        }

        fn on_cue(&mut self, cue: SoundCue) {
            log::trace!("cue {:?}", cue);
        }
    }

    /// Outcome of one headless run
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Report {
        pub score: u64,
        pub length: usize,
        pub frames: u64,
        pub fingerprint: u64,
    }

    /// Play one autopilot game from `seed` until it ends or time runs out
    pub fn run(seed: u64, settings: &Settings) -> Report {
        let mut engine = Engine::new(settings, MemoryStore::new(), seed);
        engine.add_listener(Box::new(LogListener));

        let mut now = 0.0;
        let mut fingerprint = 0u64;
        engine.start(now);

        while engine.frame() < MAX_FRAMES && engine.state().phase == GamePhase::Playing {
            now += FRAME_MS;
            if let Some(dir) = autopilot::choose_direction(engine.state(), engine.rule()) {
                engine.set_direction(dir, now);
            }
            engine.advance(now);
            let scene = Scene::build(engine.state(), engine.frame(), settings);
            fingerprint = fingerprint.rotate_left(5) ^ scene.fingerprint();
        }

        match serde_json::to_string(engine.state()) {
            Ok(json) => log::debug!("final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }

        Report {
            score: engine.state().score,
            length: engine.state().len(),
            frames: engine.frame(),
            fingerprint,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);
    let settings = neon_snake::Settings::load();
    log::info!(
        "Neon Snake (native) demo, seed {}, {} rule",
        seed,
        settings.movement.as_str()
    );

    let first = demo::run(seed, &settings);
    log::info!(
        "Autopilot scored {} (length {}) in {} frames",
        first.score,
        first.length,
        first.frames
    );

    let replay = demo::run(seed, &settings);
    if replay == first {
        log::info!("Replay matched (fingerprint {:016x})", first.fingerprint);
    } else {
        log::error!("Replay diverged: {:?} vs {:?}", first, replay);
        std::process::exit(1);
    }
}
