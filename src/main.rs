//! Lane Rush entry point
//!
//! In the browser this drives one simulation tick per animation frame and
//! wires input, audio, rendering and the DOM HUD around it. Natively it runs
//! a headless autopilot session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use lane_rush::audio::{AudioManager, SoundEffect};
    use lane_rush::platform::{KeyAction, SwipeTracker};
    use lane_rush::renderer::{RenderState, build_scene};
    use lane_rush::sim::{Command, GameEvent, GameState, LevelUpAnimation, autopilot, tick};
    use lane_rush::{Settings, Tuning, ui};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        swipe: SwipeTracker,
        /// Demo mode: the autopilot drives
        autopilot: bool,
        /// Last banner level written to the DOM
        banner_level: u32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                state: new_session(seed, &tuning),
                tuning,
                settings,
                render_state: None,
                audio,
                swipe: SwipeTracker::default(),
                autopilot: false,
                banner_level: 0,
            }
        }

        /// Apply a player command and wake audio (browsers need a gesture)
        fn drive(&mut self, command: Command) {
            self.audio.resume();
            self.state.apply(command);
        }

        fn handle_key(&mut self, action: KeyAction) {
            match action {
                KeyAction::Drive(command) => self.drive(command),
                KeyAction::ToggleMute => {
                    let muted = self.settings.toggle_mute();
                    self.audio.apply_settings(&self.settings);
                    log::info!("Sound {}", if muted { "off" } else { "on" });
                }
                KeyAction::ToggleAutopilot => {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
                KeyAction::Restart => {
                    if self.state.is_over() {
                        self.restart(js_sys::Date::now() as u64);
                    }
                }
            }
        }

        /// Start a fresh session
        fn restart(&mut self, seed: u64) {
            self.state = new_session(seed, &self.tuning);
            self.swipe.end();
            self.banner_level = 0;
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Run one simulation tick and forward its events to audio
        fn update(&mut self) {
            if self.autopilot {
                if let Some(command) = autopilot::suggest(&self.state) {
                    self.state.apply(command);
                }
            }

            tick(&mut self.state);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::EngineStop => self.audio.stop_engine(),
                    other => {
                        if let Some(effect) = SoundEffect::for_event(&other) {
                            self.audio.play(effect);
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state, &self.settings);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.state;

            set_text(
                &document,
                "#hud-distance .hud-value",
                &ui::distance_text(state.distance_km()),
            );
            set_text(&document, "#hud-level .hud-value", &ui::level_text(state.level()));
            set_text(
                &document,
                "#hud-speed .hud-value",
                &ui::speed_text(state.vehicle().velocity()),
            );

            // Level banner
            if let Some(el) = document.get_element_by_id("level-banner") {
                match state.level_up_progress() {
                    Some(progress) => {
                        if self.banner_level != state.level() {
                            self.banner_level = state.level();
                            let (title, subtitle) = ui::level_banner(state.level());
                            set_text(&document, "#level-banner .title", &title);
                            set_text(&document, "#level-banner .subtitle", &subtitle);
                        }
                        let scale = if self.settings.effective_banner_zoom() {
                            LevelUpAnimation::scale_at(progress)
                        } else {
                            1.0
                        };
                        let style = format!("transform: {}", ui::banner_transform(scale));
                        let _ = el.set_attribute("style", &style);
                        let _ = el.class_list().remove_1("hidden");
                    }
                    None => {
                        let _ = el.class_list().add_1("hidden");
                    }
                }
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if state.is_over() {
                    set_text(
                        &document,
                        "#final-distance",
                        &ui::game_over_text(state.score(), state.tuning().score_scale),
                    );
                    let _ = el.class_list().remove_1("hidden");
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Read a JSON attribute from the canvas, falling back to defaults
    /// Start a session, falling back to default balance if `tuning` is rejected
    fn new_session(seed: u64, tuning: &Tuning) -> GameState {
        GameState::with_tuning(seed, tuning.clone()).unwrap_or_else(|e| {
            log::warn!("Using default tuning: {}", e);
            GameState::new(seed)
        })
    }

    fn read_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-tuning: {}", e);
            Tuning::default()
        })
    }

    fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
        let Some(json) = canvas.get_attribute("data-settings") else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-settings: {}", e);
            Settings::default()
        })
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Lane Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let tuning = read_tuning(&canvas);
        let settings = read_settings(&canvas);
        let seed = js_sys::Date::now() as u64;
        let playfield = (tuning.playfield_width, tuning.playfield_height);
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, width, height, playfield).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.class_list().remove_1("hidden");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Lane Rush running!");
        Ok(())
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        playfield: (f32, f32),
    ) -> Result<RenderState, String> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| e.to_string())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = KeyAction::from_key(&event.key()) else {
                    return;
                };
                if action.prevents_default() {
                    event.prevent_default();
                }
                game.borrow_mut().handle_key(action);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.swipe.begin(touch.client_x() as f32);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move: one lane per threshold of travel
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if let Some(command) = g.swipe.moved(touch.client_x() as f32) {
                    g.drive(command);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end and cancel
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().swipe.end();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart(js_sys::Date::now() as u64);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use lane_rush::Tuning;
    use lane_rush::audio::SoundEffect;
    use lane_rush::consts::TICKS_PER_SECOND;
    use lane_rush::sim::{GameEvent, GameState, autopilot, tick};
    use lane_rush::ui;

    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

    const DEFAULT_SEED: u64 = 42;

    #[derive(Parser, Debug)]
    #[command(name = "lane-rush")]
    #[command(about = "Let the autopilot play one deterministic Lane Rush session")]
    pub struct Cli {
        /// Run seed
        #[arg(default_value_t = DEFAULT_SEED)]
        pub seed: u64,
        /// JSON file overriding any subset of the balance parameters
        pub tuning: Option<PathBuf>,
    }

    impl Cli {
        pub fn load_tuning(&self) -> Result<Tuning> {
            match &self.tuning {
                Some(path) => load_tuning(path),
                None => Ok(Tuning::default()),
            }
        }
    }

    fn load_tuning(path: &Path) -> Result<Tuning> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("bad tuning in {}", path.display()))
    }

    /// Sound effects the run would have played, by kind
    #[derive(Default)]
    struct SoundCounts {
        engine: u64,
        score: u64,
        level_up: u64,
        collision: u64,
    }

    /// Let the autopilot play one session
    pub fn run(seed: u64, tuning: Tuning) -> Result<GameState> {
        log::info!("Lane Rush (headless) starting with seed: {}", seed);
        let mut state = GameState::with_tuning(seed, tuning)?;
        let mut sounds = SoundCounts::default();

        while !state.is_over() && state.frame() < MAX_TICKS {
            if let Some(command) = autopilot::suggest(&state) {
                state.apply(command);
            }
            tick(&mut state);

            for event in state.drain_events() {
                if let GameEvent::LevelUp { level } = event {
                    let (title, subtitle) = ui::level_banner(level);
                    log::info!("{} {}", title, subtitle);
                }
                match SoundEffect::for_event(&event) {
                    Some(SoundEffect::Engine) => sounds.engine += 1,
                    Some(SoundEffect::Score) => sounds.score += 1,
                    Some(SoundEffect::LevelUp) => sounds.level_up += 1,
                    Some(SoundEffect::Collision) => sounds.collision += 1,
                    None => {}
                }
            }
        }

        log::debug!(
            "Sounds: {} engine, {} score, {} level-up, {} collision",
            sounds.engine,
            sounds.score,
            sounds.level_up,
            sounds.collision
        );
        Ok(state)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use lane_rush::ui;

    env_logger::init();

    let cli = headless::Cli::parse();
    let tuning = cli.load_tuning()?;
    let state = headless::run(cli.seed, tuning)?;

    let outcome = if state.is_over() { "crashed" } else { "still driving" };
    println!(
        "seed {}: {} after {} ticks, level {}, distance {} ({} km), {} lanes",
        cli.seed,
        outcome,
        state.frame(),
        ui::level_text(state.level()),
        ui::game_over_text(state.score(), state.tuning().score_scale),
        ui::distance_text(state.distance_km()),
        state.lanes().len(),
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
