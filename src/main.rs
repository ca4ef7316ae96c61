//! Block Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use block_dodge::Settings;
    use block_dodge::audio::{AudioManager, SoundEffect};
    use block_dodge::consts::*;
    use block_dodge::highscores::LocalStorageStore;
    use block_dodge::renderer::RenderState;
    use block_dodge::sim::{GamePhase, Session, TickInput, autopilot};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        // Held directions, per input source
        key_left: bool,
        key_right: bool,
        pointer_left: bool,
        pointer_right: bool,
        /// Demo mode - autopilot plays the game
        autopilot: bool,
        /// An animation frame is already scheduled
        frame_pending: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                session: Session::new(LocalStorageStore, settings.tuning(), seed),
                render_state: None,
                audio,
                settings,
                key_left: false,
                key_right: false,
                pointer_left: false,
                pointer_right: false,
                autopilot: false,
                frame_pending: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Directions held at the start of this tick
        fn tick_input(&self) -> TickInput {
            if self.autopilot {
                return autopilot::steer(&self.session.state);
            }
            TickInput {
                left: self.key_left || self.pointer_left,
                right: self.key_right || self.pointer_right,
                pause: false,
            }
        }

        /// Run one tick
        fn update(&mut self, time: f64) {
            let input = self.tick_input();
            let events = self.session.frame(&input, time);
            self.audio.play_events(&events);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.session.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&snapshot) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Draw + HUD outside of the frame loop (after a state change)
        fn redraw(&mut self) {
            self.render();
            self.update_hud();
        }

        /// Explicit start: fresh session, running
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.session.set_tuning(self.settings.tuning());
            self.session.start(seed);
            self.audio.play(SoundEffect::Start);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.session.snapshot();

            let set_text = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("hidden", !visible);
                }
            };

            set_text("#hud-score .hud-value", &snapshot.score.to_string());
            set_text("#hud-level .hud-value", &snapshot.level.to_string());
            set_text("#hud-lives .hud-value", &snapshot.lives.to_string());
            set_text(
                "#hud-high .hud-value",
                &snapshot.display_high_score().to_string(),
            );
            set_text("#hud-fps .hud-value", &self.fps.to_string());
            show("hud-fps", self.settings.show_fps);
            show("hud-demo", self.autopilot);

            show("splash", snapshot.phase == GamePhase::Idle);
            show("pause-menu", snapshot.phase == GamePhase::Paused);
            show("game-over", snapshot.phase == GamePhase::GameOver);
            if snapshot.phase == GamePhase::GameOver {
                set_text("#final-score", &snapshot.score.to_string());
                set_text("#final-level", &snapshot.level.to_string());
                set_text("#final-high", &snapshot.high_score.to_string());
            }

            set_text(
                "#pause-btn",
                if snapshot.phase == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                },
            );
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Block Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (CANVAS_WIDTH, CANVAS_HEIGHT),
        )
        .await;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone());
        setup_pointer(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Splash screen until the player starts
        game.borrow_mut().redraw();

        log::info!("Block Dodge ready!");
    }

    /// Schedule a frame if the session is running and none is queued
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        let should_schedule = {
            let mut g = game.borrow_mut();
            if g.session.wants_frames() && !g.frame_pending {
                g.frame_pending = true;
                true
            } else {
                false
            }
        };
        if should_schedule {
            request_animation_frame(game.clone());
        }
    }

    /// Apply the pause/start key
    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.session.toggle_pause();
            g.redraw();
        }
        ensure_loop(game);
    }

    fn start(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.start();
            g.redraw();
        }
        ensure_loop(game);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                match key.as_str() {
                    "ArrowLeft" | "a" | "A" => game.borrow_mut().key_left = true,
                    "ArrowRight" | "d" | "D" => game.borrow_mut().key_right = true,
                    " " | "p" | "P" => {
                        event.prevent_default();
                        if !event.repeat() {
                            toggle_pause(&game);
                        }
                    }
                    "i" | "I" => {
                        let mut g = game.borrow_mut();
                        g.autopilot = !g.autopilot;
                        log::info!("Demo mode: {}", g.autopilot);
                        g.update_hud();
                    }
                    "m" | "M" => {
                        let mut g = game.borrow_mut();
                        g.settings.muted = !g.settings.muted;
                        let volume = g.settings.effective_volume();
                        g.audio.set_volume(volume);
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.key_left = false,
                    "ArrowRight" | "d" | "D" => g.key_right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Press on the left or right half of the canvas holds that direction
    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let half = canvas_clone.client_width() as f64 / 2.0;
                let left = (event.offset_x() as f64) < half;
                let mut g = game.borrow_mut();
                g.pointer_left = left;
                g.pointer_right = !left;
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            let mut g = game.borrow_mut();
            g.pointer_left = false;
            g.pointer_right = false;
        });
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    start(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                toggle_pause(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let Some(document) = window.document() else {
            return;
        };

        let pause_if_running = |game: &Rc<RefCell<Game>>, reason: &str| {
            let running = game.borrow().session.phase() == GamePhase::Running;
            if running {
                toggle_pause(game);
                log::info!("Auto-paused ({})", reason);
            }
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause_if_running(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                pause_if_running(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;

            // Paused or ended since this frame was queued
            if !g.session.wants_frames() {
                return;
            }

            g.update(time);
            g.render();
            g.update_hud();

            if g.session.wants_frames() {
                g.frame_pending = true;
                true
            } else {
                false
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_dodge::highscores::JsonFileStore;
    use block_dodge::sim::{GameEvent, GamePhase, Session, autopilot};
    use block_dodge::{Settings, Tuning};

    env_logger::init();
    log::info!("Block Dodge (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let path = std::env::var("BLOCK_DODGE_HIGHSCORE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("block_dodge_high_score.json"));
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);

    let tuning: Tuning = Settings::load().tuning();
    let mut session = Session::new(JsonFileStore::new(path), tuning, seed);
    session.start(seed);

    // Two simulated minutes at 60 frames per second
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut now = 0.0;
    let mut hits = 0;
    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        let input = autopilot::steer(&session.state);
        for event in session.frame(&input, now) {
            match event {
                GameEvent::Hit { lives, .. } => {
                    hits += 1;
                    log::info!("Hit! {} lives left", lives);
                }
                other => log::debug!("{:?}", other),
            }
        }
        if session.phase() != GamePhase::Running {
            break;
        }
    }

    let state = &session.state;
    println!(
        "Demo finished after {:.1}s: score {}, level {}, lives {}, hits {}, high score {} ({})",
        now / 1000.0,
        state.score,
        state.level,
        state.lives,
        hits,
        state.high_score,
        session.store().path().display(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
