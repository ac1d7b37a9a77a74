//! Coin Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlSelectElement, KeyboardEvent, PointerEvent};

    use coin_dash::audio::AudioManager;
    use coin_dash::audio::web::WebAudio;
    use coin_dash::persistence::LocalStore;
    use coin_dash::platform::{Action, FrameClock, InputProvider, InputState, fit_width};
    use coin_dash::renderer::{HudView, Overlay, RenderState, build_scene, hud};
    use coin_dash::sim::GamePhase;
    use coin_dash::{Difficulty, Session};

    type GameSession = Session<LocalStore, AudioManager<WebAudio>>;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        clock: FrameClock,
        input: InputState,
        /// Last HUD written to the DOM, to skip redundant writes
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new() -> Self {
            // The context is created lazily on the first sound, after a user gesture
            let audio = AudioManager::new(WebAudio::create, true);
            Self {
                session: Session::load(LocalStore::new(), audio),
                render_state: None,
                clock: FrameClock::new(),
                input: InputState::new(),
                last_hud: None,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            if self.input.take_start() {
                self.session.press_start();
            }
            let input = self.input.snapshot();
            self.session.frame(&input, dt);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(self.session.state());
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let view = HudView::new(&self.session);
            if self.last_hud.as_ref() == Some(&view) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("hidden", !visible);
                }
            };

            set_text("hud-score", &view.score);
            set_text("hud-best", &view.best);
            set_text("hud-mode", &view.mode);

            set_visible("overlay-start", view.overlay == Overlay::Start);
            set_visible(
                "overlay-gameover",
                matches!(view.overlay, Overlay::GameOver { .. }),
            );
            if let Some(text) = view.final_score_text() {
                set_text("final-score", &text);
            }
            set_visible("new-highscore", view.show_high_score_banner());

            self.last_hud = Some(view);
        }
    }

    /// Write the static overlay copy once
    fn init_overlay_text(document: &web_sys::Document) {
        for (id, text) in [
            ("overlay-title", hud::TITLE),
            ("overlay-controls", hud::CONTROLS),
            ("overlay-start-prompt", hud::START_PROMPT),
            ("overlay-restart-prompt", hud::RESTART_PROMPT),
            ("new-highscore", hud::NEW_HIGH_SCORE),
        ] {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Size the canvas to the window width, keeping 16:9
    fn fit_canvas(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(816.0) as f32;
        let (w, h) = fit_width(viewport_width);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", w));
        let _ = style.set_property("height", &format!("{}px", h));

        let dpr = window.device_pixel_ratio() as f32;
        let px_w = (w * dpr).round().max(1.0) as u32;
        let px_h = (h * dpr).round().max(1.0) as u32;
        canvas.set_width(px_w);
        canvas.set_height(px_h);

        if let Ok(mut g) = game.try_borrow_mut() {
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(px_w, px_h);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Coin Dash starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window - cannot start");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document - cannot start");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element - cannot start");
            return;
        };

        let game = Rc::new(RefCell::new(Game::new()));
        fit_canvas(&canvas, &game);
        init_overlay_text(&document);

        // Initialize WebGPU (falls back to WebGL)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let (w, h) = (canvas.width(), canvas.height());
                        match RenderState::new(surface, &adapter, w, h).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer unavailable: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_resize(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_touch_buttons(game.clone());
        setup_difficulty_select(game.clone());
        setup_blur(game.clone());

        if let Some(el) = document.get_element_by_id("loading") {
            let _ = el.class_list().add_1("hidden");
        }

        request_animation_frame(game);

        log::info!("Coin Dash running!");
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas, &game);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = Action::from_key_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                match action {
                    Action::JumpOrStart => {
                        if g.session.phase() == GamePhase::Playing {
                            g.input.set_level(action, true);
                        } else if !event.repeat() {
                            g.input.request_start();
                        }
                    }
                    Action::Left | Action::Right => g.input.set_level(action, true),
                    Action::ToggleSound => {
                        if !event.repeat() {
                            let on = g.session.toggle_sound();
                            log::info!("Sound {}", if on { "on" } else { "off" });
                        }
                    }
                    Action::SelectDifficulty(d) => {
                        g.session.select_difficulty(d);
                        sync_difficulty_select(d);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key_code(&event.code()) {
                    game.borrow_mut().input.set_level(action, false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons: press on the button, release anywhere
    fn bind_button(id: &str, action: Action, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(el) = window
            .document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        // Hide on non-touch devices
        let has_touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
            .unwrap_or(false);
        if !has_touch {
            let _ = el.style().set_property("display", "none");
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                // The jump button doubles as start/restart, like Space
                if action == Action::JumpOrStart && g.session.phase() != GamePhase::Playing {
                    g.input.request_start();
                } else {
                    g.input.set_level(action, true);
                }
            });
            let _ =
                el.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            game.borrow_mut().input.set_level(action, false);
        });
        for event in ["pointerup", "pointercancel"] {
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        bind_button("leftBtn", Action::Left, game.clone());
        bind_button("rightBtn", Action::Right, game.clone());
        bind_button("jumpBtn", Action::JumpOrStart, game);
    }

    fn difficulty_select() -> Option<HtmlSelectElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("difficulty")?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    fn sync_difficulty_select(difficulty: Difficulty) {
        if let Some(select) = difficulty_select() {
            select.set_value(difficulty.as_str());
        }
    }

    fn setup_difficulty_select(game: Rc<RefCell<Game>>) {
        let Some(select) = difficulty_select() else { return };
        select.set_value(game.borrow().session.settings().difficulty.as_str());

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match Difficulty::from_str(&select_clone.value()) {
                Some(d) => game.borrow_mut().session.select_difficulty(d),
                None => log::warn!("Unknown difficulty '{}'", select_clone.value()),
            }
            // Hand keyboard focus back so Space doesn't reopen the dropdown
            let _ = select_clone.blur();
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Release held keys when the window loses focus
    fn setup_blur(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coin Dash (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: bounce between the walls hopping until the round ends or time runs out
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use coin_dash::audio::{AudioManager, LogTones};
    use coin_dash::consts::{WALL_LEFT, WALL_RIGHT};
    use coin_dash::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use coin_dash::sim::{FrameInput, GameEvent, GamePhase};
    use coin_dash::Session;

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: f32 = 30.0;

    fn open_store() -> Box<dyn KeyValueStore> {
        match std::env::var("COIN_DASH_STORE") {
            Ok(path) => match JsonFileStore::open(&path) {
                Ok(store) => {
                    log::info!("Using store at {}", path);
                    Box::new(store)
                }
                Err(e) => {
                    log::warn!("Could not open store at {} ({}), using memory", path, e);
                    Box::new(MemoryStore::new())
                }
            },
            Err(_) => Box::new(MemoryStore::new()),
        }
    }

    pub fn run() {
        let audio = AudioManager::new(|| Some(LogTones), true);
        let mut session = Session::load(open_store(), audio);
        session.press_start();

        let mut input = FrameInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        let mut elapsed = 0.0;
        let mut jumps = 0;

        while session.phase() == GamePhase::Playing && elapsed < MAX_SECONDS {
            let player = &session.state().player;
            if input.right && player.pos.x >= WALL_RIGHT - player.size.x {
                input = FrameInput { left: true, right: false, jump: true };
            } else if input.left && player.pos.x <= WALL_LEFT {
                input = FrameInput { left: false, right: true, jump: true };
            }

            for event in session.frame(&input, FRAME_DT) {
                match event {
                    GameEvent::Jumped => jumps += 1,
                    GameEvent::CoinCollected { index } => {
                        log::info!("{:5.2}s coin {} (score {})", elapsed, index, session.score())
                    }
                    GameEvent::Won { score } => log::info!("{:5.2}s round won with {}", elapsed, score),
                }
            }
            elapsed += FRAME_DT;
        }

        println!(
            "difficulty {} | {:.1}s | {} jumps | {} of {} coins | score {} | best {}{}",
            session.settings().difficulty.as_str(),
            elapsed,
            jumps,
            session.state().coins.len() - session.state().coins_remaining(),
            session.state().coins.len(),
            session.score(),
            session.best_score(),
            if session.new_high_score() { " (new!)" } else { "" }
        );
    }
}
