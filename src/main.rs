//! Pulse Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pulse_runner::Tuning;
    use pulse_runner::best_score::LocalStorageStore;
    use pulse_runner::driver::{FrameDriver, InputQueue};
    use pulse_runner::renderer::{SceneRenderer, WebGlPresenter};
    use pulse_runner::sim::{RunController, RunPhase};

    /// Everything the frame callback touches
    struct Game {
        controller: RunController<LocalStorageStore>,
        driver: FrameDriver,
        input: InputQueue,
        scene: SceneRenderer,
        presenter: WebGlPresenter,
        /// Last values written to the DOM
        shown: Option<(u64, u64, RunPhase)>,
    }

    impl Game {
        fn frame(&mut self, now_ms: f64) {
            self.driver
                .frame(now_ms, &mut self.controller, &mut self.input);

            let state = self.controller.state();
            let screen = (state.tuning.screen_width, state.tuning.screen_height);
            let vertices = self.scene.build(state);
            self.presenter.draw(vertices, screen);
        }

        /// Push score, best and the game-over message into the page
        fn update_hud(&mut self, document: &Document) {
            let now = (
                self.controller.state().score,
                self.controller.best(),
                self.controller.phase(),
            );
            if self.shown == Some(now) {
                return;
            }
            self.shown = Some(now);

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&now.0.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best") {
                el.set_text_content(Some(&now.1.to_string()));
            }
            if let Some(el) = document.get_element_by_id("centerMsg") {
                let class = if now.2 == RunPhase::GameOver { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pulse Runner starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = document()?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let tuning = Tuning::load();
        let dpr = window.device_pixel_ratio();
        let width = (tuning.screen_width as f64 * dpr) as u32;
        let height = (tuning.screen_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let mut presenter = WebGlPresenter::new(&canvas)?;
        presenter.resize(width, height);

        let seed = js_sys::Date::now() as i64;
        let controller = RunController::new(tuning, seed, LocalStorageStore::new());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            controller,
            driver: FrameDriver::new(),
            input: InputQueue::new(),
            scene: SceneRenderer::new(seed as u64),
            presenter,
            shown: None,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Pulse Runner running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let document = document()?;

        // Keyboard: Space jumps, R restarts with the current seed
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.input.press_jump();
                        }
                    }
                    "KeyR" => g.input.request_reset(),
                    _ => {}
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    game.borrow_mut().input.release_jump();
                }
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse button acts as the jump key
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.press_jump();
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.release_jump();
            });
            document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.controller.start() {
                    g.driver.resync();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.controller.reset(None);
                g.driver.resync();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            if let Ok(document) = document() {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless autopilot run: `pulse-runner [seed] [max_ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pulse_runner::demo::run_headless;
    use pulse_runner::{MemoryStore, Tuning};

    env_logger::init();
    log::info!("Pulse Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<i64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using 1", e);
            1
        }
        None => 1,
    };
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(120 * 60);

    let (report, _store) = run_headless(Tuning::default(), seed, max_ticks, MemoryStore::new());
    println!(
        "seed {} ran {} ticks: score {} best {}{}",
        report.seed,
        report.ticks,
        report.score,
        report.best,
        if report.crashed { " (crashed)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
