//! Dodge Jump entry point
//!
//! Handles platform-specific initialization and drives the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent, Window};

    use dodge_jump::renderer::{CanvasSurface, Surface};
    use dodge_jump::sim::Extent;
    use dodge_jump::{Activation, Game, Settings};

    /// Game plus the canvas it draws to
    struct App {
        game: Game,
        surface: CanvasSurface,
    }

    fn viewport_size(window: &Window) -> Option<(u32, u32)> {
        let w = window.inner_width().ok()?.as_f64()?;
        let h = window.inner_height().ok()?.as_f64()?;
        Some((w as u32, h as u32))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dodge Jump starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
            .dyn_into()
            .map_err(JsValue::from)?;

        let mut settings = Settings::load();
        if settings.fit_viewport {
            match viewport_size(&window) {
                Some((w, h)) => {
                    settings.width = w as f32;
                    settings.height = h as f32;
                }
                None => log::warn!("Viewport size unavailable, using fixed size"),
            }
        }

        let surface = CanvasSurface::new(canvas.clone(), &settings.sprite_path)?;
        let extent = settings.extent();
        surface.set_size(extent.width as u32, extent.height as u32);

        let fit_viewport = settings.fit_viewport;
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(settings, seed),
            surface,
        }));

        // Start screen
        {
            let mut a = app.borrow_mut();
            let App { game, surface } = &mut *a;
            game.render(surface);
        }

        setup_input_handlers(&window, &canvas, app.clone())?;
        if fit_viewport {
            setup_resize_handler(&window, app)?;
        }

        log::info!("Dodge Jump ready");
        Ok(())
    }

    /// Forward an activate input, starting the frame loop for a new run
    fn activate(app: &Rc<RefCell<App>>) {
        let activation = app.borrow_mut().game.activate();
        if activation == Activation::Started {
            request_animation_frame(app.clone());
        }
    }

    fn setup_input_handlers(
        window: &Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    // Keep the page from scrolling
                    event.prevent_default();
                    activate(&app);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress scroll/zoom and the synthetic mouse events
                event.prevent_default();
                activate(&app);
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) else {
                return;
            };
            let mut a = app.borrow_mut();
            let App { game, surface } = &mut *a;
            let extent = Extent::new(w as f32, h as f32);
            // Assigning the canvas size clears it even when nothing changed
            if extent.is_positive() && surface.extent() != extent {
                surface.set_size(w, h);
            }
            game.resize(extent, surface);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let App { game, surface } = &mut *a;
            game.frame(time, surface)
        };

        if keep_going {
            request_animation_frame(app);
        }
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
fn main() {
    use dodge_jump::platform::ManualStepper;
    use dodge_jump::renderer::RecordingSurface;
    use dodge_jump::{DifficultyPreset, Game, Settings};
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Runs played by the headless demo
    const DEMO_RUNS: u32 = 3;
    /// Two minutes of play per run at most
    const DEMO_MAX_FRAMES: u64 = 60 * 120;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dodge Jump (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    let mut settings = Settings::load();
    if let Some(arg) = std::env::args().nth(1) {
        match DifficultyPreset::from_str(&arg) {
            Some(preset) => settings.preset = preset,
            None => log::warn!(
                "Unknown difficulty '{}', using {}",
                arg,
                settings.preset.as_str()
            ),
        }
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut surface = RecordingSurface::new(settings.extent());
    let mut game = Game::new(settings, seed);
    let mut stepper = ManualStepper::new();

    for _ in 0..DEMO_RUNS {
        game.activate();
        let mut frames = 0;
        while frames < DEMO_MAX_FRAMES {
            autopilot(&mut game);
            frames += 1;
            if !stepper.step(&mut game, &mut surface) {
                break;
            }
        }
        log::info!(
            "Run {}: score {} after {} frames",
            game.state().runs,
            game.state().score,
            frames
        );
        if game.state().is_running() {
            // Activating now would jump instead of starting a new run
            log::info!("Autopilot survived the time limit, stopping demo");
            break;
        }
    }

    log::info!(
        "Session high score: {} in {} mode ({} frames drawn)",
        game.state().high_score(),
        game.settings().preset.as_str(),
        surface.frames()
    );
}

/// Jump when the nearest obstacle is about to reach the player
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &mut dodge_jump::Game) {
    /// Steps of warning before contact
    const LEAD_STEPS: f32 = 9.0;

    let should_jump = {
        let state = game.state();
        let player = state.player.rect();
        !state.player.airborne
            && state.obstacles.iter().any(|o| {
                let gap = o.pos.x - player.right();
                gap > 0.0 && gap < o.speed * LEAD_STEPS
            })
    };

    if should_jump {
        game.activate();
    }
}
