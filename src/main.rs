//! Grid Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement};

    use grid_pong::renderer::CanvasView;
    use grid_pong::{Context, Game, MenuChoice, Settings};

    const MENU_ID: &str = "menu";

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Grid Pong starting...");

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));

        show_menu(game.clone())?;
        setup_keyboard(game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    /// Build the mode buttons; picking one starts a session
    fn show_menu(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        let menu = document.create_element("div")?;
        menu.set_id(MENU_ID);

        if let Some(score) = game.borrow().last_score() {
            let result = document.create_element("p")?;
            result.set_text_content(Some(&format!(
                "Last game {} : {}",
                score.left, score.right
            )));
            menu.append_child(&result)?;
        }

        for choice in MenuChoice::all() {
            let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
            button.set_text_content(Some(choice.label()));

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Err(e) = start_session(&game, choice) {
                    log::error!("Could not start game: {:?}", e);
                }
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            menu.append_child(&button)?;
        }

        body.append_child(&menu)?;
        Ok(())
    }

    fn start_session(game: &Rc<RefCell<Game>>, choice: MenuChoice) -> Result<(), JsValue> {
        if let Some(menu) = document()?.get_element_by_id(MENU_ID) {
            menu.remove();
        }

        let seed = js_sys::Date::now() as u64;
        let mut g = game.borrow_mut();
        let scaling = g.settings().scaling_factor;
        let session = g
            .start(choice, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        session.add_view(Box::new(CanvasView::new(scaling)?));

        log::info!("Game started with seed: {}", seed);
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if game.borrow().handle_key(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let (before, after) = {
            let mut g = game.borrow_mut();
            let before = g.context();
            (before, g.frame(time))
        };

        if before == Context::Playing && after == Context::Menu {
            if let Err(e) = show_menu(game.clone()) {
                log::error!("Could not show menu: {:?}", e);
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

/// Frames simulated by the native demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 500;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_pong::renderer::text::render;
    use grid_pong::{FrameOutcome, MenuChoice, Session, Settings};

    env_logger::init();
    log::info!("Grid Pong (native) starting...");
    log::info!("Native mode runs a headless AI match - build for wasm32 to play in the browser");

    let settings = Settings {
        arena_width: 50,
        arena_height: 25,
        seed: Some(1),
        ..Settings::load()
    };
    let step = settings.tick_interval_ms + 1.0;

    let mut session = match Session::start(settings, MenuChoice::TwoAi.setup(), 0) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    let mut frame = String::new();
    for i in 0..DEMO_FRAMES {
        if session.frame(i as f64 * step) == FrameOutcome::Finished {
            break;
        }
        frame = render(session.world());
    }

    println!("{}", frame);
    match session.final_score() {
        Some(score) => println!("Finished {} : {}", score.left, score.right),
        None => println!(
            "Stopped after {} ticks",
            session.world().tick_count()
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
