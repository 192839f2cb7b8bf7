//! Modus Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use modus_invaders::audio::{WebSound, load_sound};
    use modus_invaders::consts::*;
    use modus_invaders::input::Keyboard;
    use modus_invaders::renderer::{RenderState, VertexBatch};
    use modus_invaders::{FrameStatus, Game, Settings, StartupError};

    const STAGE_ID: &str = "stage";

    /// Everything the animation frame callback needs
    struct Host {
        game: Game<WebSound>,
        render_state: RenderState,
        batch: VertexBatch,
        keyboard: Rc<RefCell<Keyboard>>,
        document: Document,
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoWindow)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(STAGE_ID)
            .ok_or_else(|| StartupError::MissingElement {
                id: STAGE_ID.to_string(),
            })?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas {
                id: STAGE_ID.to_string(),
            })?;

        let settings = match canvas.get_attribute(Settings::ATTRIBUTE) {
            Some(json) => Settings::from_json(&json)?,
            None => Settings::default(),
        };

        // A second init (hot reload) is harmless
        let _ = console_log::init_with_level(settings.log_level());
        log::info!("Modus Invaders starting...");

        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Graphics(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Graphics(format!("failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        // The game does not start until the sound can play through
        let shoot_sound =
            load_sound(&settings.shoot_sound_url, settings.effective_volume()).await?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let stage = glam::Vec2::new(STAGE_WIDTH, STAGE_HEIGHT);

        let keyboard = Rc::new(RefCell::new(Keyboard::new()));
        setup_input_handlers(&window, keyboard.clone());

        let host = Rc::new(RefCell::new(Host {
            game: Game::new(seed, stage, shoot_sound),
            render_state,
            batch: VertexBatch::new(stage),
            keyboard,
            document,
        }));

        request_animation_frame(host);

        log::info!("Modus Invaders running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, keyboard: Rc<RefCell<Keyboard>>) {
        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Keep arrows and space from scrolling the page
                if keyboard
                    .borrow_mut()
                    .key_down(&event.key(), event.key_code())
                {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if keyboard
                    .borrow_mut()
                    .key_up(&event.key(), event.key_code())
                {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-ups never arrive while another window has focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                keyboard.borrow_mut().release_all();
                log::debug!("Focus lost; released held keys");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window went away; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let status = {
            let mut h = host.borrow_mut();
            let Host {
                game,
                render_state,
                batch,
                keyboard,
                ..
            } = &mut *h;

            let status = game.frame(&*keyboard.borrow(), time, batch);

            match render_state.render(batch) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = render_state.size;
                    render_state.resize(width, height);
                }
                Err(e) => log::warn!("Render error: {e:?}"),
            }
            status
        };

        match status {
            FrameStatus::Running => request_animation_frame(host),
            FrameStatus::Ended(outcome) => {
                let h = host.borrow();
                match h.document.get_element_by_id(outcome.element_id()) {
                    Some(el) => {
                        let _ = el.set_attribute("style", "display: block");
                    }
                    None => log::warn!("No #{} element to show", outcome.element_id()),
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use modus_invaders::audio::SilentSound;
    use modus_invaders::consts::*;
    use modus_invaders::input::{InputSource, LogicalKey};
    use modus_invaders::renderer::VertexBatch;
    use modus_invaders::{FrameStatus, Game};

    /// Sweeps the player back and forth while holding fire
    struct Autopilot {
        frame: u64,
    }

    impl InputSource for Autopilot {
        fn is_held(&self, key: LogicalKey) -> bool {
            let leftward = (self.frame / 90) % 2 == 1;
            match key {
                LogicalKey::Left => leftward,
                LogicalKey::Right => !leftward,
                LogicalKey::Fire => true,
            }
        }
    }

    const MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Modus Invaders (native) starting headless demo...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    let stage = Vec2::new(STAGE_WIDTH, STAGE_HEIGHT);
    let mut game = Game::new(seed, stage, SilentSound);
    let mut batch = VertexBatch::new(stage);
    let mut pilot = Autopilot { frame: 0 };

    while pilot.frame < MAX_FRAMES {
        let now_ms = pilot.frame as f64 * FRAME_MS;
        if let FrameStatus::Ended(outcome) = game.frame(&pilot, now_ms, &mut batch) {
            println!("{outcome} after {} frames (seed {seed})", game.state().frame);
            return;
        }
        pilot.frame += 1;
    }

    println!(
        "Still running after {MAX_FRAMES} frames (seed {seed}), {} invaders left",
        game.state().registry.count_invaders()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
