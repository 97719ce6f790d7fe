//! IF/ELSE Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use ifelse_runner::consts::*;
    use ifelse_runner::platform::web::BrowserHost;
    use ifelse_runner::renderer::{CodeRain, RenderState, colors, scene};
    use ifelse_runner::sim::Screen;
    use ifelse_runner::ui::{self, TextItem};
    use ifelse_runner::{Session, Tuning, Variant, client_to_logical};

    /// Game instance holding all state
    struct Game {
        session: Session<BrowserHost>,
        rain: CodeRain,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Text currently mirrored into the DOM overlay
        overlay_items: Vec<TextItem>,
        overlay_scale: f32,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            Self {
                session: Session::new(tuning, seed, BrowserHost),
                rain: CodeRain::new(seed ^ 0x9e37_79b9),
                render_state: None,
                last_time: 0.0,
                overlay_items: Vec::new(),
                overlay_scale: 0.0,
            }
        }

        fn update(&mut self, dt: f32) {
            let dt = dt.clamp(0.0, MAX_FRAME_DT);
            if matches!(self.session.screen, Screen::Opening | Screen::Playing) {
                self.rain.update(dt);
            }
            self.session.update(dt);
        }

        fn render(&mut self) {
            let vertices = scene::build(&self.session, &self.rain);
            if let Some(ref mut render_state) = self.render_state {
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

        /// Mirror the text layout into the DOM overlay when it changes
        fn update_overlay(&mut self, document: &Document, canvas: &HtmlCanvasElement) {
            let Some(overlay) = document
                .get_element_by_id("overlay")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };

            let scale = canvas.client_width() as f32 / WIDTH;
            if (scale - self.overlay_scale).abs() > f32::EPSILON {
                let _ = overlay
                    .style()
                    .set_property("transform", &format!("scale({scale})"));
                self.overlay_scale = scale;
            }

            let items = ui::text_items(&self.session);
            if items == self.overlay_items {
                return;
            }

            overlay.set_inner_html("");
            for item in &items {
                let Ok(span) = document.create_element("span") else {
                    continue;
                };
                span.set_text_content(Some(&item.text));
                let _ = span.set_attribute("style", &span_style(item));
                let _ = overlay.append_child(&span);
            }
            self.overlay_items = items;
        }
    }

    fn span_style(item: &TextItem) -> String {
        let mut style = format!(
            "position:absolute;left:{}px;top:{}px;font-size:{}px;color:{};",
            item.pos.x,
            item.pos.y,
            item.size.px(),
            colors::css(item.color)
        );
        if item.centered {
            style.push_str("transform:translateX(-50%);text-align:center;");
        }
        match item.max_width {
            Some(w) => style.push_str(&format!("width:{w}px;white-space:normal;")),
            None => style.push_str("white-space:nowrap;"),
        }
        style
    }

    pub async fn run() -> anyhow::Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow!("Failed to init logger: {e}"))?;

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let variant = window
            .location()
            .search()
            .ok()
            .and_then(|query| Variant::from_query(&query))
            .unwrap_or_default();
        document.set_title(variant.title());
        log::info!("{} starting...", variant.title());

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        // Backing store at device resolution, logical size is fixed
        let dpr = window.device_pixel_ratio();
        let width = (WIDTH as f64 * dpr) as u32;
        let height = (HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Tuning::for_variant(variant), seed)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| anyhow!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game, canvas);

        log::info!("Running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = client_to_logical(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                game.borrow_mut().session.handle_click(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pos = client_to_logical(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                        canvas_clone.client_width() as f32,
                        canvas_clone.client_height() as f32,
                    );
                    game.borrow_mut().session.handle_click(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, canvas, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / FPS
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_overlay(&document, &canvas);
            }
        }

        request_animation_frame(game, canvas);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:#}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ifelse_runner::Variant;

    env_logger::init();

    let variant = std::env::args()
        .nth(1)
        .and_then(|arg| Variant::from_str(&arg))
        .unwrap_or_default();
    log::info!("{} (native) starting...", variant.title());
    log::info!("Native mode runs a headless autoplay - run with `trunk serve` for the web version");

    headless::autoplay(variant);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use ifelse_runner::consts::*;
    use ifelse_runner::layout;
    use ifelse_runner::platform::ConsoleHost;
    use ifelse_runner::sim::Screen;
    use ifelse_runner::{Session, Tuning, Variant};

    /// Simulated seconds before giving up
    const MAX_SECONDS: f32 = 120.0;
    /// Jump when an obstacle's left edge is this close ahead
    const JUMP_LOOKAHEAD: f32 = 48.0;

    /// Click-only bot: jumps over obstacles, lets every countdown run out
    fn next_click(session: &Session<ConsoleHost>) -> Option<Vec2> {
        match session.screen {
            Screen::Opening => Some(Vec2::ZERO),
            Screen::Playing => {
                let player = session.world.player.rect();
                let threat = session.world.obstacles.iter().any(|o| {
                    let gap = o.rect.left() - player.right();
                    (0.0..JUMP_LOOKAHEAD).contains(&gap)
                });
                (threat && session.world.player.grounded).then_some(Vec2::ZERO)
            }
            Screen::Decision(_) | Screen::Final => None,
        }
    }

    pub fn autoplay(variant: Variant) {
        let seed = chrono::Local::now().timestamp_millis() as u64;
        let tuning = Tuning::for_variant(variant);
        let mut session = Session::new(tuning, seed, ConsoleHost);
        let dt = 1.0 / FPS;

        let mut elapsed = 0.0;
        while elapsed < MAX_SECONDS {
            if let Some(pos) = next_click(&session) {
                session.handle_click(pos);
            }
            session.update(dt);
            elapsed += dt;

            if session.screen == Screen::Final {
                break;
            }
        }

        if session.screen != Screen::Final {
            log::warn!("Autoplay did not finish within {}s", MAX_SECONDS);
            return;
        }

        log::info!(
            "Run finished after {:.1}s, score {}",
            session.clock.total,
            session.run.score
        );
        if let Some(profile) = session.profile_label() {
            log::info!("Profile: {}", profile);
        }
        if tuning.persist_summary {
            session.update(dt);
            session.handle_click(layout::BTN_DOWNLOAD.center());
        }
    }
}
