//! Gate Runner entry point
//!
//! Native builds run in the terminal; the wasm build drives a canvas from
//! requestAnimationFrame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gate_runner::audio::{AudioSink, WebAudio};
    use gate_runner::consts::*;
    use gate_runner::highscores::LocalStorageStore;
    use gate_runner::platform::web::{WebPresenter, attach_input};
    use gate_runner::presentation::Presenter;
    use gate_runner::renderer::RenderState;
    use gate_runner::{Game, Settings};

    struct App {
        game: Game<LocalStorageStore>,
        presenter: WebPresenter,
        canvas: HtmlCanvasElement,
        audio: WebAudio,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
    }

    /// Backing-store size for the canvas's on-screen box
    fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    impl App {
        /// Follow window and zoom changes before drawing
        fn fit_canvas(&mut self) {
            let (width, height) = canvas_size(&self.canvas);
            if (width, height) != (self.canvas.width(), self.canvas.height()) {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                self.presenter.resize(width, height);
            }
        }

        /// Run fixed ticks for the elapsed time, then draw once
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Input is consumed by the first tick of the frame
                let events = if substeps == 0 {
                    self.presenter.poll_events()
                } else {
                    Vec::new()
                };
                self.game.handle_frame(&events, &mut self.audio);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Too far behind; drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }

            if self.audio.is_muted() != self.settings.muted {
                self.settings.muted = self.audio.is_muted();
                self.settings.save();
            }

            self.fit_canvas();
            self.game.render(&mut self.presenter);
            self.presenter.present_frame();
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| e.to_string())?;

        log::info!("Gate Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let tuning = settings.tuning.clone();
        let field = Vec2::new(tuning.field_width, tuning.field_height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

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

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| e.to_string())?;
        let presenter = WebPresenter::new(render_state, document.get_element_by_id("hud"));
        attach_input(&canvas, presenter.input_queue())?;

        let mut audio = WebAudio::new(settings.volume());
        audio.set_muted(settings.muted);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, seed, LocalStorageStore),
            presenter,
            canvas,
            audio,
            settings,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        request_animation_frame(app);

        log::info!("Gate Runner running (seed {})", seed);
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use gate_runner::highscores::FileStore;
    use gate_runner::platform::terminal::TerminalPresenter;
    use gate_runner::{Game, Settings};
    use glam::Vec2;

    // Logs go to stderr; redirect it (2>gate-runner.log) to keep the screen clean
    env_logger::init();
    log::info!("Gate Runner (terminal) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });

    let mut audio = native_audio(&settings);
    audio.set_muted(settings.muted);

    let tuning = settings.tuning.clone();
    let field = Vec2::new(tuning.field_width, tuning.field_height);
    let mut game = Game::new(tuning, seed, FileStore::new(&settings.high_score_path));

    {
        let mut presenter = TerminalPresenter::new(field)?;
        game.run(&mut presenter, audio.as_mut());
    }

    println!(
        "Score: {}  Best: {}",
        game.state().score,
        game.high_score()
    );
    Ok(())
}

#[cfg(all(not(target_arch = "wasm32"), feature = "sound"))]
fn native_audio(settings: &gate_runner::Settings) -> Box<dyn gate_runner::audio::AudioSink> {
    use gate_runner::audio::{CueBank, RodioAudio};

    let bank = CueBank::load(std::path::Path::new(&settings.assets_dir));
    Box::new(RodioAudio::new(bank, settings.volume()))
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "sound")))]
fn native_audio(_settings: &gate_runner::Settings) -> Box<dyn gate_runner::audio::AudioSink> {
    log::info!("Built without the `sound` feature, cues are silent");
    Box::new(gate_runner::audio::Silent::default())
}
