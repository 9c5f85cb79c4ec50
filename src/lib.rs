//! Animated ocean background for a web page.
//!
//! A single full-screen fragment shader draws layered fractal noise into a
//! `<canvas>`; pages without WebGL2 get a static fallback instead. Scroll and
//! hover animations are described in [`animations`] and handed to the page's
//! animation library when it is present.
//!
//! Everything outside the `wasm` module is target independent, so the render
//! loop, fallback gate and colour function are tested on the host.

pub mod animations;
pub mod config;
pub mod error;
pub mod fallback;
pub mod frame_loop;
pub mod gpu;
pub mod noise;
pub mod renderer;
pub mod shaders;

pub use config::{Config, Palette};
pub use error::{AnimationError, SetupError, ShaderStage};
pub use fallback::{launch_or_fallback, setup_or_fallback, Page};
pub use frame_loop::{CancelToken, FrameLoop};
pub use gpu::Gpu;
pub use renderer::{Frame, Renderer};

#[cfg(target_arch = "wasm32")]
pub use wasm::{fit_to_window, stop, DomPage, WebGl};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

    use crate::config::{Config, CONFIG_ELEMENT_ID};
    use crate::error::SetupError;
    use crate::frame_loop::CancelToken;
    use crate::fallback::{engage_fallback, launch_or_fallback, setup_or_fallback};

    mod animate;
    mod page;
    mod render;
    mod webgl;

    pub use page::DomPage;
    pub use render::fit_to_window;
    pub use webgl::WebGl;

    thread_local! {
        static RUNNING: RefCell<Option<CancelToken>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).ok();
        log::set_max_level(log::LevelFilter::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = load_config(&document);
        log::set_max_level(config.log_level);

        // Animations do not depend on the GPU path.
        if let Err(err) = animate::on_ready(&window, config.animations.clone()) {
            log::warn!("page animations not scheduled: {err:?}");
        }

        // Setup failures already switched the page to its fallback.
        match start_background(&window, &document, &config) {
            Ok(cancel) => RUNNING.with(|running| *running.borrow_mut() = Some(cancel)),
            Err(err) => log::debug!("background not started: {err:?}"),
        }
        Ok(())
    }

    /// Stop the background animation, leaving the last frame on screen.
    #[wasm_bindgen]
    pub fn stop() {
        RUNNING.with(|running| {
            if let Some(cancel) = running.borrow_mut().take() {
                cancel.cancel();
            }
        });
    }

    fn load_config(document: &Document) -> Config {
        document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .map(|json| Config::from_json_or_default(&json))
            .unwrap_or_default()
    }

    fn start_background(
        window: &Window,
        document: &Document,
        config: &Config,
    ) -> Result<CancelToken, JsValue> {
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok());
        let page = DomPage {
            canvas: canvas.clone().map(HtmlElement::from),
            fallback: document.get_element_by_id(&config.fallback_id),
            fallback_class: config.fallback_class.clone(),
        };

        let Some(canvas) = canvas else {
            let err = SetupError::MissingElement(config.canvas_id.clone());
            engage_fallback(&page, &err);
            return Err(err.into());
        };

        let start_ms = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let renderer = setup_or_fallback(
            WebGl::from_canvas(&canvas),
            &page,
            &config.palette,
            start_ms,
        )?;

        let cancel = CancelToken::new();
        launch_or_fallback(&page, || {
            render::start(canvas, renderer, cancel.clone()).map_err(|err| format!("{err:?}"))
        })?;
        log::info!("animated background running");
        Ok(cancel)
    }
}
