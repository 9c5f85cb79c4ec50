use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, Window};

use super::webgl::WebGl;
use crate::frame_loop::{CancelToken, FrameLoop};
use crate::renderer::Renderer;

/// Window size in CSS pixels.
fn viewport_size(window: &Window) -> Option<(u32, u32)> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w as u32, h as u32))
}

/// Size the canvas backing store to the window and tell the renderer.
pub fn fit_to_window(canvas: &HtmlCanvasElement, renderer: &mut Renderer<WebGl>) {
    let Some((w, h)) = window().as_ref().and_then(viewport_size) else {
        return;
    };
    let (w, h) = (w.max(1), h.max(1));
    canvas.set_width(w);
    canvas.set_height(h);
    renderer.resize(w, h);
}

/// Start the render loop; it runs until `cancel` fires.
pub fn start(
    canvas: HtmlCanvasElement,
    renderer: Renderer<WebGl>,
    cancel: CancelToken,
) -> Result<(), JsValue> {
    let win = window().ok_or("no window")?;
    let renderer = Rc::new(RefCell::new(renderer));
    fit_to_window(&canvas, &mut *renderer.borrow_mut());

    // Resize canvas to fit window
    let resize_closure = {
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move || {
            fit_to_window(&canvas, &mut *renderer.borrow_mut());
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut frame_loop = FrameLoop::new(cancel);
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if frame_loop.step(&mut *renderer.borrow_mut(), now).is_break() {
            log::info!("background stopped after {} frames", frame_loop.frames());
            return;
        }

        // schedule next
        let mut scheduled = false;
        if let (Some(window), Some(callback)) = (window(), f.borrow().as_ref()) {
            scheduled = window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .is_ok();
        }
        if !scheduled {
            log::error!("failed to schedule background frame");
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        win.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    Ok(())
}
