//! Capability gate between the animated canvas and the static fallback.

use crate::config::Palette;
use crate::error::SetupError;
use crate::gpu::Gpu;
use crate::renderer::Renderer;

/// The page elements the gate toggles when the GPU path is unusable.
pub trait Page {
    /// Make the static fallback background visible.
    fn activate_fallback(&self);

    /// Take the canvas out of the layout.
    fn hide_canvas(&self);
}

/// Switch the page to the static background after `err`.
pub fn engage_fallback<P: Page + ?Sized>(page: &P, err: &SetupError) {
    log::warn!("animated background disabled: {err}");
    page.activate_fallback();
    page.hide_canvas();
}

/// Bring up the renderer on `gpu`, or leave the page on its fallback.
///
/// `gpu` is `None` when no WebGL2 context could be acquired. Any failure is
/// terminal: nothing is drawn and the caller should do no further setup.
pub fn setup_or_fallback<G: Gpu, P: Page + ?Sized>(
    gpu: Option<G>,
    page: &P,
    palette: &Palette,
    start_ms: f64,
) -> Result<Renderer<G>, SetupError> {
    let result = match gpu {
        Some(gpu) => Renderer::new(gpu, palette, start_ms),
        None => Err(SetupError::ContextUnavailable),
    };
    if let Err(err) = &result {
        engage_fallback(page, err);
    }
    result
}

/// Run `launch` with an already set-up renderer, or fall back if it fails.
///
/// Covers the steps after [`setup_or_fallback`] (listener registration, first
/// frame request) so a late failure never leaves a blank canvas.
pub fn launch_or_fallback<T, P, F>(page: &P, launch: F) -> Result<T, SetupError>
where
    P: Page + ?Sized,
    F: FnOnce() -> Result<T, String>,
{
    launch().map_err(|cause| {
        let err = SetupError::Launch(cause);
        engage_fallback(page, &err);
        err
    })
}
