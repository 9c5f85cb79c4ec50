use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::gpu::Gpu;
use crate::renderer::Renderer;

/// Shared stop flag for a [`FrameLoop`]. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Per-tick driver for a [`Renderer`].
///
/// The host decides when ticks happen (`requestAnimationFrame` in the
/// browser); the loop only decides whether to draw and whether to continue.
#[derive(Debug)]
pub struct FrameLoop {
    cancel: CancelToken,
    frames: u64,
}

impl FrameLoop {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel, frames: 0 }
    }

    /// Draw one frame for `now_ms` unless cancelled.
    pub fn step<G: Gpu>(&mut self, renderer: &mut Renderer<G>, now_ms: f64) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        let frame = renderer.render(now_ms);
        if self.frames == 0 {
            log::debug!(
                "first background frame at t={}s, {}x{}",
                frame.time,
                frame.resolution.0,
                frame.resolution.1
            );
        }
        self.frames += 1;
        ControlFlow::Continue(())
    }

    /// Step through `ticks` until they run out or the loop is cancelled.
    /// Returns the number of frames drawn by this call.
    pub fn run_until_cancelled<G, I>(&mut self, renderer: &mut Renderer<G>, ticks: I) -> u64
    where
        G: Gpu,
        I: IntoIterator<Item = f64>,
    {
        let before = self.frames;
        for now_ms in ticks {
            if self.step(renderer, now_ms).is_break() {
                break;
            }
        }
        self.frames - before
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}
