use crate::config::Palette;
use crate::error::{SetupError, ShaderStage};
use crate::gpu::Gpu;
use crate::shaders::{
    fragment_source, POSITION_ATTRIBUTE, QUAD_VERTEX_COUNT, QUAD_VERTICES, RESOLUTION_UNIFORM,
    TIME_UNIFORM, VERTEX_SHADER,
};

/// Uniform values submitted with one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub time: f32,
    pub resolution: (u32, u32),
}

/// Full-screen ocean shader bound to a GPU context.
///
/// Program and quad are fixed once constructed; only the `time` and
/// `resolution` uniforms change afterwards.
pub struct Renderer<G: Gpu> {
    gpu: G,
    #[allow(dead_code)]
    program: G::Program,
    time: Option<G::Uniform>,
    resolution: Option<G::Uniform>,
    start_ms: f64,
    size: (u32, u32),
}

impl<G: Gpu> Renderer<G> {
    /// Build the program and upload the quad. `start_ms` is the timestamp,
    /// on the same clock later passed to [`Renderer::render`], that counts as
    /// elapsed time zero.
    pub fn new(gpu: G, palette: &Palette, start_ms: f64) -> Result<Self, SetupError> {
        let vertex = gpu
            .compile_shader(ShaderStage::Vertex, VERTEX_SHADER)
            .map_err(|log| SetupError::Compile {
                stage: ShaderStage::Vertex,
                log,
            })?;
        let fragment = gpu
            .compile_shader(ShaderStage::Fragment, &fragment_source(palette))
            .map_err(|log| SetupError::Compile {
                stage: ShaderStage::Fragment,
                log,
            })?;
        let program = gpu
            .link_program(&vertex, &fragment)
            .map_err(SetupError::Link)?;
        gpu.use_program(&program);

        gpu.bind_quad(&program, POSITION_ATTRIBUTE, &QUAD_VERTICES)
            .map_err(SetupError::Geometry)?;

        let time = gpu.uniform_location(&program, TIME_UNIFORM);
        let resolution = gpu.uniform_location(&program, RESOLUTION_UNIFORM);
        if time.is_none() || resolution.is_none() {
            log::debug!("background shader has inactive uniforms; uploads will be ignored");
        }

        let mut renderer = Self {
            gpu,
            program,
            time,
            resolution,
            start_ms,
            size: (1, 1),
        };
        // keep `resolution` non-zero until the first real resize
        renderer.resize(1, 1);
        Ok(renderer)
    }

    /// Match the viewport and `resolution` uniform to a new surface size.
    /// Sizes are clamped to at least 1×1.
    pub fn resize(&mut self, width: u32, height: u32) -> (u32, u32) {
        let size = (width.max(1), height.max(1));
        self.gpu.viewport(size.0, size.1);
        self.gpu
            .uniform_vec2(self.resolution.as_ref(), size.0 as f32, size.1 as f32);
        self.size = size;
        size
    }

    /// Seconds since `start_ms`. Timestamps before the start count as zero.
    pub fn elapsed_seconds(&self, now_ms: f64) -> f32 {
        ((now_ms - self.start_ms).max(0.0) / 1000.0) as f32
    }

    /// Draw one frame for the host timestamp `now_ms`.
    pub fn render(&mut self, now_ms: f64) -> Frame {
        let time = self.elapsed_seconds(now_ms);
        self.render_at(time)
    }

    /// Draw one frame with an explicit elapsed time.
    pub fn render_at(&mut self, time: f32) -> Frame {
        self.gpu.uniform_f32(self.time.as_ref(), time);
        self.gpu.draw_triangle_strip(QUAD_VERTEX_COUNT);
        Frame {
            time,
            resolution: self.size,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
