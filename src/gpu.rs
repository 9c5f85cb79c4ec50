use crate::error::ShaderStage;

/// The slice of a WebGL2 context the background needs.
///
/// The browser implementation wraps `WebGl2RenderingContext`; tests use a
/// recording implementation. Handles are associated types so each backend
/// keeps its native objects.
pub trait Gpu {
    type Shader;
    type Program;
    type Uniform;

    /// Compile one stage, returning the driver's info log on failure.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    /// Link two compiled stages, returning the info log on failure.
    fn link_program(
        &self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    fn use_program(&self, program: &Self::Program);

    /// Upload `vertices` (tightly packed `vec2`s) into a static buffer bound to
    /// `attribute` of `program`.
    fn bind_quad(
        &self,
        program: &Self::Program,
        attribute: &str,
        vertices: &[f32],
    ) -> Result<(), String>;

    /// `None` when the program has no active uniform called `name`.
    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Uniform>;

    fn viewport(&self, width: u32, height: u32);

    /// Uploading to a `None` location is a silent no-op, as in WebGL.
    fn uniform_f32(&self, location: Option<&Self::Uniform>, value: f32);

    fn uniform_vec2(&self, location: Option<&Self::Uniform>, x: f32, y: f32);

    fn draw_triangle_strip(&self, vertex_count: i32);
}
