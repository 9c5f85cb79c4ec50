use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

use crate::error::ShaderStage;
use crate::gpu::Gpu;

/// [`Gpu`] over a canvas' WebGL2 context.
pub struct WebGl {
    gl: GL,
}

impl WebGl {
    /// Acquire the `webgl2` context of `canvas`, or `None` if the browser
    /// cannot provide one.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let context = canvas.get_context("webgl2").ok().flatten()?;
        let gl = context.dyn_into::<GL>().ok()?;
        Some(Self { gl })
    }
}

impl Gpu for WebGl {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Uniform = WebGlUniformLocation;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<WebGlShader, String> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or_else(|| "unable to create shader object".to_string())?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            Ok(shader)
        } else {
            let log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            Err(log)
        }
    }

    fn link_program(
        &self,
        vertex: &WebGlShader,
        fragment: &WebGlShader,
    ) -> Result<WebGlProgram, String> {
        let program = self
            .gl
            .create_program()
            .ok_or_else(|| "unable to create program object".to_string())?;
        self.gl.attach_shader(&program, vertex);
        self.gl.attach_shader(&program, fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if linked {
            Ok(program)
        } else {
            let log = self.gl.get_program_info_log(&program).unwrap_or_default();
            self.gl.delete_program(Some(&program));
            Err(log)
        }
    }

    fn use_program(&self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn bind_quad(
        &self,
        program: &WebGlProgram,
        attribute: &str,
        vertices: &[f32],
    ) -> Result<(), String> {
        let location = self.gl.get_attrib_location(program, attribute);
        if location < 0 {
            return Err(format!("attribute `{attribute}` not active"));
        }
        let location = location as u32;

        let vao = self
            .gl
            .create_vertex_array()
            .ok_or_else(|| "unable to create vertex array".to_string())?;
        self.gl.bind_vertex_array(Some(&vao));

        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| "unable to create buffer".to_string())?;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = Float32Array::from(vertices);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        self.gl.enable_vertex_attrib_array(location);
        self.gl
            .vertex_attrib_pointer_with_i32(location, 2, GL::FLOAT, false, 0, 0);
        Ok(())
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn viewport(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn uniform_f32(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    fn uniform_vec2(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32) {
        self.gl.uniform2f(location, x, y);
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, vertex_count);
    }
}
