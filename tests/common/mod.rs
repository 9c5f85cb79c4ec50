//! Recording doubles for the GPU and page seams.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ocean_wasm::{Gpu, Page, ShaderStage};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Compile(ShaderStage),
    Link,
    UseProgram,
    BindQuad { attribute: String, vertices: Vec<f32> },
    UniformLocation(String),
    Viewport(u32, u32),
    UniformF32 { name: Option<String>, value: f32 },
    UniformVec2 { name: Option<String>, x: f32, y: f32 },
    Draw { vertex_count: i32 },
}

/// Which step of program setup should fail.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Failure {
    #[default]
    None,
    Compile(ShaderStage),
    Link,
    Quad,
}

/// GPU that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingGpu {
    calls: Rc<RefCell<Vec<Call>>>,
    failure: Failure,
    inactive_uniforms: bool,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::default()
        }
    }

    /// Every uniform lookup reports an inactive uniform.
    pub fn with_inactive_uniforms() -> Self {
        Self {
            inactive_uniforms: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<i32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Draw { vertex_count } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }

    pub fn linked(&self) -> bool {
        self.calls.borrow().contains(&Call::Link)
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Gpu for RecordingGpu {
    type Shader = ShaderStage;
    type Program = ();
    type Uniform = String;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<ShaderStage, String> {
        assert!(source.starts_with("#version 300 es"));
        self.push(Call::Compile(stage));
        if self.failure == Failure::Compile(stage) {
            return Err(format!("ERROR: 0:1: {stage} rejected"));
        }
        Ok(stage)
    }

    fn link_program(&self, vertex: &ShaderStage, fragment: &ShaderStage) -> Result<(), String> {
        assert_eq!(*vertex, ShaderStage::Vertex);
        assert_eq!(*fragment, ShaderStage::Fragment);
        self.push(Call::Link);
        if self.failure == Failure::Link {
            return Err("varyings mismatch".to_string());
        }
        Ok(())
    }

    fn use_program(&self, _program: &()) {
        self.push(Call::UseProgram);
    }

    fn bind_quad(&self, _program: &(), attribute: &str, vertices: &[f32]) -> Result<(), String> {
        self.push(Call::BindQuad {
            attribute: attribute.to_string(),
            vertices: vertices.to_vec(),
        });
        if self.failure == Failure::Quad {
            return Err(format!("attribute `{attribute}` not active"));
        }
        Ok(())
    }

    fn uniform_location(&self, _program: &(), name: &str) -> Option<String> {
        self.push(Call::UniformLocation(name.to_string()));
        (!self.inactive_uniforms).then(|| name.to_string())
    }

    fn viewport(&self, width: u32, height: u32) {
        self.push(Call::Viewport(width, height));
    }

    fn uniform_f32(&self, location: Option<&String>, value: f32) {
        self.push(Call::UniformF32 {
            name: location.cloned(),
            value,
        });
    }

    fn uniform_vec2(&self, location: Option<&String>, x: f32, y: f32) {
        self.push(Call::UniformVec2 {
            name: location.cloned(),
            x,
            y,
        });
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.push(Call::Draw { vertex_count });
    }
}

#[derive(Default)]
pub struct RecordingPage {
    pub fallback_active: Cell<bool>,
    pub canvas_hidden: Cell<bool>,
}

impl Page for RecordingPage {
    fn activate_fallback(&self) {
        self.fallback_active.set(true);
    }

    fn hide_canvas(&self) {
        self.canvas_hidden.set(true);
    }
}
