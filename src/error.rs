use std::fmt;

use thiserror::Error;

/// Programmable pipeline stage a shader belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Reasons the animated background could not be brought up.
///
/// Every variant is terminal for the session: the caller switches to the
/// static fallback and does no further GPU work.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {0}")]
    Link(String),
    #[error("failed to upload quad geometry: {0}")]
    Geometry(String),
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("render loop failed to start: {0}")]
    Launch(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<SetupError> for wasm_bindgen::JsValue {
    fn from(err: SetupError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Non-fatal failures while handing animations to the animation engine.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("animation engine call failed: {0}")]
    Js(String),
    #[error("no elements match {0}")]
    NoTargets(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage() {
        let err = SetupError::Compile {
            stage: ShaderStage::Fragment,
            log: "ERROR: 0:3: syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader failed to compile: ERROR: 0:3: syntax error"
        );
    }

    #[test]
    fn launch_error_keeps_cause() {
        let err = SetupError::Launch("addEventListener threw".to_string());
        assert_eq!(
            err.to_string(),
            "render loop failed to start: addEventListener threw"
        );
    }

    #[test]
    fn config_error_converts() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SetupError = parse.into();
        assert!(matches!(err, SetupError::Config(_)));
    }
}
