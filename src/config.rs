//! Page integration settings.
//!
//! Every field has a default so a page only needs to embed the values it
//! wants to change, e.g. `{"palette": {"deep": [0.0, 0.05, 0.1]}}`.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::animations::PageAnimations;
use crate::error::SetupError;

/// Linear RGB triple in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Id of the optional `<script type="application/json">` element holding a
/// [`Config`] override.
pub const CONFIG_ELEMENT_ID: &str = "ocean-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the `<canvas>` the shader draws into.
    pub canvas_id: String,
    /// Id of the static background shown when the GPU path is unavailable.
    pub fallback_id: String,
    /// Class added to the fallback element to make it visible.
    pub fallback_class: String,
    pub palette: Palette,
    pub log_level: LevelFilter,
    pub animations: PageAnimations,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: "ocean-canvas".to_string(),
            fallback_id: "ocean-fallback".to_string(),
            fallback_class: "active".to_string(),
            palette: Palette::default(),
            log_level: LevelFilter::Info,
            animations: PageAnimations::default(),
        }
    }
}

impl Config {
    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`Config::from_json`] but never fails: a malformed document is
    /// reported and the defaults are used instead.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }
}

/// The four colours the ocean pattern blends between, darkest first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub deep: Rgb,
    pub mid: Rgb,
    pub light: Rgb,
    pub highlight: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            deep: [0.01, 0.06, 0.15],
            mid: [0.02, 0.22, 0.38],
            light: [0.10, 0.48, 0.62],
            highlight: [0.55, 0.85, 0.92],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let config = Config::from_json(
            r#"{"canvas_id": "bg", "palette": {"deep": [0.0, 0.0, 0.0]}, "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.canvas_id, "bg");
        assert_eq!(config.fallback_id, "ocean-fallback");
        assert_eq!(config.palette.deep, [0.0, 0.0, 0.0]);
        assert_eq!(config.palette.mid, Palette::default().mid);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn malformed_document_falls_back() {
        let config = Config::from_json_or_default("{\"canvas_id\": 7");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn palette_is_dark_to_light() {
        let p = Palette::default();
        let luma = |c: Rgb| c[0] * 0.2126 + c[1] * 0.7152 + c[2] * 0.0722;
        assert!(luma(p.deep) < luma(p.mid));
        assert!(luma(p.mid) < luma(p.light));
        assert!(luma(p.light) < luma(p.highlight));
    }
}
